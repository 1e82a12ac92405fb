use crate::boq::BoqSummary;
use crate::error::CatalogError;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeLevel::Info => write!(f, "info"),
            NoticeLevel::Success => write!(f, "success"),
            NoticeLevel::Warning => write!(f, "warning"),
            NoticeLevel::Error => write!(f, "error"),
        }
    }
}

/// A transient message for the user about the outcome of an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, title: &str, description: impl Into<String>) -> Self {
        Notice {
            level,
            title: title.to_string(),
            description: description.into(),
        }
    }

    pub fn info(title: &str, description: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, title, description)
    }

    pub fn success(description: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, "Success", description)
    }

    /// Error notice for a failed action. Validation errors and backend
    /// `detail` messages are shown verbatim; anything else gets `fallback`.
    pub fn from_error(err: &CatalogError, fallback: &str) -> Self {
        let description = match err.detail() {
            Some(detail) => detail.to_string(),
            None if err.is_validation() => err.to_string(),
            None => fallback.to_string(),
        };
        Self::new(NoticeLevel::Error, "Error", description)
    }

    /// Notice shown after a BOQ batch has been matched.
    pub fn for_boq(summary: &BoqSummary) -> Self {
        if summary.all_found() {
            Self::success("All items processed successfully")
        } else {
            Self::new(
                NoticeLevel::Warning,
                "Warning",
                format!(
                    "{} of {} item(s) had no matches. Please check the results carefully.",
                    summary.not_found, summary.total
                ),
            )
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}
