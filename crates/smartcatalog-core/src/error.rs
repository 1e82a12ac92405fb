use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("line {line} must contain product name, brand name, and product type separated by commas: '{content}'")]
    MalformedLine { line: usize, content: String },

    #[error("please enter some products to match")]
    EmptyBoq,

    #[error("a BOQ submission is already in flight")]
    SubmissionInFlight,

    #[error("{detail}")]
    Backend { status: u16, detail: String },

    #[error("backend returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("unsupported file {path}: expected a .{expected} file")]
    UnsupportedFile { path: PathBuf, expected: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    /// The backend-provided `detail` message, if this error carries one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            CatalogError::Backend { detail, .. } => Some(detail),
            _ => None,
        }
    }

    /// True for errors raised before anything was sent to the backend.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CatalogError::MalformedLine { .. }
                | CatalogError::EmptyBoq
                | CatalogError::UnsupportedFile { .. }
                | CatalogError::SubmissionInFlight
                | CatalogError::Config(_)
        )
    }
}
