use crate::error::CatalogError;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_STORAGE_URL: &str = "https://storage.googleapis.com/smartcatalog-storage";

/// Which backend route accepts catalog PDF uploads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UploadRoute {
    #[default]
    Upload,
    UploadPdf,
}

impl UploadRoute {
    pub fn path(self) -> &'static str {
        match self {
            UploadRoute::Upload => "/upload",
            UploadRoute::UploadPdf => "/upload-pdf",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<UploadRoute> {
        match s.trim().trim_start_matches('/').to_lowercase().as_str() {
            "upload" => Some(UploadRoute::Upload),
            "upload-pdf" | "upload_pdf" => Some(UploadRoute::UploadPdf),
            _ => None,
        }
    }
}

/// Where the backend and the PDF storage live.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub storage_url: String,
    pub timeout: Duration,
    pub upload_route: UploadRoute,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            storage_url: DEFAULT_STORAGE_URL.to_string(),
            timeout: Duration::from_secs(60),
            upload_route: UploadRoute::Upload,
        }
    }
}

impl ClientConfig {
    /// Load configuration from `SMARTCATALOG_*` environment variables,
    /// falling back to defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_url =
            std::env::var("SMARTCATALOG_API_URL").unwrap_or(defaults.api_url);
        let storage_url =
            std::env::var("SMARTCATALOG_STORAGE_URL").unwrap_or(defaults.storage_url);

        let timeout = std::env::var("SMARTCATALOG_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        let upload_route = std::env::var("SMARTCATALOG_UPLOAD_ROUTE")
            .ok()
            .and_then(|s| UploadRoute::from_str_loose(&s))
            .unwrap_or(defaults.upload_route);

        Self {
            timeout,
            upload_route,
            ..Self::default()
        }
        .with_api_url(api_url)
        .with_storage_url(storage_url)
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_storage_url(mut self, url: impl Into<String>) -> Self {
        self.storage_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        for (name, url) in [("API", &self.api_url), ("storage", &self.storage_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(CatalogError::Config(format!(
                    "{name} URL '{url}' must start with http:// or https://"
                )));
            }
        }
        if self.timeout.is_zero() {
            return Err(CatalogError::Config("timeout must be positive".into()));
        }
        Ok(())
    }
}
