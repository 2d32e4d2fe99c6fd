//! Error types for the usecase survey.

use reqwest::StatusCode;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("HTTP client could not be built: {0}")]
    HttpClient(String),
}

/// Errors on the submission path.
///
/// None of these reach the user. They are produced so the controller can
/// log what happened before discarding them.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Survey was not reached from registration")]
    InvalidEntry,

    #[error("Analytics endpoint answered {status}")]
    Http { status: StatusCode },

    #[error("Analytics request failed: {0}")]
    RequestFailed(String),

    #[error("No async runtime available to send the report: {0}")]
    NoRuntime(String),
}

impl From<reqwest::Error> for ReportError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => Self::Http { status },
            None => Self::RequestFailed(e.to_string()),
        }
    }
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
