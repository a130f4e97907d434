use thiserror::Error;

/// Application errors
///
/// Fetch failures carry enough context to be rendered as a display
/// string; the pure correlation services never construct these.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("API returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Result type alias for fetch operations
pub type AppResult<T> = Result<T, AppError>;
