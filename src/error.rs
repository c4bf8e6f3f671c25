use std::path::PathBuf;

use thiserror::Error;

/// Type alias for Result with ReportError
pub type Result<T> = std::result::Result<T, ReportError>;

/// Error types for the unread-domain report tool
#[derive(Error, Debug)]
pub enum ReportError {
    /// The OAuth client secret file is missing - nothing can be done without it
    #[error(
        "Client secret file not found at {0:?}. Download the OAuth client \
         credentials for a desktop app from Google Cloud Console and place \
         them at that path (or pass --credentials)."
    )]
    ConfigMissing(PathBuf),

    /// Authentication or consent flow failed
    #[error("Authentication failed: {0}")]
    AuthError(String),

    /// Token refresh was rejected; caller falls back to the full consent flow
    #[error("Token refresh failed: {0}")]
    RefreshFailed(String),

    /// Gmail API returned an error
    #[error("Gmail API error: {0}")]
    ApiError(String),

    /// Network-related error (connection issues, timeouts, etc.)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Gmail API payload was missing required fields
    #[error("Invalid message payload: {0}")]
    InvalidMessage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl ReportError {
    /// Errors that are handled at the point of occurrence by downgrading to a
    /// safe fallback instead of aborting the run
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ReportError::RefreshFailed(_))
    }

    /// Everything that is not recoverable propagates to the top-level handler
    pub fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }
}

impl From<google_gmail1::Error> for ReportError {
    fn from(error: google_gmail1::Error) -> Self {
        match error {
            // HTTP response with a non-success status code
            google_gmail1::Error::Failure(ref response) => {
                let status = response.status();
                ReportError::ApiError(format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ))
            }
            google_gmail1::Error::BadRequest(ref err) => {
                ReportError::ApiError(format!("{}", err))
            }
            // Network/connection errors
            google_gmail1::Error::HttpError(ref err) => {
                ReportError::NetworkError(format!("Connection error: {}", err))
            }
            google_gmail1::Error::Io(err) => ReportError::NetworkError(err.to_string()),
            // All other errors
            _ => ReportError::ApiError(error.to_string()),
        }
    }
}

impl From<reqwest::Error> for ReportError {
    fn from(error: reqwest::Error) -> Self {
        ReportError::NetworkError(error.to_string())
    }
}
