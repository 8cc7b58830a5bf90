//! ScoreSaber Client Error Types
//!
//! Every failure a fetch operation can surface.

use thiserror::Error;

/// Main error type for ScoreSaber client operations
#[derive(Debug, Error)]
pub enum ScoreSaberError {
    /// Configuration errors (unreadable file, invalid JSON, bad client settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network or HTTP failure that survived the transport's retries
    #[error("Request to '{path}' failed{}: {message}", .status.map(|s| format!(" with status {}", s)).unwrap_or_default())]
    Transport {
        path: String,
        status: Option<u16>,
        message: String,
    },

    /// The service answered without the rate limit reset header
    #[error("Response for '{path}' carried no usable rate limit reset header")]
    MissingRateLimitHeader { path: String },

    /// Payload did not match the expected record shape
    #[error("Unexpected response shape: {0}")]
    Decode(String),

    /// Caller supplied an argument the API cannot express
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ScoreSaberError {
    /// Build a transport error for a path
    pub fn transport(path: &str, status: Option<u16>, message: impl Into<String>) -> Self {
        ScoreSaberError::Transport {
            path: path.to_string(),
            status,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for ScoreSaberError {
    fn from(err: reqwest::Error) -> Self {
        let path = err
            .url()
            .map(|u| u.path().trim_start_matches('/').to_string())
            .unwrap_or_default();
        let status = err.status().map(|s| s.as_u16());

        if err.is_timeout() {
            ScoreSaberError::transport(&path, status, format!("Request timed out: {}", err))
        } else if err.is_connect() {
            ScoreSaberError::transport(&path, status, format!("Connection failed: {}", err))
        } else if err.is_decode() {
            ScoreSaberError::transport(&path, status, format!("Failed to decode body: {}", err))
        } else {
            ScoreSaberError::transport(&path, status, err.to_string())
        }
    }
}

impl From<serde_json::Error> for ScoreSaberError {
    fn from(err: serde_json::Error) -> Self {
        ScoreSaberError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for ScoreSaberError {
    fn from(err: std::io::Error) -> Self {
        ScoreSaberError::Config(format!("IO error: {}", err))
    }
}

/// Result type alias for ScoreSaber client operations
pub type Result<T> = std::result::Result<T, ScoreSaberError>;
