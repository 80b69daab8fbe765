//! Platform API error types.

use thiserror::Error;

/// Result type for platform API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur while talking to the platform control plane.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The HTTP request could not be built or sent, or its body could not be read.
    #[error("request to platform failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Failed to deserialize a response body from JSON.
    #[error("failed to deserialize response: {0}")]
    DeserializeFailed(#[source] serde_json::Error),

    /// The secret key was rejected.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other non-success status.
    #[error("platform error: {message} (status: {status})")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error message reported by the platform.
        message: String,
    },

    /// The response was well-formed JSON but not what the operation expects.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// A bounded wait gave up before the resource became ready.
    #[error("{resource} not ready after {attempts} attempts")]
    PollTimeout {
        /// What was being waited on.
        resource: String,
        /// Number of fetches issued.
        attempts: u32,
    },
}

impl ApiError {
    /// Create a status error.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Check if the resource was missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if re-issuing the same call could succeed.
    pub fn is_retriable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::PollTimeout { .. } => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err)
    }
}
