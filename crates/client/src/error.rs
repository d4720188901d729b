//! Client error types.

use finwise_shared::AppError;
use thiserror::Error;

/// Result type alias using `ClientError`.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors returned by [`ApiClient`](crate::ApiClient).
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend answered 401. The token has already been cleared and the
    /// unauthorized hook has run.
    #[error("Session expired or missing: {0}")]
    Unauthorized(String),

    /// The backend answered with any other non-success status.
    #[error(transparent)]
    Api(AppError),

    /// The request never produced a response (connection, timeout, TLS).
    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response body did not have the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl ClientError {
    /// Returns true if the session was rejected.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// HTTP status of the failure, when the backend answered at all.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::Api(e) => Some(e.status_code()),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err)
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Unauthorized(message) => Self::Unauthorized(message),
            ClientError::Api(e) => e,
            ClientError::Transport(e) => Self::Internal(e.to_string()),
            ClientError::Decode(message) => Self::Internal(message),
        }
    }
}
