//! Client error types

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// In-process transport failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other non-success status
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse failure classification used to pick a recovery affordance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Network hiccup or overloaded server, worth retrying
    Transient,
    /// The requested resource does not exist
    NotFound,
    /// The server rejected or failed the request
    Server,
}

impl FailureKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Transient => "transient",
            Self::NotFound => "not_found",
            Self::Server => "server",
        }
    }
}

impl ClientError {
    /// Map a non-success HTTP status and its body to an error
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::FORBIDDEN => Self::Forbidden(body),
            StatusCode::NOT_FOUND => Self::NotFound(body),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Self::Validation(body),
            _ => Self::Status {
                status: status.as_u16(),
                message: body,
            },
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Http(e) => {
                if e.is_timeout() || e.is_connect() || e.is_request() {
                    FailureKind::Transient
                } else if e.status() == Some(StatusCode::NOT_FOUND) {
                    FailureKind::NotFound
                } else {
                    FailureKind::Server
                }
            }
            Self::Transport(_) => FailureKind::Transient,
            Self::NotFound(_) => FailureKind::NotFound,
            Self::Status { status, .. } => match *status {
                408 | 429 | 502 | 503 | 504 => FailureKind::Transient,
                _ => FailureKind::Server,
            },
            Self::InvalidResponse(_)
            | Self::Unauthorized
            | Self::Forbidden(_)
            | Self::Validation(_)
            | Self::Serialization(_)
            | Self::Config(_) => FailureKind::Server,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind() == FailureKind::Transient
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised by screen operations
#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("Screen is not mounted")]
    NotMounted,

    #[error("Food has not been loaded yet")]
    NotLoaded,

    /// Another request of the same kind is still in flight
    #[error("Operation already in progress: {0}")]
    Busy(&'static str),

    #[error("Order already submitted")]
    AlreadySubmitted,

    #[error(transparent)]
    Api(#[from] ClientError),
}

impl ScreenError {
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            Self::Api(e) => Some(e.kind()),
            _ => None,
        }
    }
}

pub type ScreenResult<T> = Result<T, ScreenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        let err = ClientError::from_status(StatusCode::NOT_FOUND, "missing".into());
        assert_eq!(err.kind(), FailureKind::NotFound);
        assert!(!err.is_retryable());

        let err = ClientError::from_status(StatusCode::SERVICE_UNAVAILABLE, String::new());
        assert_eq!(err.kind(), FailureKind::Transient);
        assert!(err.is_retryable());

        let err = ClientError::from_status(StatusCode::GATEWAY_TIMEOUT, String::new());
        assert_eq!(err.kind(), FailureKind::Transient);

        let err = ClientError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom".into());
        assert_eq!(err.kind(), FailureKind::Server);
        assert_eq!(err.to_string(), "Server returned 500: boom");

        let err = ClientError::from_status(StatusCode::BAD_REQUEST, "bad".into());
        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(err.kind(), FailureKind::Server);
    }

    #[test]
    fn test_transport_is_transient() {
        assert_eq!(
            ClientError::Transport("reset".into()).kind(),
            FailureKind::Transient
        );
    }

    #[test]
    fn test_screen_error_kind() {
        assert_eq!(ScreenError::NotLoaded.kind(), None);
        let err: ScreenError = ClientError::NotFound("food".into()).into();
        assert_eq!(err.kind(), Some(FailureKind::NotFound));
        assert_eq!(err.to_string(), "Not found: food");
    }
}
