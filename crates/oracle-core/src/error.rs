//! Shared error vocabulary for the Outbreak Oracle crates.
//!
//! Every service crate has its own `thiserror` enum; they all report transport
//! failures as [`NetworkError`] and classify themselves into a [`FailureKind`]
//! so the analysis cycle can surface a single outcome.

use thiserror::Error;

/// Coarse failure taxonomy for one analysis cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Transport failure or non-success status
    Network,
    /// The service answered but had nothing usable (no candidates, unknown city)
    EmptyResult,
    /// The body did not have the expected shape
    Malformed,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Network => write!(f, "network failure"),
            FailureKind::EmptyResult => write!(f, "empty result"),
            FailureKind::Malformed => write!(f, "malformed response"),
        }
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection."
            }
            NetworkError::Timeout => "The request timed out. Please try again.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The server is experiencing issues. Please try again later."
            }
            NetworkError::ServerError { .. } => "The request failed. Please try again.",
            NetworkError::InvalidResponse(_) => {
                "Received an unexpected response. Please try again."
            }
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            NetworkError::InvalidResponse(_) => FailureKind::Malformed,
            _ => FailureKind::Network,
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_messages_depend_on_status() {
        let upstream = NetworkError::ServerError {
            status: 503,
            message: "unavailable".into(),
        };
        assert!(upstream.user_message().contains("later"));

        let client = NetworkError::ServerError {
            status: 400,
            message: "bad".into(),
        };
        assert_eq!(client.user_message(), "The request failed. Please try again.");
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(NetworkError::Timeout.kind(), FailureKind::Network);
        assert_eq!(
            NetworkError::InvalidResponse("eof".into()).kind(),
            FailureKind::Malformed
        );
    }

    #[tokio::test]
    async fn test_connection_refused_maps_to_connection_failed() {
        // Port 9 (discard) is closed on any sane test host.
        let err = reqwest::get("http://127.0.0.1:9/").await.unwrap_err();
        assert!(matches!(
            err.into_network_error(),
            NetworkError::ConnectionFailed(_) | NetworkError::Timeout
        ));
    }
}
