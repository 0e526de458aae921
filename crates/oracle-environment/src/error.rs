//! Environment fetch errors.

use oracle_core::{FailureKind, NetworkError, ReqwestErrorExt};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnvironmentError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Invalid weather API key")]
    InvalidApiKey,

    #[error("Malformed weather response: {0}")]
    Malformed(String),

    #[error("Empty weather response: {0}")]
    EmptyResult(String),
}

impl From<reqwest::Error> for EnvironmentError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.into_network_error())
    }
}

impl EnvironmentError {
    /// User-friendly error message for display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(e) => e.user_message().to_string(),
            Self::LocationNotFound(_) => "Location not found. Check the city and try again.".to_string(),
            Self::InvalidApiKey => "Weather API key is invalid. Check settings.".to_string(),
            Self::Malformed(_) => "The weather service sent an unexpected response.".to_string(),
            Self::EmptyResult(what) => format!("No weather data available ({}).", what),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Network(e) => e.kind(),
            Self::InvalidApiKey => FailureKind::Network,
            Self::LocationNotFound(_) | Self::EmptyResult(_) => FailureKind::EmptyResult,
            Self::Malformed(_) => FailureKind::Malformed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_user_messages() {
        assert!(EnvironmentError::LocationNotFound("atlantis".into())
            .user_message()
            .contains("Location not found"));
        assert!(EnvironmentError::EmptyResult("air quality".into())
            .user_message()
            .contains("air quality"));
    }

    #[test]
    fn test_kinds() {
        assert_eq!(
            EnvironmentError::LocationNotFound("x".into()).kind(),
            FailureKind::EmptyResult
        );
        assert_eq!(
            EnvironmentError::Malformed("x".into()).kind(),
            FailureKind::Malformed
        );
        assert_eq!(
            EnvironmentError::Network(NetworkError::Timeout).kind(),
            FailureKind::Network
        );
    }
}
