//! News search errors.

use oracle_core::{FailureKind, NetworkError, ReqwestErrorExt};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NewsError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Invalid news API key")]
    InvalidApiKey,

    #[error("News service rejected the query: {0}")]
    Rejected(String),

    #[error("Malformed news response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for NewsError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.into_network_error())
    }
}

impl NewsError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(e) => e.user_message().to_string(),
            Self::InvalidApiKey => "News API key is invalid. Check settings.".to_string(),
            Self::Rejected(msg) => format!("News search failed: {}", msg),
            Self::Malformed(_) => "The news service sent an unexpected response.".to_string(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Network(e) => e.kind(),
            Self::InvalidApiKey | Self::Rejected(_) => FailureKind::Network,
            Self::Malformed(_) => FailureKind::Malformed,
        }
    }
}
