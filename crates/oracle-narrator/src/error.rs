//! Narrator errors.

use oracle_core::{FailureKind, NetworkError, ReqwestErrorExt};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NarratorError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Invalid generative-text API key")]
    InvalidApiKey,

    #[error("Malformed narrator response: {0}")]
    Malformed(String),

    #[error("Narrator returned no candidates")]
    EmptyResult,
}

impl From<reqwest::Error> for NarratorError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.into_network_error())
    }
}

impl NarratorError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(e) => e.user_message().to_string(),
            Self::InvalidApiKey => "Generative-text API key is invalid. Check settings.".to_string(),
            Self::Malformed(_) => "The analysis service sent an unexpected response.".to_string(),
            Self::EmptyResult => "No analysis was returned. Please try again.".to_string(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Network(e) => e.kind(),
            Self::InvalidApiKey => FailureKind::Network,
            Self::Malformed(_) => FailureKind::Malformed,
            Self::EmptyResult => FailureKind::EmptyResult,
        }
    }
}
