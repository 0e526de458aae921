//! Aggregate failure for one analysis cycle.

use oracle_core::FailureKind;
use oracle_environment::EnvironmentError;
use oracle_narrator::NarratorError;
use oracle_news::NewsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Environment fetch failed: {0}")]
    Environment(#[from] EnvironmentError),

    #[error("News fetch failed: {0}")]
    News(#[from] NewsError),

    #[error("Narrative request failed: {0}")]
    Narrator(#[from] NarratorError),
}

impl AnalysisError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Environment(e) => e.kind(),
            Self::News(e) => e.kind(),
            Self::Narrator(e) => e.kind(),
        }
    }

    /// Message shown in the error panel.
    pub fn user_message(&self) -> String {
        match self {
            Self::Environment(e) => e.user_message(),
            Self::News(e) => e.user_message(),
            Self::Narrator(e) => e.user_message(),
        }
    }
}
