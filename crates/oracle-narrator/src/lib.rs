//! Generative-text narration of outbreak risk.
//!
//! One `generateContent` request per prompt, no retries, no streaming.

pub mod client;
pub mod error;
pub mod types;

pub use client::GeminiClient;
pub use error::NarratorError;
pub use types::RiskNarrative;
