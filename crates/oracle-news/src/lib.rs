//! Recent health news for a place, used by the news variant of the analysis.

pub mod client;
pub mod error;
pub mod types;

pub use client::{health_query, NewsClient, RECENCY_DAYS};
pub use error::NewsError;
pub use types::{NewsArticle, NewsDigest, DISPLAY_LIMIT, FETCH_LIMIT};
