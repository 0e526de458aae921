use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Articles requested per search
pub const FETCH_LIMIT: usize = oracle_core::NEWS_PAGE_LIMIT as usize;
/// Articles shown on the dashboard
pub const DISPLAY_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub source_name: String,
    pub published_at: DateTime<Utc>,
    pub description: Option<String>,
    pub url: String,
}

/// Ordered list of recent articles, newest first as returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsDigest {
    articles: Vec<NewsArticle>,
}

impl NewsDigest {
    /// Build a digest, keeping at most [`FETCH_LIMIT`] articles.
    pub fn new(mut articles: Vec<NewsArticle>) -> Self {
        articles.truncate(FETCH_LIMIT);
        Self { articles }
    }

    pub fn articles(&self) -> &[NewsArticle] {
        &self.articles
    }

    /// The subset shown to the user
    pub fn displayed(&self) -> &[NewsArticle] {
        let end = self.articles.len().min(DISPLAY_LIMIT);
        &self.articles[..end]
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }
}

// Wire types for /v2/everything

#[derive(Debug, Deserialize)]
pub(crate) struct EverythingResponse {
    #[serde(default)]
    pub articles: Vec<ApiArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiArticle {
    pub source: ApiSource,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: String,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiSource {
    pub name: Option<String>,
}

impl From<ApiArticle> for NewsArticle {
    fn from(a: ApiArticle) -> Self {
        Self {
            title: a.title.unwrap_or_default(),
            source_name: a.source.name.unwrap_or_else(|| "Unknown".to_string()),
            published_at: a.published_at,
            description: a.description.filter(|d| !d.trim().is_empty()),
            url: a.url,
        }
    }
}
