//! NewsAPI `everything` search for disease news about a place.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Days, NaiveDate};
use oracle_environment::Place;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::instrument;

use crate::error::NewsError;
use crate::types::{EverythingResponse, NewsArticle, NewsDigest, FETCH_LIMIT};

const NEWS_API_BASE: &str = "https://newsapi.org";
const USER_AGENT: &str = "OutbreakOracle/0.1.0";

/// Only articles published within this many days are requested
pub const RECENCY_DAYS: u64 = 7;

const DISEASE_TERMS: &[&str] = &[
    "dengue", "malaria", "flu", "fever", "outbreak", "disease", "epidemic",
];

/// Boolean query joining disease terms with the place name.
pub fn health_query(place: &Place) -> String {
    format!(
        "({}) AND ({} OR {})",
        DISEASE_TERMS.join(" OR "),
        place.city,
        place.region
    )
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewsClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
    page_size: usize,
}

impl NewsClient {
    pub fn new(api_key: &str, timeout: Duration) -> Result<Self, NewsError> {
        Self::with_base_url(api_key, NEWS_API_BASE, timeout)
    }

    pub fn with_base_url(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self, NewsError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            page_size: FETCH_LIMIT,
        })
    }

    /// Override the number of requested articles (never above [`FETCH_LIMIT`]).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.clamp(1, FETCH_LIMIT);
        self
    }

    /// Search recent health news for `place`, newest first.
    #[instrument(skip(self), level = "info")]
    pub async fn health_news(&self, place: &Place, today: NaiveDate) -> Result<NewsDigest, NewsError> {
        let url = format!("{}/v2/everything", self.base_url);
        let from = today
            .checked_sub_days(Days::new(RECENCY_DAYS))
            .unwrap_or(today)
            .format("%Y-%m-%d")
            .to_string();
        let query = health_query(place);
        let page_size = self.page_size.to_string();

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", self.api_key.as_str())
            .query(&[
                ("q", query.as_str()),
                ("from", from.as_str()),
                ("sortBy", "publishedAt"),
                ("language", "en"),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Self::map_error(status, &text));
        }

        let body: EverythingResponse =
            serde_json::from_str(&text).map_err(|e| NewsError::Malformed(e.to_string()))?;

        let articles: Vec<NewsArticle> = body
            .articles
            .into_iter()
            .take(self.page_size)
            .map(NewsArticle::from)
            .collect();

        tracing::info!("Found {} health articles for {}", articles.len(), place);
        Ok(NewsDigest::new(articles))
    }

    fn map_error(status: StatusCode, text: &str) -> NewsError {
        let body: Option<ApiErrorBody> = serde_json::from_str(text).ok();
        let code = body.as_ref().and_then(|b| b.code.clone()).unwrap_or_default();
        let message = body
            .and_then(|b| b.message)
            .unwrap_or_else(|| text.to_string());

        if status == StatusCode::UNAUTHORIZED || code == "apiKeyInvalid" || code == "apiKeyMissing" {
            NewsError::InvalidApiKey
        } else if status == StatusCode::BAD_REQUEST {
            NewsError::Rejected(message)
        } else {
            NewsError::Network(oracle_core::NetworkError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> NewsClient {
        NewsClient::with_base_url("news_key", &server.uri(), Duration::from_secs(5)).unwrap()
    }

    fn api_article(n: usize) -> serde_json::Value {
        serde_json::json!({
            "source": {"id": null, "name": "Health Wire"},
            "title": format!("Outbreak report {}", n),
            "description": "Cases reported in the city",
            "url": format!("https://news.example/{}", n),
            "publishedAt": "2026-10-15T08:30:00Z"
        })
    }

    #[test]
    fn test_health_query() {
        let q = health_query(&Place::new("Delhi", "India"));
        assert_eq!(
            q,
            "(dengue OR malaria OR flu OR fever OR outbreak OR disease OR epidemic) AND (Delhi OR India)"
        );
    }

    #[tokio::test]
    async fn test_health_news_request_and_cap() {
        let server = MockServer::start().await;
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();

        Mock::given(method("GET"))
            .and(path("/v2/everything"))
            .and(header("X-Api-Key", "news_key"))
            .and(query_param("from", "2026-10-10"))
            .and(query_param("sortBy", "publishedAt"))
            .and(query_param("language", "en"))
            .and(query_param("q", health_query(&Place::default())))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ok",
                "totalResults": 12,
                "articles": (0..12).map(api_article).collect::<Vec<_>>()
            })))
            .expect(1)
            .mount(&server)
            .await;

        let digest = client(&server).health_news(&Place::default(), today).await.unwrap();
        assert_eq!(digest.len(), 10);
        assert_eq!(digest.displayed().len(), 5);
        assert_eq!(digest.articles()[0].source_name, "Health Wire");
    }

    #[tokio::test]
    async fn test_invalid_key() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/everything"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "status": "error", "code": "apiKeyInvalid", "message": "Your API key is invalid"
            })))
            .mount(&server)
            .await;

        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let result = client(&server).health_news(&Place::default(), today).await;
        assert!(matches!(result, Err(NewsError::InvalidApiKey)));
    }

    #[tokio::test]
    async fn test_rejected_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/everything"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "status": "error", "code": "parameterInvalid", "message": "bad from date"
            })))
            .mount(&server)
            .await;

        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let result = client(&server).health_news(&Place::default(), today).await;
        assert!(matches!(result, Err(NewsError::Rejected(msg)) if msg == "bad from date"));
    }
}
