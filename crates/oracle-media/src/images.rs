//! Background photo lookup via the Pexels search API.

use std::sync::Arc;
use std::time::Duration;

use oracle_core::{NetworkError, ReqwestErrorExt};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

const PEXELS_API_BASE: &str = "https://api.pexels.com";
const USER_AGENT: &str = "OutbreakOracle/0.1.0";

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Image search failed with status {0}")]
    Status(u16),

    #[error("Malformed image response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for ImageError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.into_network_error())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    src: PhotoSources,
}

#[derive(Debug, Deserialize)]
struct PhotoSources {
    large: Option<String>,
}

/// Finds a large stock photo matching the city and current weather.
#[derive(Debug, Clone)]
pub struct BackgroundResolver {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl BackgroundResolver {
    pub fn new(api_key: &str, timeout: Duration) -> Result<Self, ImageError> {
        Self::with_base_url(api_key, PEXELS_API_BASE, timeout)
    }

    pub fn with_base_url(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self, ImageError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Large-image URL of the first search hit, or `None` on any failure.
    pub async fn resolve(&self, city: &str, weather_description: &str) -> Option<String> {
        match self.try_resolve(city, weather_description).await {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Background image lookup failed: {}", e);
                None
            }
        }
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn try_resolve(
        &self,
        city: &str,
        weather_description: &str,
    ) -> Result<Option<String>, ImageError> {
        if self.api_key.is_empty() {
            tracing::debug!("No stock-photo API key, skipping background lookup");
            return Ok(None);
        }

        let url = format!("{}/v1/search", self.base_url);
        let query = format!("{} {}", city, weather_description);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.api_key.as_str())
            .query(&[("query", query.as_str()), ("per_page", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        let body: SearchResponse =
            serde_json::from_str(&text).map_err(|e| ImageError::Malformed(e.to_string()))?;

        Ok(body.photos.into_iter().next().and_then(|p| p.src.large))
    }
}
