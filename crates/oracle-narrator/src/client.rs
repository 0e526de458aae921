//! Gemini `generateContent` client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::instrument;

use crate::error::NarratorError;
use crate::types::{GenerateContentRequest, GenerateContentResponse, RiskNarrative};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
const USER_AGENT: &str = "OutbreakOracle/0.1.0";

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: &str, model: &str, timeout: Duration) -> Result<Self, NarratorError> {
        Self::with_base_url(api_key, GEMINI_API_BASE, model, timeout)
    }

    pub fn with_base_url(
        api_key: &str,
        base_url: &str,
        model: &str,
        timeout: Duration,
    ) -> Result<Self, NarratorError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one prompt and return the first candidate's text.
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()), level = "info")]
    pub async fn narrate(&self, prompt: &str) -> Result<RiskNarrative, NarratorError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url,
            urlencoding::encode(&self.model),
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await?;

        let body = self.handle_response(response).await?;

        let text = body.first_text().ok_or(NarratorError::EmptyResult)?;
        tracing::info!("Narrative received ({} chars)", text.len());
        Ok(RiskNarrative::new(text))
    }

    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<GenerateContentResponse, NarratorError> {
        let status = response.status();

        if status.is_success() {
            let text = response.text().await?;
            return serde_json::from_str(&text).map_err(|e| NarratorError::Malformed(e.to_string()));
        }

        let text = response.text().await.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(NarratorError::InvalidApiKey),
            // Gemini reports a bad key as 400 with reason API_KEY_INVALID
            StatusCode::BAD_REQUEST if text.contains("API_KEY_INVALID") => {
                Err(NarratorError::InvalidApiKey)
            }
            _ => Err(NarratorError::Network(oracle_core::NetworkError::ServerError {
                status: status.as_u16(),
                message: text,
            })),
        }
    }
}
