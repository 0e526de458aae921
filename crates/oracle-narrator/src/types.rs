use serde::{Deserialize, Serialize};

/// Free-form prose returned by the generative service.
///
/// Never parsed into fields; only scanned for risk phrases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskNarrative(String);

impl RiskNarrative {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for RiskNarrative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// Wire types for models/{model}:generateContent

#[derive(Debug, Serialize)]
pub(crate) struct GenerateContentRequest<'a> {
    pub contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RequestContent<'a> {
    pub parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RequestPart<'a> {
    pub text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    pub fn from_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    pub content: Option<CandidateContent>,
    #[allow(dead_code)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidatePart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if any
    pub fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|t| !t.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let req = GenerateContentRequest::from_prompt("hello");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"contents": [{"parts": [{"text": "hello"}]}]}));
    }

    #[test]
    fn test_first_text_takes_first_candidate() {
        let resp: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [
                {"content": {"parts": [{"text": "first"}, {"text": "ignored"}], "role": "model"}},
                {"content": {"parts": [{"text": "second"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(resp.first_text().as_deref(), Some("first"));
    }

    #[test]
    fn test_first_text_missing_content() {
        let resp: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{"finishReason": "SAFETY"}]
        }))
        .unwrap();
        assert!(resp.first_text().is_none());

        let empty: GenerateContentResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(empty.first_text().is_none());
    }
}
