use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::ai::{AiError, TextGenerator};

/// Name of the credential the client needs, as shown in errors.
const API_KEY_NAME: &str = "GEMINI_API_KEY";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    candidate_count: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Client for the Gemini `generateContent` endpoint.
///
/// A missing API key is only reported when a call is made.
pub struct GeminiClient {
    api_key: Option<String>,
    base_url: String,
    client: Client,
}

impl GeminiClient {
    /// Build a client whose requests give up after `timeout`.
    pub fn new(
        api_key: Option<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    fn build_url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    fn extract_text(response: GenerateResponse) -> Result<String, AiError> {
        if let Some(err) = response.error {
            return Err(AiError::EmptyResponse(err.message));
        }
        response
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
            .ok_or_else(|| AiError::EmptyResponse("no candidates".to_string()))
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn generate_json(&self, model: &str, prompt: &str) -> Result<String, AiError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(AiError::MissingCredentials(API_KEY_NAME))?;

        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                candidate_count: 1,
            },
        };

        debug!("Sending generateContent request");

        let response = self
            .client
            .post(self.build_url(model))
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            let message = serde_json::from_str::<GenerateResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(AiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| AiError::EmptyResponse(format!("unreadable response: {}", e)))?;
        let text = Self::extract_text(parsed)?;
        debug!(reply_len = text.len(), "Received Gemini reply");
        Ok(text)
    }
}
