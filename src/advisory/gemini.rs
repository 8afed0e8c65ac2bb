//! Gemini `generateContent` client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::AdvisoryTextGenerator;
use crate::config::AdvisorConfig;
use crate::error::AdvisoryError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the Gemini text generation endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    endpoint: String,
    model: String,
    api_key: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiClient {
    /// Creates a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisoryError::Http`] if the HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, AdvisoryError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AdvisoryError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Creates a client reading the API key from the configured environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisoryError::MissingCredentials`] when the variable is unset or empty.
    pub fn from_config(config: &AdvisorConfig) -> Result<Self, AdvisoryError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AdvisoryError::MissingCredentials(config.api_key_env.clone()))?;

        info!("Initializing advisory client for model {}", config.model);
        Self::new(&config.endpoint, &config.model, api_key)
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

/// Concatenates the text parts of the first candidate.
fn extract_text(response: GenerateResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
    (!text.trim().is_empty()).then_some(text)
}

#[async_trait]
impl AdvisoryTextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, AdvisoryError> {
        let url = self.url();
        debug!("POST {}", url);
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "thinkingConfig": { "thinkingBudget": 0 } },
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AdvisoryError::Http(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {
                let parsed = response
                    .json::<GenerateResponse>()
                    .await
                    .map_err(|e| AdvisoryError::Decode(e.to_string()))?;
                extract_text(parsed).ok_or(AdvisoryError::EmptyResponse)
            }
            status => {
                let message = response.text().await.unwrap_or_default();
                Err(AdvisoryError::Status {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}
