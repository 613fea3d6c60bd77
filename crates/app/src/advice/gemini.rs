//! Gemini `generateContent` client.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{advice::AdviceError, secret::Secret};

pub const DEFAULT_ADVICE_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ADVICE_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API root, e.g. `"https://generativelanguage.googleapis.com"`.
    pub base_url: String,

    /// API key; without one no request is made.
    pub api_key: Option<Secret>,

    /// Model name, e.g. `"gemini-2.5-flash"`.
    pub model: String,

    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct GeminiAdvisor {
    config: GeminiConfig,
    http: Client,
}

impl GeminiAdvisor {
    /// Create a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: GeminiConfig) -> Result<Self, AdviceError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, http })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
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

impl GenerateResponse {
    /// Text of the first candidate, or `None` when it is missing or blank.
    fn reply(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;

        let text: String = content.parts.into_iter().filter_map(|part| part.text).collect();

        Some(text).filter(|text| !text.trim().is_empty())
    }
}

#[async_trait]
impl AdviceService for GeminiAdvisor {
    async fn generate(
        &self,
        system_instruction: &str,
        message: &str,
    ) -> Result<Option<String>, AdviceError> {
        let Some(api_key) = &self.config.api_key else {
            return Err(AdviceError::NotConfigured);
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );

        let body = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: [Part { text: system_instruction }],
            },
            contents: [Content {
                role: Some("user"),
                parts: [Part { text: message }],
            }],
            generation_config: GenerationConfig { temperature: TEMPERATURE },
        };

        debug!(model = %self.config.model, "requesting shopping advice");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key.expose())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(AdviceError::UnexpectedResponse(format!(
                "generateContent failed with status {status}: {text}"
            )));
        }

        let parsed: GenerateResponse = response.json().await?;

        Ok(parsed.reply())
    }
}

#[automock]
#[async_trait]
pub trait AdviceService: Send + Sync {
    /// Ask the model, returning its reply or `None` when it said nothing.
    async fn generate(
        &self,
        system_instruction: &str,
        message: &str,
    ) -> Result<Option<String>, AdviceError>;
}
