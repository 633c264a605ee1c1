//! Reqwest-based client for the Gemini `generateContent` REST surface.
//!
//! One client instance serves both the text and the image collaborator
//! traits; the model name differs per call.

use std::env;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use super::{GenAiError, ImageGenerationService, TextGenerationService};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Outbound calls must not block a request handler indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(45);

/// Client configuration, resolved from the environment.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
}

impl GeminiConfig {
    /// Read configuration from the environment.
    ///
    /// `GENAI_API_KEY` is required; its absence is a startup failure, never
    /// a per-request error. The remaining variables have defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = env::var("GENAI_API_KEY").context("GENAI_API_KEY not set")?;
        Ok(Self {
            api_key,
            base_url: env::var("GENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            text_model: env::var("GENAI_TEXT_MODEL")
                .unwrap_or_else(|_| DEFAULT_TEXT_MODEL.to_string()),
            image_model: env::var("GENAI_IMAGE_MODEL")
                .unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string()),
        })
    }
}

/// Gemini REST client implementing both generation traits.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<GenerateContentResponse, GenAiError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, model
        );
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                    inline_data: None,
                }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenAiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl TextGenerationService for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenAiError> {
        let response = self
            .generate_content(&self.config.text_model, prompt)
            .await?;
        let text = response.text();
        if text.is_empty() {
            return Err(GenAiError::EmptyResponse);
        }
        Ok(text)
    }
}

#[async_trait]
impl ImageGenerationService for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<Option<Vec<u8>>, GenAiError> {
        let response = self
            .generate_content(&self.config.image_model, prompt)
            .await?;
        Ok(response.inline_image())
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(
        default,
        rename = "inlineData",
        alias = "inline_data",
        skip_serializing_if = "Option::is_none"
    )]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct InlineData {
    #[serde(rename = "mimeType", alias = "mime_type")]
    mime_type: String,
    /// Base64-encoded payload.
    data: String,
}

#[derive(Debug, Clone, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenated text of every text part across candidates.
    fn text(&self) -> String {
        let mut out = String::new();
        for candidate in &self.candidates {
            let Some(content) = &candidate.content else {
                continue;
            };
            for part in &content.parts {
                if let Some(text) = &part.text {
                    out.push_str(text);
                }
            }
        }
        out
    }

    /// First inline image payload, decoded. Undecodable data counts as no
    /// image: background generation is best-effort end to end.
    fn inline_image(&self) -> Option<Vec<u8>> {
        for candidate in &self.candidates {
            let Some(content) = &candidate.content else {
                continue;
            };
            for part in &content.parts {
                if let Some(inline) = &part.inline_data {
                    return BASE64.decode(&inline.data).ok();
                }
            }
        }
        None
    }
}
