//! Generative AI collaborator interfaces.
//!
//! The orchestrator and the summary service depend on these traits rather
//! than on a concrete client, so tests can inject deterministic doubles and
//! the real client is constructed exactly once at startup.

use async_trait::async_trait;
use thiserror::Error;

pub mod gemini;

pub use gemini::GeminiClient;

/// Failure of an outbound generation call.
#[derive(Debug, Error)]
pub enum GenAiError {
    #[error("generation request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("generation API returned http {status}: {body}")]
    Api { status: u16, body: String },
    #[error("generation API returned no candidates")]
    EmptyResponse,
}

/// Text-generation collaborator: prompt in, raw model text out.
#[async_trait]
pub trait TextGenerationService: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenAiError>;
}

/// Image-generation collaborator: prompt in, raw image bytes out.
///
/// `Ok(None)` means the model answered without an inline image; callers
/// treat that the same as any other missing background.
#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Option<Vec<u8>>, GenAiError>;
}
