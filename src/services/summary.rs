//! Daily wellness summary with a best-effort generated illustration.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::genai::ImageGenerationService;
use crate::services::renderer;

const DEFAULT_MOOD: &str = "productive";

/// Request body for the daily summary endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailySummaryInput {
    pub mood: Option<String>,
}

/// Summary text plus an optional illustration data URL.
#[derive(Debug, Clone, Serialize)]
pub struct DailySummary {
    pub summary: String,
    pub visual: Option<String>,
}

/// Produce the summary sentence and ask the image collaborator for a mood
/// illustration. Image failure yields a summary without a visual, never an
/// error.
pub async fn generate_daily_summary(
    input: DailySummaryInput,
    image: &dyn ImageGenerationService,
) -> DailySummary {
    let mood = input.mood.unwrap_or_else(|| DEFAULT_MOOD.to_string());

    let summary = format!(
        "You had a {mood} day. You maintained progress toward your goals \
and stayed consistent with your habits."
    );

    let prompt = format!(
        "Create a calm, minimal illustration representing a {mood} and balanced day. \
Soft lighting, modern aesthetic."
    );

    let visual = match image.generate(&prompt).await {
        Ok(bytes) => bytes.map(|b| renderer::to_data_url(&b)),
        Err(err) => {
            warn!(error = %err, "summary illustration failed");
            None
        }
    };

    DailySummary { summary, visual }
}
