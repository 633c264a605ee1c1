//! Application state for the HTTP server.

use std::sync::Arc;

use crate::genai::{ImageGenerationService, TextGenerationService};
use crate::services::ScheduleOrchestrator;

/// Shared application state passed to all handlers.
///
/// The generation collaborators are constructed once at startup and
/// injected here; handlers never build clients of their own.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ScheduleOrchestrator>,
    pub image: Arc<dyn ImageGenerationService>,
}

impl AppState {
    pub fn new(
        text: Arc<dyn TextGenerationService>,
        image: Arc<dyn ImageGenerationService>,
    ) -> Self {
        Self {
            orchestrator: Arc::new(ScheduleOrchestrator::new(text, Arc::clone(&image))),
            image,
        }
    }
}
