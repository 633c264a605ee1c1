//! Router configuration for the HTTP API.
//!
//! This module sets up all routes and middleware (CORS, compression,
//! tracing) and creates the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let ai = Router::new()
        .route("/schedule/generate", post(handlers::generate_schedule))
        .route("/summary/daily", post(handlers::daily_summary))
        .route("/tasks/optimize", post(handlers::optimize_tasks))
        .route("/health/analyze", post(handlers::analyze_health))
        .route("/finance/analyze", post(handlers::analyze_finances));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/ai", ai)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genai::{GenAiError, ImageGenerationService, TextGenerationService};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct NullText;

    #[async_trait]
    impl TextGenerationService for NullText {
        async fn generate(&self, _prompt: &str) -> Result<String, GenAiError> {
            Err(GenAiError::EmptyResponse)
        }
    }

    struct NullImage;

    #[async_trait]
    impl ImageGenerationService for NullImage {
        async fn generate(&self, _prompt: &str) -> Result<Option<Vec<u8>>, GenAiError> {
            Ok(None)
        }
    }

    #[test]
    fn test_router_creation() {
        let state = AppState::new(Arc::new(NullText), Arc::new(NullImage));
        let _router = create_router(state);
        // If we got here, router was created successfully
    }
}
