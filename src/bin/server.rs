//! OMNI AI HTTP Server Binary
//!
//! Entry point for the OMNI AI REST API server. It constructs the Gemini
//! client from the environment, sets up the HTTP router, and starts
//! serving requests.
//!
//! # Environment Variables
//!
//! - `GENAI_API_KEY`: API credential for the generation services (required)
//! - `GENAI_BASE_URL`: Generation API base URL (default: Google endpoint)
//! - `GENAI_TEXT_MODEL` / `GENAI_IMAGE_MODEL`: model overrides
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8000)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use omni_ai::genai::GeminiClient;
use omni_ai::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting OMNI AI HTTP Server");

    // A missing credential is a startup failure, not a per-request error.
    let client = Arc::new(GeminiClient::from_env()?);
    info!("Generation client initialized");

    let state = AppState::new(client.clone(), client);
    let app = create_router(state);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8000);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
