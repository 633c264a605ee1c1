//! HTTP server module for the OMNI AI backend.
//!
//! Axum-based REST surface over the service layer. Handlers stay thin:
//! request parsing and response shaping here, behavior in `services`.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
