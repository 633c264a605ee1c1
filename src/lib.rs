//! # OMNI AI Backend
//!
//! Stateless HTTP API that forwards user data to a generative AI backend
//! to produce a daily schedule, task ordering, a wellness summary, and a
//! finance analysis, then post-processes the output: JSON extraction,
//! structural validation, deterministic fallback scheduling, and raster
//! image composition.
//!
//! ## Architecture
//!
//! - [`models`]: domain types — times of day, activities, schedule blocks
//! - [`genai`]: generation collaborator traits and the Gemini REST client
//! - [`services`]: the schedule pipeline (extract → validate → fallback →
//!   render) plus the simpler analysis services
//! - [`http`]: axum router, handlers, DTOs, and error mapping
//!
//! Every request builds its own entities and discards them with the
//! response; there is no persistence and no cross-request state beyond the
//! shared generation client.

pub mod genai;
pub mod http;
pub mod models;
pub mod services;
