//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to one endpoint and delegates to the service
//! layer. The schedule pipeline never fails outward; the only errors
//! surfaced here are malformed request constraints.

use axum::{extract::State, Json};
use serde_json::{Map, Value};

use super::dto::{
    DailySummary, DailySummaryInput, HealthInput, HealthReport, HealthResponse,
    OptimizeTasksInput, ScheduleBlockDto, ScheduleGenerateInput, ScheduleGenerateResponse,
    TaskOptimization,
};
use super::error::AppError;
use super::state::AppState;
use crate::services::{finance, health, summary, tasks};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
///
/// Liveness probe; returns a fixed status payload.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "omni-ai".to_string(),
    })
}

/// POST /ai/schedule/generate
///
/// Run the schedule pipeline: AI attempt, validation, fallback, rendering.
pub async fn generate_schedule(
    State(state): State<AppState>,
    Json(input): Json<ScheduleGenerateInput>,
) -> HandlerResult<ScheduleGenerateResponse> {
    let outcome = state.orchestrator.generate(input).await?;

    Ok(Json(ScheduleGenerateResponse {
        schedule: outcome
            .result
            .schedule
            .iter()
            .map(ScheduleBlockDto::from)
            .collect(),
        reasoning: outcome.result.reasoning,
        visual_schedule: outcome.visual_schedule,
    }))
}

/// POST /ai/summary/daily
pub async fn daily_summary(
    State(state): State<AppState>,
    Json(input): Json<DailySummaryInput>,
) -> Json<DailySummary> {
    Json(summary::generate_daily_summary(input, state.image.as_ref()).await)
}

/// POST /ai/tasks/optimize
pub async fn optimize_tasks(Json(input): Json<OptimizeTasksInput>) -> Json<TaskOptimization> {
    Json(tasks::optimize_tasks(input))
}

/// POST /ai/health/analyze
pub async fn analyze_health(Json(input): Json<HealthInput>) -> Json<HealthReport> {
    Json(health::analyze_health(input))
}

/// POST /ai/finance/analyze
pub async fn analyze_finances(Json(body): Json<Map<String, Value>>) -> Json<Value> {
    Json(finance::analyze_finances(&body))
}
