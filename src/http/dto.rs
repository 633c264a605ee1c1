//! Data Transfer Objects for the HTTP API.
//!
//! Request bodies are defined next to the services that consume them and
//! re-exported here; this module adds the response shapes, which carry
//! wall-clock strings rather than internal time values.

use serde::{Deserialize, Serialize};

use crate::models::ScheduleBlock;

pub use crate::services::health::{HealthInput, HealthReport};
pub use crate::services::orchestrator::{ActivityInput, ScheduleGenerateInput, TaskInput};
pub use crate::services::summary::{DailySummary, DailySummaryInput};
pub use crate::services::tasks::{OptimizeTasksInput, TaskOptimization};

/// One schedule block with externally-facing `HH:MM` times.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleBlockDto {
    pub start: String,
    pub end: String,
    pub activity: String,
}

impl From<&ScheduleBlock> for ScheduleBlockDto {
    fn from(block: &ScheduleBlock) -> Self {
        Self {
            start: block.start.format(),
            end: block.end.format(),
            activity: block.label.clone(),
        }
    }
}

/// Response for schedule generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleGenerateResponse {
    pub schedule: Vec<ScheduleBlockDto>,
    pub reasoning: Vec<String>,
    /// PNG data URL of the rendered timeline, when rendering succeeded.
    pub visual_schedule: Option<String>,
}

/// Liveness probe response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}
