//! Schedule generation pipeline.
//!
//! One pass per request: assemble the constraints, ask the text model for a
//! schedule, parse and validate it, and fall back to the deterministic
//! planner on any failure along that path. The pipeline never fails outward
//! once the request itself is well-formed — it always produces a schedule,
//! and the background image is strictly best-effort.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::genai::{GenAiError, ImageGenerationService, TextGenerationService};
use crate::models::{
    Activity, ActivityKind, DayWindow, GenerationResult, Priority, Schedule, ScheduleSource,
    TimeFormatError, TimeOfDay, WindowError,
};
use crate::services::extractor::{self, ExtractionError};
use crate::services::planner::{self, BreakPolicy};
use crate::services::renderer;
use crate::services::validator::{RawScheduleItem, ScheduleValidator, ValidationError};

const DEFAULT_DAY_START: &str = "08:00";
const DEFAULT_DAY_END: &str = "22:00";
const DEFAULT_ENERGY: &str = "balanced";
const DEFAULT_ACTIVITY_MINUTES: u32 = 30;
const DEFAULT_TASK_MINUTES: u32 = 60;

const FALLBACK_NOTICE: &str =
    "Used deterministic fallback scheduling due to AI output/format limits.";
const AI_REASONING_DEFAULT: &str =
    "Schedule optimized based on energy, priorities, and breaks.";
const BACKGROUND_PROMPT: &str = "Generate a clean minimal planner background with no text: \
white/light theme, modern paper texture, subtle lines, professional.";

/// Raw request body for schedule generation. Every field is optional; the
/// legacy `tasks` shape is accepted when `activities` is absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleGenerateInput {
    pub day_start: Option<String>,
    pub day_end: Option<String>,
    pub energy: Option<String>,
    pub activities: Option<Vec<ActivityInput>>,
    pub tasks: Option<Vec<TaskInput>>,
}

/// One activity as supplied by the caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityInput {
    pub name: Option<String>,
    #[serde(alias = "duration_minutes")]
    pub duration: Option<u32>,
    #[serde(alias = "type")]
    pub kind: Option<String>,
    pub priority: Option<String>,
}

/// Legacy task shape: `title` plus optional `duration`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskInput {
    pub title: Option<String>,
    pub duration: Option<u32>,
}

/// A request whose window and activities have been resolved and typed.
#[derive(Debug, Clone)]
struct AssembledRequest {
    window: DayWindow,
    energy: String,
    activities: Vec<Activity>,
}

/// Malformed request constraints — the only error this pipeline surfaces.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error(transparent)]
    Time(#[from] TimeFormatError),
    #[error(transparent)]
    Window(#[from] WindowError),
}

/// Everything that can go wrong on the AI path. Absorbed into fallback,
/// never propagated; the category label lands in the reasoning trail.
#[derive(Debug, Error)]
enum AiPathError {
    #[error(transparent)]
    Service(#[from] GenAiError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error("model output has no schedule field")]
    MissingSchedule,
    #[error("model returned an empty schedule")]
    EmptySchedule,
    #[error("schedule field has an unexpected shape: {0}")]
    MalformedSchedule(#[from] serde_json::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl AiPathError {
    fn category(&self) -> &'static str {
        match self {
            Self::Service(_) => "ServiceError",
            Self::Extraction(_) => "ExtractionError",
            Self::MissingSchedule => "MissingSchedule",
            Self::EmptySchedule => "EmptySchedule",
            Self::MalformedSchedule(_) => "MalformedSchedule",
            Self::Validation(_) => "ValidationError",
        }
    }
}

/// Final pipeline product: the generation result plus its rendered image.
#[derive(Debug, Clone)]
pub struct ScheduleOutcome {
    pub result: GenerationResult,
    pub visual_schedule: Option<String>,
}

/// Composes extraction, validation, fallback planning, and rendering around
/// the injected generation collaborators.
pub struct ScheduleOrchestrator {
    text: Arc<dyn TextGenerationService>,
    image: Arc<dyn ImageGenerationService>,
}

impl ScheduleOrchestrator {
    pub fn new(
        text: Arc<dyn TextGenerationService>,
        image: Arc<dyn ImageGenerationService>,
    ) -> Self {
        Self { text, image }
    }

    /// Run the full pipeline for one request.
    ///
    /// Only malformed constraints (unparseable or inverted day window) error
    /// out; every AI-path failure degrades to the deterministic fallback.
    pub async fn generate(
        &self,
        input: ScheduleGenerateInput,
    ) -> Result<ScheduleOutcome, RequestError> {
        let request = assemble(input)?;

        let result = match self.attempt_ai(&request).await {
            Ok((schedule, reasoning)) => GenerationResult {
                schedule,
                reasoning,
                source: ScheduleSource::Ai,
            },
            Err(err) => {
                warn!(category = err.category(), error = %err, "AI schedule rejected, using fallback");
                let schedule =
                    planner::plan(&request.activities, &request.window, BreakPolicy::default());
                GenerationResult {
                    schedule,
                    reasoning: vec![
                        FALLBACK_NOTICE.to_string(),
                        format!("Fallback reason: {}", err.category()),
                    ],
                    source: ScheduleSource::Fallback,
                }
            }
        };

        let background = match self.image.generate(BACKGROUND_PROMPT).await {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(error = %err, "background generation failed, rendering plain");
                None
            }
        };

        let visual_schedule =
            match renderer::render_schedule(&result.schedule, background.as_deref()) {
                Ok(png) => Some(renderer::to_data_url(&png)),
                Err(err) => {
                    warn!(error = %err, "schedule rendering failed");
                    None
                }
            };

        Ok(ScheduleOutcome {
            result,
            visual_schedule,
        })
    }

    async fn attempt_ai(
        &self,
        request: &AssembledRequest,
    ) -> Result<(Schedule, Vec<String>), AiPathError> {
        let prompt = build_prompt(request);
        let raw = self.text.generate(&prompt).await?;
        let parsed = extractor::extract(&raw)?;

        let schedule_value = parsed.get("schedule").ok_or(AiPathError::MissingSchedule)?;
        let items: Vec<RawScheduleItem> = serde_json::from_value(schedule_value.clone())?;
        if items.is_empty() {
            return Err(AiPathError::EmptySchedule);
        }
        let schedule = ScheduleValidator::validate_items(&items, &request.window)?;

        let reasoning = match parsed.get("reasoning") {
            Some(Value::Array(entries)) => entries
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => vec![AI_REASONING_DEFAULT.to_string()],
        };

        Ok((schedule, reasoning))
    }
}

/// Resolve defaults and map the legacy `tasks` shape onto activities.
fn assemble(input: ScheduleGenerateInput) -> Result<AssembledRequest, RequestError> {
    let day_start =
        TimeOfDay::parse(input.day_start.as_deref().unwrap_or(DEFAULT_DAY_START))?;
    let day_end = TimeOfDay::parse(input.day_end.as_deref().unwrap_or(DEFAULT_DAY_END))?;
    let window = DayWindow::new(day_start, day_end)?;

    let activities = match input.activities {
        Some(entries) => entries
            .into_iter()
            .map(|a| Activity {
                name: a.name.unwrap_or_default(),
                duration_minutes: a.duration.unwrap_or(DEFAULT_ACTIVITY_MINUTES),
                kind: ActivityKind::parse(a.kind.as_deref().unwrap_or_default()),
                priority: Priority::parse(a.priority.as_deref().unwrap_or_default()),
            })
            .collect(),
        None => input
            .tasks
            .unwrap_or_default()
            .into_iter()
            .map(|t| Activity {
                name: t.title.unwrap_or_default(),
                duration_minutes: t.duration.unwrap_or(DEFAULT_TASK_MINUTES),
                kind: ActivityKind::Focus,
                priority: Priority::Medium,
            })
            .collect(),
    };

    Ok(AssembledRequest {
        window,
        energy: input.energy.unwrap_or_else(|| DEFAULT_ENERGY.to_string()),
        activities,
    })
}

/// Natural-language generation request describing the constraints and the
/// activity list, demanding strict JSON back.
fn build_prompt(request: &AssembledRequest) -> String {
    let activities_json =
        serde_json::to_string(&request.activities).unwrap_or_else(|_| "[]".to_string());

    format!(
        r#"You are an expert personal scheduler.

Create an optimized daily schedule from the provided activities and constraints.

Constraints:
- Day start: {day_start}
- Day end: {day_end}
- Energy profile: {energy}
- Insert breaks (5-15 minutes) after long focus periods.
- Avoid back-to-back heavy focus blocks.
- Keep the schedule realistic and ordered.

Activities (name, duration minutes, kind, priority):
{activities_json}

Return ONLY valid JSON in exactly this format (no markdown, no extra text):
{{
  "schedule": [
    {{"start":"HH:MM","end":"HH:MM","activity":"..."}}
  ],
  "reasoning": [
    "short bullet reason 1",
    "short bullet reason 2"
  ]
}}
"#,
        day_start = request.window.start(),
        day_end = request.window.end(),
        energy = request.energy,
    )
}
