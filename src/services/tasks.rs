//! Deadline-driven task reordering.
//!
//! Tasks are passed through untouched; only their order changes. A task's
//! `deadline` field is parsed as `YYYY-MM-DD`; missing, `"none"`, or
//! unparseable deadlines sort after every dated task.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for the task optimizer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptimizeTasksInput {
    #[serde(default)]
    pub tasks: Vec<Value>,
}

/// Reordered tasks plus a fixed explanation.
#[derive(Debug, Clone, Serialize)]
pub struct TaskOptimization {
    pub explanation: String,
    pub optimized_tasks: Vec<Value>,
}

pub fn optimize_tasks(input: OptimizeTasksInput) -> TaskOptimization {
    let mut tasks = input.tasks;
    tasks.sort_by_key(|task| deadline_of(task).unwrap_or(NaiveDate::MAX));

    TaskOptimization {
        explanation: "Tasks reordered based on upcoming deadlines and urgency.".to_string(),
        optimized_tasks: tasks,
    }
}

fn deadline_of(task: &Value) -> Option<NaiveDate> {
    let deadline = task.get("deadline")?.as_str()?;
    if deadline == "none" {
        return None;
    }
    NaiveDate::parse_from_str(deadline, "%Y-%m-%d").ok()
}
