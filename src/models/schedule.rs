//! Domain types for daily schedules.
//!
//! Activities are the planner input; schedule blocks are the validated
//! output. All times are [`TimeOfDay`] values — wall-clock strings only
//! exist at the API boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::time::TimeOfDay;

/// Broad category of an activity, used for break accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Focus,
    Study,
    Work,
    Other,
}

impl ActivityKind {
    /// Parse a user-supplied kind string; unrecognized values fall back to
    /// [`ActivityKind::Other`].
    pub fn parse(text: &str) -> Self {
        match text.trim().to_ascii_lowercase().as_str() {
            "focus" => Self::Focus,
            "study" => Self::Study,
            "work" => Self::Work,
            _ => Self::Other,
        }
    }

    /// Whether the kind counts toward sustained-focus break accounting.
    pub fn is_focus_work(&self) -> bool {
        matches!(self, Self::Focus | Self::Study | Self::Work)
    }
}

/// Scheduling priority of an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Parse a user-supplied priority string; unrecognized values fall back
    /// to [`Priority::Medium`].
    pub fn parse(text: &str) -> Self {
        match text.trim().to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "high" => Self::High,
            _ => Self::Medium,
        }
    }

    /// Numeric rank used for sorting: low=1, medium=2, high=3.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

/// A single activity to be placed into the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    pub duration_minutes: u32,
    pub kind: ActivityKind,
    pub priority: Priority,
}

/// One placed interval of the day.
///
/// Invariant: `start < end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleBlock {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub label: String,
}

/// An ordered sequence of non-overlapping blocks.
pub type Schedule = Vec<ScheduleBlock>;

/// Error produced when a day window is constructed inverted or empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("day window start {start} must precede end {end}")]
pub struct WindowError {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

/// The span of the day available for scheduling.
///
/// Invariant: `start < end`, enforced at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl DayWindow {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, WindowError> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(WindowError { start, end })
        }
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }
}

/// Where the final schedule came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleSource {
    Ai,
    Fallback,
}

/// Outcome of one schedule-generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub schedule: Schedule,
    pub reasoning: Vec<String>,
    pub source: ScheduleSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse_known_values() {
        assert_eq!(ActivityKind::parse("focus"), ActivityKind::Focus);
        assert_eq!(ActivityKind::parse("Study"), ActivityKind::Study);
        assert_eq!(ActivityKind::parse("WORK"), ActivityKind::Work);
        assert_eq!(ActivityKind::parse("other"), ActivityKind::Other);
    }

    #[test]
    fn test_kind_parse_unknown_defaults_to_other() {
        assert_eq!(ActivityKind::parse("deep-work"), ActivityKind::Other);
        assert_eq!(ActivityKind::parse(""), ActivityKind::Other);
    }

    #[test]
    fn test_kind_focus_accounting() {
        assert!(ActivityKind::Focus.is_focus_work());
        assert!(ActivityKind::Study.is_focus_work());
        assert!(ActivityKind::Work.is_focus_work());
        assert!(!ActivityKind::Other.is_focus_work());
    }

    #[test]
    fn test_priority_parse_unknown_defaults_to_medium() {
        assert_eq!(Priority::parse("urgent"), Priority::Medium);
        assert_eq!(Priority::parse(""), Priority::Medium);
    }

    #[test]
    fn test_priority_rank_ordering() {
        assert!(Priority::Low.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::High.rank());
    }

    #[test]
    fn test_window_rejects_inverted() {
        let start = TimeOfDay::parse("22:00").unwrap();
        let end = TimeOfDay::parse("08:00").unwrap();
        assert!(DayWindow::new(start, end).is_err());
    }

    #[test]
    fn test_window_rejects_empty() {
        let t = TimeOfDay::parse("08:00").unwrap();
        assert!(DayWindow::new(t, t).is_err());
    }

    #[test]
    fn test_window_accessors() {
        let start = TimeOfDay::parse("08:00").unwrap();
        let end = TimeOfDay::parse("22:00").unwrap();
        let window = DayWindow::new(start, end).unwrap();
        assert_eq!(window.start(), start);
        assert_eq!(window.end(), end);
    }
}
