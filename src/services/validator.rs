//! Structural validation of proposed schedules.
//!
//! The AI path hands us string-form time blocks of unknown quality; this
//! module converts them through the time codec and enforces the schedule
//! invariants: every block inside the day window, sorted by start, and
//! non-overlapping. Validation is pure and never mutates its input.

use serde::Deserialize;
use thiserror::Error;

use crate::models::{DayWindow, Schedule, ScheduleBlock, TimeFormatError, TimeOfDay};

/// A schedule item as proposed by the model, before any checking.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawScheduleItem {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub activity: Option<String>,
}

/// Why a proposed schedule was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("schedule item {index} is missing start, end, or activity")]
    MissingField { index: usize },
    #[error("schedule item {index} has an unparseable time: {source}")]
    BadTime {
        index: usize,
        source: TimeFormatError,
    },
    #[error("block {label:?} ({start}-{end}) lies outside the day window")]
    OutOfBounds {
        label: String,
        start: TimeOfDay,
        end: TimeOfDay,
    },
    #[error("block {label:?} overlaps the previous block or is out of order")]
    OverlapOrUnordered { label: String },
}

/// Validator over proposed block sequences.
pub struct ScheduleValidator;

impl ScheduleValidator {
    /// Convert raw string-form items into [`ScheduleBlock`]s, rejecting the
    /// whole sequence on the first structural violation.
    pub fn validate_items(
        items: &[RawScheduleItem],
        window: &DayWindow,
    ) -> Result<Schedule, ValidationError> {
        let mut blocks = Vec::with_capacity(items.len());
        let mut last_end = window.start();

        for (index, item) in items.iter().enumerate() {
            let (Some(start), Some(end), Some(activity)) =
                (&item.start, &item.end, &item.activity)
            else {
                return Err(ValidationError::MissingField { index });
            };

            let start = TimeOfDay::parse(start)
                .map_err(|source| ValidationError::BadTime { index, source })?;
            let end = TimeOfDay::parse(end)
                .map_err(|source| ValidationError::BadTime { index, source })?;

            let block = ScheduleBlock {
                start,
                end,
                label: activity.clone(),
            };
            last_end = Self::check_next(&block, window, last_end)?;
            blocks.push(block);
        }

        Ok(blocks)
    }

    /// Check an already-typed block sequence against the invariants.
    ///
    /// An empty schedule passes; rejecting empty AI results is the
    /// orchestrator's decision, not a structural one.
    pub fn check_blocks(blocks: &[ScheduleBlock], window: &DayWindow) -> Result<(), ValidationError> {
        let mut last_end = window.start();
        for block in blocks {
            last_end = Self::check_next(block, window, last_end)?;
        }
        Ok(())
    }

    fn check_next(
        block: &ScheduleBlock,
        window: &DayWindow,
        last_end: TimeOfDay,
    ) -> Result<TimeOfDay, ValidationError> {
        let in_window = window.start() <= block.start
            && block.start < block.end
            && block.end <= window.end();
        if !in_window {
            return Err(ValidationError::OutOfBounds {
                label: block.label.clone(),
                start: block.start,
                end: block.end,
            });
        }
        if block.start < last_end {
            return Err(ValidationError::OverlapOrUnordered {
                label: block.label.clone(),
            });
        }
        Ok(block.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: &str, end: &str) -> DayWindow {
        DayWindow::new(
            TimeOfDay::parse(start).unwrap(),
            TimeOfDay::parse(end).unwrap(),
        )
        .unwrap()
    }

    fn item(start: &str, end: &str, activity: &str) -> RawScheduleItem {
        RawScheduleItem {
            start: Some(start.to_string()),
            end: Some(end.to_string()),
            activity: Some(activity.to_string()),
        }
    }

    #[test]
    fn test_valid_sequence_converts() {
        let items = vec![
            item("09:00", "10:00", "Deep work"),
            item("10:00", "10:30", "Email"),
        ];
        let blocks =
            ScheduleValidator::validate_items(&items, &window("08:00", "22:00")).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].label, "Deep work");
        assert_eq!(blocks[1].start, TimeOfDay::parse("10:00").unwrap());
    }

    #[test]
    fn test_missing_field_rejected() {
        let items = vec![RawScheduleItem {
            start: Some("09:00".to_string()),
            end: None,
            activity: Some("Gym".to_string()),
        }];
        let err =
            ScheduleValidator::validate_items(&items, &window("08:00", "22:00")).unwrap_err();
        assert!(matches!(err, ValidationError::MissingField { index: 0 }));
    }

    #[test]
    fn test_overlap_rejected() {
        let items = vec![
            item("09:00", "10:00", "A"),
            item("09:30", "10:30", "B"),
        ];
        let err =
            ScheduleValidator::validate_items(&items, &window("08:00", "22:00")).unwrap_err();
        assert!(matches!(err, ValidationError::OverlapOrUnordered { .. }));
    }

    #[test]
    fn test_unordered_rejected() {
        let items = vec![
            item("12:00", "13:00", "Lunch"),
            item("09:00", "10:00", "Earlier"),
        ];
        let err =
            ScheduleValidator::validate_items(&items, &window("08:00", "22:00")).unwrap_err();
        assert!(matches!(err, ValidationError::OverlapOrUnordered { .. }));
    }

    #[test]
    fn test_before_window_rejected() {
        let items = vec![item("07:00", "09:00", "Too early")];
        let err =
            ScheduleValidator::validate_items(&items, &window("08:00", "22:00")).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfBounds { .. }));
    }

    #[test]
    fn test_after_window_rejected() {
        let items = vec![item("21:00", "23:00", "Too late")];
        let err =
            ScheduleValidator::validate_items(&items, &window("08:00", "22:00")).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfBounds { .. }));
    }

    #[test]
    fn test_inverted_block_rejected() {
        let items = vec![item("10:00", "09:00", "Backwards")];
        let err =
            ScheduleValidator::validate_items(&items, &window("08:00", "22:00")).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfBounds { .. }));
    }

    #[test]
    fn test_bad_time_string_rejected() {
        let items = vec![item("nine", "10:00", "A")];
        let err =
            ScheduleValidator::validate_items(&items, &window("08:00", "22:00")).unwrap_err();
        assert!(matches!(err, ValidationError::BadTime { index: 0, .. }));
    }

    #[test]
    fn test_touching_blocks_allowed() {
        let items = vec![
            item("09:00", "10:00", "A"),
            item("10:00", "11:00", "B"),
        ];
        assert!(ScheduleValidator::validate_items(&items, &window("08:00", "22:00")).is_ok());
    }

    #[test]
    fn test_block_spanning_full_window_allowed() {
        let items = vec![item("08:00", "22:00", "Marathon")];
        assert!(ScheduleValidator::validate_items(&items, &window("08:00", "22:00")).is_ok());
    }

    #[test]
    fn test_empty_sequence_is_structurally_valid() {
        assert!(ScheduleValidator::check_blocks(&[], &window("08:00", "22:00")).is_ok());
    }
}
