//! Deterministic fallback scheduling.
//!
//! Used whenever the AI path fails or is unavailable. Activities are packed
//! front-to-back into the day window in priority order, with a break
//! inserted once enough sustained focus work has accumulated. The output
//! satisfies the schedule invariants by construction: the cursor only moves
//! forward and never past the window end.

use crate::models::{Activity, DayWindow, Schedule, ScheduleBlock, TimeOfDay};

/// Break insertion policy for sustained focus work.
#[derive(Debug, Clone, Copy)]
pub struct BreakPolicy {
    /// Accumulated focus minutes that trigger a break.
    pub every_minutes: u32,
    /// Length of an inserted break.
    pub length_minutes: u32,
}

impl Default for BreakPolicy {
    fn default() -> Self {
        Self {
            every_minutes: 50,
            length_minutes: 10,
        }
    }
}

/// Label used when an activity has no usable name.
const UNNAMED_ACTIVITY: &str = "Activity";

/// Label of inserted break blocks.
const BREAK_LABEL: &str = "Break";

/// Pack `activities` into `window`, high priority first, focus-type
/// activities preferred within equal priority.
///
/// Packing stops at the first activity that no longer fits; remaining
/// activities are dropped silently (the day is full). Zero-duration
/// activities are skipped: a block cannot be empty. Breaks are only
/// inserted between activities, never after the last one.
pub fn plan(activities: &[Activity], window: &DayWindow, policy: BreakPolicy) -> Schedule {
    let mut ordered: Vec<&Activity> = activities.iter().collect();
    // Stable sort, descending: ties keep their input order.
    ordered.sort_by(|a, b| sort_key(b).cmp(&sort_key(a)));

    let day_end = u32::from(window.end().minutes());
    let mut cursor = u32::from(window.start().minutes());
    let mut focus_accum: u32 = 0;
    let mut out: Schedule = Vec::new();

    for (index, activity) in ordered.iter().enumerate() {
        let duration = activity.duration_minutes;
        if duration == 0 {
            continue;
        }
        if cursor + duration > day_end {
            break;
        }

        let label = if activity.name.trim().is_empty() {
            UNNAMED_ACTIVITY.to_string()
        } else {
            activity.name.clone()
        };
        out.push(block(cursor, cursor + duration, label));
        cursor += duration;

        if activity.kind.is_focus_work() {
            focus_accum += duration;
            let break_fits = cursor + policy.length_minutes <= day_end;
            let more_to_place = index + 1 < ordered.len();
            if focus_accum >= policy.every_minutes && break_fits && more_to_place {
                out.push(block(
                    cursor,
                    cursor + policy.length_minutes,
                    BREAK_LABEL.to_string(),
                ));
                cursor += policy.length_minutes;
                focus_accum = 0;
            }
        }
    }

    out
}

fn sort_key(activity: &Activity) -> (u8, bool) {
    (
        activity.priority.rank(),
        activity.kind == crate::models::ActivityKind::Focus,
    )
}

fn block(start: u32, end: u32, label: String) -> ScheduleBlock {
    // The cursor is bounded by the day window, so both fits are infallible.
    ScheduleBlock {
        start: TimeOfDay::from_minutes(start as u16).expect("cursor within day"),
        end: TimeOfDay::from_minutes(end as u16).expect("cursor within day"),
        label,
    }
}
