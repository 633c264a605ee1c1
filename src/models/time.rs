use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minutes in a full day; `TimeOfDay` values are strictly below this.
pub const MINUTES_PER_DAY: u16 = 1440;

/// Error produced when a wall-clock string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeFormatError {
    #[error("time must be formatted as HH:MM, got {0:?}")]
    Malformed(String),
    #[error("hour out of range in {0:?} (expected 00-23)")]
    HourOutOfRange(String),
    #[error("minute out of range in {0:?} (expected 00-59)")]
    MinuteOutOfRange(String),
}

/// Wall-clock time of day stored as minutes since midnight.
///
/// The integer form is the only internal representation; the `HH:MM`
/// string form exists purely at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Parse a zero-padded or plain `HH:MM` string.
    ///
    /// Hours must lie in `00-23` and minutes in `00-59`; anything else is
    /// rejected rather than wrapped.
    pub fn parse(text: &str) -> Result<Self, TimeFormatError> {
        let (hh, mm) = text
            .split_once(':')
            .ok_or_else(|| TimeFormatError::Malformed(text.to_string()))?;

        let hours: u16 = hh
            .parse()
            .map_err(|_| TimeFormatError::Malformed(text.to_string()))?;
        let minutes: u16 = mm
            .parse()
            .map_err(|_| TimeFormatError::Malformed(text.to_string()))?;

        if hours > 23 {
            return Err(TimeFormatError::HourOutOfRange(text.to_string()));
        }
        if minutes > 59 {
            return Err(TimeFormatError::MinuteOutOfRange(text.to_string()));
        }

        Ok(Self(hours * 60 + minutes))
    }

    /// Construct from raw minutes since midnight.
    ///
    /// Returns `None` for values of a full day or more.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    /// Minutes since midnight.
    pub fn minutes(&self) -> u16 {
        self.0
    }

    /// Render as a zero-padded `HH:MM` string; exact inverse of [`parse`].
    ///
    /// [`parse`]: TimeOfDay::parse
    pub fn format(&self) -> String {
        format!("{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}
