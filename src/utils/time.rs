use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};

/// A time-of-day at minute granularity, or a blank "not entered" marker.
///
/// Blank means both fields are absent. A half-filled value (one field set,
/// the other absent) can exist transiently while edit-form fields are being
/// reassembled; it compares and formats like blank, and the validation layer
/// is responsible for reporting it. Absence is an explicit `None`: hour `0`
/// is a real midnight value, never an absence marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDay {
    hour: Option<u8>,
    minute: Option<u8>,
}

impl TimeOfDay {
    pub const BLANK: TimeOfDay = TimeOfDay {
        hour: None,
        minute: None,
    };

    pub fn from_parts(hour: Option<u8>, minute: Option<u8>) -> Self {
        Self { hour, minute }
    }

    /// Builds a complete value, truncating to minute granularity.
    pub fn from_naive(time: NaiveTime) -> Self {
        Self {
            hour: Some(time.hour() as u8),
            minute: Some(time.minute() as u8),
        }
    }

    /// Parses the canonical `"HH:MM"` form; the empty string is blank.
    ///
    /// Persisted times are always written by this engine, so a malformed
    /// string here is a data-integrity bug and fails instead of defaulting.
    pub fn parse(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Ok(Self::BLANK);
        }
        let malformed = || Error::DataIntegrity(format!("malformed time value: {:?}", text));
        let (hour_text, minute_text) = text.split_once(':').ok_or_else(malformed)?;
        if hour_text.is_empty() || minute_text.is_empty() || minute_text.contains(':') {
            return Err(malformed());
        }
        let hour: u8 = hour_text.parse().map_err(|_| malformed())?;
        let minute: u8 = minute_text.parse().map_err(|_| malformed())?;
        if hour > 23 || minute > 59 {
            return Err(malformed());
        }
        Ok(Self {
            hour: Some(hour),
            minute: Some(minute),
        })
    }

    pub fn is_blank(&self) -> bool {
        self.hour.is_none() && self.minute.is_none()
    }

    pub fn is_present(&self) -> bool {
        self.hm().is_some()
    }

    pub fn hour(&self) -> Option<u8> {
        self.hour
    }

    pub fn minute(&self) -> Option<u8> {
        self.minute
    }

    /// Both components, when the value is complete.
    pub fn hm(&self) -> Option<(u8, u8)> {
        match (self.hour, self.minute) {
            (Some(h), Some(m)) => Some((h, m)),
            _ => None,
        }
    }
}

/// Ordering is defined only between two complete values.
impl PartialOrd for TimeOfDay {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.hm(), other.hm()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => None,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hm() {
            Some((h, m)) => write!(f, "{:02}:{:02}", h, m),
            None => Ok(()),
        }
    }
}

/// Elapsed minutes between two complete times. Negative when `end` precedes
/// `start`; callers validate ordering before relying on the sign.
pub fn elapsed_minutes(start: TimeOfDay, end: TimeOfDay) -> Option<i32> {
    let (sh, sm) = start.hm()?;
    let (eh, em) = end.hm()?;
    Some((eh as i32 - sh as i32) * 60 + (em as i32 - sm as i32))
}

/// A break duration split into hours and minutes for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakSpan {
    pub hours: u32,
    pub minutes: u32,
}

impl BreakSpan {
    pub fn from_minutes(minutes: u32) -> Self {
        Self {
            hours: minutes / 60,
            minutes: minutes % 60,
        }
    }
}

impl fmt::Display for BreakSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.hours, self.minutes) {
            (0, m) => write!(f, "{}m", m),
            (h, 0) => write!(f, "{}h", h),
            (h, m) => write!(f, "{}h {}m", h, m),
        }
    }
}

/// The `(minutes, label)` choices offered by the break-time dropdown:
/// 15-minute steps up to (not including) 8 hours.
pub fn break_time_options() -> Vec<(u32, String)> {
    (1..32)
        .map(|step| {
            let minutes = step * 15;
            (minutes, BreakSpan::from_minutes(minutes).to_string())
        })
        .collect()
}
