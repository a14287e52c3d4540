use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::role::Role;
use crate::utils::time::TimeOfDay;

/// Tardy / early-leave classification of a day's attendance.
///
/// `Absent` is a user-settable override, distinct from what the classifier
/// computes from punch times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    None,
    Tardy,
    LeavingEarly,
    TardyAndLeavingEarly,
    Absent,
}

impl AttendanceStatus {
    /// Stable numeric code used by the persistence collaborator.
    pub fn code(&self) -> i16 {
        match self {
            AttendanceStatus::None => 0,
            AttendanceStatus::Tardy => 1,
            AttendanceStatus::LeavingEarly => 2,
            AttendanceStatus::TardyAndLeavingEarly => 3,
            AttendanceStatus::Absent => 4,
        }
    }

    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            0 => Some(AttendanceStatus::None),
            1 => Some(AttendanceStatus::Tardy),
            2 => Some(AttendanceStatus::LeavingEarly),
            3 => Some(AttendanceStatus::TardyAndLeavingEarly),
            4 => Some(AttendanceStatus::Absent),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttendanceStatus::None => "",
            AttendanceStatus::Tardy => "tardy",
            AttendanceStatus::LeavingEarly => "leaving early",
            AttendanceStatus::TardyAndLeavingEarly => "tardy, leaving early",
            AttendanceStatus::Absent => "absent",
        }
    }
}

/// The institution's standard daily hours. Undefined (either bound blank)
/// means classification always yields `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkWindow {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl WorkWindow {
    pub const UNDEFINED: WorkWindow = WorkWindow {
        start: TimeOfDay::BLANK,
        end: TimeOfDay::BLANK,
    };

    pub fn is_defined(&self) -> bool {
        self.start.is_present() && self.end.is_present()
    }
}

/// One user's attendance for one training date.
///
/// At most one non-deleted record exists per (user_id, training_date);
/// records are soft-deleted, never removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// `None` until the persistence collaborator assigns an identity.
    pub id: Option<u64>,
    pub user_id: u64,
    pub training_date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub break_minutes: Option<u32>,
    pub status: AttendanceStatus,
    pub note: String,
    pub created_by: u64,
    pub created_at: NaiveDateTime,
    pub modified_by: u64,
    pub modified_at: NaiveDateTime,
    pub deleted: bool,
}

impl AttendanceRecord {
    pub fn new(user_id: u64, training_date: NaiveDate, actor_id: u64, now: NaiveDateTime) -> Self {
        Self {
            id: None,
            user_id,
            training_date,
            start_time: TimeOfDay::BLANK,
            end_time: TimeOfDay::BLANK,
            break_minutes: None,
            status: AttendanceStatus::None,
            note: String::new(),
            created_by: actor_id,
            created_at: now,
            modified_by: actor_id,
            modified_at: now,
            deleted: false,
        }
    }
}

/// The authenticated user on whose behalf an operation runs. Supplied by the
/// session collaborator; the engine never reads ambient login state.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: u64,
    pub user_name: String,
    pub role: Role,
    pub course_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_round_trip() {
        for status in [
            AttendanceStatus::None,
            AttendanceStatus::Tardy,
            AttendanceStatus::LeavingEarly,
            AttendanceStatus::TardyAndLeavingEarly,
            AttendanceStatus::Absent,
        ] {
            assert_eq!(AttendanceStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(AttendanceStatus::from_code(9), None);
    }

    #[test]
    fn window_with_blank_bound_is_undefined() {
        let start = TimeOfDay::parse("09:00").unwrap();
        assert!(!WorkWindow { start, end: TimeOfDay::BLANK }.is_defined());
        assert!(!WorkWindow::UNDEFINED.is_defined());
    }
}
