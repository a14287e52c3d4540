use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::attendance::{AttendanceRecord, AttendanceStatus};
use crate::utils::time::{BreakSpan, TimeOfDay};

/// One editable day as submitted by the edit form. Hour and minute arrive as
/// separate text fields; an empty or missing field means "not entered".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyAttendanceRow {
    pub record_id: Option<u64>,
    pub training_date: NaiveDate,
    pub start_hour: Option<String>,
    pub start_minute: Option<String>,
    pub end_hour: Option<String>,
    pub end_minute: Option<String>,
    pub break_minutes: Option<u32>,
    pub status: AttendanceStatus,
    pub note: String,
}

impl DailyAttendanceRow {
    /// An empty row for a date with no persisted record yet.
    pub fn empty(training_date: NaiveDate) -> Self {
        Self {
            record_id: None,
            training_date,
            start_hour: None,
            start_minute: None,
            end_hour: None,
            end_minute: None,
            break_minutes: None,
            status: AttendanceStatus::None,
            note: String::new(),
        }
    }

    /// A persisted record split back into form fields for editing.
    pub fn from_record(record: &AttendanceRecord) -> Self {
        let split = |t: TimeOfDay| match t.hm() {
            Some((h, m)) => (Some(format!("{:02}", h)), Some(format!("{:02}", m))),
            None => (None, None),
        };
        let (start_hour, start_minute) = split(record.start_time);
        let (end_hour, end_minute) = split(record.end_time);
        Self {
            record_id: record.id,
            training_date: record.training_date,
            start_hour,
            start_minute,
            end_hour,
            end_minute,
            break_minutes: record.break_minutes,
            status: record.status,
            note: record.note.clone(),
        }
    }

    /// Collapses empty-string fields to `None` so presence checks see one
    /// representation of "not entered". `"0"` stays a real value.
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.start_hour,
            &mut self.start_minute,
            &mut self.end_hour,
            &mut self.end_minute,
        ] {
            if field.as_deref() == Some("") {
                *field = None;
            }
        }
        self
    }

    /// Unions the split start fields into a time value; blank unless both
    /// fields hold a parseable in-range number.
    pub fn start_time(&self) -> TimeOfDay {
        union(&self.start_hour, &self.start_minute)
    }

    pub fn end_time(&self) -> TimeOfDay {
        union(&self.end_hour, &self.end_minute)
    }
}

fn union(hour: &Option<String>, minute: &Option<String>) -> TimeOfDay {
    let parse = |text: &Option<String>, max: u8| -> Option<u8> {
        text.as_deref()
            .filter(|t| !t.is_empty())
            .and_then(|t| t.parse::<u8>().ok())
            .filter(|v| *v <= max)
    };
    match (parse(hour, 23), parse(minute, 59)) {
        (Some(h), Some(m)) => TimeOfDay::from_parts(Some(h), Some(m)),
        _ => TimeOfDay::BLANK,
    }
}

/// One display-ready day of the attendance roster.
#[derive(Debug, Clone, Serialize)]
pub struct RosterRow {
    pub record_id: Option<u64>,
    pub training_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub break_minutes: Option<u32>,
    pub break_display: String,
    pub status: AttendanceStatus,
    pub status_label: String,
    pub note: String,
    pub is_today: bool,
}

impl RosterRow {
    pub fn from_record(record: &AttendanceRecord, today: NaiveDate) -> Self {
        Self {
            record_id: record.id,
            training_date: record.training_date,
            start_time: record.start_time.to_string(),
            end_time: record.end_time.to_string(),
            break_minutes: record.break_minutes,
            break_display: record
                .break_minutes
                .map(|m| BreakSpan::from_minutes(m).to_string())
                .unwrap_or_default(),
            status: record.status,
            status_label: record.status.label().to_string(),
            note: record.note.clone(),
            is_today: record.training_date == today,
        }
    }
}

/// One violated rule: which row, which field, what to tell the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFinding {
    pub row: usize,
    pub field: String,
    pub message: String,
}

/// Every finding across a whole submission; nothing short-circuits, so the
/// user can fix all rows in one pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub findings: Vec<ValidationFinding>,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        !self.findings.is_empty()
    }

    pub fn push(&mut self, row: usize, field: &str, message: impl Into<String>) {
        self.findings.push(ValidationFinding {
            row,
            field: field.to_string(),
            message: message.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    #[test]
    fn normalization_drops_empty_strings_only() {
        let mut row = DailyAttendanceRow::empty(date());
        row.start_hour = Some("".to_string());
        row.start_minute = Some("00".to_string());
        let row = row.normalized();
        assert_eq!(row.start_hour, None);
        assert_eq!(row.start_minute.as_deref(), Some("00"));
    }

    #[test]
    fn union_requires_both_fields() {
        let mut row = DailyAttendanceRow::empty(date());
        row.start_hour = Some("09".to_string());
        assert!(row.start_time().is_blank());

        row.start_minute = Some("30".to_string());
        assert_eq!(row.start_time(), TimeOfDay::parse("09:30").unwrap());
    }

    #[test]
    fn union_accepts_midnight_hour() {
        let mut row = DailyAttendanceRow::empty(date());
        row.start_hour = Some("0".to_string());
        row.start_minute = Some("15".to_string());
        assert_eq!(row.start_time(), TimeOfDay::parse("00:15").unwrap());
    }

    #[test]
    fn record_splits_into_zero_padded_fields() {
        let mut record = AttendanceRecord::new(
            1,
            date(),
            1,
            chrono::NaiveDateTime::parse_from_str("2024-06-03 09:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
        );
        record.start_time = TimeOfDay::parse("09:05").unwrap();
        let row = DailyAttendanceRow::from_record(&record);
        assert_eq!(row.start_hour.as_deref(), Some("09"));
        assert_eq!(row.start_minute.as_deref(), Some("05"));
        assert_eq!(row.end_hour, None);
    }
}
