//! User-facing message catalog. The engine returns these verbatim; rendering
//! and localization belong to the presentation collaborator.

pub const NOT_AUTHORIZED: &str = "You do not have permission to perform this operation.";
pub const NOT_WORK_DAY: &str = "Today is not a scheduled training day.";
pub const ALREADY_PUNCHED: &str =
    "Today's attendance has already been entered. Please edit the record directly.";
pub const PUNCH_IN_MISSING: &str = "A leave time cannot be entered without an arrival time.";
pub const TIME_RANGE: &str = "The leave time must not be earlier than the arrival time.";
pub const BREAK_TOO_LONG: &str = "The break time exceeds the attended duration.";
pub const UPDATE_COMPLETE: &str = "Attendance has been updated.";

pub fn note_too_long(max_chars: usize) -> String {
    format!("The note must be at most {} characters.", max_chars)
}

pub fn invalid_time(which: &str) -> String {
    format!("The {} is invalid.", which)
}

pub fn time_range_row(row: usize) -> String {
    format!("Row {}: {}", row, TIME_RANGE)
}
