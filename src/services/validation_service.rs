use crate::dto::attendance_dto::{DailyAttendanceRow, ValidationReport};
use crate::utils::messages;
use crate::utils::time::elapsed_minutes;

const ARRIVAL: &str = "arrival time";
const LEAVE: &str = "leave time";

pub struct ValidationService;

impl ValidationService {
    /// Checks a whole edit submission. Every row is examined even when
    /// earlier rows already failed; findings accumulate in row order.
    pub fn check(rows: &[DailyAttendanceRow], note_max_chars: usize) -> ValidationReport {
        let mut report = ValidationReport::default();

        for (i, raw) in rows.iter().enumerate() {
            let row = raw.clone().normalized();

            if row.note.chars().count() > note_max_chars {
                report.push(i, "note", messages::note_too_long(note_max_chars));
            }

            // a half-filled time names the missing field
            match (&row.start_hour, &row.start_minute) {
                (Some(_), None) => report.push(i, "start_minute", messages::invalid_time(ARRIVAL)),
                (None, Some(_)) => report.push(i, "start_hour", messages::invalid_time(ARRIVAL)),
                _ => {}
            }
            match (&row.end_hour, &row.end_minute) {
                (Some(_), None) => report.push(i, "end_minute", messages::invalid_time(LEAVE)),
                (None, Some(_)) => report.push(i, "end_hour", messages::invalid_time(LEAVE)),
                _ => {}
            }

            // "entered" means both form fields were filled in, whether or
            // not they parse; parse problems get their own findings below
            let start_entered = row.start_hour.is_some() && row.start_minute.is_some();
            let end_entered = row.end_hour.is_some() && row.end_minute.is_some();

            if !start_entered && end_entered {
                report.push(i, "start_hour", messages::PUNCH_IN_MISSING);
            }

            if start_entered && end_entered {
                let start = match parse_pair(&row.start_hour, &row.start_minute) {
                    Ok(pair) => Some(pair),
                    Err(field) => {
                        report.push(i, start_field(field), messages::invalid_time(ARRIVAL));
                        None
                    }
                };
                let end = match parse_pair(&row.end_hour, &row.end_minute) {
                    Ok(pair) => Some(pair),
                    Err(field) => {
                        report.push(i, end_field(field), messages::invalid_time(LEAVE));
                        None
                    }
                };

                if let (Some((sh, sm)), Some((eh, em))) = (start, end) {
                    if sh > eh || (sh == eh && sm > em) {
                        report.push(i, "start_hour", messages::time_range_row(i));
                    }

                    if let (Some(break_minutes), Some(elapsed)) = (
                        row.break_minutes,
                        elapsed_minutes(row.start_time(), row.end_time()),
                    ) {
                        if i64::from(break_minutes) > i64::from(elapsed) {
                            report.push(i, "break_minutes", messages::BREAK_TOO_LONG);
                        }
                    }
                }
            }
        }

        if report.has_errors() {
            tracing::debug!(
                rows = rows.len(),
                findings = report.findings.len(),
                "attendance submission rejected"
            );
        }
        report
    }
}

enum Component {
    Hour,
    Minute,
}

fn start_field(component: Component) -> &'static str {
    match component {
        Component::Hour => "start_hour",
        Component::Minute => "start_minute",
    }
}

fn end_field(component: Component) -> &'static str {
    match component {
        Component::Hour => "end_hour",
        Component::Minute => "end_minute",
    }
}

/// Parses both components of a fully-entered time, naming the first field
/// that is non-numeric or out of range.
fn parse_pair(
    hour: &Option<String>,
    minute: &Option<String>,
) -> std::result::Result<(u8, u8), Component> {
    let hour = hour
        .as_deref()
        .and_then(|t| t.parse::<u8>().ok())
        .filter(|h| *h <= 23)
        .ok_or(Component::Hour)?;
    let minute = minute
        .as_deref()
        .and_then(|t| t.parse::<u8>().ok())
        .filter(|m| *m <= 59)
        .ok_or(Component::Minute)?;
    Ok((hour, minute))
}
