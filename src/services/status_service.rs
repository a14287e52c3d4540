use std::cmp::Ordering;

use crate::models::attendance::{AttendanceStatus, WorkWindow};
use crate::utils::time::TimeOfDay;

pub struct StatusClassifier;

impl StatusClassifier {
    /// Classifies punch times against the work window.
    ///
    /// Arriving exactly at the window start (or leaving exactly at the end)
    /// is on time; only strictly-later arrivals and strictly-earlier
    /// departures are flagged. An undefined window classifies nothing.
    pub fn classify(start: TimeOfDay, end: TimeOfDay, window: &WorkWindow) -> AttendanceStatus {
        if !window.is_defined() {
            return AttendanceStatus::None;
        }
        let is_late = start.partial_cmp(&window.start) == Some(Ordering::Greater);
        let is_early = end.partial_cmp(&window.end) == Some(Ordering::Less);
        match (is_late, is_early) {
            (true, true) => AttendanceStatus::TardyAndLeavingEarly,
            (true, false) => AttendanceStatus::Tardy,
            (false, true) => AttendanceStatus::LeavingEarly,
            (false, false) => AttendanceStatus::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> WorkWindow {
        WorkWindow {
            start: TimeOfDay::parse("09:00").unwrap(),
            end: TimeOfDay::parse("18:00").unwrap(),
        }
    }

    fn at(text: &str) -> TimeOfDay {
        TimeOfDay::parse(text).unwrap()
    }

    #[test]
    fn undefined_window_never_classifies() {
        let result =
            StatusClassifier::classify(at("12:00"), at("12:01"), &WorkWindow::UNDEFINED);
        assert_eq!(result, AttendanceStatus::None);

        let half_open = WorkWindow {
            start: at("09:00"),
            end: TimeOfDay::BLANK,
        };
        let result = StatusClassifier::classify(at("23:59"), at("00:01"), &half_open);
        assert_eq!(result, AttendanceStatus::None);
    }

    #[test]
    fn exact_boundary_is_on_time() {
        let result = StatusClassifier::classify(at("09:00"), at("18:00"), &window());
        assert_eq!(result, AttendanceStatus::None);
    }

    #[test]
    fn one_minute_past_start_is_tardy() {
        let result = StatusClassifier::classify(at("09:01"), at("18:00"), &window());
        assert_eq!(result, AttendanceStatus::Tardy);
    }

    #[test]
    fn one_minute_before_end_is_leaving_early() {
        let result = StatusClassifier::classify(at("09:00"), at("17:59"), &window());
        assert_eq!(result, AttendanceStatus::LeavingEarly);
    }

    #[test]
    fn both_violations_combine() {
        let result = StatusClassifier::classify(at("09:05"), at("17:45"), &window());
        assert_eq!(result, AttendanceStatus::TardyAndLeavingEarly);
    }

    #[test]
    fn blank_punches_classify_nothing() {
        let result = StatusClassifier::classify(TimeOfDay::BLANK, TimeOfDay::BLANK, &window());
        assert_eq!(result, AttendanceStatus::None);
    }

    #[test]
    fn punch_in_only_is_judged_on_arrival_alone() {
        let result = StatusClassifier::classify(at("09:05"), TimeOfDay::BLANK, &window());
        assert_eq!(result, AttendanceStatus::Tardy);
    }
}
