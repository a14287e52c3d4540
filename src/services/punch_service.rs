use std::cmp::Ordering;

use chrono::NaiveDateTime;

use crate::config::get_config;
use crate::error::{Error, Result};
use crate::models::attendance::{Actor, AttendanceRecord, WorkWindow};
use crate::repository::AttendanceRepository;
use crate::services::status_service::StatusClassifier;
use crate::utils::messages;
use crate::utils::time::TimeOfDay;

/// Gate-checks and applies the punch-in / punch-out buttons. Every
/// precondition failure surfaces as one user-facing message and nothing is
/// written; the current time is always an explicit parameter.
pub struct PunchService<R> {
    repo: R,
    window: WorkWindow,
}

impl<R: AttendanceRepository> PunchService<R> {
    pub fn new(repo: R, window: WorkWindow) -> Self {
        Self { repo, window }
    }

    pub fn from_config(repo: R) -> Self {
        Self::new(repo, get_config().work_window())
    }

    /// Records the arrival time for today. Preconditions, first failure
    /// wins: student role, scheduled work day, no arrival entered yet.
    pub fn punch_in(&self, actor: &Actor, now: NaiveDateTime) -> Result<String> {
        let today = now.date();
        ensure_student(actor)?;
        self.ensure_work_day(actor.course_id, today)?;

        let existing = self.repo.find_by_user_and_date(actor.user_id, today)?;
        if let Some(record) = &existing {
            if record.start_time.is_present() {
                return Err(Error::Precondition(messages::ALREADY_PUNCHED.to_string()));
            }
        }

        let start = TimeOfDay::from_naive(now.time());
        let status = StatusClassifier::classify(start, TimeOfDay::BLANK, &self.window);

        match existing {
            None => {
                let mut record = AttendanceRecord::new(actor.user_id, today, actor.user_id, now);
                record.start_time = start;
                record.status = status;
                match self.repo.insert(record) {
                    Ok(id) => {
                        tracing::info!(user_id = actor.user_id, id, %start, "punched in");
                    }
                    // a concurrent punch already created today's record
                    Err(Error::Storage(reason)) => {
                        tracing::warn!(user_id = actor.user_id, %reason, "punch-in conflict");
                        return Err(Error::Precondition(messages::ALREADY_PUNCHED.to_string()));
                    }
                    Err(e) => return Err(e),
                }
            }
            Some(mut record) => {
                record.start_time = start;
                record.status = status;
                record.modified_by = actor.user_id;
                record.modified_at = now;
                record.deleted = false;
                self.repo.update(&record)?;
                tracing::info!(user_id = actor.user_id, %start, "punched in on existing record");
            }
        }
        Ok(messages::UPDATE_COMPLETE.to_string())
    }

    /// Records the leave time for today. Preconditions, first failure wins:
    /// student role, scheduled work day, an arrival exists, no leave entered
    /// yet, and now is not earlier than the recorded arrival.
    pub fn punch_out(&self, actor: &Actor, now: NaiveDateTime) -> Result<String> {
        let today = now.date();
        ensure_student(actor)?;
        self.ensure_work_day(actor.course_id, today)?;

        let mut record = match self.repo.find_by_user_and_date(actor.user_id, today)? {
            Some(record) if record.start_time.is_present() => record,
            _ => return Err(Error::Precondition(messages::PUNCH_IN_MISSING.to_string())),
        };
        if record.end_time.is_present() {
            return Err(Error::Precondition(messages::ALREADY_PUNCHED.to_string()));
        }

        let end = TimeOfDay::from_naive(now.time());
        if record.start_time.partial_cmp(&end) == Some(Ordering::Greater) {
            return Err(Error::Precondition(messages::TIME_RANGE.to_string()));
        }

        record.end_time = end;
        record.status = StatusClassifier::classify(record.start_time, end, &self.window);
        record.modified_by = actor.user_id;
        record.modified_at = now;
        record.deleted = false;
        self.repo.update(&record)?;
        tracing::info!(user_id = actor.user_id, %end, status = ?record.status, "punched out");
        Ok(messages::UPDATE_COMPLETE.to_string())
    }

    fn ensure_work_day(&self, course_id: u64, date: chrono::NaiveDate) -> Result<()> {
        if self.repo.scheduled_day_count(course_id, date)? > 0 {
            Ok(())
        } else {
            Err(Error::Precondition(messages::NOT_WORK_DAY.to_string()))
        }
    }
}

fn ensure_student(actor: &Actor) -> Result<()> {
    if actor.role.is_student() {
        Ok(())
    } else {
        tracing::warn!(user_id = actor.user_id, role = ?actor.role, "punch denied");
        Err(Error::Precondition(messages::NOT_AUTHORIZED.to_string()))
    }
}
