use chrono::{NaiveDate, NaiveDateTime};

use crate::config::get_config;
use crate::dto::attendance_dto::{DailyAttendanceRow, RosterRow};
use crate::error::{Error, Result};
use crate::models::attendance::{Actor, AttendanceRecord, AttendanceStatus, WorkWindow};
use crate::repository::AttendanceRepository;
use crate::services::status_service::StatusClassifier;
use crate::services::validation_service::ValidationService;
use crate::utils::messages;

/// Roster assembly and edit-submission reconciliation over one user's
/// persisted attendance.
pub struct AttendanceService<R> {
    repo: R,
    window: WorkWindow,
    note_max_chars: usize,
}

impl<R: AttendanceRepository> AttendanceService<R> {
    pub fn new(repo: R, window: WorkWindow, note_max_chars: usize) -> Self {
        Self {
            repo,
            window,
            note_max_chars,
        }
    }

    pub fn from_config(repo: R) -> Self {
        let config = get_config();
        Self::new(repo, config.work_window(), config.note_max_chars)
    }

    /// Display-ready attendance rows, ordered by training date.
    pub fn roster(&self, user_id: u64, today: NaiveDate) -> Result<Vec<RosterRow>> {
        let records = self.repo.find_all_by_user(user_id)?;
        Ok(records
            .iter()
            .map(|r| RosterRow::from_record(r, today))
            .collect())
    }

    /// Whether past days still miss a punch time ("unfilled days" banner).
    pub fn has_missing_entries(&self, user_id: u64, as_of: NaiveDate) -> Result<bool> {
        Ok(self.repo.missing_entry_count(user_id, as_of)? > 0)
    }

    /// The roster split into per-field form rows for direct editing.
    pub fn edit_sheet(&self, user_id: u64) -> Result<Vec<DailyAttendanceRow>> {
        let records = self.repo.find_all_by_user(user_id)?;
        Ok(records.iter().map(DailyAttendanceRow::from_record).collect())
    }

    /// Validates an edit submission and reconciles it against the persisted
    /// records: rows matching an existing training date update that record
    /// (keeping its identity and creation audit), the rest insert new ones.
    ///
    /// A rejected submission returns `Error::Validation` with every finding
    /// and persists nothing. The whole batch is one unit of work; partial
    /// application across rows is not an outcome.
    pub fn save(
        &self,
        actor: &Actor,
        user_id: u64,
        rows: &[DailyAttendanceRow],
        now: NaiveDateTime,
    ) -> Result<String> {
        let report = ValidationService::check(rows, self.note_max_chars);
        if report.has_errors() {
            return Err(Error::Validation(report));
        }

        let existing = self.repo.find_all_by_user(user_id)?;
        let mut batch: Vec<AttendanceRecord> = Vec::with_capacity(rows.len());
        for raw in rows {
            let row = raw.clone().normalized();
            let mut record = existing
                .iter()
                .find(|e| e.training_date == row.training_date)
                .cloned()
                .unwrap_or_else(|| {
                    AttendanceRecord::new(user_id, row.training_date, actor.user_id, now)
                });

            record.start_time = row.start_time();
            record.end_time = row.end_time();
            record.break_minutes = row.break_minutes;
            record.note = row.note.clone();
            // an explicit absence override is never reclassified by the
            // time-based rules
            if row.status == AttendanceStatus::Absent {
                record.status = AttendanceStatus::Absent;
            } else {
                record.status =
                    StatusClassifier::classify(record.start_time, record.end_time, &self.window);
            }
            record.modified_by = actor.user_id;
            record.modified_at = now;
            record.deleted = false;
            // two rows for the same date must not become two inserts; the
            // later row supersedes the earlier one within the batch
            match batch
                .iter_mut()
                .find(|b| b.training_date == record.training_date)
            {
                Some(slot) => *slot = record,
                None => batch.push(record),
            }
        }

        let mut inserted = 0usize;
        let mut updated = 0usize;
        for record in batch {
            if record.id.is_none() {
                self.repo.insert(record)?;
                inserted += 1;
            } else {
                self.repo.update(&record)?;
                updated += 1;
            }
        }
        tracing::info!(user_id, inserted, updated, "attendance submission saved");
        Ok(messages::UPDATE_COMPLETE.to_string())
    }
}
