use std::collections::HashSet;
use std::sync::Mutex;

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::models::attendance::AttendanceRecord;
use crate::repository::AttendanceRepository;

/// In-process repository used by tests and demos. Mirrors the uniqueness and
/// soft-delete semantics the real store provides.
pub struct InMemoryRepository {
    inner: Mutex<Store>,
}

#[derive(Default)]
struct Store {
    records: Vec<AttendanceRecord>,
    next_id: u64,
    scheduled_days: HashSet<(u64, NaiveDate)>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Store {
                records: Vec::new(),
                next_id: 1,
                scheduled_days: HashSet::new(),
            }),
        }
    }

    pub fn add_scheduled_day(&self, course_id: u64, date: NaiveDate) {
        let mut store = self.lock();
        store.scheduled_days.insert((course_id, date));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Store> {
        self.inner.lock().expect("repository lock poisoned")
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl AttendanceRepository for InMemoryRepository {
    fn find_by_user_and_date(
        &self,
        user_id: u64,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>> {
        let store = self.lock();
        Ok(store
            .records
            .iter()
            .find(|r| r.user_id == user_id && r.training_date == date && !r.deleted)
            .cloned())
    }

    fn find_all_by_user(&self, user_id: u64) -> Result<Vec<AttendanceRecord>> {
        let store = self.lock();
        let mut records: Vec<AttendanceRecord> = store
            .records
            .iter()
            .filter(|r| r.user_id == user_id && !r.deleted)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.training_date);
        Ok(records)
    }

    fn insert(&self, mut record: AttendanceRecord) -> Result<u64> {
        let mut store = self.lock();
        let conflict = store
            .records
            .iter()
            .any(|r| r.user_id == record.user_id && r.training_date == record.training_date && !r.deleted);
        if conflict {
            return Err(Error::Storage(format!(
                "attendance record already exists for user {} on {}",
                record.user_id, record.training_date
            )));
        }
        let id = store.next_id;
        store.next_id += 1;
        record.id = Some(id);
        store.records.push(record);
        Ok(id)
    }

    fn update(&self, record: &AttendanceRecord) -> Result<()> {
        let mut store = self.lock();
        let id = record
            .id
            .ok_or_else(|| Error::Storage("cannot update a record without an id".to_string()))?;
        let slot = store
            .records
            .iter_mut()
            .find(|r| r.id == Some(id))
            .ok_or_else(|| Error::Storage(format!("no attendance record with id {}", id)))?;
        *slot = record.clone();
        Ok(())
    }

    fn scheduled_day_count(&self, course_id: u64, date: NaiveDate) -> Result<i64> {
        let store = self.lock();
        Ok(store.scheduled_days.contains(&(course_id, date)) as i64)
    }

    fn missing_entry_count(&self, user_id: u64, as_of: NaiveDate) -> Result<i64> {
        let store = self.lock();
        Ok(store
            .records
            .iter()
            .filter(|r| {
                r.user_id == user_id
                    && !r.deleted
                    && r.training_date < as_of
                    && (r.start_time.is_blank() || r.end_time.is_blank())
            })
            .count() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time::TimeOfDay;
    use chrono::NaiveDateTime;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn now() -> NaiveDateTime {
        date(3).and_hms_opt(9, 0, 0).unwrap()
    }

    #[test]
    fn insert_assigns_ids_and_enforces_uniqueness() {
        let repo = InMemoryRepository::new();
        let id = repo
            .insert(AttendanceRecord::new(1, date(3), 1, now()))
            .unwrap();
        assert_eq!(id, 1);

        let err = repo
            .insert(AttendanceRecord::new(1, date(3), 1, now()))
            .unwrap_err();
        assert!(matches!(err, Error::Storage(_)));

        // same date, different user is fine
        repo.insert(AttendanceRecord::new(2, date(3), 2, now()))
            .unwrap();
    }

    #[test]
    fn find_all_is_date_ordered_and_skips_deleted() {
        let repo = InMemoryRepository::new();
        repo.insert(AttendanceRecord::new(1, date(5), 1, now())).unwrap();
        repo.insert(AttendanceRecord::new(1, date(3), 1, now())).unwrap();
        let mut gone = AttendanceRecord::new(1, date(4), 1, now());
        let id = repo.insert(gone.clone()).unwrap();
        gone.id = Some(id);
        gone.deleted = true;
        repo.update(&gone).unwrap();

        let all = repo.find_all_by_user(1).unwrap();
        let dates: Vec<NaiveDate> = all.iter().map(|r| r.training_date).collect();
        assert_eq!(dates, vec![date(3), date(5)]);
    }

    #[test]
    fn missing_entries_counts_past_blank_punches() {
        let repo = InMemoryRepository::new();
        // past day, never punched out
        let mut open = AttendanceRecord::new(1, date(3), 1, now());
        open.start_time = TimeOfDay::parse("09:00").unwrap();
        repo.insert(open).unwrap();
        // past day, complete
        let mut done = AttendanceRecord::new(1, date(4), 1, now());
        done.start_time = TimeOfDay::parse("09:00").unwrap();
        done.end_time = TimeOfDay::parse("18:00").unwrap();
        repo.insert(done).unwrap();
        // today does not count yet
        repo.insert(AttendanceRecord::new(1, date(5), 1, now()))
            .unwrap();

        assert_eq!(repo.missing_entry_count(1, date(5)).unwrap(), 1);
    }
}
