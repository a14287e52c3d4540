use chrono::NaiveDate;

use crate::error::Result;
use crate::models::attendance::AttendanceRecord;

pub mod memory;

/// Persistence contract consumed by the engine. Implementations own the
/// at-most-one-record-per-(user, date) invariant and report a conflicting
/// insert as a storage error.
#[cfg_attr(test, mockall::automock)]
pub trait AttendanceRepository {
    fn find_by_user_and_date(&self, user_id: u64, date: NaiveDate)
        -> Result<Option<AttendanceRecord>>;

    /// All non-deleted records for the user, ordered by training date.
    fn find_all_by_user(&self, user_id: u64) -> Result<Vec<AttendanceRecord>>;

    fn insert(&self, record: AttendanceRecord) -> Result<u64>;

    fn update(&self, record: &AttendanceRecord) -> Result<()>;

    /// Number of scheduled course sections on the date; >0 means work day.
    fn scheduled_day_count(&self, course_id: u64, date: NaiveDate) -> Result<i64>;

    /// Past records (strictly before `as_of`) still missing a punch time.
    fn missing_entry_count(&self, user_id: u64, as_of: NaiveDate) -> Result<i64>;
}

impl<R: AttendanceRepository + ?Sized> AttendanceRepository for &R {
    fn find_by_user_and_date(
        &self,
        user_id: u64,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>> {
        (**self).find_by_user_and_date(user_id, date)
    }

    fn find_all_by_user(&self, user_id: u64) -> Result<Vec<AttendanceRecord>> {
        (**self).find_all_by_user(user_id)
    }

    fn insert(&self, record: AttendanceRecord) -> Result<u64> {
        (**self).insert(record)
    }

    fn update(&self, record: &AttendanceRecord) -> Result<()> {
        (**self).update(record)
    }

    fn scheduled_day_count(&self, course_id: u64, date: NaiveDate) -> Result<i64> {
        (**self).scheduled_day_count(course_id, date)
    }

    fn missing_entry_count(&self, user_id: u64, as_of: NaiveDate) -> Result<i64> {
        (**self).missing_entry_count(user_id, as_of)
    }
}
