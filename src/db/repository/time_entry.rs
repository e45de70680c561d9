//! Time Entry Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::TimeEntry;
use chrono::NaiveDate;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct TimeEntryRepository {
    base: BaseRepository,
}

impl TimeEntryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<TimeEntry>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let entry: Option<TimeEntry> = self.base.db().select(thing).await?;
        Ok(entry)
    }

    /// All entries of one employee, newest date first
    pub async fn find_by_employee(&self, employee: RecordId) -> RepoResult<Vec<TimeEntry>> {
        let entries: Vec<TimeEntry> = self
            .base
            .db()
            .query("SELECT * FROM time_entry WHERE employee = $employee ORDER BY work_date DESC")
            .bind(("employee", employee))
            .await?
            .take(0)?;
        Ok(entries)
    }

    /// Entries for a set of employees within an inclusive date range
    ///
    /// ISO dates compare correctly as strings, so the range filter runs
    /// directly in the query.
    pub async fn find_in_range(
        &self,
        employees: Vec<RecordId>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<TimeEntry>> {
        let entries: Vec<TimeEntry> = self
            .base
            .db()
            .query(
                "SELECT * FROM time_entry \
                 WHERE employee IN $employees \
                   AND work_date >= $start AND work_date <= $end \
                 ORDER BY work_date",
            )
            .bind(("employees", employees))
            .bind(("start", start))
            .bind(("end", end))
            .await?
            .take(0)?;
        Ok(entries)
    }

    /// Existence check for the one-entry-per-day invariant
    pub async fn exists_for_day(&self, employee: RecordId, date: NaiveDate) -> RepoResult<bool> {
        let existing: Vec<TimeEntry> = self
            .base
            .db()
            .query("SELECT * FROM time_entry WHERE employee = $employee AND work_date = $date")
            .bind(("employee", employee))
            .bind(("date", date))
            .await?
            .take(0)?;
        Ok(!existing.is_empty())
    }

    /// Persist a new entry
    ///
    /// A concurrent duplicate for the same (employee, work_date) trips the
    /// unique index and comes back as RepoError::Duplicate.
    pub async fn create(&self, entry: TimeEntry) -> RepoResult<TimeEntry> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE time_entry SET
                    work_date = $work_date,
                    worked_minutes = $worked_minutes,
                    employee = $employee,
                    created_by = $created_by,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("work_date", entry.work_date))
            .bind(("worked_minutes", entry.worked_minutes))
            .bind(("employee", entry.employee))
            .bind(("created_by", entry.created_by))
            .bind(("created_at", entry.created_at))
            .await?;

        let created: Option<TimeEntry> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create time entry".to_string()))
    }

    /// Replace the mutable fields (date and duration); owner, creator and
    /// creation timestamp never change
    pub async fn update(
        &self,
        id: &str,
        work_date: NaiveDate,
        worked_minutes: i64,
    ) -> RepoResult<TimeEntry> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;

        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET work_date = $work_date, worked_minutes = $worked_minutes \
                 RETURN AFTER",
            )
            .bind(("thing", thing))
            .bind(("work_date", work_date))
            .bind(("worked_minutes", worked_minutes))
            .await?;

        result
            .take::<Option<TimeEntry>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Time entry {} not found", id)))
    }

    /// Permanently remove an entry
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Time entry {} not found", id)))?;

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
