//! Time Entry Model

use super::serde_helpers;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Time entry ID type
pub type TimeEntryId = RecordId;

/// One recorded working day for one employee
///
/// Worked time is stored as whole minutes; fractional hours only exist at the
/// API and CSV boundaries. At most one entry per (employee, work_date) pair,
/// enforced by a unique index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeEntry {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<TimeEntryId>,
    pub work_date: NaiveDate,
    pub worked_minutes: i64,
    /// Owning employee
    #[serde(with = "serde_helpers::record_id")]
    pub employee: RecordId,
    /// Actor who recorded the entry (the owner or a direct superior)
    #[serde(with = "serde_helpers::record_id")]
    pub created_by: RecordId,
    /// Epoch millis, set on insert, immutable
    pub created_at: i64,
}

impl TimeEntry {
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|t| t.to_string()).unwrap_or_default()
    }
}
