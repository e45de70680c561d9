//! Time Entry Ledger
//!
//! The authoritative record of worked time, one entry per employee per
//! calendar date. Every operation takes the acting employee explicitly and
//! runs the permission evaluator before touching storage; handlers and the
//! CSV pipeline both go through this service and never reach the repository
//! directly.

pub mod hours;

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::access;
use crate::db::models::{Employee, TimeEntry};
use crate::db::repository::{EmployeeRepository, TimeEntryRepository};
use crate::hierarchy::OrgTree;
use crate::utils::{AppError, AppResult};

/// Incoming entry data (create and update share the shape)
#[derive(Debug, Clone, Deserialize)]
pub struct TimeEntryDraft {
    pub work_date: NaiveDate,
    pub hours_worked: Decimal,
    pub employee_id: String,
}

/// Outgoing entry view with minutes rendered back as hours
#[derive(Debug, Clone, Serialize)]
pub struct TimeEntryView {
    pub id: String,
    pub work_date: NaiveDate,
    pub hours_worked: Decimal,
    pub employee_id: String,
    pub created_by_id: String,
    pub created_at: i64,
}

impl From<TimeEntry> for TimeEntryView {
    fn from(entry: TimeEntry) -> Self {
        Self {
            id: entry.id_string(),
            work_date: entry.work_date,
            hours_worked: hours::to_hours(entry.worked_minutes),
            employee_id: entry.employee.to_string(),
            created_by_id: entry.created_by.to_string(),
            created_at: entry.created_at,
        }
    }
}

#[derive(Clone)]
pub struct TimeEntryLedger {
    employees: EmployeeRepository,
    entries: TimeEntryRepository,
}

impl TimeEntryLedger {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            employees: EmployeeRepository::new(db.clone()),
            entries: TimeEntryRepository::new(db),
        }
    }

    /// Snapshot the org structure for one request's permission checks
    async fn org_tree(&self) -> AppResult<OrgTree> {
        let all = self.employees.find_all().await?;
        Ok(OrgTree::from_employees(&all))
    }

    async fn require_employee(&self, id: &str) -> AppResult<Employee> {
        self.employees
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Employee {} not found", id)))
    }

    async fn require_entry(&self, id: &str) -> AppResult<TimeEntry> {
        self.entries
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Time entry {} not found", id)))
    }

    /// Record worked time for one day
    ///
    /// The actor may record for themselves or for a direct subordinate. A
    /// second entry for the same employee and date is a conflict; the
    /// pre-check gives the friendly message, the unique index closes the
    /// race between concurrent requests.
    pub async fn create(&self, actor: &Employee, draft: TimeEntryDraft) -> AppResult<TimeEntryView> {
        let subject = self.require_employee(&draft.employee_id).await?;
        let tree = self.org_tree().await?;

        if !access::can_create(&tree, &actor.id_string(), &subject.id_string()) {
            return Err(AppError::forbidden(format!(
                "No permission to create a time entry for employee {}",
                subject.name
            )));
        }

        let worked_minutes = hours::to_minutes(draft.hours_worked)?;
        let employee_id = subject
            .id
            .clone()
            .ok_or_else(|| AppError::internal("Employee record has no id"))?;
        let actor_id = actor
            .id
            .clone()
            .ok_or_else(|| AppError::internal("Actor record has no id"))?;

        if self
            .entries
            .exists_for_day(employee_id.clone(), draft.work_date)
            .await?
        {
            return Err(AppError::conflict(format!(
                "Employee {} already has an entry for {}",
                subject.name, draft.work_date
            )));
        }

        let created = self
            .entries
            .create(TimeEntry {
                id: None,
                work_date: draft.work_date,
                worked_minutes,
                employee: employee_id,
                created_by: actor_id,
                created_at: Utc::now().timestamp_millis(),
            })
            .await?;

        tracing::info!(
            target: "ledger",
            entry = %created.id_string(),
            employee = %subject.name,
            date = %draft.work_date,
            "Time entry created"
        );
        Ok(created.into())
    }

    /// Rewrite the date and duration of an existing entry
    ///
    /// Ownership never moves: the entry stays attached to its employee and
    /// the draft's employee_id is ignored. Changing the date re-checks the
    /// one-entry-per-day invariant against the new date.
    pub async fn update(
        &self,
        actor: &Employee,
        id: &str,
        draft: TimeEntryDraft,
    ) -> AppResult<TimeEntryView> {
        let entry = self.require_entry(id).await?;
        let tree = self.org_tree().await?;

        if !access::can_modify(&tree, &actor.id_string(), &entry.employee.to_string()) {
            return Err(AppError::forbidden(format!(
                "No permission to modify time entry {}",
                id
            )));
        }

        let worked_minutes = hours::to_minutes(draft.hours_worked)?;

        if draft.work_date != entry.work_date
            && self
                .entries
                .exists_for_day(entry.employee.clone(), draft.work_date)
                .await?
        {
            return Err(AppError::conflict(format!(
                "Employee {} already has an entry for {}",
                entry.employee, draft.work_date
            )));
        }

        let updated = self
            .entries
            .update(id, draft.work_date, worked_minutes)
            .await?;
        Ok(updated.into())
    }

    /// Remove an entry
    pub async fn delete(&self, actor: &Employee, id: &str) -> AppResult<()> {
        let entry = self.require_entry(id).await?;
        let tree = self.org_tree().await?;

        if !access::can_modify(&tree, &actor.id_string(), &entry.employee.to_string()) {
            return Err(AppError::forbidden(format!(
                "No permission to delete time entry {}",
                id
            )));
        }

        self.entries.delete(id).await?;
        tracing::info!(target: "ledger", entry = %id, "Time entry deleted");
        Ok(())
    }

    /// Fetch one entry; readable by the owner or any of their superiors
    pub async fn get_by_id(&self, actor: &Employee, id: &str) -> AppResult<TimeEntryView> {
        let entry = self.require_entry(id).await?;
        let tree = self.org_tree().await?;

        if !access::can_view(&tree, &actor.id_string(), &entry.employee.to_string()) {
            return Err(AppError::forbidden(format!(
                "No permission to view time entry {}",
                id
            )));
        }

        Ok(entry.into())
    }

    /// All entries of one employee, newest first
    pub async fn get_all_by_employee(
        &self,
        actor: &Employee,
        employee_id: &str,
    ) -> AppResult<Vec<TimeEntryView>> {
        let subject = self.require_employee(employee_id).await?;
        let tree = self.org_tree().await?;

        if !access::can_view(&tree, &actor.id_string(), &subject.id_string()) {
            return Err(AppError::forbidden(format!(
                "No permission to view time entries of employee {}",
                subject.name
            )));
        }

        let employee_id = subject
            .id
            .ok_or_else(|| AppError::internal("Employee record has no id"))?;
        let entries = self.entries.find_by_employee(employee_id).await?;
        Ok(entries.into_iter().map(Into::into).collect())
    }

    /// Every entry the actor may see, optionally filtered and date-bounded
    ///
    /// Without a filter: the actor's own entries plus those of all their
    /// descendants. With one: only the requested employees the actor may
    /// view. Missing range bounds default to the epoch and today.
    pub async fn get_all_accessible(
        &self,
        actor: &Employee,
        requested: Option<&[String]>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> AppResult<Vec<TimeEntryView>> {
        let tree = self.org_tree().await?;
        let accessible = access::accessible_set(&tree, &actor.id_string(), requested);

        let mut employees: Vec<RecordId> = Vec::with_capacity(accessible.len());
        for id in &accessible {
            let thing: RecordId = id
                .parse()
                .map_err(|_| AppError::validation(format!("Invalid employee ID: {}", id)))?;
            employees.push(thing);
        }

        let start = start.unwrap_or_default();
        let end = end.unwrap_or_else(|| Utc::now().date_naive());

        let entries = self.entries.find_in_range(employees, start, end).await?;
        Ok(entries.into_iter().map(Into::into).collect())
    }

    /// Name lookup for CSV export denormalization
    pub async fn employee_names(&self) -> AppResult<HashMap<String, String>> {
        let all = self.employees.find_all().await?;
        Ok(all
            .into_iter()
            .map(|e| (e.id_string(), e.name))
            .collect())
    }

    pub fn employees(&self) -> &EmployeeRepository {
        &self.employees
    }
}
