//! CSV Import/Export Pipeline
//!
//! Bulk exchange of time entries as a semicolon-separated UTF-8 table with
//! one header row. Import and export use separate row shapes: the import
//! row carries only the fields a client may supply, the export row adds the
//! denormalized display names.
//!
//! Import runs in two phases. Phase one parses and authorizes every row:
//! malformed rows and rows naming an unknown employee are dropped with a
//! warning, but a single authorization failure aborts the whole batch before
//! anything is written. Phase two feeds the surviving rows to the ledger one
//! at a time in file order, so a duplicate date inside the batch fails
//! exactly like a duplicate against existing storage.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::access;
use crate::db::models::Employee;
use crate::ledger::{TimeEntryDraft, TimeEntryLedger, hours};
use crate::utils::{AppError, AppResult};

pub const CSV_HEADER: &str =
    "Work Date;Hours Worked;Employee ID;Employee Name;Created By ID;Created By Name";

const SEPARATOR: char = ';';

/// One parsed input line; names and creator columns are ignored on import
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRow {
    pub work_date: NaiveDate,
    pub hours_worked: Decimal,
    pub employee_id: String,
}

/// One output line with names resolved at export time
#[derive(Debug, Clone)]
pub struct ExportRow {
    pub work_date: NaiveDate,
    pub hours_worked: Decimal,
    pub employee_id: String,
    pub employee_name: String,
    pub created_by_id: String,
    pub created_by_name: String,
}

/// Parse CSV content into import rows, dropping rows that fail validation
///
/// The first line is the header and is skipped. A row needs at least the
/// date, hours and employee-id columns; unparsable or negative values drop
/// the row with a warning, never the batch.
pub fn parse_import(content: &str) -> Vec<ImportRow> {
    let mut rows = Vec::new();

    for (number, line) in content.lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(SEPARATOR).map(str::trim).collect();
        if fields.len() < 3 {
            tracing::warn!(target: "transfer", row = number + 1, "Skipping row with too few columns");
            continue;
        }

        let work_date = match fields[0].parse::<NaiveDate>() {
            Ok(date) => date,
            Err(_) => {
                tracing::warn!(
                    target: "transfer",
                    row = number + 1,
                    value = fields[0],
                    "Skipping row with unparsable date"
                );
                continue;
            }
        };

        let hours_worked = match fields[1].parse::<Decimal>() {
            Ok(hours) if !hours.is_sign_negative() => hours,
            _ => {
                tracing::warn!(
                    target: "transfer",
                    row = number + 1,
                    value = fields[1],
                    "Skipping row with invalid hours"
                );
                continue;
            }
        };

        if fields[2].is_empty() {
            tracing::warn!(target: "transfer", row = number + 1, "Skipping row without an employee id");
            continue;
        }

        rows.push(ImportRow {
            work_date,
            hours_worked,
            employee_id: fields[2].to_string(),
        });
    }

    rows
}

/// Serialize export rows, header first, '.' as the decimal separator
pub fn render_export(rows: &[ExportRow]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for row in rows {
        out.push_str(&format!(
            "{};{:.2};{};{};{};{}\n",
            row.work_date,
            row.hours_worked,
            row.employee_id,
            row.employee_name,
            row.created_by_id,
            row.created_by_name
        ));
    }

    out
}

#[derive(Clone)]
pub struct TransferService {
    ledger: TimeEntryLedger,
}

impl TransferService {
    pub fn new(ledger: TimeEntryLedger) -> Self {
        Self { ledger }
    }

    /// Import time entries from CSV content on behalf of `actor`
    ///
    /// Returns the number of entries created. Any row the actor has no
    /// rights to aborts the whole import with nothing persisted; rows
    /// naming an unknown employee are skipped like validation failures.
    pub async fn import(&self, actor: &Employee, content: &str) -> AppResult<usize> {
        let rows = parse_import(content);

        let tree = {
            let all = self.ledger.employees().find_all().await?;
            crate::hierarchy::OrgTree::from_employees(&all)
        };

        let mut accepted = Vec::with_capacity(rows.len());
        for row in rows {
            let subject = match self.ledger.employees().find_by_id(&row.employee_id).await? {
                Some(subject) => subject,
                None => {
                    tracing::warn!(
                        target: "transfer",
                        employee = %row.employee_id,
                        "Skipping row for unknown employee"
                    );
                    continue;
                }
            };

            if !access::can_create(&tree, &actor.id_string(), &subject.id_string()) {
                return Err(AppError::forbidden(format!(
                    "No permission to import a time entry for employee {}",
                    subject.name
                )));
            }

            accepted.push(row);
        }

        // Sequential, in file order, so intra-batch duplicates collide
        let mut created = 0usize;
        for row in accepted {
            self.ledger
                .create(
                    actor,
                    TimeEntryDraft {
                        work_date: row.work_date,
                        hours_worked: row.hours_worked,
                        employee_id: row.employee_id,
                    },
                )
                .await?;
            created += 1;
        }

        tracing::info!(target: "transfer", count = created, actor = %actor.name, "CSV import finished");
        Ok(created)
    }

    /// Export every entry the actor may see as CSV content
    ///
    /// An empty accessible set yields a header-only document.
    pub async fn export(
        &self,
        actor: &Employee,
        requested: Option<&[String]>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> AppResult<String> {
        let entries = self
            .ledger
            .get_all_accessible(actor, requested, start, end)
            .await?;
        let names = self.ledger.employee_names().await?;

        let resolve = |id: &str| names.get(id).cloned().unwrap_or_else(|| id.to_string());

        let rows: Vec<ExportRow> = entries
            .into_iter()
            .map(|entry| ExportRow {
                work_date: entry.work_date,
                hours_worked: entry.hours_worked,
                employee_name: resolve(&entry.employee_id),
                created_by_name: resolve(&entry.created_by_id),
                employee_id: entry.employee_id,
                created_by_id: entry.created_by_id,
            })
            .collect();

        Ok(render_export(&rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parser_keeps_valid_rows_and_ignores_extra_columns() {
        let content = "Work Date;Hours Worked;Employee ID;Employee Name\n\
                       2026-03-02;7.5;employee:alice;Alice\n\
                       2026-03-03;8;employee:bob\n";
        let rows = parse_import(content);
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            ImportRow {
                work_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
                hours_worked: Decimal::from_str("7.5").unwrap(),
                employee_id: "employee:alice".to_string(),
            }
        );
    }

    #[test]
    fn parser_drops_malformed_rows_without_failing() {
        let content = "Work Date;Hours Worked;Employee ID\n\
                       not-a-date;8;employee:alice\n\
                       2026-03-02;lots;employee:alice\n\
                       2026-03-03;-2;employee:alice\n\
                       2026-03-04;8\n\
                       2026-03-05;8;\n\
                       \n\
                       2026-03-06;6.25;employee:bob\n";
        let rows = parse_import(content);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].employee_id, "employee:bob");
    }

    #[test]
    fn parser_on_header_only_input_yields_nothing() {
        assert!(parse_import("Work Date;Hours Worked;Employee ID\n").is_empty());
        assert!(parse_import("").is_empty());
    }

    #[test]
    fn renderer_emits_header_and_two_digit_hours() {
        let rows = vec![ExportRow {
            work_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            hours_worked: hours::to_hours(450),
            employee_id: "employee:alice".to_string(),
            employee_name: "Alice".to_string(),
            created_by_id: "employee:bob".to_string(),
            created_by_name: "Bob".to_string(),
        }];

        let out = render_export(&rows);
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert_eq!(
            lines.next(),
            Some("2026-03-02;7.50;employee:alice;Alice;employee:bob;Bob")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_export_is_header_only() {
        assert_eq!(render_export(&[]), format!("{}\n", CSV_HEADER));
    }

    #[test]
    fn exported_content_parses_back_as_import_rows() {
        let rows = vec![ExportRow {
            work_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            hours_worked: hours::to_hours(275),
            employee_id: "employee:alice".to_string(),
            employee_name: "Alice".to_string(),
            created_by_id: "employee:alice".to_string(),
            created_by_name: "Alice".to_string(),
        }];

        let parsed = parse_import(&render_export(&rows));
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].work_date, rows[0].work_date);
        assert_eq!(parsed[0].employee_id, rows[0].employee_id);
        assert_eq!(hours::to_minutes(parsed[0].hours_worked).unwrap(), 275);
    }
}
