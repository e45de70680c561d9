//! One-entry-per-day invariant: duplicate detection, the concurrent-create
//! race, and the re-check when an update moves an entry to another date.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use timesheet_server::AppError;
use timesheet_server::db::DbService;
use timesheet_server::db::models::{Employee, EmployeeCreate, Position, Role};
use timesheet_server::db::repository::{DepartmentRepository, EmployeeRepository};
use timesheet_server::ledger::{TimeEntryDraft, TimeEntryLedger};

async fn setup_with_employee() -> (Surreal<Db>, Employee) {
    let db = DbService::memory().await.expect("in-memory db").db;

    let department = DepartmentRepository::new(db.clone())
        .create("Development")
        .await
        .expect("department");

    let employee = EmployeeRepository::new(db.clone())
        .create(EmployeeCreate {
            name: "alice".to_string(),
            password: "secret-password".to_string(),
            role: Role::User,
            position: Position::Developer,
            department: department.id.expect("department id"),
            chief: None,
        })
        .await
        .expect("employee");

    (db, employee)
}

fn draft(date: &str, hours: &str, employee: &Employee) -> TimeEntryDraft {
    TimeEntryDraft {
        work_date: date.parse::<NaiveDate>().expect("date"),
        hours_worked: Decimal::from_str(hours).expect("hours"),
        employee_id: employee.id_string(),
    }
}

#[tokio::test]
async fn second_entry_for_the_same_day_is_a_conflict() {
    let (db, alice) = setup_with_employee().await;
    let ledger = TimeEntryLedger::new(db);

    ledger
        .create(&alice, draft("2026-03-02", "8", &alice))
        .await
        .expect("first entry");

    let err = ledger
        .create(&alice, draft("2026-03-02", "4", &alice))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // A different date is fine
    ledger
        .create(&alice, draft("2026-03-03", "4", &alice))
        .await
        .expect("different date");
}

#[tokio::test]
async fn concurrent_creates_for_the_same_day_let_exactly_one_through() {
    let (db, alice) = setup_with_employee().await;
    let ledger_a = TimeEntryLedger::new(db.clone());
    let ledger_b = TimeEntryLedger::new(db);

    let (first, second) = tokio::join!(
        ledger_a.create(&alice, draft("2026-03-02", "8", &alice)),
        ledger_b.create(&alice, draft("2026-03-02", "6", &alice)),
    );

    let succeeded = [&first, &second].iter().filter(|r| r.is_ok()).count();
    assert_eq!(succeeded, 1, "exactly one concurrent create must win");

    let loser = if first.is_err() { first } else { second };
    assert!(matches!(loser.unwrap_err(), AppError::Conflict(_)));

    let entries = ledger_a
        .get_all_by_employee(&alice, &alice.id_string())
        .await
        .expect("listing");
    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn moving_an_entry_onto_an_occupied_date_is_rejected() {
    let (db, alice) = setup_with_employee().await;
    let ledger = TimeEntryLedger::new(db);

    ledger
        .create(&alice, draft("2026-03-02", "8", &alice))
        .await
        .expect("entry on the 2nd");
    let movable = ledger
        .create(&alice, draft("2026-03-03", "6", &alice))
        .await
        .expect("entry on the 3rd");

    let err = ledger
        .update(&alice, &movable.id, draft("2026-03-02", "6", &alice))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // Same date, new duration: no collision with itself
    let updated = ledger
        .update(&alice, &movable.id, draft("2026-03-03", "7.25", &alice))
        .await
        .expect("in-place update");
    assert_eq!(updated.hours_worked, Decimal::from_str("7.25").unwrap());

    // Moving to a free date works
    ledger
        .update(&alice, &movable.id, draft("2026-03-04", "7.25", &alice))
        .await
        .expect("move to free date");
}

#[tokio::test]
async fn hours_are_stored_as_minutes_and_rendered_back_rounded() {
    let (db, alice) = setup_with_employee().await;
    let ledger = TimeEntryLedger::new(db);

    // 4.5833 h -> 275 minutes -> 4.58 h
    let entry = ledger
        .create(&alice, draft("2026-03-02", "4.5833", &alice))
        .await
        .expect("entry");
    assert_eq!(entry.hours_worked, Decimal::from_str("4.58").unwrap());

    let err = ledger
        .create(&alice, draft("2026-03-03", "-1", &alice))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}
