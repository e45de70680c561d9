//! Authorization matrix for ledger operations, exercised end to end
//! through an in-memory database.
//!
//! Org used everywhere: alice -> bob -> carol (a chief chain) plus dave,
//! who reports to nobody.

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

async fn setup() -> Surreal<Db> {
    DbService::memory().await.expect("in-memory db").db
}

async fn seed_employee(db: &Surreal<Db>, name: &str, chief: Option<&Employee>) -> Employee {
    let departments = DepartmentRepository::new(db.clone());
    let department = match departments.find_by_name("Development").await.expect("query") {
        Some(department) => department,
        None => departments.create("Development").await.expect("department"),
    };

    EmployeeRepository::new(db.clone())
        .create(EmployeeCreate {
            name: name.to_string(),
            password: "secret-password".to_string(),
            role: Role::User,
            position: Position::Developer,
            department: department.id.expect("department id"),
            chief: chief.map(|c| c.id.clone().expect("chief id")),
        })
        .await
        .expect("employee")
}

async fn seed_org(db: &Surreal<Db>) -> (Employee, Employee, Employee, Employee) {
    let alice = seed_employee(db, "alice", None).await;
    let bob = seed_employee(db, "bob", Some(&alice)).await;
    let carol = seed_employee(db, "carol", Some(&bob)).await;
    let dave = seed_employee(db, "dave", None).await;
    (alice, bob, carol, dave)
}

fn draft(date: &str, hours: &str, employee: &Employee) -> TimeEntryDraft {
    TimeEntryDraft {
        work_date: date.parse::<NaiveDate>().expect("date"),
        hours_worked: Decimal::from_str(hours).expect("hours"),
        employee_id: employee.id_string(),
    }
}

#[tokio::test]
async fn create_is_allowed_for_self_and_direct_subordinates_only() {
    let db = setup().await;
    let (alice, bob, carol, dave) = seed_org(&db).await;
    let ledger = TimeEntryLedger::new(db);

    // Own record
    let entry = ledger
        .create(&bob, draft("2026-03-02", "8", &bob))
        .await
        .expect("own entry");
    assert_eq!(entry.employee_id, bob.id_string());
    assert_eq!(entry.created_by_id, bob.id_string());

    // Direct subordinate
    ledger
        .create(&bob, draft("2026-03-02", "6", &carol))
        .await
        .expect("entry for direct subordinate");

    // Transitive superior is not enough for writes
    let err = ledger
        .create(&alice, draft("2026-03-03", "8", &carol))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // Unrelated employee
    let err = ledger
        .create(&dave, draft("2026-03-03", "8", &carol))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn updates_and_deletes_follow_the_direct_line_rule() {
    let db = setup().await;
    let (alice, bob, carol, dave) = seed_org(&db).await;
    let ledger = TimeEntryLedger::new(db);

    let entry = ledger
        .create(&bob, draft("2026-03-02", "8", &carol))
        .await
        .expect("entry");

    // The owner may rewrite their own entry
    let updated = ledger
        .update(&carol, &entry.id, draft("2026-03-02", "7.5", &carol))
        .await
        .expect("owner update");
    assert_eq!(updated.hours_worked, Decimal::from_str("7.50").unwrap());

    // The direct chief may too
    ledger
        .update(&bob, &entry.id, draft("2026-03-02", "6", &carol))
        .await
        .expect("chief update");

    // A transitive superior may not write
    let err = ledger
        .update(&alice, &entry.id, draft("2026-03-02", "1", &carol))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let err = ledger.delete(&dave, &entry.id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    ledger.delete(&bob, &entry.id).await.expect("chief delete");
    let err = ledger.get_by_id(&bob, &entry.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn reads_are_open_to_any_transitive_superior() {
    let db = setup().await;
    let (alice, bob, carol, dave) = seed_org(&db).await;
    let ledger = TimeEntryLedger::new(db);

    let entry = ledger
        .create(&carol, draft("2026-03-02", "8", &carol))
        .await
        .expect("entry");

    // alice is two levels above carol: read works, write does not
    ledger
        .get_by_id(&alice, &entry.id)
        .await
        .expect("transitive read");
    let listed = ledger
        .get_all_by_employee(&alice, &carol.id_string())
        .await
        .expect("transitive listing");
    assert_eq!(listed.len(), 1);

    // dave sees nothing
    let err = ledger.get_by_id(&dave, &entry.id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    let err = ledger
        .get_all_by_employee(&dave, &carol.id_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // and nobody reads upward
    let err = ledger
        .get_all_by_employee(&carol, &alice.id_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn accessible_listing_covers_self_and_all_descendants() {
    let db = setup().await;
    let (alice, bob, carol, dave) = seed_org(&db).await;
    let ledger = TimeEntryLedger::new(db);

    ledger
        .create(&alice, draft("2026-03-02", "8", &alice))
        .await
        .expect("alice entry");
    ledger
        .create(&bob, draft("2026-03-02", "8", &bob))
        .await
        .expect("bob entry");
    ledger
        .create(&carol, draft("2026-03-02", "8", &carol))
        .await
        .expect("carol entry");
    ledger
        .create(&dave, draft("2026-03-02", "8", &dave))
        .await
        .expect("dave entry");

    let all = ledger
        .get_all_accessible(&alice, None, None, None)
        .await
        .expect("alice listing");
    let mut owners: Vec<String> = all.iter().map(|e| e.employee_id.clone()).collect();
    owners.sort();
    let mut expected = vec![alice.id_string(), bob.id_string(), carol.id_string()];
    expected.sort();
    assert_eq!(owners, expected);

    // dave only sees himself
    let own = ledger
        .get_all_accessible(&dave, None, None, None)
        .await
        .expect("dave listing");
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].employee_id, dave.id_string());
}

#[tokio::test]
async fn accessible_listing_honors_the_requested_filter() {
    let db = setup().await;
    let (alice, bob, carol, dave) = seed_org(&db).await;
    let ledger = TimeEntryLedger::new(db);

    for e in [&alice, &bob, &carol, &dave] {
        ledger
            .create(e, draft("2026-03-02", "8", e))
            .await
            .expect("entry");
    }

    // alice asks for carol and dave: dave is filtered out, alice herself
    // always stays in
    let requested = vec![carol.id_string(), dave.id_string()];
    let filtered = ledger
        .get_all_accessible(&alice, Some(&requested), None, None)
        .await
        .expect("filtered listing");
    let mut owners: Vec<String> = filtered.iter().map(|e| e.employee_id.clone()).collect();
    owners.sort();
    let mut expected = vec![alice.id_string(), carol.id_string()];
    expected.sort();
    assert_eq!(owners, expected);
}

#[tokio::test]
async fn accessible_listing_applies_the_date_range() {
    let db = setup().await;
    let (_, bob, carol, _) = seed_org(&db).await;
    let ledger = TimeEntryLedger::new(db);

    ledger
        .create(&carol, draft("2026-03-01", "8", &carol))
        .await
        .expect("entry 1");
    ledger
        .create(&carol, draft("2026-03-05", "8", &carol))
        .await
        .expect("entry 2");
    ledger
        .create(&carol, draft("2026-03-10", "8", &carol))
        .await
        .expect("entry 3");

    let in_range = ledger
        .get_all_accessible(
            &bob,
            None,
            Some("2026-03-02".parse().unwrap()),
            Some("2026-03-09".parse().unwrap()),
        )
        .await
        .expect("range listing");
    assert_eq!(in_range.len(), 1);
    assert_eq!(
        in_range[0].work_date,
        "2026-03-05".parse::<NaiveDate>().unwrap()
    );

    // Bounds are inclusive
    let inclusive = ledger
        .get_all_accessible(
            &bob,
            None,
            Some("2026-03-01".parse().unwrap()),
            Some("2026-03-10".parse().unwrap()),
        )
        .await
        .expect("inclusive listing");
    assert_eq!(inclusive.len(), 3);
}
