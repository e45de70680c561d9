//! Employee Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Employee, EmployeeCreate, EmployeeUpdate};
use chrono::Utc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all employees
    pub async fn find_all(&self) -> RepoResult<Vec<Employee>> {
        let employees: Vec<Employee> = self
            .base
            .db()
            .query("SELECT * FROM employee ORDER BY name")
            .await?
            .take(0)?;
        Ok(employees)
    }

    /// Find employee by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Employee>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let emp: Option<Employee> = self.base.db().select(thing).await?;
        Ok(emp)
    }

    /// Find employee by name (the login)
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<Employee>> {
        let name_owned = name.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM employee WHERE name = $name")
            .bind(("name", name_owned))
            .await?;
        let employees: Vec<Employee> = result.take(0)?;
        Ok(employees.into_iter().next())
    }

    /// Create a new employee
    pub async fn create(&self, data: EmployeeCreate) -> RepoResult<Employee> {
        // Check duplicate name (the unique index is the backstop)
        if self.find_by_name(&data.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Employee name '{}' already exists",
                data.name
            )));
        }

        let hash_pass = Employee::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE employee SET
                    name = $name,
                    hash_pass = $hash_pass,
                    role = $role,
                    position = $position,
                    department = $department,
                    chief = $chief,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("name", data.name))
            .bind(("hash_pass", hash_pass))
            .bind(("role", data.role))
            .bind(("position", data.position))
            .bind(("department", data.department))
            .bind(("chief", data.chief))
            .bind(("created_at", Utc::now().timestamp_millis()))
            .await?;

        let created: Option<Employee> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create employee".to_string()))
    }

    /// Update an employee
    ///
    /// The chief field uses Option<Option<..>>: the outer None leaves the
    /// link untouched, Some(None) detaches the employee from its chief.
    pub async fn update(&self, id: &str, data: EmployeeUpdate) -> RepoResult<Employee> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))?;

        // Check duplicate name if changing
        if let Some(ref new_name) = data.name
            && new_name != &existing.name
            && self.find_by_name(new_name).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Employee name '{}' already exists",
                new_name
            )));
        }

        let hash_pass = match data.password {
            Some(ref password) => Some(
                Employee::hash_password(password)
                    .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?,
            ),
            None => None,
        };

        let chief: Option<RecordId> = match &data.chief {
            Some(Some(chief_id)) => Some(
                chief_id
                    .parse()
                    .map_err(|_| RepoError::Validation(format!("Invalid chief ID: {}", chief_id)))?,
            ),
            _ => None,
        };

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = IF $has_name THEN $name ELSE name END,
                    hash_pass = IF $has_pass THEN $hash_pass ELSE hash_pass END,
                    role = IF $has_role THEN $role ELSE role END,
                    position = IF $has_position THEN $position ELSE position END,
                    chief = IF $has_chief THEN $chief ELSE chief END
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("has_name", data.name.is_some()))
            .bind(("name", data.name))
            .bind(("has_pass", hash_pass.is_some()))
            .bind(("hash_pass", hash_pass))
            .bind(("has_role", data.role.is_some()))
            .bind(("role", data.role))
            .bind(("has_position", data.position.is_some()))
            .bind(("position", data.position))
            .bind(("has_chief", data.chief.is_some()))
            .bind(("chief", chief))
            .await?;

        result
            .take::<Option<Employee>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))
    }

    /// Hard delete an employee, detaching its direct subordinates first
    /// so the forest invariant survives the removal
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))?;

        self.base
            .db()
            .query("UPDATE employee SET chief = NONE WHERE chief = $thing; DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
