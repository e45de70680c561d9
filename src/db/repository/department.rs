//! Department Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Department;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct DepartmentRepository {
    base: BaseRepository,
}

impl DepartmentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Department>> {
        let departments: Vec<Department> = self
            .base
            .db()
            .query("SELECT * FROM department ORDER BY name")
            .await?
            .take(0)?;
        Ok(departments)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Department>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let department: Option<Department> = self.base.db().select(thing).await?;
        Ok(department)
    }

    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<Department>> {
        let name_owned = name.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM department WHERE name = $name")
            .bind(("name", name_owned))
            .await?;
        let departments: Vec<Department> = result.take(0)?;
        Ok(departments.into_iter().next())
    }

    pub async fn create(&self, name: &str) -> RepoResult<Department> {
        if self.find_by_name(name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Department '{}' already exists",
                name
            )));
        }

        let mut result = self
            .base
            .db()
            .query("CREATE department SET name = $name RETURN AFTER")
            .bind(("name", name.to_string()))
            .await?;

        let created: Option<Department> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create department".to_string()))
    }
}
