//! Department Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Department ID type
pub type DepartmentId = RecordId;

/// Department model
///
/// Membership is derived by querying employees; it is not stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<DepartmentId>,
    pub name: String,
}
