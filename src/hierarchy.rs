//! Hierarchy Model
//!
//! The chief/subordinate structure as explicit adjacency: a parent map plus a
//! derived children map, both built from the single authoritative chief
//! pointer stored per employee. Relationship queries are cycle-safe — the
//! stored data is supposed to be a forest, but a corrupted chief chain must
//! never hang a request, so every walk carries a visited set and a detected
//! cycle is logged and evaluated as "no relationship".

use std::collections::{HashMap, HashSet};

use crate::db::models::Employee;
use crate::utils::{AppError, AppResult};

/// Immutable snapshot of the org structure, keyed by "employee:id" strings
#[derive(Debug, Default)]
pub struct OrgTree {
    parent: HashMap<String, String>,
    children: HashMap<String, Vec<String>>,
}

impl OrgTree {
    /// Build the adjacency maps from (employee, chief) pairs
    pub fn new(pairs: impl IntoIterator<Item = (String, Option<String>)>) -> Self {
        let mut parent = HashMap::new();
        let mut children: HashMap<String, Vec<String>> = HashMap::new();

        for (id, chief) in pairs {
            if let Some(chief_id) = chief {
                children.entry(chief_id.clone()).or_default().push(id.clone());
                parent.insert(id, chief_id);
            }
        }

        Self { parent, children }
    }

    /// Snapshot the current employee table
    pub fn from_employees(employees: &[Employee]) -> Self {
        Self::new(employees.iter().map(|e| {
            (
                e.id_string(),
                e.chief.as_ref().map(|c| c.to_string()),
            )
        }))
    }

    /// True iff `employee`'s immediate chief is `manager`
    pub fn is_direct_subordinate(&self, manager: &str, employee: &str) -> bool {
        self.parent.get(employee).is_some_and(|chief| chief == manager)
    }

    /// True iff `manager` appears anywhere in `employee`'s chief chain
    ///
    /// Terminates on malformed cyclic data: the cycle is logged as an
    /// integrity error and treated as "not an ancestor".
    pub fn is_ancestor(&self, manager: &str, employee: &str) -> bool {
        let mut visited = HashSet::new();
        let mut current = employee;

        while let Some(chief) = self.parent.get(current) {
            if chief == manager {
                return true;
            }
            if !visited.insert(chief.as_str()) {
                tracing::error!(
                    target: "hierarchy",
                    employee = %employee,
                    at = %chief,
                    "Cycle detected in chief chain; treating as no ancestor"
                );
                return false;
            }
            current = chief;
        }

        false
    }

    /// Every employee reachable downward from `manager`, direct and
    /// indirect, excluding `manager` itself
    pub fn descendants(&self, manager: &str) -> HashSet<String> {
        let mut visited: HashSet<String> = HashSet::new();
        let mut worklist: Vec<&str> = vec![manager];

        while let Some(current) = worklist.pop() {
            if let Some(subordinates) = self.children.get(current) {
                for subordinate in subordinates {
                    if visited.insert(subordinate.clone()) {
                        worklist.push(subordinate);
                    } else {
                        tracing::error!(
                            target: "hierarchy",
                            manager = %manager,
                            at = %subordinate,
                            "Cycle detected in subordinate traversal"
                        );
                    }
                }
            }
        }

        visited.remove(manager);
        visited
    }

    /// Validate that assigning `chief` to `employee` keeps the graph a forest
    ///
    /// Rejects self-reference and any chief that is already a descendant of
    /// the employee (which would close a cycle).
    pub fn validate_chief_assignment(&self, employee: &str, chief: &str) -> AppResult<()> {
        if employee == chief {
            return Err(AppError::validation(
                "An employee cannot be their own chief",
            ));
        }
        if self.is_ancestor(employee, chief) {
            return Err(AppError::validation(
                "Chief assignment would create a cycle in the hierarchy",
            ));
        }
        Ok(())
    }
}
