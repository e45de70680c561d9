//! Access Control Evaluator
//!
//! Every permission decision for time-entry records lives here, so the
//! ledger and the CSV pipeline can never diverge in policy.
//!
//! The rules are deliberately asymmetric: writes (create/update/delete on
//! behalf of someone else) require a *direct* reporting line, while reads are
//! granted to any ancestor in the subject's chief chain. A manager sees
//! everything below them but only authors records for people reporting
//! straight to them.

use std::collections::HashSet;

use crate::hierarchy::OrgTree;

/// create: own record, or the subject reports directly to the actor
pub fn can_create(tree: &OrgTree, actor: &str, subject: &str) -> bool {
    actor == subject || tree.is_direct_subordinate(actor, subject)
}

/// update / delete: own record, or the subject reports directly to the actor
pub fn can_modify(tree: &OrgTree, actor: &str, subject: &str) -> bool {
    actor == subject || tree.is_direct_subordinate(actor, subject)
}

/// read single / read-by-employee: own record, or the actor appears anywhere
/// in the subject's chief chain
pub fn can_view(tree: &OrgTree, actor: &str, subject: &str) -> bool {
    actor == subject || tree.is_ancestor(actor, subject)
}

/// The set of employee ids whose records the actor may see in a bulk query
///
/// With an explicit filter: the actor plus every requested id the actor may
/// view. Without one: the actor plus all of their descendants.
pub fn accessible_set(
    tree: &OrgTree,
    actor: &str,
    requested: Option<&[String]>,
) -> HashSet<String> {
    let mut accessible = HashSet::new();
    accessible.insert(actor.to_string());

    match requested {
        Some(ids) if !ids.is_empty() => {
            for id in ids {
                if can_view(tree, actor, id) {
                    accessible.insert(id.clone());
                }
            }
        }
        _ => {
            accessible.extend(tree.descendants(actor));
        }
    }

    accessible
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> String {
        format!("employee:{}", n)
    }

    /// Chain A(1) -> B(2) -> C(3), unrelated D(4)
    fn tree() -> OrgTree {
        OrgTree::new(vec![
            (id(1), None),
            (id(2), Some(id(1))),
            (id(3), Some(id(2))),
            (id(4), None),
        ])
    }

    #[test]
    fn everyone_acts_on_their_own_records() {
        let tree = tree();
        for n in 1..=4 {
            assert!(can_create(&tree, &id(n), &id(n)));
            assert!(can_modify(&tree, &id(n), &id(n)));
            assert!(can_view(&tree, &id(n), &id(n)));
        }
    }

    #[test]
    fn writes_require_a_direct_reporting_line() {
        let tree = tree();
        // B manages C directly: full access
        assert!(can_create(&tree, &id(2), &id(3)));
        assert!(can_modify(&tree, &id(2), &id(3)));
        // A is above C but not directly: read-only
        assert!(!can_create(&tree, &id(1), &id(3)));
        assert!(!can_modify(&tree, &id(1), &id(3)));
        assert!(can_view(&tree, &id(1), &id(3)));
    }

    #[test]
    fn unrelated_employees_get_nothing() {
        let tree = tree();
        assert!(!can_create(&tree, &id(4), &id(3)));
        assert!(!can_modify(&tree, &id(4), &id(3)));
        assert!(!can_view(&tree, &id(4), &id(3)));
        // And subordinates get nothing upward
        assert!(!can_modify(&tree, &id(3), &id(2)));
        assert!(!can_view(&tree, &id(3), &id(1)));
    }

    #[test]
    fn accessible_set_without_filter_is_self_plus_descendants() {
        let tree = tree();
        assert_eq!(
            accessible_set(&tree, &id(1), None),
            HashSet::from([id(1), id(2), id(3)])
        );
        assert_eq!(accessible_set(&tree, &id(4), None), HashSet::from([id(4)]));
    }

    #[test]
    fn accessible_set_with_filter_keeps_only_viewable_ids() {
        let tree = tree();
        let requested = vec![id(2), id(3), id(4)];
        // A may view B and C but not the unrelated D
        assert_eq!(
            accessible_set(&tree, &id(1), Some(&requested)),
            HashSet::from([id(1), id(2), id(3)])
        );
        // C may only view itself
        let requested = vec![id(1), id(2), id(4)];
        assert_eq!(
            accessible_set(&tree, &id(3), Some(&requested)),
            HashSet::from([id(3)])
        );
    }

    #[test]
    fn empty_filter_falls_back_to_descendants() {
        let tree = tree();
        let empty: Vec<String> = vec![];
        assert_eq!(
            accessible_set(&tree, &id(2), Some(&empty)),
            HashSet::from([id(2), id(3)])
        );
    }
}
