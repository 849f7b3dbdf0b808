use std::collections::HashMap;

use crate::model::TreeElement;

/// Structured result of a forest audit.
#[derive(Debug)]
pub struct CheckResult<Id: std::fmt::Debug> {
    pub valid: bool,
    pub errors: Vec<CheckError<Id>>,
    pub warnings: Vec<CheckWarning<Id>>,
}

/// An invariant violation (the forest is malformed).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError<Id: std::fmt::Debug> {
    /// The same identity appears more than once in the forest.
    #[error("duplicate element id {id:?} ({count} occurrences)")]
    DuplicateId { id: Id, count: usize },
}

/// A non-critical oddity worth surfacing to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckWarning<Id: std::fmt::Debug> {
    /// A leaf carries an expansion flag it can never use.
    #[error("leaf {id:?} carries an expanded flag")]
    ExpandedLeaf { id: Id },
    /// A group with no members. Legal, but often a leftover.
    #[error("group {id:?} is empty")]
    EmptyGroup { id: Id },
}

/// Audit a forest against the data-model invariants.
///
/// This is a read-only, advisory operation: the core never repairs a
/// malformed forest, it only reports. Duplicate identities are the one hard
/// error — every identity-addressed operation assumes uniqueness.
pub fn check_forest<E: TreeElement>(forest: &[E]) -> CheckResult<E::Id> {
    let mut counts: HashMap<E::Id, usize> = HashMap::new();
    let mut warnings = Vec::new();
    audit(forest, &mut counts, &mut warnings);

    let mut errors: Vec<CheckError<E::Id>> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(id, count)| CheckError::DuplicateId { id, count })
        .collect();
    // HashMap iteration order is arbitrary; report deterministically.
    errors.sort_by(|a, b| {
        let (CheckError::DuplicateId { id: a, .. }, CheckError::DuplicateId { id: b, .. }) = (a, b);
        format!("{a:?}").cmp(&format!("{b:?}"))
    });

    CheckResult {
        valid: errors.is_empty(),
        errors,
        warnings,
    }
}

fn audit<E: TreeElement>(
    items: &[E],
    counts: &mut HashMap<E::Id, usize>,
    warnings: &mut Vec<CheckWarning<E::Id>>,
) {
    for element in items {
        *counts.entry(element.id().clone()).or_insert(0) += 1;

        match element.children() {
            None => {
                if element.expanded().is_some() {
                    warnings.push(CheckWarning::ExpandedLeaf {
                        id: element.id().clone(),
                    });
                }
            }
            Some([]) => warnings.push(CheckWarning::EmptyGroup {
                id: element.id().clone(),
            }),
            Some(children) => audit(children, counts, warnings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TreeNode;
    use pretty_assertions::assert_eq;

    fn leaf(id: u64) -> TreeNode {
        TreeNode::leaf(format!("n{id}")).with_id(id)
    }

    #[test]
    fn clean_forest_passes() {
        let forest = vec![
            leaf(1),
            TreeNode::branch("g", vec![leaf(2), leaf(3)]).with_id(4),
        ];
        let result = check_forest(&forest);
        assert!(result.valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn duplicate_ids_are_errors() {
        let forest = vec![leaf(1), TreeNode::branch("g", vec![leaf(1)]).with_id(2)];
        let result = check_forest(&forest);
        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec![CheckError::DuplicateId { id: 1, count: 2 }]
        );
    }

    #[test]
    fn expanded_leaf_and_empty_group_warn() {
        let mut odd_leaf = leaf(1);
        odd_leaf.expanded = Some(true);
        let forest = vec![odd_leaf, TreeNode::branch("g", vec![]).with_id(2)];

        let result = check_forest(&forest);
        assert!(result.valid);
        assert_eq!(
            result.warnings,
            vec![
                CheckWarning::ExpandedLeaf { id: 1 },
                CheckWarning::EmptyGroup { id: 2 },
            ]
        );
    }
}
