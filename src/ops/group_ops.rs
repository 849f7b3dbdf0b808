use indexmap::IndexSet;

use crate::model::{GroupCandidate, TreeElement};
use crate::ops::mutate::remove_set;
use crate::ops::query::descendant_ids;

// ---------------------------------------------------------------------------
// Validity analysis
// ---------------------------------------------------------------------------

/// Decide whether `selections` can be wrapped into a single group.
///
/// Valid iff there is exactly one sibling sequence (at any depth) where the
/// selected elements, together with all of their descendants, reconstitute
/// the full selection set. A selection spanning mismatched hierarchy levels
/// — say, a group plus only one of its children — is invalid.
///
/// On success the payload is the id of the group whose child sequence hosts
/// the selection, or `None` for the root sequence.
pub fn contains_valid_group<E: TreeElement>(
    forest: &[E],
    selections: &IndexSet<E::Id>,
) -> GroupCandidate<E::Id> {
    valid_group_at(forest, selections, None)
}

fn valid_group_at<E: TreeElement>(
    items: &[E],
    selections: &IndexSet<E::Id>,
    parent: Option<&E::Id>,
) -> GroupCandidate<E::Id> {
    if items.is_empty() || selections.is_empty() {
        return GroupCandidate::Invalid;
    }

    // What the selection would have to be if this level is the top of it:
    // every selected sibling here contributes its entire subtree.
    let mut valid_set: IndexSet<E::Id> = IndexSet::new();
    for element in items {
        if selections.contains(element.id()) {
            valid_set.extend(descendant_ids(element));
        }
    }

    // No selection touches this level — try one level deeper. First
    // depth-first match wins.
    if valid_set.is_empty() {
        for element in items {
            if let Some(children) = element.children() {
                if let GroupCandidate::Valid(parent_id) =
                    valid_group_at(children, selections, Some(element.id()))
                {
                    return GroupCandidate::Valid(parent_id);
                }
            }
        }
        return GroupCandidate::Invalid;
    }

    // This is the highest level the selection reaches, so it must account
    // for the selection exactly.
    if &valid_set != selections {
        return GroupCandidate::Invalid;
    }

    GroupCandidate::Valid(parent.cloned())
}

/// Decide whether `selections` exactly dissolves one group: valid iff the
/// selection equals the descendant set of a single group element. The
/// payload is that group's id.
pub fn contains_valid_ungroup<E: TreeElement>(
    forest: &[E],
    selections: &IndexSet<E::Id>,
) -> GroupCandidate<E::Id> {
    for element in forest {
        if selections.contains(element.id()) {
            // The top selected element must be a group, and its subtree
            // must account for the whole selection.
            if !element.is_group() {
                return GroupCandidate::Invalid;
            }
            if &descendant_ids(element) != selections {
                return GroupCandidate::Invalid;
            }
            return GroupCandidate::Valid(Some(element.id().clone()));
        }

        if let Some(children) = element.children() {
            match contains_valid_ungroup(children, selections) {
                GroupCandidate::Valid(Some(id)) => return GroupCandidate::Valid(Some(id)),
                // An ungroup target without a discoverable identity is no
                // target at all.
                GroupCandidate::Valid(None) => return GroupCandidate::Invalid,
                GroupCandidate::Invalid => {}
            }
        }
    }
    GroupCandidate::Invalid
}

// ---------------------------------------------------------------------------
// Group construction and dissolution
// ---------------------------------------------------------------------------

/// Build a new group element from the selected members of the sibling
/// sequence identified by `target_parent` (`None` = root sequence). Members
/// keep their original left-to-right order. Does not mutate the forest;
/// pair with [`insert_group`] to splice the result in.
///
/// `None` when the target parent cannot be located.
pub fn create_group<E: TreeElement + Clone>(
    forest: &[E],
    new_group_id: E::Id,
    target_parent: Option<&E::Id>,
    selections: &IndexSet<E::Id>,
) -> Option<E> {
    create_group_at(forest, new_group_id, target_parent, None, selections)
}

fn create_group_at<E: TreeElement + Clone>(
    items: &[E],
    new_group_id: E::Id,
    target_parent: Option<&E::Id>,
    current: Option<&E::Id>,
    selections: &IndexSet<E::Id>,
) -> Option<E> {
    if target_parent == current {
        let members: Vec<E> = items
            .iter()
            .filter(|element| selections.contains(element.id()))
            .cloned()
            .collect();
        return Some(E::group(new_group_id, members, Some(true)));
    }

    for element in items {
        if let Some(children) = element.children() {
            if let Some(group) = create_group_at(
                children,
                new_group_id.clone(),
                target_parent,
                Some(element.id()),
                selections,
            ) {
                return Some(group);
            }
        }
    }
    None
}

/// Splice `group` into the forest at the position of the earliest selected
/// element, removing every selected element first. The search descends level
/// by level until some sequence contains a selection; if none does, the
/// forest is left unchanged.
pub fn insert_group<E: TreeElement>(forest: &mut Vec<E>, group: E, selections: &IndexSet<E::Id>) {
    let mut slot = Some(group);
    insert_group_in(forest, &mut slot, selections);
}

fn insert_group_in<E: TreeElement>(
    items: &mut Vec<E>,
    slot: &mut Option<E>,
    selections: &IndexSet<E::Id>,
) -> bool {
    // Lowest index among selections at this level; elements before it are
    // unselected, so the index stays valid after the removal pass.
    if let Some(index) = items
        .iter()
        .position(|element| selections.contains(element.id()))
    {
        remove_set(items, selections);
        if let Some(group) = slot.take() {
            items.insert(index.min(items.len()), group);
        }
        return true;
    }

    for element in items.iter_mut() {
        if let Some(children) = element.children_mut() {
            if insert_group_in(children, slot, selections) {
                return true;
            }
        }
    }
    false
}

/// Dissolve the group with the given id: its children take its place in the
/// same sequence, in order, and the group element itself is discarded.
/// No-op if the id is not present. A leaf addressed by this operation has no
/// children to splice and is simply removed.
pub fn ungroup<E: TreeElement>(forest: &mut Vec<E>, group_id: &E::Id) {
    if let Some(index) = forest.iter().position(|element| element.id() == group_id) {
        let mut element = forest.remove(index);
        if let Some(children) = element.children_mut() {
            let children = std::mem::take(children);
            forest.splice(index..index, children);
        }
        return;
    }

    for element in forest.iter_mut() {
        if let Some(children) = element.children_mut() {
            ungroup(children, group_id);
        }
    }
}
