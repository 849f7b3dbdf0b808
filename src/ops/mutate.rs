use indexmap::IndexSet;

use crate::model::TreeElement;

/// Insert `element` immediately after the element with id `anchor`, in
/// whichever sibling sequence holds the anchor.
///
/// With `anchor = None` the element becomes the new first root element. If
/// the anchor is not found anywhere, the element is appended at the root
/// level instead — the operation never drops data.
pub fn insert_after<E: TreeElement>(forest: &mut Vec<E>, element: E, anchor: Option<&E::Id>) {
    let Some(anchor) = anchor else {
        forest.insert(0, element);
        return;
    };

    let mut slot = Some(element);
    if !insert_after_in(forest, &mut slot, anchor) {
        if let Some(element) = slot.take() {
            forest.push(element);
        }
    }
}

/// Returns whether the anchor was found in this subtree. A `false` tells the
/// parent frame to keep searching the next sibling; only the top-level
/// caller turns a total miss into the append fallback.
fn insert_after_in<E: TreeElement>(items: &mut Vec<E>, slot: &mut Option<E>, anchor: &E::Id) -> bool {
    for index in 0..items.len() {
        if items[index].id() == anchor {
            let Some(element) = slot.take() else {
                return true;
            };
            items.insert(index + 1, element);
            return true;
        }
        if let Some(children) = items[index].children_mut() {
            if insert_after_in(children, slot, anchor) {
                return true;
            }
        }
    }
    false
}

/// Remove the element with the given id from whichever sequence holds it,
/// returning it. `None` means the id was not present and nothing changed.
pub fn remove<E: TreeElement>(forest: &mut Vec<E>, id: &E::Id) -> Option<E> {
    for index in 0..forest.len() {
        if forest[index].id() == id {
            return Some(forest.remove(index));
        }
        if let Some(children) = forest[index].children_mut() {
            if let Some(removed) = remove(children, id) {
                return Some(removed);
            }
        }
    }
    None
}

/// Remove every element whose id is in `ids`, at every level, in one
/// filtering pass per sequence. Children of surviving elements are filtered
/// recursively; children of removed elements go with their parent.
pub fn remove_set<E: TreeElement>(forest: &mut Vec<E>, ids: &IndexSet<E::Id>) {
    forest.retain(|element| !ids.contains(element.id()));
    for element in forest.iter_mut() {
        if let Some(children) = element.children_mut() {
            remove_set(children, ids);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::query::{flatten, get};
    use crate::model::TreeNode;
    use pretty_assertions::assert_eq;

    fn leaf(id: u64) -> TreeNode {
        TreeNode::leaf(format!("n{id}")).with_id(id)
    }

    fn branch(id: u64, children: Vec<TreeNode>) -> TreeNode {
        TreeNode::branch(format!("g{id}"), children).with_id(id)
    }

    fn flat_ids(forest: &[TreeNode]) -> Vec<u64> {
        flatten(forest).iter().map(|e| e.id).collect()
    }

    fn sample_forest() -> Vec<TreeNode> {
        vec![
            leaf(1),
            branch(2, vec![leaf(3), branch(4, vec![leaf(5)])]),
            leaf(6),
        ]
    }

    #[test]
    fn insert_after_root_anchor() {
        let mut forest = sample_forest();
        insert_after(&mut forest, leaf(7), Some(&1));
        assert_eq!(flat_ids(&forest), vec![1, 7, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn insert_after_nested_anchor() {
        let mut forest = sample_forest();
        insert_after(&mut forest, leaf(7), Some(&3));
        assert_eq!(flat_ids(&forest), vec![1, 2, 3, 7, 4, 5, 6]);
        // inserted as a sibling of 3, not hoisted to the root
        assert_eq!(
            get(&forest, &2).unwrap().children.as_ref().map(Vec::len),
            Some(3)
        );
    }

    #[test]
    fn insert_after_last_of_sequence_appends() {
        let mut forest = sample_forest();
        insert_after(&mut forest, leaf(7), Some(&5));
        assert_eq!(flat_ids(&forest), vec![1, 2, 3, 4, 5, 7, 6]);
    }

    #[test]
    fn insert_after_none_prepends_at_root() {
        let mut forest = sample_forest();
        insert_after(&mut forest, leaf(7), None);
        assert_eq!(flat_ids(&forest), vec![7, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn insert_after_missing_anchor_appends_at_root() {
        let mut forest = sample_forest();
        insert_after(&mut forest, leaf(7), Some(&99));
        assert_eq!(flat_ids(&forest), vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn remove_root_element() {
        let mut forest = sample_forest();
        let removed = remove(&mut forest, &1).unwrap();
        assert_eq!(removed.id, 1);
        assert_eq!(flat_ids(&forest), vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn remove_nested_element_takes_subtree() {
        let mut forest = sample_forest();
        let removed = remove(&mut forest, &4).unwrap();
        assert_eq!(removed.id, 4);
        assert_eq!(removed.children.as_ref().map(Vec::len), Some(1));
        assert_eq!(flat_ids(&forest), vec![1, 2, 3, 6]);
    }

    #[test]
    fn remove_miss_is_a_noop() {
        let mut forest = sample_forest();
        assert!(remove(&mut forest, &99).is_none());
        assert_eq!(flat_ids(&forest), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn remove_then_insert_after_predecessor_restores_order() {
        let mut forest = sample_forest();
        let original = flat_ids(&forest);
        let element = remove(&mut forest, &4).unwrap();
        insert_after(&mut forest, element, Some(&3));
        assert_eq!(flat_ids(&forest), original);
    }

    #[test]
    fn remove_set_filters_every_level() {
        let mut forest = sample_forest();
        let ids: IndexSet<u64> = [1, 5].into_iter().collect();
        remove_set(&mut forest, &ids);
        assert_eq!(flat_ids(&forest), vec![2, 3, 4, 6]);
        // 4 survives as an empty group
        assert!(get(&forest, &4).unwrap().is_group());
    }

    #[test]
    fn remove_set_with_unknown_ids_is_a_noop() {
        let mut forest = sample_forest();
        let ids: IndexSet<u64> = [98, 99].into_iter().collect();
        remove_set(&mut forest, &ids);
        assert_eq!(flat_ids(&forest), vec![1, 2, 3, 4, 5, 6]);
    }
}
