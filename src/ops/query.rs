use indexmap::IndexSet;

use crate::model::TreeElement;

/// Flatten a forest into pre-order: each element before its children,
/// children in their original sibling order. Read-only; the returned
/// borrows index straight into the forest.
pub fn flatten<E: TreeElement>(forest: &[E]) -> Vec<&E> {
    let mut out = Vec::new();
    collect_flat(forest, &mut out);
    out
}

fn collect_flat<'a, E: TreeElement>(items: &'a [E], out: &mut Vec<&'a E>) {
    for element in items {
        out.push(element);
        if let Some(children) = element.children() {
            collect_flat(children, out);
        }
    }
}

/// Find an element by identity anywhere in the forest (pre-order, first
/// match). Under the identity-uniqueness invariant the first match is the
/// only one.
pub fn get<'a, E: TreeElement>(forest: &'a [E], id: &E::Id) -> Option<&'a E> {
    for element in forest {
        if element.id() == id {
            return Some(element);
        }
        if let Some(children) = element.children() {
            if let Some(found) = get(children, id) {
                return Some(found);
            }
        }
    }
    None
}

pub fn get_mut<'a, E: TreeElement>(forest: &'a mut [E], id: &E::Id) -> Option<&'a mut E> {
    for element in forest.iter_mut() {
        if element.id() == id {
            return Some(element);
        }
        if let Some(children) = element.children_mut() {
            if let Some(found) = get_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

/// The element's own id plus the ids of everything nested under it, in
/// pre-order. A leaf yields just its own id.
pub fn descendant_ids<E: TreeElement>(element: &E) -> IndexSet<E::Id> {
    let mut ids = IndexSet::new();
    collect_ids(element, &mut ids);
    ids
}

fn collect_ids<E: TreeElement>(element: &E, out: &mut IndexSet<E::Id>) {
    out.insert(element.id().clone());
    if let Some(children) = element.children() {
        for child in children {
            collect_ids(child, out);
        }
    }
}

/// The element whose immediate children contain `id`. `None` for root
/// elements and for ids not present in the forest.
pub fn find_parent<'a, E: TreeElement>(forest: &'a [E], id: &E::Id) -> Option<&'a E> {
    for element in forest {
        if let Some(children) = element.children() {
            if children.iter().any(|child| child.id() == id) {
                return Some(element);
            }
            if let Some(found) = find_parent(children, id) {
                return Some(found);
            }
        }
    }
    None
}
