use indexmap::IndexSet;
use ratatui::layout::Position;

use crate::model::{GroupCandidate, TreeElement};
use crate::ops::group_ops::{
    contains_valid_group, contains_valid_ungroup, create_group, insert_group, ungroup,
};
use crate::ops::mutate::remove_set;
use crate::ops::query::{descendant_ids, get, get_mut};

use super::drag::{DragController, RowBounds};

/// Interaction state for one nested-list widget: the selection set, the
/// editing flag, and the drag controller.
///
/// The forest itself stays with the caller; every method that edits it takes
/// `&mut Vec<E>` and leaves it in a consistent state before returning.
pub struct NestedListState<E: TreeElement> {
    selection: IndexSet<E::Id>,
    drag: DragController<E>,
    editing: bool,
}

impl<E: TreeElement> Default for NestedListState<E> {
    fn default() -> Self {
        NestedListState {
            selection: IndexSet::new(),
            drag: DragController::default(),
            editing: false,
        }
    }
}

impl<E: TreeElement + Clone> NestedListState<E> {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    pub fn selection(&self) -> &IndexSet<E::Id> {
        &self.selection
    }

    pub fn is_selected(&self, id: &E::Id) -> bool {
        self.selection.contains(id)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Select an element together with its whole subtree. Selecting a group
    /// always carries its members; a half-selected subtree can never be
    /// produced through this path.
    pub fn select(&mut self, forest: &[E], id: &E::Id) {
        if let Some(element) = get(forest, id) {
            self.selection.extend(descendant_ids(element));
        }
    }

    /// Deselect an element and its whole subtree.
    pub fn deselect(&mut self, forest: &[E], id: &E::Id) {
        match get(forest, id) {
            Some(element) => {
                for did in descendant_ids(element) {
                    self.selection.shift_remove(&did);
                }
            }
            None => {
                self.selection.shift_remove(id);
            }
        }
    }

    pub fn toggle(&mut self, forest: &[E], id: &E::Id) {
        if self.is_selected(id) {
            self.deselect(forest, id);
        } else {
            self.select(forest, id);
        }
    }

    // -----------------------------------------------------------------------
    // Editing mode
    // -----------------------------------------------------------------------

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn set_editing(&mut self, editing: bool) {
        self.editing = editing;
    }

    // -----------------------------------------------------------------------
    // Grouping actions
    // -----------------------------------------------------------------------

    /// Can the current selection be wrapped into a group? UIs use this to
    /// enable or disable the action; `Invalid` takes no further effect.
    pub fn group_candidate(&self, forest: &[E]) -> GroupCandidate<E::Id> {
        contains_valid_group(forest, &self.selection)
    }

    /// Can the current selection dissolve a group?
    pub fn ungroup_candidate(&self, forest: &[E]) -> GroupCandidate<E::Id> {
        contains_valid_ungroup(forest, &self.selection)
    }

    /// Wrap the current selection into a freshly minted group.
    ///
    /// On success the new group element is returned (so the caller can
    /// react — navigate into it, rename it), the selection is cleared, and
    /// editing mode ends. An invalid selection changes nothing.
    pub fn group_selection(&mut self, forest: &mut Vec<E>) -> Option<E> {
        let GroupCandidate::Valid(parent_id) = self.group_candidate(forest) else {
            return None;
        };

        let group = create_group(forest, E::mint_id(), parent_id.as_ref(), &self.selection)?;
        insert_group(forest, group.clone(), &self.selection);

        self.selection.clear();
        self.editing = false;
        Some(group)
    }

    /// Dissolve the group selected via its full subtree. Returns whether the
    /// forest changed.
    pub fn ungroup_selection(&mut self, forest: &mut Vec<E>) -> bool {
        let GroupCandidate::Valid(Some(group_id)) = self.ungroup_candidate(forest) else {
            return false;
        };

        ungroup(forest, &group_id);
        self.selection.clear();
        self.editing = false;
        true
    }

    /// Remove every selected element (subtrees included). Returns whether
    /// anything was selected.
    pub fn delete_selection(&mut self, forest: &mut Vec<E>) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        remove_set(forest, &self.selection);
        self.selection.clear();
        self.editing = false;
        true
    }

    // -----------------------------------------------------------------------
    // Expansion
    // -----------------------------------------------------------------------

    /// Flip a group's expanded flag. Leaves are left untouched.
    pub fn toggle_expanded(&mut self, forest: &mut [E], id: &E::Id) {
        if let Some(element) = get_mut(forest, id) {
            if element.is_group() {
                let expanded = element.expanded().unwrap_or(false);
                element.set_expanded(Some(!expanded));
            }
        }
    }

    // -----------------------------------------------------------------------
    // Drag
    // -----------------------------------------------------------------------

    pub fn drag(&self) -> &DragController<E> {
        &self.drag
    }

    /// Forward a pointer update to the drag controller. While editing mode
    /// is active the gesture is suppressed: the controller sees an absent
    /// pointer, which also cancels any drag in flight.
    pub fn drag_update(
        &mut self,
        forest: &mut Vec<E>,
        pointer: Option<Position>,
        rows: &[RowBounds<E::Id>],
    ) -> bool {
        let pointer = if self.editing { None } else { pointer };
        self.drag.update(forest, pointer, rows)
    }
}
