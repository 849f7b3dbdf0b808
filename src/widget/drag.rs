use ratatui::layout::{Position, Rect};

use crate::model::TreeElement;
use crate::ops::{mutate, query};

/// The rendered bounds of one visible row, in the same coordinate space as
/// the pointer signal. The view layer reports these; grove never measures
/// anything itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowBounds<Id> {
    pub id: Id,
    pub rect: Rect,
}

impl<Id> RowBounds<Id> {
    pub fn new(id: Id, rect: Rect) -> Self {
        RowBounds { id, rect }
    }
}

/// Turns a live pointer-position signal into a single discrete relocation.
///
/// Feed [`DragController::update`] every change of the pointer signal along
/// with the currently rendered rows (in display order; the last slice entry
/// is the last row). While the pointer is present the controller only tracks
/// state: the row under the initial position becomes the dragged element,
/// the row currently under the pointer is the drop candidate, and a pointer
/// past the last row's bottom edge means "relocate to the end". The forest
/// is edited exactly once, when the pointer signal goes absent.
#[derive(Debug)]
pub struct DragController<E: TreeElement> {
    dragged: Option<E>,
    candidate: Option<E::Id>,
}

impl<E: TreeElement> Default for DragController<E> {
    fn default() -> Self {
        DragController {
            dragged: None,
            candidate: None,
        }
    }
}

impl<E: TreeElement + Clone> DragController<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The element picked up by the active gesture, if any.
    pub fn dragged(&self) -> Option<&E> {
        self.dragged.as_ref()
    }

    /// The current drop target. `None` while dragging means "past the last
    /// row"; it also holds when no gesture is active.
    pub fn drop_candidate(&self) -> Option<&E::Id> {
        self.candidate.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged.is_some()
    }

    /// Apply one pointer update. Returns `true` if the forest was edited
    /// (only possible on gesture end).
    pub fn update(
        &mut self,
        forest: &mut Vec<E>,
        pointer: Option<Position>,
        rows: &[RowBounds<E::Id>],
    ) -> bool {
        let Some(pointer) = pointer else {
            return self.finish(forest);
        };

        if let Some(row) = rows.iter().find(|row| contains_y(row.rect, pointer.y)) {
            self.candidate = Some(row.id.clone());
            // A hit with no active drag picks up the row under the pointer.
            if self.dragged.is_none() {
                self.dragged = query::get(forest, &row.id).cloned();
            }
        } else if let Some(last) = rows.last() {
            if self.dragged.is_some() && pointer.y >= last.rect.bottom() {
                self.candidate = None;
            }
        }
        false
    }

    /// Gesture ended: relocate the dragged element, then reset.
    fn finish(&mut self, forest: &mut Vec<E>) -> bool {
        let candidate = self.candidate.take();
        let Some(dragged) = self.dragged.take() else {
            return false;
        };

        // Dropped onto itself: nothing to do.
        if candidate.as_ref() == Some(dragged.id()) {
            return false;
        }

        // Re-insert the authoritative element from the forest, not the
        // snapshot taken at pick-up.
        let Some(element) = mutate::remove(forest, dragged.id()) else {
            return false;
        };
        match candidate {
            Some(anchor) => mutate::insert_after(forest, element, Some(&anchor)),
            None => forest.push(element),
        }
        true
    }
}

fn contains_y(rect: Rect, y: u16) -> bool {
    y >= rect.top() && y < rect.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TreeNode;
    use crate::ops::query::flatten;
    use pretty_assertions::assert_eq;

    fn leaf(id: u64) -> TreeNode {
        TreeNode::leaf(format!("n{id}")).with_id(id)
    }

    fn flat_ids(forest: &[TreeNode]) -> Vec<u64> {
        flatten(forest).iter().map(|e| e.id).collect()
    }

    /// Three rows, one cell tall, stacked from y = 0.
    fn rows() -> Vec<RowBounds<u64>> {
        vec![
            RowBounds::new(1, Rect::new(0, 0, 20, 1)),
            RowBounds::new(2, Rect::new(0, 1, 20, 1)),
            RowBounds::new(3, Rect::new(0, 2, 20, 1)),
        ]
    }

    fn at(y: u16) -> Option<Position> {
        Some(Position::new(2, y))
    }

    #[test]
    fn drag_to_row_relocates_after_it() {
        let mut forest = vec![leaf(1), leaf(2), leaf(3)];
        let mut drag = DragController::new();

        drag.update(&mut forest, at(0), &rows());
        assert_eq!(drag.dragged().map(|e| e.id), Some(1));
        assert_eq!(drag.drop_candidate(), Some(&1));

        drag.update(&mut forest, at(2), &rows());
        assert_eq!(drag.drop_candidate(), Some(&3));
        // no edit while the pointer is live
        assert_eq!(flat_ids(&forest), vec![1, 2, 3]);

        let edited = drag.update(&mut forest, None, &rows());
        assert!(edited);
        assert_eq!(flat_ids(&forest), vec![2, 3, 1]);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn drag_past_last_row_appends_at_end() {
        let mut forest = vec![leaf(1), leaf(2), leaf(3)];
        let mut drag = DragController::new();

        drag.update(&mut forest, at(0), &rows());
        drag.update(&mut forest, at(7), &rows());
        assert!(drag.is_dragging());
        assert_eq!(drag.drop_candidate(), None);

        let edited = drag.update(&mut forest, None, &rows());
        assert!(edited);
        assert_eq!(flat_ids(&forest), vec![2, 3, 1]);
    }

    #[test]
    fn drop_in_place_is_a_noop() {
        let mut forest = vec![leaf(1), leaf(2), leaf(3)];
        let mut drag = DragController::new();

        drag.update(&mut forest, at(1), &rows());
        let edited = drag.update(&mut forest, None, &rows());
        assert!(!edited);
        assert_eq!(flat_ids(&forest), vec![1, 2, 3]);
    }

    #[test]
    fn pointer_outside_rows_keeps_last_candidate() {
        // Rows start at y = 1, so y = 0 hits nothing and is not past the end.
        let rows = vec![
            RowBounds::new(1u64, Rect::new(0, 1, 20, 1)),
            RowBounds::new(2, Rect::new(0, 2, 20, 1)),
        ];
        let mut forest = vec![leaf(1), leaf(2)];
        let mut drag = DragController::new();

        drag.update(&mut forest, at(2), &rows);
        assert_eq!(drag.drop_candidate(), Some(&2));

        drag.update(&mut forest, at(0), &rows);
        assert_eq!(drag.drop_candidate(), Some(&2));
    }

    #[test]
    fn absent_pointer_without_drag_clears_state() {
        let mut forest = vec![leaf(1)];
        let mut drag: DragController<TreeNode> = DragController::new();
        let edited = drag.update(&mut forest, None, &rows());
        assert!(!edited);
        assert!(!drag.is_dragging());
        assert_eq!(drag.drop_candidate(), None);
    }

    #[test]
    fn dragged_subtree_moves_whole() {
        let mut forest = vec![
            TreeNode::branch("g", vec![leaf(2), leaf(3)]).with_id(1),
            leaf(4),
        ];
        let rows = vec![
            RowBounds::new(1u64, Rect::new(0, 0, 20, 1)),
            RowBounds::new(2, Rect::new(0, 1, 20, 1)),
            RowBounds::new(3, Rect::new(0, 2, 20, 1)),
            RowBounds::new(4, Rect::new(0, 3, 20, 1)),
        ];
        let mut drag = DragController::new();

        drag.update(&mut forest, at(0), &rows);
        drag.update(&mut forest, at(3), &rows);
        drag.update(&mut forest, None, &rows);

        assert_eq!(flat_ids(&forest), vec![4, 1, 2, 3]);
    }
}
