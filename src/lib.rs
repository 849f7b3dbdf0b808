//! grove — a hierarchical list model with multi-select grouping and
//! drag-to-reorder.
//!
//! The crate backs an interactive, tree-shaped list widget: the caller owns
//! an ordered forest of elements (`Vec<E>` where `E: TreeElement`) and calls
//! into grove on discrete events. Every operation addresses elements by
//! identity, never by positional index, so edits stay correct under
//! arbitrary nesting and selection sets.
//!
//! - [`model`] — the element contract ([`TreeElement`]) and a ready-made
//!   node type ([`TreeNode`]).
//! - [`ops`] — query, mutation, and grouping algorithms over a forest.
//! - [`widget`] — the stateful side: selection/editing state and the drag
//!   relocation controller.
//!
//! grove renders nothing. Row rectangles and pointer positions come in from
//! the surrounding view layer; replacement forest and selection values come
//! back out.

pub mod model;
pub mod ops;
pub mod widget;

pub use model::{GroupCandidate, TreeElement, TreeNode};
pub use widget::{DragController, NestedListState, RowBounds};
