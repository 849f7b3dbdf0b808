use std::fmt;
use std::hash::Hash;

/// The contract an item type must satisfy to live in a grove forest.
///
/// An element is either a *leaf* (`children()` is `None`) or a *group*
/// (`children()` is `Some`, possibly empty). The distinction is meaningful
/// and must survive every operation: an empty group is still a group.
///
/// Identities are unique across the whole forest, not just among siblings.
/// All grove operations address elements by identity, because positional
/// indices are invalidated by nesting and by structural edits.
pub trait TreeElement: Sized {
    /// Identity value, unique across the entire forest.
    type Id: Clone + Eq + Hash + fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// `None` for a leaf; `Some` (possibly empty) for a group.
    fn children(&self) -> Option<&[Self]>;

    fn children_mut(&mut self) -> Option<&mut Vec<Self>>;

    /// Whether the element is shown expanded in the list. `None` means the
    /// element has no expansion state (typical for leaves).
    fn expanded(&self) -> Option<bool>;

    fn set_expanded(&mut self, expanded: Option<bool>);

    /// Construct a new grouping node. Grove only ever calls this with
    /// `Some(children)` semantics: the result must report `is_group()`.
    fn group(id: Self::Id, children: Vec<Self>, expanded: Option<bool>) -> Self;

    /// Mint a fresh identity, never previously present in any forest.
    fn mint_id() -> Self::Id;

    fn is_group(&self) -> bool {
        self.children().is_some()
    }
}

/// Verdict on whether a selection set can form a group or dissolve one.
///
/// For group formation, the `Valid` payload is the identity of the group
/// whose child sequence hosts the selection — `None` when the candidate
/// lives at the forest root. The root case is a real, valid outcome and must
/// not be collapsed into `Invalid`.
///
/// For ungrouping, the payload is the identity of the group to dissolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupCandidate<Id> {
    Valid(Option<Id>),
    Invalid,
}

impl<Id> GroupCandidate<Id> {
    pub fn is_valid(&self) -> bool {
        matches!(self, GroupCandidate::Valid(_))
    }

    /// The resolved identity, if any. `None` for both `Invalid` and the
    /// root-level `Valid` case; use [`GroupCandidate::is_valid`] to tell
    /// them apart.
    pub fn parent_id(&self) -> Option<&Id> {
        match self {
            GroupCandidate::Valid(id) => id.as_ref(),
            GroupCandidate::Invalid => None,
        }
    }
}
