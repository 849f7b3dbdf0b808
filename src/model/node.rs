use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use super::element::TreeElement;

/// Minted ids start well above any realistic hand-assigned id, so forests
/// built from explicit ids never collide with freshly created groups.
const MINT_BASE: u64 = 1 << 32;

static NEXT_ID: AtomicU64 = AtomicU64::new(MINT_BASE);

/// A ready-made list element.
///
/// Callers with their own item type implement [`TreeElement`] directly;
/// `TreeNode` covers the common case and is what the test suites use.
///
/// `children` distinguishes three states: `None` is a leaf, `Some(vec![])`
/// is an empty group, `Some([...])` a populated one. The serde representation
/// keeps the distinction by omitting absent fields entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: u64,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded: Option<bool>,
}

impl TreeNode {
    /// Create a leaf with a fresh identity.
    pub fn leaf(label: impl Into<String>) -> Self {
        TreeNode {
            id: Self::mint_id(),
            label: label.into(),
            children: None,
            expanded: None,
        }
    }

    /// Create an expanded group with a fresh identity.
    pub fn branch(label: impl Into<String>, children: Vec<TreeNode>) -> Self {
        TreeNode {
            id: Self::mint_id(),
            label: label.into(),
            children: Some(children),
            expanded: Some(true),
        }
    }

    /// Replace the identity (fixture convenience).
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    /// Append a child, turning a leaf into a group if needed.
    pub fn child(mut self, node: TreeNode) -> Self {
        self.children.get_or_insert_with(Vec::new).push(node);
        self
    }
}

impl TreeElement for TreeNode {
    type Id = u64;

    fn id(&self) -> &u64 {
        &self.id
    }

    fn children(&self) -> Option<&[TreeNode]> {
        self.children.as_deref()
    }

    fn children_mut(&mut self) -> Option<&mut Vec<TreeNode>> {
        self.children.as_mut()
    }

    fn expanded(&self) -> Option<bool> {
        self.expanded
    }

    fn set_expanded(&mut self, expanded: Option<bool>) {
        self.expanded = expanded;
    }

    fn group(id: u64, children: Vec<TreeNode>, expanded: Option<bool>) -> Self {
        TreeNode {
            id,
            label: "Group".into(),
            children: Some(children),
            expanded,
        }
    }

    fn mint_id() -> u64 {
        NEXT_ID.fetch_add(1, Ordering::Relaxed)
    }
}
