//! The relationship node model.
//!
//! A [`RelationshipNode`] is one person in a family tree. Nodes nest: a node
//! carries the full subtree below it through its children and spouse. Nested
//! nodes are reference counted, so the same subtree can hang below its parent
//! and also appear as a top-level entry without being copied. The serde
//! representation is the JSON exchange format:
//!
//! ```json
//! {
//!   "name": "Bob",
//!   "type": "child",
//!   "parent": "Alice",
//!   "children": [{ "name": "Dave", "type": "child", "parent": "Bob", "children": [], "spouse": null }],
//!   "spouse": { "name": "Carol", "type": "spouse", "parent": "Bob", "children": [], "spouse": null }
//! }
//! ```

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

/// How a node is attached to the node one level up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A descendant through birth or adoption.
    #[default]
    Child,
    /// A marriage partner of the node one level up.
    Spouse,
}

impl NodeKind {
    /// Returns `true` for [`NodeKind::Spouse`].
    pub fn is_spouse(self) -> bool {
        matches!(self, NodeKind::Spouse)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Child => write!(f, "child"),
            NodeKind::Spouse => write!(f, "spouse"),
        }
    }
}

/// A person in the family tree together with the subtree attached to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipNode {
    name: String,

    #[serde(rename = "type")]
    kind: NodeKind,

    #[serde(rename = "parent", default)]
    parent_name: Option<String>,

    #[serde(default)]
    children: Vec<Arc<RelationshipNode>>,

    #[serde(default)]
    spouse: Option<Arc<RelationshipNode>>,
}

impl RelationshipNode {
    /// Creates a detached node with no parent, children or spouse.
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            parent_name: None,
            children: Vec::new(),
            spouse: None,
        }
    }

    /// Sets the name of the node one level up.
    pub fn with_parent(mut self, parent_name: impl Into<String>) -> Self {
        self.parent_name = Some(parent_name.into());
        self
    }

    /// Appends a child to the end of the children list.
    pub fn with_child(mut self, child: impl Into<Arc<RelationshipNode>>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Sets the spouse, replacing any earlier one.
    pub fn with_spouse(mut self, spouse: impl Into<Arc<RelationshipNode>>) -> Self {
        self.spouse = Some(spouse.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Name of the node one level up, `None` for the root.
    pub fn parent_name(&self) -> Option<&str> {
        self.parent_name.as_deref()
    }

    /// Returns `true` if this node has no parent.
    pub fn is_root(&self) -> bool {
        self.parent_name.is_none()
    }

    pub fn children(&self) -> &[Arc<RelationshipNode>] {
        &self.children
    }

    pub fn spouse(&self) -> Option<&RelationshipNode> {
        self.spouse.as_deref()
    }

    /// Returns `true` if the JSON form of this node nests arrays and objects
    /// more than `limit` levels deep, counting the node's own object.
    ///
    /// The walk stops at the first path that crosses `limit`.
    pub fn nests_deeper_than(&self, limit: usize) -> bool {
        let mut pending = vec![(self, 1)];

        while let Some((node, level)) = pending.pop() {
            // `children` is written even when empty.
            if level + 1 > limit {
                return true;
            }
            pending.extend(node.children.iter().map(|child| (child.as_ref(), level + 2)));
            if let Some(spouse) = &node.spouse {
                pending.push((spouse.as_ref(), level + 1));
            }
        }

        false
    }
}
