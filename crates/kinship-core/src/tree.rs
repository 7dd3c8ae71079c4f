//! The working set of relationship nodes.
//!
//! [`FamilyTree`] is a passive holder: it never patches nodes in place, it
//! only swaps the whole set. Its JSON form is a plain array of nested
//! [`RelationshipNode`] objects.

use log::debug;
use serde::{Deserialize, Serialize, ser::Error as _};

use crate::node::RelationshipNode;

/// Deepest nesting of JSON arrays and objects that `serde_json` reads back.
///
/// Each generation of a lineage adds two levels: the node object and its
/// `children` array.
pub const MAX_JSON_NESTING: usize = 127;

/// The active node set of a family tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FamilyTree {
    nodes: Vec<RelationshipNode>,
}

impl FamilyTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole node set.
    pub fn replace(&mut self, nodes: Vec<RelationshipNode>) {
        debug!(previous = self.nodes.len(), next = nodes.len(); "Replacing family tree");
        self.nodes = nodes;
    }

    /// Returns the active node set.
    pub fn current(&self) -> &[RelationshipNode] {
        &self.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = &RelationshipNode> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the top-level entry with the given name.
    pub fn get(&self, name: &str) -> Option<&RelationshipNode> {
        self.nodes.iter().find(|node| node.name() == name)
    }

    /// Returns the first node without a parent.
    pub fn root(&self) -> Option<&RelationshipNode> {
        self.nodes.iter().find(|node| node.is_root())
    }

    /// Serializes the node set as a pretty-printed JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree nests deeper than
    /// [`MAX_JSON_NESTING`], since [`from_json`](Self::from_json) could not
    /// read the result back.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        check_json_nesting(&self.nodes, 1)?;
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a node set from a JSON array.
    ///
    /// Only the shape of the data is checked. Parent names, spouse links and
    /// name uniqueness are accepted as they are.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a JSON array of node objects.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Checks that `nodes`, written inside `enclosing` levels of JSON arrays
/// and objects, stay within [`MAX_JSON_NESTING`].
///
/// # Errors
///
/// Returns a serialization error naming the first node that nests too deep.
pub fn check_json_nesting(
    nodes: &[RelationshipNode],
    enclosing: usize,
) -> Result<(), serde_json::Error> {
    let limit = MAX_JSON_NESTING.saturating_sub(enclosing);

    match nodes.iter().find(|node| node.nests_deeper_than(limit)) {
        Some(node) => Err(serde_json::Error::custom(format!(
            "the subtree of `{}` nests deeper than the {MAX_JSON_NESTING} levels JSON import accepts",
            node.name()
        ))),
        None => Ok(()),
    }
}

impl From<Vec<RelationshipNode>> for FamilyTree {
    fn from(nodes: Vec<RelationshipNode>) -> Self {
        Self { nodes }
    }
}

impl<'a> IntoIterator for &'a FamilyTree {
    type Item = &'a RelationshipNode;
    type IntoIter = std::slice::Iter<'a, RelationshipNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
