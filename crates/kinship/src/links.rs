//! Link derivation and the render-surface scene.
//!
//! [`derive_links`] turns a node set into directed [`Link`]s. The list is
//! redundant: a parent/child pair appears once from each side.
//! Consumers that need one edge per pair (the force layout, the SVG lines)
//! collapse it through [`FamilyGraph`](crate::structure::FamilyGraph).

use log::debug;
use serde::{Deserialize, Serialize};

use kinship_core::{node::RelationshipNode, tree::check_json_nesting};

/// A directed edge between two node names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    source: String,
    target: String,
}

impl Link {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Derive the links of a node set.
///
/// For every node `m`, in order:
///
/// - `m -> parent` when `m` has a parent,
/// - `m -> c` for every child `c`,
/// - `m -> spouse` and `spouse -> c` for every child `c` when `m` has a
///   spouse.
///
/// Only the top-level nodes are visited; nested nodes are reached through
/// their own top-level entry.
pub fn derive_links(nodes: &[RelationshipNode]) -> Vec<Link> {
    let mut links = Vec::new();

    for node in nodes {
        let name = node.name();

        if let Some(parent) = node.parent_name() {
            links.push(Link::new(name, parent));
        }
        for child in node.children() {
            links.push(Link::new(name, child.name()));
        }
        if let Some(spouse) = node.spouse() {
            links.push(Link::new(name, spouse.name()));
            for child in node.children() {
                links.push(Link::new(spouse.name(), child.name()));
            }
        }
    }

    debug!(nodes = nodes.len(), links = links.len(); "Links derived");
    links
}

/// What a renderer is handed: the node set and its links.
#[derive(Debug, Serialize)]
pub struct Scene<'a> {
    nodes: &'a [RelationshipNode],
    links: Vec<Link>,
}

impl<'a> Scene<'a> {
    /// Builds the scene of a node set, deriving its links.
    pub fn new(nodes: &'a [RelationshipNode]) -> Self {
        Self {
            nodes,
            links: derive_links(nodes),
        }
    }

    pub fn nodes(&self) -> &'a [RelationshipNode] {
        self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Serializes the scene as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the nodes nest deeper than JSON readers accept.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        // The scene object and its `nodes` array enclose every node.
        check_json_nesting(self.nodes, 2)?;
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinship_core::node::NodeKind;

    fn link(source: &str, target: &str) -> Link {
        Link::new(source, target)
    }

    #[test]
    fn test_root_without_relations_has_no_links() {
        let nodes = vec![RelationshipNode::new("Alice", NodeKind::Child)];
        assert!(derive_links(&nodes).is_empty());
    }

    #[test]
    fn test_child_links_both_directions() {
        let bob = RelationshipNode::new("Bob", NodeKind::Child).with_parent("Alice");
        let alice = RelationshipNode::new("Alice", NodeKind::Child).with_child(bob.clone());

        let links = derive_links(&[alice, bob]);

        assert_eq!(links, vec![link("Alice", "Bob"), link("Bob", "Alice")]);
    }

    #[test]
    fn test_spouse_links_to_children() {
        let carol = RelationshipNode::new("Carol", NodeKind::Spouse).with_parent("Bob");
        let dave = RelationshipNode::new("Dave", NodeKind::Child).with_parent("Bob");
        let eve = RelationshipNode::new("Eve", NodeKind::Child).with_parent("Bob");
        let bob = RelationshipNode::new("Bob", NodeKind::Child)
            .with_child(dave)
            .with_child(eve)
            .with_spouse(carol);

        let links = derive_links(&[bob]);

        assert_eq!(
            links,
            vec![
                link("Bob", "Dave"),
                link("Bob", "Eve"),
                link("Bob", "Carol"),
                link("Carol", "Dave"),
                link("Carol", "Eve"),
            ]
        );
    }

    #[test]
    fn test_scene_json_shape() {
        let bob = RelationshipNode::new("Bob", NodeKind::Child).with_parent("Alice");
        let alice = RelationshipNode::new("Alice", NodeKind::Child).with_child(bob.clone());
        let nodes = vec![alice, bob];

        let scene = Scene::new(&nodes);
        let value: serde_json::Value = serde_json::from_str(&scene.to_json().unwrap()).unwrap();

        assert_eq!(value["nodes"].as_array().unwrap().len(), 2);
        assert_eq!(value["links"][0]["source"], "Alice");
        assert_eq!(value["links"][0]["target"], "Bob");
        assert_eq!(scene.links().len(), 2);
    }

    #[test]
    fn test_scene_json_rejects_unreadable_nesting() {
        let deepest = (1..70).fold(RelationshipNode::new("G0", NodeKind::Child), |below, n| {
            RelationshipNode::new(format!("G{n}"), NodeKind::Child).with_child(below)
        });
        let nodes = vec![deepest];

        assert!(Scene::new(&nodes).to_json().is_err());
    }
}
