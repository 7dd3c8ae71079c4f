//! The undirected graph the layout and the renderer work on.
//!
//! [`FamilyGraph`] collapses the redundant link list into one edge per
//! unordered pair of names, backed by a `petgraph` [`UnGraphMap`]. Node
//! iteration follows the order of the node set.

use log::{debug, warn};
use petgraph::graphmap::UnGraphMap;

use kinship_core::node::RelationshipNode;

use crate::links::Link;

/// One node per name, one edge per linked pair.
#[derive(Debug, Clone)]
pub struct FamilyGraph<'a> {
    graph: UnGraphMap<&'a str, ()>,
}

impl<'a> FamilyGraph<'a> {
    /// Builds the graph of a node set and its links.
    ///
    /// Self-links are dropped. Links naming a node that is not in the set
    /// are skipped; this only happens for imported JSON that references
    /// names without a top-level entry.
    pub fn new(nodes: &'a [RelationshipNode], links: &'a [Link]) -> Self {
        let mut graph = UnGraphMap::new();

        for node in nodes {
            graph.add_node(node.name());
        }

        let mut skipped = 0;
        for link in links {
            let (source, target) = (link.source(), link.target());
            if source == target {
                skipped += 1;
                continue;
            }
            if !graph.contains_node(source) || !graph.contains_node(target) {
                warn!(source, target; "Skipping link with an unknown endpoint");
                skipped += 1;
                continue;
            }
            graph.add_edge(source, target, ());
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            links = links.len(),
            skipped;
            "Family graph built"
        );

        Self { graph }
    }

    /// Node names in node-set order.
    pub fn nodes(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.graph.nodes()
    }

    /// Every edge once, as a pair of names.
    pub fn edges(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.graph.all_edges().map(|(a, b, _)| (a, b))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.graph.contains_node(name)
    }

    /// Number of distinct neighbors of `name`; zero for unknown names.
    pub fn degree(&self, name: &str) -> usize {
        self.graph.neighbors(name).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::derive_links;
    use kinship_core::node::NodeKind;

    fn family() -> Vec<RelationshipNode> {
        let carol = RelationshipNode::new("Carol", NodeKind::Spouse).with_parent("Bob");
        let dave = RelationshipNode::new("Dave", NodeKind::Child).with_parent("Bob");
        let bob = RelationshipNode::new("Bob", NodeKind::Child)
            .with_parent("Alice")
            .with_spouse(carol.clone())
            .with_child(dave.clone());
        let alice = RelationshipNode::new("Alice", NodeKind::Child).with_child(bob.clone());
        vec![alice, bob, carol, dave]
    }

    #[test]
    fn test_redundant_links_collapse() {
        let nodes = family();
        let links = derive_links(&nodes);
        let graph = FamilyGraph::new(&nodes, &links);

        assert_eq!(graph.node_count(), 4);
        // Alice-Bob, Bob-Carol, Bob-Dave, Carol-Dave
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.degree("Bob"), 3);
        assert_eq!(graph.degree("Alice"), 1);
        assert_eq!(graph.degree("Mallory"), 0);
    }

    #[test]
    fn test_node_order_follows_node_set() {
        let nodes = family();
        let graph = FamilyGraph::new(&nodes, &[]);

        let names: Vec<_> = graph.nodes().collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol", "Dave"]);
        assert_eq!(graph.edges().count(), 0);
    }

    #[test]
    fn test_unknown_endpoints_and_self_links_skipped() {
        let nodes = vec![RelationshipNode::new("Alice", NodeKind::Child)];
        let links = vec![Link::new("Alice", "Ghost"), Link::new("Alice", "Alice")];

        let graph = FamilyGraph::new(&nodes, &links);

        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.contains_node("Ghost"));
    }

    #[test]
    fn test_lookup_by_borrowed_name() {
        let nodes = family();
        let links = derive_links(&nodes);
        let graph = FamilyGraph::new(&nodes, &links);

        for node in &nodes {
            let name = node.name().to_string();
            assert!(graph.contains_node(&name));
            assert!(graph.degree(&name) > 0);
        }
        assert!(!graph.contains_node(&String::from("Mallory")));
    }
}
