//! SVG rendering of a laid-out family graph.
//!
//! The drawing is built in memory with the `svg` crate: one line per
//! collapsed link, one labeled circle per node, and a heart between every
//! node and its spouse. The view box is fitted to the node positions.

use std::collections::HashMap;

use log::debug;
use svg::{
    self,
    node::{Text as SvgText, element as svg_element},
};

use kinship_core::{
    color::Color,
    geometry::{Bounds, Point},
    node::NodeKind,
    tree::FamilyTree,
};

use super::Error;
use crate::{config::StyleConfig, layout::Layout, structure::FamilyGraph};

const HEART: &str = "\u{2764}\u{fe0f}";
const LABEL_FONT_SIZE: f32 = 12.0;
const HEART_FONT_SIZE: f32 = 16.0;

/// Renders family graphs with a fixed, validated style.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    background: Option<Color>,
    child_fill: Color,
    spouse_fill: Color,
    link_stroke: Color,
    label_fill: Color,
    node_radius: f32,
    link_width: f32,
    margin: f32,
}

impl SvgRenderer {
    /// Creates a renderer from the `[style]` configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if a configured color cannot be parsed.
    pub fn new(style: &StyleConfig) -> Result<Self, Error> {
        Ok(Self {
            background: style.background_color().map_err(Error::Render)?,
            child_fill: style.child_color().map_err(Error::Render)?,
            spouse_fill: style.spouse_color().map_err(Error::Render)?,
            link_stroke: style.link_color().map_err(Error::Render)?,
            label_fill: style.label_color().map_err(Error::Render)?,
            node_radius: style.node_radius(),
            link_width: style.link_width(),
            margin: style.margin(),
        })
    }

    /// Renders the tree at the given positions.
    ///
    /// Nodes of `graph` without a position are left out, along with their
    /// edges and hearts.
    pub fn render(
        &self,
        tree: &FamilyTree,
        graph: &FamilyGraph<'_>,
        layout: &Layout,
    ) -> svg::Document {
        let bounds = layout
            .bounds()
            .unwrap_or_else(|| Bounds::around(Point::default(), 0.0))
            .inflate(self.node_radius + self.margin);

        let mut doc = svg::Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    bounds.min_x(),
                    bounds.min_y(),
                    bounds.width(),
                    bounds.height()
                ),
            )
            .set("width", bounds.width())
            .set("height", bounds.height());

        if let Some(background) = &self.background {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("x", bounds.min_x())
                    .set("y", bounds.min_y())
                    .set("width", bounds.width())
                    .set("height", bounds.height())
                    .set("fill", background)
                    .set("fill-opacity", background.alpha()),
            );
        }

        let kinds: HashMap<&str, NodeKind> = tree
            .current()
            .iter()
            .rev()
            .map(|node| (node.name(), node.kind()))
            .collect();

        let links = self.render_links(graph, layout);
        let nodes = self.render_nodes(graph, layout, &kinds);
        let hearts = self.render_hearts(tree, layout);

        debug!(
            width = bounds.width(),
            height = bounds.height(),
            edges = graph.edge_count(),
            nodes = layout.len();
            "SVG document rendered"
        );

        doc.add(links).add(nodes).add(hearts)
    }

    fn render_links(&self, graph: &FamilyGraph<'_>, layout: &Layout) -> svg_element::Group {
        let mut group = svg_element::Group::new()
            .set("class", "links")
            .set("stroke", &self.link_stroke)
            .set("stroke-opacity", self.link_stroke.alpha())
            .set("stroke-width", self.link_width);

        for (source, target) in graph.edges() {
            let (Some(from), Some(to)) = (layout.get(source), layout.get(target)) else {
                continue;
            };
            group = group.add(
                svg_element::Line::new()
                    .set("x1", from.x())
                    .set("y1", from.y())
                    .set("x2", to.x())
                    .set("y2", to.y()),
            );
        }

        group
    }

    fn render_nodes(
        &self,
        graph: &FamilyGraph<'_>,
        layout: &Layout,
        kinds: &HashMap<&str, NodeKind>,
    ) -> svg_element::Group {
        let mut group = svg_element::Group::new().set("class", "nodes");

        for name in graph.nodes() {
            let Some(position) = layout.get(name) else {
                continue;
            };
            let fill = match kinds.get(name).copied().unwrap_or_default() {
                NodeKind::Child => &self.child_fill,
                NodeKind::Spouse => &self.spouse_fill,
            };

            let circle = svg_element::Circle::new()
                .set("cx", position.x())
                .set("cy", position.y())
                .set("r", self.node_radius)
                .set("fill", fill)
                .set("fill-opacity", fill.alpha());

            let label = svg_element::Text::new("")
                .set("x", position.x())
                .set("y", position.y())
                .set("dy", LABEL_FONT_SIZE / 3.0)
                .set("text-anchor", "middle")
                .set("font-family", "sans-serif")
                .set("font-size", LABEL_FONT_SIZE)
                .set("fill", &self.label_fill)
                .add(SvgText::new(name));

            group = group.add(svg_element::Group::new().add(circle).add(label));
        }

        group
    }

    fn render_hearts(&self, tree: &FamilyTree, layout: &Layout) -> svg_element::Group {
        let mut group = svg_element::Group::new().set("class", "hearts");

        for node in tree {
            let Some(spouse) = node.spouse() else {
                continue;
            };
            let (Some(a), Some(b)) = (layout.get(node.name()), layout.get(spouse.name())) else {
                continue;
            };
            let middle = a.midpoint(b);

            group = group.add(
                svg_element::Text::new("")
                    .set("x", middle.x())
                    .set("y", middle.y())
                    .set("dy", HEART_FONT_SIZE / 3.0)
                    .set("text-anchor", "middle")
                    .set("font-size", HEART_FONT_SIZE)
                    .add(SvgText::new(HEART)),
            );
        }

        group
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use kinship_core::node::RelationshipNode;

    use super::*;
    use crate::links::derive_links;

    fn family() -> FamilyTree {
        let carol = RelationshipNode::new("Carol", NodeKind::Spouse).with_parent("Bob");
        let bob = RelationshipNode::new("Bob", NodeKind::Child).with_spouse(carol.clone());
        FamilyTree::from(vec![bob, carol])
    }

    fn fixed_layout() -> Layout {
        let positions: IndexMap<String, Point> = [
            ("Bob".to_string(), Point::new(0.0, 0.0)),
            ("Carol".to_string(), Point::new(100.0, 0.0)),
        ]
        .into_iter()
        .collect();
        Layout::new(positions)
    }

    fn render(style: &StyleConfig) -> String {
        let tree = family();
        let links = derive_links(tree.current());
        let graph = FamilyGraph::new(tree.current(), &links);
        SvgRenderer::new(style)
            .unwrap()
            .render(&tree, &graph, &fixed_layout())
            .to_string()
    }

    #[test]
    fn test_renders_nodes_links_and_heart() {
        let svg = render(&StyleConfig::default());

        assert_eq!(svg.matches("<circle").count(), 2);
        assert_eq!(svg.matches("<line").count(), 1);
        assert!(svg.contains("Bob"));
        assert!(svg.contains("Carol"));
        assert!(svg.contains(HEART));
        assert!(svg.contains("x=\"50\""), "heart at the midpoint: {svg}");
    }

    #[test]
    fn test_fill_follows_kind() {
        let style = StyleConfig::default()
            .with_child_color("red")
            .with_spouse_color("blue");
        let svg = render(&style);

        let red = Color::new("red").unwrap().to_string();
        let blue = Color::new("blue").unwrap().to_string();
        assert!(svg.contains(&format!("fill=\"{red}\"")));
        assert!(svg.contains(&format!("fill=\"{blue}\"")));
    }

    #[test]
    fn test_view_box_fits_positions() {
        let svg = render(&StyleConfig::default());
        // radius 20 + margin 20 around 0..100 x 0..0
        assert!(svg.contains("viewBox=\"-40 -40 180 80\""), "{svg}");
    }

    #[test]
    fn test_background_is_optional() {
        assert!(!render(&StyleConfig::default()).contains("<rect"));
        assert!(render(&StyleConfig::default().with_background_color("white")).contains("<rect"));
    }

    #[test]
    fn test_invalid_color_is_a_render_error() {
        let style = StyleConfig::default().with_child_color("nope");
        assert!(matches!(SvgRenderer::new(&style), Err(Error::Render(_))));
    }

    #[test]
    fn test_empty_layout_renders_empty_document() {
        let tree = FamilyTree::new();
        let graph = FamilyGraph::new(tree.current(), &[]);
        let svg = SvgRenderer::new(&StyleConfig::default())
            .unwrap()
            .render(&tree, &graph, &Layout::default())
            .to_string();

        assert!(svg.contains("<svg"));
        assert!(!svg.contains("<circle"));
    }
}
