//! Force-directed placement of the family graph.
//!
//! [`Simulation`] moves every node under three forces: many-body repulsion,
//! springs along the collapsed links, and a pull of the centroid toward the
//! middle of the canvas. The result of a run is a [`Layout`]: one position
//! per node name.

mod force;

pub use force::Simulation;

use indexmap::IndexMap;

use kinship_core::geometry::{Bounds, Point};

/// Node positions by name, in node-set order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    positions: IndexMap<String, Point>,
}

impl Layout {
    pub(crate) fn new(positions: IndexMap<String, Point>) -> Self {
        Self { positions }
    }

    /// Position of the node called `name`.
    pub fn get(&self, name: &str) -> Option<Point> {
        self.positions.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Point)> {
        self.positions
            .iter()
            .map(|(name, point)| (name.as_str(), *point))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The smallest bounds containing every position.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::enclosing(self.positions.values().copied())
    }

    /// Returns the first node whose position is NaN or infinite.
    pub fn first_non_finite(&self) -> Option<&str> {
        self.positions
            .iter()
            .find(|(_, point)| !point.x().is_finite() || !point.y().is_finite())
            .map(|(name, _)| name.as_str())
    }
}
