//! Velocity-Verlet force simulation.
//!
//! Every tick the simulation cools `alpha`, accumulates the link, charge
//! and centering forces into node velocities, then moves each free node by
//! its decayed velocity. Pinned nodes stay where they were put.

use std::f32::consts::PI;

use indexmap::IndexSet;
use log::{debug, trace};
use rand::{Rng, SeedableRng, rngs::StdRng};

use kinship_core::{geometry::Point, tree::FamilyTree};

use crate::{config::LayoutConfig, layout::Layout, links::Link, structure::FamilyGraph};

/// Spacing of the initial phyllotaxis spiral.
const INITIAL_RADIUS: f32 = 10.0;
/// Below this squared distance the charge force stops growing.
const MIN_DISTANCE_SQUARED: f32 = 1.0;
/// Amplitude of the random offset used to separate coincident nodes.
const JIGGLE: f32 = 1e-6;
/// Alpha a pinned simulation is reheated to.
const REHEAT_ALPHA: f32 = 0.3;

/// A spring between two node indices.
#[derive(Debug, Clone, Copy)]
struct Spring {
    source: usize,
    target: usize,
    /// `1 / min(degree)`, so hubs are not pulled apart by many springs.
    strength: f32,
    /// Share of the correction applied to the target.
    bias: f32,
}

/// A running force simulation over the nodes of a family tree.
///
/// # Examples
///
/// ```
/// # use kinship::{config::LayoutConfig, derive_links, layout::Simulation, tree::FamilyTree};
/// # use kinship::node::{NodeKind, RelationshipNode};
/// let bob = RelationshipNode::new("Bob", NodeKind::Child).with_parent("Alice");
/// let alice = RelationshipNode::new("Alice", NodeKind::Child).with_child(bob.clone());
/// let tree = FamilyTree::from(vec![alice, bob]);
/// let links = derive_links(tree.current());
///
/// let mut simulation = Simulation::new(&tree, &links, &LayoutConfig::default());
/// let layout = simulation.run();
///
/// assert!(simulation.is_settled());
/// assert_eq!(layout.len(), 2);
/// ```
pub struct Simulation {
    names: IndexSet<String>,
    positions: Vec<Point>,
    velocities: Vec<Point>,
    pins: Vec<Option<Point>>,
    springs: Vec<Spring>,
    config: LayoutConfig,
    center: Point,
    alpha: f32,
    alpha_decay: f32,
    ticks: usize,
    rng: StdRng,
}

impl Simulation {
    /// Creates a simulation with nodes on a phyllotaxis spiral.
    ///
    /// Links are collapsed to one spring per pair of names; links to names
    /// outside the tree are ignored.
    pub fn new(tree: &FamilyTree, links: &[Link], config: &LayoutConfig) -> Self {
        let graph = FamilyGraph::new(tree.current(), links);
        let names: IndexSet<String> = graph.nodes().map(str::to_string).collect();

        let mut degrees = vec![0usize; names.len()];
        let mut pairs = Vec::with_capacity(graph.edge_count());
        for (source, target) in graph.edges() {
            if let (Some(s), Some(t)) = (names.get_index_of(source), names.get_index_of(target)) {
                degrees[s] += 1;
                degrees[t] += 1;
                pairs.push((s, t));
            }
        }

        let springs = pairs
            .into_iter()
            .map(|(source, target)| {
                let (ds, dt) = (degrees[source] as f32, degrees[target] as f32);
                Spring {
                    source,
                    target,
                    strength: 1.0 / ds.min(dt),
                    bias: ds / (ds + dt),
                }
            })
            .collect::<Vec<_>>();

        let positions = (0..names.len()).map(phyllotaxis).collect::<Vec<_>>();

        debug!(
            nodes = names.len(),
            springs = springs.len(),
            seed = config.seed();
            "Force simulation created"
        );

        Self {
            velocities: vec![Point::default(); names.len()],
            pins: vec![None; names.len()],
            positions,
            springs,
            center: Point::new(config.width() / 2.0, config.height() / 2.0),
            alpha: 1.0,
            alpha_decay: config.alpha_decay(),
            ticks: 0,
            rng: StdRng::seed_from_u64(config.seed()),
            config: config.clone(),
            names,
        }
    }

    /// Current temperature of the simulation.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Total ticks run so far.
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Returns `true` once alpha has cooled below `alpha_min`.
    pub fn is_settled(&self) -> bool {
        self.alpha < self.config.alpha_min()
    }

    /// Advances the simulation by one tick and returns the new alpha.
    pub fn step(&mut self) -> f32 {
        self.alpha -= self.alpha * self.alpha_decay;

        self.apply_links();
        self.apply_charge();
        self.apply_center();
        self.integrate();

        self.ticks += 1;
        trace!(tick = self.ticks, alpha = self.alpha; "Simulation tick");
        self.alpha
    }

    /// Ticks until the simulation settles or `max_ticks` ticks have run in
    /// this call, then returns the positions.
    pub fn run(&mut self) -> Layout {
        let mut ticks = 0;
        while !self.is_settled() && ticks < self.config.max_ticks() {
            self.step();
            ticks += 1;
        }

        debug!(
            ticks,
            alpha = self.alpha,
            settled = self.is_settled();
            "Force simulation finished"
        );
        self.positions()
    }

    /// Fixes the node called `name` at `point` and reheats the simulation.
    ///
    /// Returns `false` if there is no such node.
    pub fn pin(&mut self, name: &str, point: Point) -> bool {
        let Some(index) = self.names.get_index_of(name) else {
            return false;
        };

        self.pins[index] = Some(point);
        self.positions[index] = point;
        self.velocities[index] = Point::default();
        self.alpha = self.alpha.max(REHEAT_ALPHA);
        true
    }

    /// Releases a pinned node; it keeps its position until forces move it.
    ///
    /// Returns `false` if there is no such node or it was not pinned.
    pub fn unpin(&mut self, name: &str) -> bool {
        self.names
            .get_index_of(name)
            .and_then(|index| self.pins[index].take())
            .is_some()
    }

    /// Snapshot of the current node positions.
    pub fn positions(&self) -> Layout {
        Layout::new(
            self.names
                .iter()
                .cloned()
                .zip(self.positions.iter().copied())
                .collect(),
        )
    }

    fn apply_links(&mut self) {
        let distance = self.config.link_distance();

        for spring in &self.springs {
            let (s, t) = (spring.source, spring.target);
            let ahead_s = self.positions[s].add_point(self.velocities[s]);
            let ahead_t = self.positions[t].add_point(self.velocities[t]);

            let mut offset = ahead_t.sub_point(ahead_s);
            if offset.x() == 0.0 {
                offset = Point::new(jiggle(&mut self.rng), offset.y());
            }
            if offset.y() == 0.0 {
                offset = Point::new(offset.x(), jiggle(&mut self.rng));
            }

            let length = offset.hypot();
            let delta = offset.scale((length - distance) / length * self.alpha * spring.strength);

            self.velocities[t] = self.velocities[t].sub_point(delta.scale(spring.bias));
            self.velocities[s] = self.velocities[s].add_point(delta.scale(1.0 - spring.bias));
        }
    }

    fn apply_charge(&mut self) {
        let strength = self.config.charge_strength() * self.alpha;
        let count = self.positions.len();

        for i in 0..count {
            for j in 0..count {
                if i == j {
                    continue;
                }

                let mut x = self.positions[j].x() - self.positions[i].x();
                let mut y = self.positions[j].y() - self.positions[i].y();
                let mut distance_squared = x * x + y * y;
                if x == 0.0 {
                    x = jiggle(&mut self.rng);
                    distance_squared += x * x;
                }
                if y == 0.0 {
                    y = jiggle(&mut self.rng);
                    distance_squared += y * y;
                }
                if distance_squared < MIN_DISTANCE_SQUARED {
                    distance_squared = (MIN_DISTANCE_SQUARED * distance_squared).sqrt();
                }

                let weight = strength / distance_squared;
                self.velocities[i] = self.velocities[i].add_point(Point::new(x * weight, y * weight));
            }
        }
    }

    fn apply_center(&mut self) {
        if self.positions.is_empty() {
            return;
        }

        let sum = self
            .positions
            .iter()
            .fold(Point::default(), |acc, point| acc.add_point(*point));
        let shift = sum
            .scale(1.0 / self.positions.len() as f32)
            .sub_point(self.center);

        for position in &mut self.positions {
            *position = position.sub_point(shift);
        }
    }

    fn integrate(&mut self) {
        let keep = 1.0 - self.config.velocity_decay();

        for ((position, velocity), pin) in self
            .positions
            .iter_mut()
            .zip(self.velocities.iter_mut())
            .zip(&self.pins)
        {
            match pin {
                Some(pin) => {
                    *position = *pin;
                    *velocity = Point::default();
                }
                None => {
                    *velocity = velocity.scale(keep);
                    *position = position.add_point(*velocity);
                }
            }
        }
    }
}

/// Position of the `index`-th node on the initial spiral.
fn phyllotaxis(index: usize) -> Point {
    let radius = INITIAL_RADIUS * (0.5 + index as f32).sqrt();
    let angle = index as f32 * PI * (3.0 - 5.0_f32.sqrt());
    Point::new(radius * angle.cos(), radius * angle.sin())
}

fn jiggle(rng: &mut StdRng) -> f32 {
    (rng.random::<f32>() - 0.5) * JIGGLE
}
