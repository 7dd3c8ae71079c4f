//! Kinship - family-relationship graphs from an indentation notation.
//!
//! Notation text is parsed into relationship nodes, the nodes are linked,
//! laid out by a force simulation and rendered to SVG. Trees can also be
//! exchanged as JSON.
//!
//! ```text
//! Alice
//! -Bob
//! -=Carol
//! --Dave
//! ```

pub mod config;
pub mod export;
pub mod layout;
pub mod session;

mod error;
mod links;
mod structure;

pub use kinship_core::{color, geometry, node, tree};
pub use kinship_parser::{BlankLinePolicy, Parsed, ParserConfig};

pub use error::KinshipError;
pub use links::{Link, Scene, derive_links};
pub use session::Session;
pub use structure::FamilyGraph;

use log::{debug, info, trace};

use kinship_core::tree::FamilyTree;

use config::AppConfig;
use export::svg::SvgRenderer;
use layout::{Layout, Simulation};

/// Runs family trees through parsing, layout and rendering.
///
/// # Examples
///
/// ```rust
/// use kinship::{Pipeline, config::AppConfig};
///
/// let pipeline = Pipeline::new(AppConfig::default());
///
/// let mut session = pipeline.session();
/// session.submit("Alice\n-Bob\n-=Carol\n--Dave").expect("valid notation");
///
/// let svg = pipeline.render_svg(session.tree()).expect("renderable tree");
/// assert!(svg.contains("<svg"));
/// ```
#[derive(Debug, Default)]
pub struct Pipeline {
    config: AppConfig,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Creates an empty session that parses with this pipeline's settings.
    pub fn session(&self) -> Session {
        Session::new(self.config.parser().parser_config())
    }

    /// Parse notation text without touching any session.
    ///
    /// # Errors
    ///
    /// Returns [`KinshipError::Parse`] if the text is malformed.
    pub fn parse(&self, source: &str) -> Result<Parsed, KinshipError> {
        info!("Parsing family tree");

        let parsed = kinship_parser::parse(source, self.config.parser().parser_config())
            .map_err(|err| KinshipError::new_parse_error(err, source))?;

        debug!(nodes = parsed.nodes().len(), warnings = parsed.warnings().len(); "Family tree parsed");
        trace!(nodes:? = parsed.nodes(); "Parsed nodes");
        Ok(parsed)
    }

    /// The nodes and links handed to a renderer.
    pub fn scene<'a>(&self, tree: &'a FamilyTree) -> Scene<'a> {
        Scene::new(tree.current())
    }

    /// Run the force simulation for `tree` to completion.
    ///
    /// # Errors
    ///
    /// Returns [`KinshipError::Layout`] if the layout configuration is
    /// invalid or the simulation produced a non-finite position.
    pub fn layout(&self, tree: &FamilyTree) -> Result<Layout, KinshipError> {
        let links = derive_links(tree.current());
        self.layout_with_links(tree, &links)
    }

    /// Lay out and render `tree` as an SVG document.
    ///
    /// # Errors
    ///
    /// Returns [`KinshipError::Layout`] for layout failures and
    /// [`KinshipError::Export`] if the style cannot be applied.
    pub fn render_svg(&self, tree: &FamilyTree) -> Result<String, KinshipError> {
        let renderer = SvgRenderer::new(self.config.style())?;

        let links = derive_links(tree.current());
        let layout = self.layout_with_links(tree, &links)?;
        let graph = FamilyGraph::new(tree.current(), &links);

        let svg = renderer.render(tree, &graph, &layout).to_string();
        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }

    fn layout_with_links(
        &self,
        tree: &FamilyTree,
        links: &[Link],
    ) -> Result<Layout, KinshipError> {
        let config = self.config.layout();
        config.validate().map_err(KinshipError::Layout)?;

        info!(nodes = tree.len(), links = links.len(); "Calculating layout");
        let layout = Simulation::new(tree, links, config).run();

        if let Some(name) = layout.first_non_finite() {
            return Err(KinshipError::Layout(format!(
                "simulation placed `{name}` at a non-finite position"
            )));
        }
        Ok(layout)
    }
}
