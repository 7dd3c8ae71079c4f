//! # Kinship Parser
//!
//! Parser for the Kinship family-tree notation. Each line names one person;
//! the marker characters `-` and `=` in the line give its nesting depth
//! (their count) and its branch kind (any `=` makes it a spouse).
//!
//! ```text
//! Alice
//! -Bob
//! -=Carol
//! --Dave
//! ```
//!
//! Here Bob is Alice's child, Carol is Bob's spouse and Dave is Bob's child.
//!
//! ## Usage
//!
//! ```
//! # use kinship_parser::{parse, ParserConfig, error::ParseError};
//! fn main() -> Result<(), ParseError> {
//!     let parsed = parse("Alice\n-Bob\n-=Carol\n--Dave", ParserConfig::default())?;
//!
//!     let bob = &parsed.nodes()[1];
//!     assert_eq!(bob.spouse().map(|s| s.name()), Some("Carol"));
//!     assert_eq!(bob.children()[0].name(), "Dave");
//!     Ok(())
//! }
//! ```

pub mod error;

mod lexer;
mod parser;
mod span;
mod tokens;

pub use span::Span;

use log::info;
use serde::Deserialize;

use kinship_core::node::RelationshipNode;

use error::{Diagnostic, ParseError};
use parser::TreeBuilder;

/// How the parser treats lines that contain only whitespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlankLinePolicy {
    /// Skip the line and report an `E103` warning.
    #[default]
    Skip,
    /// Reject the input with an `E103` error.
    Reject,
}

/// Configuration for the parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserConfig {
    blank_lines: BlankLinePolicy,
}

impl ParserConfig {
    /// Creates a new parser configuration.
    pub fn new(blank_lines: BlankLinePolicy) -> Self {
        Self { blank_lines }
    }

    /// Returns the blank line policy.
    pub fn blank_lines(&self) -> BlankLinePolicy {
        self.blank_lines
    }
}

/// The result of a successful parse.
#[derive(Debug, Clone)]
pub struct Parsed {
    nodes: Vec<RelationshipNode>,
    warnings: Vec<Diagnostic>,
}

impl Parsed {
    fn new(nodes: Vec<RelationshipNode>, warnings: Vec<Diagnostic>) -> Self {
        Self { nodes, warnings }
    }

    /// The nodes of the name table, in first-insertion order.
    pub fn nodes(&self) -> &[RelationshipNode] {
        &self.nodes
    }

    /// Warnings about input that was accepted as written.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Consumes the result, returning the nodes.
    pub fn into_nodes(self) -> Vec<RelationshipNode> {
        self.nodes
    }
}

/// Parse notation text into relationship nodes.
///
/// Lines are read in order. A line at depth `d` attaches to the most recent
/// line at depth `d - 1`: spouse lines become that node's spouse, other
/// lines are appended to its children. Each name maps to one entry of the
/// returned set; a repeated name replaces the earlier entry and is reported
/// as an `E200` warning.
///
/// # Errors
///
/// Returns a [`ParseError`] carrying every diagnostic when any line is
/// malformed: a depth skip (`E100`), an empty name (`E101`), a second root
/// (`E102`), or a blank line under [`BlankLinePolicy::Reject`] (`E103`).
pub fn parse(source: &str, config: ParserConfig) -> Result<Parsed, ParseError> {
    info!(bytes = source.len(); "Parsing notation");
    TreeBuilder::new(config).read(source)
}

/// Parse a sequence of lines.
///
/// The lines are joined with `\n` before parsing, so diagnostic spans refer
/// to the joined text.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_lines<'a, I>(lines: I, config: ParserConfig) -> Result<Parsed, ParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    let source = lines.into_iter().collect::<Vec<_>>().join("\n");
    parse(&source, config)
}
