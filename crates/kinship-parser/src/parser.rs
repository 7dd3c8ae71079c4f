//! Tree construction from tokenized lines.
//!
//! Nodes are first collected into an index-based arena so that children can
//! still be attached to a node after it was itself attached to its parent.
//! Once every line has been read, the arena is turned into shared
//! [`RelationshipNode`] values. Every nested subtree is built once and
//! referenced from its parent, so the output grows linearly with the input.

use std::sync::Arc;

use indexmap::IndexMap;
use log::{debug, trace};

use kinship_core::node::{NodeKind, RelationshipNode};

use crate::{
    BlankLinePolicy, Parsed, ParserConfig,
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    lexer,
    span::Span,
    tokens::{PositionedToken, Token},
};

/// What a single line says once its tokens are read.
#[derive(Debug, PartialEq, Eq)]
struct LineEntry {
    depth: usize,
    kind: NodeKind,
    name: String,
}

impl LineEntry {
    /// Sum all markers, look for any `=`, and strip markers from the name.
    fn from_tokens(tokens: &[PositionedToken<'_>]) -> Self {
        let mut depth = 0;
        let mut kind = NodeKind::Child;
        let mut name = String::new();

        for positioned in tokens {
            match positioned.token {
                Token::Marker(marker) => {
                    depth += 1;
                    if marker.kind().is_spouse() {
                        kind = NodeKind::Spouse;
                    }
                }
                Token::Text(text) => name.push_str(text),
            }
        }

        Self {
            depth,
            kind,
            name: name.trim().to_string(),
        }
    }

    fn is_blank(&self) -> bool {
        self.depth == 0 && self.name.is_empty()
    }
}

/// A node in the build arena; relations are arena indices.
#[derive(Debug)]
struct Entry {
    name: String,
    kind: NodeKind,
    span: Span,
    parent: Option<usize>,
    children: Vec<usize>,
    spouse: Option<usize>,
}

/// Splits the source into `(byte offset, line)` pairs.
///
/// Line terminators (`\n` or `\r\n`) are not part of the line. A trailing
/// terminator does not start an extra empty line.
fn source_lines(source: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    source.split_inclusive('\n').map(move |raw| {
        let start = offset;
        offset += raw.len();
        let line = raw.strip_suffix('\n').unwrap_or(raw);
        let line = line.strip_suffix('\r').unwrap_or(line);
        (start, line)
    })
}

/// Builds the node set line by line.
pub(crate) struct TreeBuilder {
    config: ParserConfig,
    entries: Vec<Entry>,
    /// `stack[d]` is the most recent node at depth `d`.
    stack: Vec<usize>,
    names: IndexMap<String, usize>,
    root: Option<usize>,
    diagnostics: DiagnosticCollector,
}

impl TreeBuilder {
    pub(crate) fn new(config: ParserConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
            stack: Vec::new(),
            names: IndexMap::new(),
            root: None,
            diagnostics: DiagnosticCollector::new(),
        }
    }

    /// Read every line of `source`.
    pub(crate) fn read(mut self, source: &str) -> Result<Parsed, ParseError> {
        for (index, (start, line)) in source_lines(source).enumerate() {
            self.read_line(index + 1, start, line);
        }
        self.finish()
    }

    fn read_line(&mut self, line_number: usize, start: usize, line: &str) {
        let span = Span::new(start..start + line.len());

        let entry = LineEntry::from_tokens(&lexer::tokenize_line(line, start));

        trace!(
            line_number,
            depth = entry.depth,
            kind:? = entry.kind,
            name = entry.name.as_str();
            "Read line"
        );

        if entry.is_blank() {
            self.blank_line(line_number, span);
            return;
        }

        if entry.name.is_empty() {
            self.diagnostics.emit(
                Diagnostic::error(format!("line {line_number} has markers but no name"))
                    .with_code(ErrorCode::E101)
                    .with_label(span, ErrorCode::E101.description())
                    .with_help("write a name after the markers"),
            );
            return;
        }

        if entry.depth == 0 {
            self.add_root(entry, span);
        } else {
            self.add_nested(entry, span);
        }
    }

    fn blank_line(&mut self, line_number: usize, span: Span) {
        let diagnostic = match self.config.blank_lines() {
            BlankLinePolicy::Skip => {
                Diagnostic::warning(format!("blank line {line_number} was skipped"))
            }
            BlankLinePolicy::Reject => Diagnostic::error(format!("line {line_number} is blank")),
        };

        self.diagnostics.emit(
            diagnostic
                .with_code(ErrorCode::E103)
                .with_label(span, ErrorCode::E103.description())
                .with_help("remove the blank line"),
        );
    }

    fn add_root(&mut self, entry: LineEntry, span: Span) {
        if let Some(root) = self.root {
            let first_span = self.entries[root].span;
            self.diagnostics.emit(
                Diagnostic::error(format!("`{}` is a second root", entry.name))
                    .with_code(ErrorCode::E102)
                    .with_label(span, ErrorCode::E102.description())
                    .with_secondary_label(first_span, "first root")
                    .with_help("nest this line below the root with `-` or `=`"),
            );
            return;
        }

        let index = self.push_entry(entry, span, None);
        self.root = Some(index);
        self.stack.clear();
        self.stack.push(index);
    }

    fn add_nested(&mut self, entry: LineEntry, span: Span) {
        let depth = entry.depth;

        if depth > self.stack.len() {
            let diagnostic = match self.stack.len() {
                0 => Diagnostic::error(format!("`{}` has no root to attach to", entry.name))
                    .with_help("start the notation with a line without markers"),
                len => Diagnostic::error(format!(
                    "`{}` is nested {depth} levels deep, but the line above is at depth {}",
                    entry.name,
                    len - 1
                ))
                .with_help("use at most one marker more than the line above"),
            };
            self.diagnostics.emit(
                diagnostic
                    .with_code(ErrorCode::E100)
                    .with_label(span, ErrorCode::E100.description()),
            );
            return;
        }

        let parent = self.stack[depth - 1];
        let kind = entry.kind;
        let index = self.push_entry(entry, span, Some(parent));

        match kind {
            NodeKind::Spouse => self.entries[parent].spouse = Some(index),
            NodeKind::Child => self.entries[parent].children.push(index),
        }

        self.stack.truncate(depth);
        self.stack.push(index);
    }

    /// Store a new entry and register it in the name table.
    ///
    /// A name that is already present is replaced, keeping its table
    /// position; the replaced node remains attached to its parent.
    fn push_entry(&mut self, entry: LineEntry, span: Span, parent: Option<usize>) -> usize {
        let index = self.entries.len();

        if let Some(previous) = self.names.insert(entry.name.clone(), index) {
            let previous_span = self.entries[previous].span;
            self.diagnostics.emit(
                Diagnostic::warning(format!("`{}` is defined more than once", entry.name))
                    .with_code(ErrorCode::E200)
                    .with_label(span, "replaces the earlier entry")
                    .with_secondary_label(previous_span, "first defined here")
                    .with_help("use a unique name for each person"),
            );
        }

        self.entries.push(Entry {
            name: entry.name,
            kind: entry.kind,
            span,
            parent,
            children: Vec::new(),
            spouse: None,
        });

        index
    }

    fn finish(self) -> Result<Parsed, ParseError> {
        let Self {
            entries,
            names,
            diagnostics,
            ..
        } = self;
        let warnings = diagnostics.finish()?;

        let built = materialize(&entries);
        let nodes: Vec<RelationshipNode> = names
            .values()
            .map(|&index| RelationshipNode::clone(&built[index]))
            .collect();

        debug!(
            nodes = nodes.len(),
            arena_entries = entries.len(),
            warnings = warnings.len();
            "Notation parsed"
        );

        Ok(Parsed::new(nodes, warnings))
    }
}

/// Turn every arena entry into a shared node, each built exactly once.
///
/// Children and spouses are always pushed after the node they attach to, so
/// walking the arena backwards sees every nested node before its parent.
fn materialize(entries: &[Entry]) -> Vec<Arc<RelationshipNode>> {
    let count = entries.len();
    let mut built: Vec<Arc<RelationshipNode>> = Vec::with_capacity(count);

    for (index, entry) in entries.iter().enumerate().rev() {
        let lookup = |nested: usize| Arc::clone(&built[count - 1 - nested]);
        debug_assert!(entry.children.iter().chain(&entry.spouse).all(|&n| n > index));

        let mut node = RelationshipNode::new(entry.name.clone(), entry.kind);
        if let Some(parent) = entry.parent {
            node = node.with_parent(entries[parent].name.clone());
        }
        for &child in &entry.children {
            node = node.with_child(lookup(child));
        }
        if let Some(spouse) = entry.spouse {
            node = node.with_spouse(lookup(spouse));
        }

        built.push(Arc::new(node));
    }

    built.reverse();
    built
}
