//! Tokens produced by the line lexer.

use kinship_core::node::NodeKind;

use crate::span::Span;

/// A marker character: `-` for lineage, `=` for marriage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Dash,
    Equals,
}

impl Marker {
    /// Classifies a character, `None` when it is not a marker.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '-' => Some(Marker::Dash),
            '=' => Some(Marker::Equals),
            _ => None,
        }
    }

    /// The branch kind a marker implies on its own.
    pub fn kind(self) -> NodeKind {
        match self {
            Marker::Dash => NodeKind::Child,
            Marker::Equals => NodeKind::Spouse,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'src> {
    Marker(Marker),
    /// A run of non-marker characters, whitespace included.
    Text(&'src str),
}

/// A token together with its absolute position in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedToken<'src> {
    pub token: Token<'src>,
    pub span: Span,
}

impl<'src> PositionedToken<'src> {
    pub fn new(token: Token<'src>, span: Span) -> Self {
        Self { token, span }
    }
}
