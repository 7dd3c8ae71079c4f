//! Export of laid-out family graphs.
//!
//! ```text
//! Notation text
//!     ↓ parse
//! Relationship nodes
//!     ↓ derive_links
//! Links
//!     ↓ structure
//! FamilyGraph
//!     ↓ layout
//! Layout
//!     ↓ export (this module)
//! SVG document
//! ```
//!
//! Export failures are reported as [`Error`], which converts into
//! [`KinshipError::Export`](crate::KinshipError::Export).

pub mod svg;

use std::fmt;

/// Errors that can occur during export.
#[derive(Debug)]
pub enum Error {
    /// The style cannot be turned into a drawing.
    Render(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
