//! Error types for Kinship operations.
//!
//! [`KinshipError`] wraps every failure of the pipeline. A failed operation
//! never changes the active tree of a [`Session`](crate::session::Session).

use std::io;

use thiserror::Error;

use kinship_parser::error::ParseError;

/// The main error type for Kinship operations.
///
/// The `Parse` variant keeps the source text next to the diagnostics so that
/// callers can render labeled snippets.
#[derive(Debug, Error)]
pub enum KinshipError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Invalid tree JSON: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for KinshipError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl KinshipError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
