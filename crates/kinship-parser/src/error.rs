//! Error and diagnostic system for the Kinship notation parser.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Multiple labeled spans for rich error context
//! - Severity levels
//! - Diagnostic collector for accumulating multiple errors
//!
//! # Example
//!
//! ```
//! # use kinship_parser::error::{Diagnostic, ErrorCode};
//! # use kinship_parser::Span;
//!
//! let span = Span::new(12..16);
//! let original_span = Span::new(6..10);
//!
//! let diag = Diagnostic::warning("`Bob` is defined multiple times")
//!     .with_code(ErrorCode::E200)
//!     .with_label(span, "this entry replaces the earlier one")
//!     .with_secondary_label(original_span, "first defined here")
//!     .with_help("give each person a unique name");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
