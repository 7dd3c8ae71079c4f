//! Error codes for the Kinship diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E1xx` - Structure errors (nesting, names, roots, blank lines)
//! - `E2xx` - Naming warnings

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Structure Errors (E1xx)
    // =========================================================================
    /// Depth skip.
    ///
    /// A line is nested more than one level below the line above it, so there
    /// is no node to attach it to.
    E100,

    /// Empty name.
    ///
    /// A line carries markers but no name once the markers are removed.
    E101,

    /// Multiple roots.
    ///
    /// A second line without markers was found; a tree has exactly one root.
    E102,

    /// Blank line.
    ///
    /// A line contains only whitespace.
    E103,

    // =========================================================================
    // Naming Warnings (E2xx)
    // =========================================================================
    /// Duplicate name.
    ///
    /// A name was used again; the later entry replaces the earlier one in the
    /// name table.
    E200,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E200 => "E200",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "nesting skips a level",
            ErrorCode::E101 => "empty name",
            ErrorCode::E102 => "second root",
            ErrorCode::E103 => "blank line",
            ErrorCode::E200 => "duplicate name",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
