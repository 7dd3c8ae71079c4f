//! Labeled source spans for diagnostic messages.

use crate::span::Span;

/// A labeled span in source text.
///
/// A diagnostic usually has one primary label on the offending line and
/// may add secondary labels pointing at related lines, such as the first
/// occurrence of a duplicated name.
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a new primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a new secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    /// Get the span this label applies to.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the label message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if this is a primary label.
    pub fn is_primary(&self) -> bool {
        self.is_primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_label() {
        let label = Label::primary(Span::new(4..9), "nested too deeply");

        assert_eq!(label.span().start(), 4);
        assert_eq!(label.span().end(), 9);
        assert_eq!(label.message(), "nested too deeply");
        assert!(label.is_primary());
    }

    #[test]
    fn test_secondary_label() {
        let label = Label::secondary(Span::new(0..5), "first defined here");

        assert_eq!(label.span().len(), 5);
        assert!(!label.is_primary());
    }
}
