//! Error adapter for converting KinshipError to miette diagnostics.
//!
//! Parse errors carry one [`Diagnostic`] per problem found in the notation;
//! each is rendered on its own with a snippet of the source. Other errors
//! are rendered as a single message.

use std::fmt;

use miette::{
    Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan, Severity, SourceSpan,
};

use kinship::KinshipError;
use kinship_parser::error::Diagnostic;

/// Adapter for a single notation diagnostic.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<Severity> {
        if self.diag.severity().is_warning() {
            Some(Severity::Warning)
        } else {
            Some(Severity::Error)
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Adapter for [`KinshipError`] variants without source locations.
pub struct ErrorAdapter<'a>(pub &'a KinshipError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            KinshipError::Io(_) => "kinship::io",
            KinshipError::Parse { .. } => return None,
            KinshipError::Schema(_) => "kinship::schema",
            KinshipError::Layout(_) => "kinship::layout",
            KinshipError::Export(_) => "kinship::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            KinshipError::Schema(_) => Some(Box::new(
                "expected an array of {name, type, parent, children, spouse} objects",
            )),
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A diagnostic with source location information.
    Diagnostic(DiagnosticAdapter<'a>),
    /// An error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<Severity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a kinship [`Span`](kinship_parser::Span) to a miette [`SourceSpan`].
fn span_to_miette(span: kinship_parser::Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert a [`KinshipError`] into a list of reportable errors.
///
/// For [`KinshipError::Parse`], this returns one [`Reportable`] for each
/// diagnostic in the error, warnings included. For other variants, this
/// returns a single [`Reportable`].
pub fn to_reportables(err: &KinshipError) -> Vec<Reportable<'_>> {
    match err {
        KinshipError::Parse {
            err: parse_err,
            src,
        } => parse_err
            .diagnostics()
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, src)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

/// Render a diagnostic with miette's graphical handler.
///
/// Falls back to the plain message if rendering fails.
pub fn render_report(diagnostic: &dyn MietteDiagnostic) -> String {
    let mut writer = String::new();
    match GraphicalReportHandler::new().render_report(&mut writer, diagnostic) {
        Ok(()) => writer,
        Err(_) => diagnostic.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use kinship_parser::{
        Span,
        error::{ErrorCode, ParseError},
    };

    use super::*;

    #[test]
    fn test_single_diagnostic() {
        let diag = Diagnostic::error("`Bob` is nested 2 levels deep")
            .with_code(ErrorCode::E100)
            .with_label(Span::new(6..11), "nesting skips a level")
            .with_help("use at most one marker more than the line above");
        let err = KinshipError::new_parse_error(ParseError::from(diag), "Alice\n--Bob");

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);

        match &reportables[0] {
            Reportable::Diagnostic(d) => {
                assert_eq!(d.to_string(), "`Bob` is nested 2 levels deep");
                assert_eq!(d.code().unwrap().to_string(), "E100");
            }
            Reportable::Error(_) => panic!("Expected Diagnostic"),
        }
    }

    #[test]
    fn test_multiple_diagnostics() {
        let diags = vec![
            Diagnostic::warning("blank line 2 was skipped")
                .with_code(ErrorCode::E103)
                .with_label(Span::new(6..6), "blank line"),
            Diagnostic::error("`Zed` is a second root")
                .with_code(ErrorCode::E102)
                .with_label(Span::new(7..10), "second root")
                .with_secondary_label(Span::new(0..5), "first root"),
        ];
        let err = KinshipError::new_parse_error(ParseError::from(diags), "Alice\n\nZed");

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 2);
        assert_eq!(reportables[0].severity(), Some(Severity::Warning));
        assert_eq!(reportables[1].severity(), Some(Severity::Error));
        assert_eq!(reportables[1].to_string(), "`Zed` is a second root");
    }

    #[test]
    fn test_non_parse_error() {
        let err = KinshipError::Layout("simulation diverged".to_string());

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "Layout error: simulation diverged");
                assert_eq!(e.code().unwrap().to_string(), "kinship::layout");
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_primary_flag_on_labels() {
        let diag = Diagnostic::error("`Zed` is a second root")
            .with_label(Span::new(6..9), "second root")
            .with_secondary_label(Span::new(0..5), "first root");

        let adapter = DiagnosticAdapter::new(&diag, "Alice\nZed");

        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert!(labels[0].primary());
        assert_eq!(labels[0].label(), Some("second root"));
        assert!(!labels[1].primary());
    }

    #[test]
    fn test_render_report_includes_snippet() {
        let diag = Diagnostic::error("line 2 has markers but no name")
            .with_code(ErrorCode::E101)
            .with_label(Span::new(6..8), "empty name");
        let adapter = DiagnosticAdapter::new(&diag, "Alice\n--");

        let report = render_report(&adapter);
        assert!(report.contains("E101"));
        assert!(report.contains("empty name"));
    }
}
