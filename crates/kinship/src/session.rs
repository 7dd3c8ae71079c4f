//! The editing session: the current notation text and the tree built from it.
//!
//! A [`Session`] owns the one mutable piece of state. Every operation either
//! succeeds and replaces the tree wholesale, or fails and leaves the session
//! as it was.

use std::{fs, path::Path};

use log::{debug, info};

use kinship_core::tree::FamilyTree;
use kinship_parser::{ParserConfig, error::Diagnostic};

use crate::error::KinshipError;

/// Input text plus the active family tree.
#[derive(Debug, Clone, Default)]
pub struct Session {
    text: String,
    tree: FamilyTree,
    warnings: Vec<Diagnostic>,
    parser: ParserConfig,
}

impl Session {
    /// Creates an empty session.
    pub fn new(parser: ParserConfig) -> Self {
        Self {
            parser,
            ..Self::default()
        }
    }

    /// The notation text the current tree was parsed from.
    ///
    /// After [`import_json`](Self::import_json) this is the last submitted
    /// text, which no longer describes the tree.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tree(&self) -> &FamilyTree {
        &self.tree
    }

    /// Warnings reported by the parse that produced the current tree.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Parses `text` and, on success, makes it the session's text and tree.
    ///
    /// # Errors
    ///
    /// Returns [`KinshipError::Parse`] with every diagnostic of the input.
    pub fn submit(&mut self, text: impl Into<String>) -> Result<(), KinshipError> {
        let text = text.into();
        let parsed = kinship_parser::parse(&text, self.parser)
            .map_err(|err| KinshipError::new_parse_error(err, text.as_str()))?;

        self.warnings = parsed.warnings().to_vec();
        self.tree.replace(parsed.into_nodes());
        self.text = text;
        Ok(())
    }

    /// Reads notation text from `path` and submits it.
    ///
    /// # Errors
    ///
    /// Returns [`KinshipError::Io`] if the file cannot be read, or
    /// [`KinshipError::Parse`] if its contents do not parse.
    pub fn import_text(&mut self, path: impl AsRef<Path>) -> Result<(), KinshipError> {
        let path = path.as_ref();
        info!(path:? = path; "Importing notation text");

        let text = fs::read_to_string(path)?;
        self.submit(text)
    }

    /// Writes the session text to `path` unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`KinshipError::Io`] if the file cannot be written.
    pub fn export_text(&self, path: impl AsRef<Path>) -> Result<(), KinshipError> {
        let path = path.as_ref();
        info!(path:? = path, bytes = self.text.len(); "Exporting notation text");

        fs::write(path, &self.text)?;
        Ok(())
    }

    /// Replaces the tree with the node set described by `json`.
    ///
    /// The text and warnings are left alone; the imported tree has no
    /// notation source.
    ///
    /// # Errors
    ///
    /// Returns [`KinshipError::Schema`] if `json` is not an array of nodes.
    pub fn load_json(&mut self, json: &str) -> Result<(), KinshipError> {
        let imported = FamilyTree::from_json(json)?;
        debug!(nodes = imported.len(); "Tree JSON loaded");

        self.tree = imported;
        self.warnings.clear();
        Ok(())
    }

    /// Reads a JSON node array from `path` and makes it the active tree.
    ///
    /// # Errors
    ///
    /// Returns [`KinshipError::Io`] if the file cannot be read, or
    /// [`KinshipError::Schema`] if it is not an array of nodes.
    pub fn import_json(&mut self, path: impl AsRef<Path>) -> Result<(), KinshipError> {
        let path = path.as_ref();
        info!(path:? = path; "Importing tree JSON");

        let json = fs::read_to_string(path)?;
        self.load_json(&json)
    }

    /// Writes the active tree to `path` as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`KinshipError::Schema`] if serialization fails, or
    /// [`KinshipError::Io`] if the file cannot be written.
    pub fn export_json(&self, path: impl AsRef<Path>) -> Result<(), KinshipError> {
        let path = path.as_ref();
        info!(path:? = path, nodes = self.tree.len(); "Exporting tree JSON");

        fs::write(path, self.tree.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinship_parser::BlankLinePolicy;

    #[test]
    fn test_submit_replaces_text_and_tree() {
        let mut session = Session::default();
        session.submit("Alice\n-Bob").unwrap();

        assert_eq!(session.text(), "Alice\n-Bob");
        assert_eq!(session.tree().len(), 2);

        session.submit("Zed").unwrap();
        assert_eq!(session.tree().len(), 1);
        assert!(session.tree().get("Alice").is_none());
    }

    #[test]
    fn test_failed_submit_keeps_previous_state() {
        let mut session = Session::default();
        session.submit("Alice\n-Bob").unwrap();

        let err = session.submit("Alice\n---Bob").unwrap_err();

        assert!(matches!(err, KinshipError::Parse { .. }));
        assert_eq!(session.text(), "Alice\n-Bob");
        assert_eq!(session.tree().len(), 2);
    }

    #[test]
    fn test_warnings_follow_the_tree() {
        let mut session = Session::default();
        session.submit("Alice\n\n-Bob").unwrap();
        assert_eq!(session.warnings().len(), 1);

        session.submit("Alice").unwrap();
        assert!(session.warnings().is_empty());
    }

    #[test]
    fn test_parser_config_is_used() {
        let mut session = Session::new(ParserConfig::new(BlankLinePolicy::Reject));
        assert!(session.submit("Alice\n\n-Bob").is_err());
        assert!(session.tree().is_empty());
    }

    #[test]
    fn test_bad_json_keeps_previous_tree() {
        let mut session = Session::default();
        session.submit("Alice\n-Bob").unwrap();

        let err = session.load_json(r#"[{"name": 3}]"#).unwrap_err();

        assert!(matches!(err, KinshipError::Schema(_)));
        assert_eq!(session.tree().len(), 2);
    }

    #[test]
    fn test_load_json_keeps_text() {
        let mut session = Session::default();
        session.submit("Alice").unwrap();
        session
            .load_json(r#"[{"name": "Zed", "type": "child"}]"#)
            .unwrap();

        assert_eq!(session.text(), "Alice");
        assert_eq!(session.tree().root().map(|n| n.name()), Some("Zed"));
    }
}
