//! Command-line argument definitions for the Kinship CLI.
//!
//! [`Args`] is parsed from the command line using [`clap`]. Each
//! [`Command`] reads one input file; the global options select the
//! configuration file and the logging verbosity.

use std::path::Path;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for the Kinship family graph tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lay out a family tree and write it as SVG
    Render {
        /// Notation text or tree JSON
        input: String,

        /// Path to the output SVG file
        #[arg(short, long, default_value = "out.svg")]
        output: String,

        /// Input format; guessed from the file extension when omitted
        #[arg(long, value_enum)]
        format: Option<InputFormat>,
    },

    /// Write the tree as JSON
    ExportJson {
        /// Notation text or tree JSON
        input: String,

        #[arg(short, long, default_value = "tree.json")]
        output: String,

        /// Input format; guessed from the file extension when omitted
        #[arg(long, value_enum)]
        format: Option<InputFormat>,
    },

    /// Check a notation file and copy it verbatim
    ExportText {
        /// Notation text
        input: String,

        #[arg(short, long, default_value = "hierarchy.txt")]
        output: String,
    },

    /// Print the nodes and links handed to a renderer as JSON
    Links {
        /// Notation text or tree JSON
        input: String,

        /// Input format; guessed from the file extension when omitted
        #[arg(long, value_enum)]
        format: Option<InputFormat>,
    },
}

/// What an input file contains.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Indentation notation
    Text,
    /// JSON node array
    Json,
}

impl InputFormat {
    /// Returns `explicit` if set, otherwise [`InputFormat::Json`] for
    /// `.json` files and [`InputFormat::Text`] for anything else.
    pub fn resolve(explicit: Option<Self>, path: impl AsRef<Path>) -> Self {
        explicit.unwrap_or_else(|| {
            let is_json = path
                .as_ref()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            if is_json { Self::Json } else { Self::Text }
        })
    }
}
