//! CLI logic for the Kinship family graph tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command, InputFormat};

use std::{fs, path::Path};

use log::{info, warn};

use kinship::{KinshipError, Pipeline, Session};

use error_adapter::{DiagnosticAdapter, render_report};

/// Run the Kinship CLI application
///
/// Loads the configuration, reads the input of the selected command and
/// writes its output.
///
/// # Errors
///
/// Returns `KinshipError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors and malformed JSON
/// - Layout errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), KinshipError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let pipeline = Pipeline::new(app_config);

    match &args.command {
        Command::Render {
            input,
            output,
            format,
        } => {
            info!(input_path = input, output_path = output; "Rendering family tree");
            let session = load(&pipeline, input, InputFormat::resolve(*format, input))?;

            let svg = pipeline.render_svg(session.tree())?;
            fs::write(output, svg)?;
            info!(output_file = output; "SVG exported successfully");
        }
        Command::ExportJson {
            input,
            output,
            format,
        } => {
            info!(input_path = input, output_path = output; "Exporting tree JSON");
            let session = load(&pipeline, input, InputFormat::resolve(*format, input))?;

            session.export_json(output)?;
        }
        Command::ExportText { input, output } => {
            info!(input_path = input, output_path = output; "Exporting notation text");
            let session = load(&pipeline, input, InputFormat::Text)?;

            session.export_text(output)?;
        }
        Command::Links { input, format } => {
            let session = load(&pipeline, input, InputFormat::resolve(*format, input))?;

            let scene = pipeline.scene(session.tree());
            println!("{}", scene.to_json()?);
        }
    }

    Ok(())
}

/// Load `input` into a fresh session, logging any parse warnings.
fn load(pipeline: &Pipeline, input: &str, format: InputFormat) -> Result<Session, KinshipError> {
    let mut session = pipeline.session();
    let path = Path::new(input);

    match format {
        InputFormat::Text => session.import_text(path)?,
        InputFormat::Json => session.import_json(path)?,
    }

    for warning in session.warnings() {
        warn!("{}", render_report(&DiagnosticAdapter::new(warning, session.text())));
    }

    Ok(session)
}
