//! Configuration file loading for the CLI
//!
//! Finds and loads the TOML configuration from an explicit path, the local
//! project directory or the platform configuration directory.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use kinship::{KinshipError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for KinshipError {
    fn from(err: ConfigError) -> Self {
        KinshipError::Io(io::Error::other(err.to_string()))
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (kinship/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
/// - Config values are out of range
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, KinshipError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("kinship/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "kinship", "kinship") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load and validate configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, KinshipError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    validate(&config)?;

    Ok(config)
}

fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
}

/// Reject values the pipeline would only fail on later.
fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    config
        .layout()
        .validate()
        .map_err(ConfigError::Validation)?;

    let style = config.style();
    style.background_color().map_err(ConfigError::Validation)?;
    for color in [
        style.child_color(),
        style.spouse_color(),
        style.link_color(),
        style.label_color(),
    ] {
        color.map_err(ConfigError::Validation)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    use kinship::BlankLinePolicy;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.layout().link_distance(), 100.0);
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = parse_config(
            r##"
            [parser]
            blank_lines = "reject"

            [layout]
            charge_strength = -50.0
            width = 800.0

            [style]
            spouse_color = "#ff0000"
            background_color = "white"
            "##,
        )
        .unwrap();

        assert_eq!(
            config.parser().parser_config().blank_lines(),
            BlankLinePolicy::Reject
        );
        assert_eq!(config.layout().charge_strength(), -50.0);
        assert_eq!(config.layout().width(), 800.0);
        assert_eq!(config.layout().height(), 600.0);
        assert!(config.style().background_color().unwrap().is_some());
    }

    #[test]
    fn test_unknown_policy_is_a_parse_error() {
        let err = parse_config("[parser]\nblank_lines = \"maybe\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation() {
        let bad_layout = parse_config("[layout]\nvelocity_decay = 2.0").unwrap();
        assert!(matches!(validate(&bad_layout), Err(ConfigError::Validation(_))));

        let bad_color = parse_config("[style]\nlink_color = \"nope\"").unwrap();
        assert!(matches!(validate(&bad_color), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_explicit_path() {
        use std::io::Write;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[layout]\nlink_distance = 60.0").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.layout().link_distance(), 60.0);
    }

    #[test]
    fn test_missing_explicit_path() {
        let result = load_config(Some("/nonexistent/kinship.toml"));
        assert!(matches!(result, Err(KinshipError::Io(_))));
    }
}
