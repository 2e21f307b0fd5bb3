//! Configuration file support
//!
//! Handles parsing of optional `.dmv.toml` files that preconfigure
//! validation and output paths. CLI flags override config values, which
//! override the built-in defaults.
//!
//! ## Configuration File Format
//!
//! ```toml
//! # .dmv.toml
//!
//! [load]
//! # Referential validation of dependency references (default: true).
//! # Disable only for trusted inputs.
//! validate = true
//!
//! [output]
//! # Write the text report here instead of stdout.
//! report = "report.txt"
//!
//! # Write the plot point JSON here.
//! points = "points.json"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Default config file name, looked up next to the input document
pub const CONFIG_FILE_NAME: &str = ".dmv.toml";

/// Errors that can occur when loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Load configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct LoadConfig {
    /// Validate dependency references at graph construction
    #[serde(default = "default_validate")]
    pub validate: bool,
}

fn default_validate() -> bool {
    true
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            validate: default_validate(),
        }
    }
}

/// Output section: default destinations for report and plot points
#[derive(Debug, Clone, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub report: Option<PathBuf>,

    #[serde(default)]
    pub points: Option<PathBuf>,
}

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DmvConfig {
    #[serde(default)]
    pub load: LoadConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Load configuration from an explicit file path
pub fn load_config(path: &Path) -> Result<DmvConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Look for `.dmv.toml` in the directory containing the input document
///
/// Returns `None` when no config file exists there; a file that exists
/// but fails to parse is surfaced as an error.
pub fn find_config(input: &Path) -> Result<Option<DmvConfig>, ConfigError> {
    let dir = input.parent().unwrap_or_else(|| Path::new("."));
    let candidate = dir.join(CONFIG_FILE_NAME);
    if !candidate.is_file() {
        return Ok(None);
    }
    load_config(&candidate).map(Some)
}
