//! Config file and effective run settings.
//!
//! Precedence for each setting: command line (or its environment variable),
//! then the TOML config file, then the built-in default.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::cli::{Cli, Mode};

/// Directory name of the payload next to the executable
const DEFAULT_PAYLOAD_DIR: &str = "payload";

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Directory holding the replacement binaries
    pub payload_dir: Option<PathBuf>,
    /// Search in any directory, not only below `steamapps`
    pub any_directory: bool,
}

impl FileConfig {
    /// `<platform config dir>/steampatch/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("steampatch").join("config.toml"))
    }

    /// Parse a config file; `Ok(None)` if it does not exist
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }
        };
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(config))
    }

    /// Load the config file, falling back to defaults on any problem
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            return Self::default();
        };
        match Self::load_from_path(&path) {
            Ok(Some(config)) => {
                debug!("Loaded config from {}", path.display());
                config
            }
            Ok(None) => Self::default(),
            Err(e) => {
                warn!("{:#}, using defaults", e);
                Self::default()
            }
        }
    }
}

/// Effective settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub search_dir: PathBuf,
    pub include_unanchored: bool,
    pub payload_dir: PathBuf,
    pub mode: Mode,
}

impl RunConfig {
    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self> {
        let payload_dir = match cli.payload_dir.clone().or(file.payload_dir) {
            Some(dir) => dir,
            None => default_payload_dir()?,
        };

        Ok(Self {
            search_dir: cli.search_dir.clone(),
            include_unanchored: cli.any_dir || file.any_directory,
            payload_dir,
            mode: cli.mode(),
        })
    }
}

fn default_payload_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    let dir = exe
        .parent()
        .context("Executable path has no parent directory")?;
    Ok(dir.join(DEFAULT_PAYLOAD_DIR))
}
