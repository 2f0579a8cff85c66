//! core::config
//!
//! Service configuration schema and loading.
//!
//! # Settings
//!
//! - `file_root`: URL prefix clients use for workspace files (default `/file`)
//! - `workspace_dir`: directory holding the served repositories
//!   (default: the current directory)
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (applied by the caller through [`Config::with_overrides`])
//!
//! # Config Locations
//!
//! Searched in order, first hit wins:
//! 1. `$GITAPI_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/gitapi/config.toml`
//! 3. `~/.gitapi/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use gitapi::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("{} -> {}", config.file_root(), config.workspace_dir().display());
//! ```

pub mod schema;

pub use schema::{ServiceConfig, DEFAULT_FILE_ROOT};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("current directory unavailable: {0}")]
    NoCurrentDir(std::io::Error),
}

/// Resolved service configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    file_root: String,
    workspace_dir: PathBuf,
    /// Path of the config file that was loaded, if any
    source: Option<PathBuf>,
}

impl Config {
    /// Build a configuration from explicit values.
    pub fn new(file_root: impl Into<String>, workspace_dir: impl Into<PathBuf>) -> Self {
        Self {
            file_root: file_root.into(),
            workspace_dir: workspace_dir.into(),
            source: None,
        }
    }

    /// Load configuration from the standard locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed or
    /// holds invalid values. A missing file is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        let (file, source) = match Self::find_config_file() {
            Some(path) => (Self::read_config(&path)?, Some(path)),
            None => (ServiceConfig::default(), None),
        };
        let mut config = Self::resolve(file)?;
        config.source = source;
        Ok(config)
    }

    /// Apply overrides (usually CLI flags) on top of this configuration.
    pub fn with_overrides(self, overrides: ServiceConfig) -> Result<Self, ConfigError> {
        let current = ServiceConfig {
            file_root: Some(self.file_root),
            workspace_dir: Some(self.workspace_dir),
        };
        let mut config = Self::resolve(current.merged_with(overrides))?;
        config.source = self.source;
        Ok(config)
    }

    /// URL prefix for workspace files, without a trailing slash.
    pub fn file_root(&self) -> &str {
        &self.file_root
    }

    /// Directory holding the served repositories.
    pub fn workspace_dir(&self) -> &Path {
        &self.workspace_dir
    }

    /// The config file this configuration came from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Validate, then fill in defaults.
    fn resolve(file: ServiceConfig) -> Result<Self, ConfigError> {
        file.validate()?;

        let file_root = file
            .file_root
            .unwrap_or_else(|| DEFAULT_FILE_ROOT.to_string());
        let file_root = match file_root.trim_end_matches('/') {
            "" => "/".to_string(),
            trimmed => trimmed.to_string(),
        };

        let workspace_dir = match file.workspace_dir {
            Some(dir) => dir,
            None => std::env::current_dir().map_err(ConfigError::NoCurrentDir)?,
        };

        Ok(Self {
            file_root,
            workspace_dir,
            source: None,
        })
    }

    /// Locate the config file, if one exists.
    fn find_config_file() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("GITAPI_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("gitapi/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        dirs::home_dir()
            .map(|home| home.join(".gitapi/config.toml"))
            .filter(|path| path.exists())
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
