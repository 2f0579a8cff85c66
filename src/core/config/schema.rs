//! core::config::schema
//!
//! Service settings schema.
//!
//! # Example
//!
//! ```toml
//! file_root = "/file"
//! workspace_dir = "/srv/workspace"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Default URL prefix under which workspace files are addressed.
pub const DEFAULT_FILE_ROOT: &str = "/file";

/// Service settings as stored on disk.
///
/// Every field is optional in the file; [`super::Config`] applies defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// URL prefix that maps onto `workspace_dir` (e.g. "/file")
    pub file_root: Option<String>,

    /// Directory holding the repositories served by the API
    pub workspace_dir: Option<PathBuf>,
}

impl ServiceConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(root) = &self.file_root {
            if !root.starts_with('/') {
                return Err(ConfigError::InvalidValue(format!(
                    "file_root must start with '/', got '{}'",
                    root
                )));
            }
        }

        if let Some(dir) = &self.workspace_dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "workspace_dir cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn merged_with(self, other: ServiceConfig) -> ServiceConfig {
        ServiceConfig {
            file_root: other.file_root.or(self.file_root),
            workspace_dir: other.workspace_dir.or(self.workspace_dir),
        }
    }
}
