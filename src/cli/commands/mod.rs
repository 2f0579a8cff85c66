//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Works out the repository path (argument or current directory)
//! 2. Builds the matching API request and runs it through [`GitApi`]
//! 3. Prints the JSON response
//!
//! The API is async; handlers drive it on a tokio runtime owned by the
//! command, so the CLI itself stays synchronous.

mod config_cmd;
mod status;

pub use config_cmd::{add as config_add, delete as config_delete, get as config_get};
pub use config_cmd::{list as config_list, set as config_set};
pub use status::status;

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context as _, Result};
use serde_json::Value;
use tracing::debug;

use crate::api::{ApiResponse, GitApi, Method};
use crate::cli::args::{Command, ConfigAction};
use crate::core::config::Config;
use crate::core::paths::{canonical, WorkspacePaths};
use crate::provider::LocalProvider;

/// Execution context shared by command handlers.
#[derive(Debug, Clone)]
pub struct Context {
    /// Resolved service settings
    pub config: Config,
    /// Directory the command runs from
    pub cwd: PathBuf,
    /// Print nothing on successful writes
    pub quiet: bool,
    /// Print JSON on a single line
    pub compact: bool,
}

impl Context {
    /// API over the configured workspace.
    pub fn api(&self) -> GitApi {
        GitApi::new(LocalProvider::from_config(&self.config))
    }

    /// The repository path to address: `explicit` if given, otherwise the
    /// current directory's location under the file root.
    pub fn repo_path(&self, explicit: Option<&str>) -> Result<String> {
        if let Some(path) = explicit {
            return Ok(path.to_string());
        }

        let workspace = canonical(self.config.workspace_dir());
        let cwd = canonical(&self.cwd);
        WorkspacePaths::new(self.config.file_root(), workspace)
            .to_url(&cwd)
            .ok_or_else(|| {
                anyhow!(
                    "Current directory {} is outside the workspace {}",
                    self.cwd.display(),
                    self.config.workspace_dir().display()
                )
            })
    }

    /// Run one request, print the response, and fail on error statuses.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        filter: Option<&str>,
        body: Option<Value>,
    ) -> Result<()> {
        debug!(%method, path, "dispatching");
        let rt = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
        let response = rt.block_on(self.api().dispatch(method, path, filter, body.as_ref()));
        self.print(method, &response)?;

        if !response.is_success() {
            let message = response.body["Message"].as_str().unwrap_or("request failed");
            bail!("{} (HTTP {})", message, response.status);
        }
        Ok(())
    }

    fn print(&self, method: Method, response: &ApiResponse) -> Result<()> {
        if self.quiet && method != Method::Get && response.is_success() {
            return Ok(());
        }
        let text = if self.compact {
            serde_json::to_string(&response.body)
        } else {
            serde_json::to_string_pretty(&response.body)
        }
        .context("Failed to render response")?;
        println!("{}", text);
        Ok(())
    }
}

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Config { action } => match action {
            ConfigAction::List { path, filter } => {
                config_cmd::list(ctx, path.as_deref(), filter.as_deref())
            }
            ConfigAction::Get { key, path } => config_cmd::get(ctx, &key, path.as_deref()),
            ConfigAction::Set { key, values, path } => {
                config_cmd::set(ctx, &key, &values, path.as_deref())
            }
            ConfigAction::Add { key, value, path } => {
                config_cmd::add(ctx, &key, &value, path.as_deref())
            }
            ConfigAction::Delete { key, path } => config_cmd::delete(ctx, &key, path.as_deref()),
        },
        Command::Status { path } => status::status(ctx, path.as_deref()),
    }
}
