//! cli
//!
//! Command-line interface layer for gitapi.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Resolve service settings (config file, then flag overrides)
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and turns each
//! command into a request against [`crate::api::GitApi`], so the terminal
//! sees exactly the JSON an API client would.

pub mod args;
pub mod commands;

pub use args::Cli;

use anyhow::{Context as _, Result};

use crate::core::config::{Config, ServiceConfig};

/// Run the CLI application with already-parsed arguments.
///
/// This is the main entry point called from `main.rs`.
pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load()
        .context("Failed to load configuration")?
        .with_overrides(ServiceConfig {
            file_root: cli.file_root.clone(),
            workspace_dir: cli.workspace.clone(),
        })
        .context("Invalid configuration")?;
    tracing::debug!(
        file_root = config.file_root(),
        workspace = %config.workspace_dir().display(),
        source = ?config.source(),
        "configuration resolved"
    );

    let ctx = commands::Context {
        config,
        cwd: std::env::current_dir().context("Failed to read current directory")?,
        quiet: cli.quiet,
        compact: cli.compact,
    };

    commands::dispatch(cli.command, &ctx)
}
