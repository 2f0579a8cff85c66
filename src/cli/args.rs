//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--workspace <dir>`: Directory holding the served repositories
//! - `--file-root <prefix>`: URL prefix the workspace is served under
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Print nothing on successful writes
//! - `--compact`: Print JSON on a single line

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// gitapi - Git config and working tree status as JSON
#[derive(Parser, Debug)]
#[command(name = "gitapi")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the served repositories (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    /// URL prefix the workspace is served under (defaults to /file)
    #[arg(long, global = true, value_name = "PREFIX")]
    pub file_root: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Print nothing on successful writes
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read and write repository configuration
    #[command(
        name = "config",
        long_about = "Read and write repository-local git configuration.\n\n\
            Keys are dotted paths such as user.name or branch.main.remote. \
            Reads come from the repository's own config file; writes go \
            through libgit2 into the same file.",
        after_help = "\
EXAMPLES:
    # Every entry of the repository containing the current directory
    gitapi config list

    # Only entries whose key contains 'branch'
    gitapi config list --filter branch

    # One entry of a specific repository
    gitapi config get user.name /file/project/

    # Replace and remove
    gitapi config set user.name 'Ada Lovelace'
    gitapi config delete user.name"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show classified working tree status
    #[command(
        name = "status",
        long_about = "Show the working tree status of a repository.\n\n\
            Changed files are grouped into Added, Changed, Conflicting, Missing, \
            Modified, Removed and Untracked. A file can appear in more than one \
            group. RepositoryState reports an operation in progress."
    )]
    Status {
        /// Repository path under the file root (e.g. /file/project/)
        path: Option<String>,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// List configuration entries
    List {
        /// Repository path under the file root
        path: Option<String>,

        /// Keep only keys containing this text
        #[arg(long, short)]
        filter: Option<String>,
    },
    /// Get one configuration entry
    Get {
        /// Configuration key
        key: String,
        /// Repository path under the file root
        path: Option<String>,
    },
    /// Replace a configuration entry
    Set {
        /// Configuration key
        key: String,
        /// Value to set (exactly one is supported)
        #[arg(required = true, num_args = 1..)]
        values: Vec<String>,
        /// Repository path under the file root
        #[arg(long)]
        path: Option<String>,
    },
    /// Create a configuration entry
    Add {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
        /// Repository path under the file root
        #[arg(long)]
        path: Option<String>,
    },
    /// Remove a configuration entry
    Delete {
        /// Configuration key
        key: String,
        /// Repository path under the file root
        path: Option<String>,
    },
}
