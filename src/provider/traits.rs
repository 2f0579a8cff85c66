//! provider::traits
//!
//! Capabilities the API consumes from the repository side.
//!
//! # Design
//!
//! The traits are async because every call may touch the filesystem or
//! libgit2. Implementations must not cache: each request sees the
//! repository as it is at call time.
//!
//! - [`RepoResolver`]: request path to repository handle
//! - [`ConfigSource`]: raw config document and single-key writes
//! - [`StatusSource`]: changed files and operation signals
//!
//! # Example
//!
//! ```ignore
//! use gitapi::provider::{Provider, ProviderError};
//!
//! async fn dump(provider: &dyn Provider, path: &str) -> Result<(), ProviderError> {
//!     if let Some(repo) = provider.resolve(path).await? {
//!         let text = provider.read_config(&repo).await?;
//!         println!("{}", text);
//!     }
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::git::GitError;
use crate::gitconfig::ParseError;
use crate::status::{OperationFlags, StatusEntry};

/// Errors from provider operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The repository could not be opened or queried.
    #[error("repository error: {0}")]
    Repository(String),

    /// The config document could not be read.
    #[error("failed to read config '{path}': {message}")]
    ConfigRead { path: PathBuf, message: String },

    /// The config document could not be parsed.
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] ParseError),

    /// A config write was rejected.
    #[error("config write failed: {0}")]
    ConfigWrite(String),

    /// The status query failed.
    #[error("status query failed: {0}")]
    Status(String),

    /// A blocking task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(String),
}

impl From<GitError> for ProviderError {
    fn from(err: GitError) -> Self {
        match err {
            GitError::ConfigWrite { .. } => ProviderError::ConfigWrite(err.to_string()),
            other => ProviderError::Repository(other.to_string()),
        }
    }
}

/// A resolved repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoHandle {
    /// Working directory on disk
    pub work_dir: PathBuf,
    /// The .git directory
    pub git_dir: PathBuf,
    /// Client-visible URL of the working directory, with a trailing slash
    /// (e.g. `/file/project/`)
    pub file_dir: String,
}

impl RepoHandle {
    /// Path of the repository-local config document.
    pub fn config_path(&self) -> PathBuf {
        self.git_dir.join("config")
    }
}

/// A live status query result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// Changed files in provider order
    pub entries: Vec<StatusEntry>,
    /// Operation-in-progress signals
    pub operations: OperationFlags,
}

/// Resolves request paths to repositories.
#[async_trait]
pub trait RepoResolver: Send + Sync {
    /// Find the repository addressed by `path`.
    ///
    /// Returns `Ok(None)` when no repository matches; callers treat that as
    /// forbidden.
    async fn resolve(&self, path: &str) -> Result<Option<RepoHandle>, ProviderError>;
}

/// Reads and writes a repository's config document.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Raw text of the repository-local config document.
    async fn read_config(&self, repo: &RepoHandle) -> Result<String, ProviderError>;

    /// Store `value` under the dotted `key`.
    ///
    /// Implementations serialize concurrent writes themselves.
    async fn set_string(
        &self,
        repo: &RepoHandle,
        key: &str,
        value: &str,
    ) -> Result<(), ProviderError>;
}

/// Queries working tree status.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Changed files plus operation signals, fetched fresh.
    async fn status(&self, repo: &RepoHandle) -> Result<StatusSnapshot, ProviderError>;
}

/// Everything the API needs from the repository side.
pub trait Provider: RepoResolver + ConfigSource + StatusSource {}

impl<T: RepoResolver + ConfigSource + StatusSource> Provider for T {}
