//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module is the **single doorway** to libgit2. Providers call into
//! [`Git`] for repository discovery, config writes, status listing, and
//! operation-state detection; nothing else in the crate imports `git2`.
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants:
//! - [`GitError::NotARepo`]: Not inside a Git repository
//! - [`GitError::BareRepo`]: Repository has no working directory
//! - [`GitError::ConfigWrite`]: A config value could not be stored
//! - [`GitError::AccessError`]: Locked or unreadable repository files
//!
//! # Example
//!
//! ```ignore
//! use gitapi::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! for entry in git.status_entries()? {
//!     println!("{} {:#x}", entry.path, entry.bit);
//! }
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::status::{OperationFlags, StatusEntry};

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository not supported")]
    BareRepo,

    /// A configuration value could not be written.
    #[error("failed to set config '{key}': {message}")]
    ConfigWrite {
        /// The dotted key being written
        key: String,
        /// The underlying libgit2 message
        message: String,
    },

    /// Permission or filesystem error.
    #[error("repository access error: {message}")]
    AccessError {
        /// Description of the error
        message: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Whether the error means "there is no usable repository here".
    pub fn is_not_found(&self) -> bool {
        matches!(self, GitError::NotARepo { .. } | GitError::BareRepo)
    }
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        match err.code() {
            git2::ErrorCode::Locked => GitError::AccessError {
                message: format!("repository is locked: {}", err.message()),
            },
            _ => GitError::Internal {
                message: err.message().to_string(),
            },
        }
    }
}

/// Information about a Git repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoInfo {
    /// Path to .git directory
    pub git_dir: PathBuf,
    /// Path to working directory
    pub work_dir: PathBuf,
}

impl RepoInfo {
    /// Path of the repository-local config document.
    pub fn config_path(&self) -> PathBuf {
        self.git_dir.join("config")
    }
}

/// State of in-progress Git operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitState {
    /// No operation in progress.
    Clean,

    /// Rebase in progress.
    Rebase {
        /// Current step in the rebase (1-indexed), if available.
        current: Option<usize>,
        /// Total steps in the rebase, if available.
        total: Option<usize>,
    },

    /// Merge in progress.
    Merge,

    /// Cherry-pick in progress.
    CherryPick,

    /// Revert in progress.
    Revert,

    /// Bisect in progress.
    Bisect,

    /// Apply mailbox in progress.
    ApplyMailbox,
}

impl GitState {
    /// Get a human-readable description of the state.
    pub fn description(&self) -> &'static str {
        match self {
            GitState::Clean => "clean",
            GitState::Rebase { .. } => "rebase",
            GitState::Merge => "merge",
            GitState::CherryPick => "cherry-pick",
            GitState::Revert => "revert",
            GitState::Bisect => "bisect",
            GitState::ApplyMailbox => "apply-mailbox",
        }
    }

    /// The operation signals reported to the status classifier.
    ///
    /// Bisect and apply-mailbox have no API state and report nothing.
    ///
    /// ```
    /// use gitapi::git::GitState;
    ///
    /// let ops = GitState::Revert.operations();
    /// assert!(ops.reverting);
    /// assert!(!ops.merging);
    /// ```
    pub fn operations(&self) -> OperationFlags {
        OperationFlags {
            rebasing: matches!(self, GitState::Rebase { .. }),
            reverting: matches!(self, GitState::Revert),
            merging: matches!(self, GitState::Merge),
            cherry_picking: matches!(self, GitState::CherryPick),
        }
    }
}

impl std::fmt::Display for GitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GitState::Rebase {
                current: Some(c),
                total: Some(t),
            } => write!(f, "rebase ({}/{})", c, t),
            _ => write!(f, "{}", self.description()),
        }
    }
}

/// The Git interface.
///
/// Owns one opened repository. `git2::Repository` is `Send` but not `Sync`,
/// so async callers open a `Git` inside a blocking task and drop it there.
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    // =========================================================================
    // Repository Opening and Info
    // =========================================================================

    /// Open the repository containing `path`.
    ///
    /// Uses `git2::Repository::discover`, so `path` can be any directory
    /// within the working tree.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    /// - [`GitError::BareRepo`] if the repository has no working directory
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        if repo.is_bare() {
            return Err(GitError::BareRepo);
        }

        Ok(Self { repo })
    }

    /// Get repository information (git_dir and work_dir paths).
    pub fn info(&self) -> Result<RepoInfo, GitError> {
        let git_dir = self.repo.path().to_path_buf();
        let work_dir = self.repo.workdir().ok_or(GitError::BareRepo)?.to_path_buf();

        Ok(RepoInfo { git_dir, work_dir })
    }

    // =========================================================================
    // State Detection
    // =========================================================================

    /// Get the current Git state (rebase, merge, etc.).
    pub fn state(&self) -> GitState {
        match self.repo.state() {
            git2::RepositoryState::Clean => GitState::Clean,
            git2::RepositoryState::Rebase
            | git2::RepositoryState::RebaseInteractive
            | git2::RepositoryState::RebaseMerge
            | git2::RepositoryState::ApplyMailboxOrRebase => {
                let (current, total) = self.read_rebase_progress();
                GitState::Rebase { current, total }
            }
            git2::RepositoryState::Merge => GitState::Merge,
            git2::RepositoryState::CherryPick | git2::RepositoryState::CherryPickSequence => {
                GitState::CherryPick
            }
            git2::RepositoryState::Revert | git2::RepositoryState::RevertSequence => {
                GitState::Revert
            }
            git2::RepositoryState::Bisect => GitState::Bisect,
            git2::RepositoryState::ApplyMailbox => GitState::ApplyMailbox,
        }
    }

    /// Read rebase progress from .git/rebase-merge or .git/rebase-apply.
    fn read_rebase_progress(&self) -> (Option<usize>, Option<usize>) {
        let git_dir = self.repo.path();
        let read_num = |path: PathBuf| -> Option<usize> {
            std::fs::read_to_string(path)
                .ok()
                .and_then(|s| s.trim().parse().ok())
        };

        let rebase_merge = git_dir.join("rebase-merge");
        if rebase_merge.exists() {
            return (
                read_num(rebase_merge.join("msgnum")),
                read_num(rebase_merge.join("end")),
            );
        }

        let rebase_apply = git_dir.join("rebase-apply");
        if rebase_apply.exists() {
            return (
                read_num(rebase_apply.join("next")),
                read_num(rebase_apply.join("last")),
            );
        }

        (None, None)
    }

    // =========================================================================
    // Working Tree Status
    // =========================================================================

    /// List every changed file with its raw status bits.
    ///
    /// Untracked files are included and untracked directories are expanded
    /// to their files. Ignored files are not reported. Entries come back in
    /// libgit2's order.
    pub fn status_entries(&self) -> Result<Vec<StatusEntry>, GitError> {
        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut opts))?;

        Ok(statuses
            .iter()
            .map(|entry| {
                let path = String::from_utf8_lossy(entry.path_bytes()).into_owned();
                StatusEntry::new(path, entry.status().bits())
            })
            .collect())
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Store `value` under the dotted `key` in the repository-local config.
    ///
    /// # Errors
    ///
    /// - [`GitError::ConfigWrite`] if libgit2 rejects the key or the file
    ///   cannot be written
    pub fn set_config_string(&self, key: &str, value: &str) -> Result<(), GitError> {
        let to_write_error = |e: git2::Error| GitError::ConfigWrite {
            key: key.to_string(),
            message: e.message().to_string(),
        };

        let mut config = self
            .repo
            .config()
            .and_then(|c| c.open_level(git2::ConfigLevel::Local))
            .map_err(to_write_error)?;

        config.set_str(key, value).map_err(to_write_error)
    }
}
