//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to libgit2. No other module imports
//! `git2`. The [`crate::provider`] implementations reach the repository
//! through [`Git`] and translate its results into the API's own types.
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - Working tree status listing with raw status bits
//! - Operation state detection (rebase, merge, revert, cherry-pick)
//! - Repository-local config writes
//!
//! Reading the config document is a plain file read of
//! [`RepoInfo::config_path`] and happens in the provider.

mod interface;

pub use interface::{Git, GitError, GitState, RepoInfo};
