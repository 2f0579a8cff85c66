//! provider
//!
//! Repository-side capabilities consumed by the API.
//!
//! # Architecture
//!
//! The API layer never touches the filesystem or libgit2 directly. It talks
//! to a [`Provider`], which bundles three capabilities:
//!
//! - [`RepoResolver`]: request path to [`RepoHandle`], or nothing
//! - [`ConfigSource`]: config document text and single-key writes
//! - [`StatusSource`]: changed files and operation signals
//!
//! # Modules
//!
//! - `traits`: Capability traits and shared types
//! - `local`: Workspace-on-disk implementation through [`crate::git`]
//! - [`mock`]: In-memory implementation for deterministic testing

mod local;
pub mod mock;
mod traits;

pub use local::LocalProvider;
pub use traits::*;
