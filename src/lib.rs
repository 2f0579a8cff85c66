//! gitapi - Git config and working tree status over a REST-style JSON API
//!
//! gitapi serves the repositories inside one workspace directory. Clients
//! address them by URL path (e.g. `/file/project/`) and get back JSON
//! describing the repository-local configuration or the classified working
//! tree status, with links to related resources.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, issues API requests)
//! - [`api`] - Request routing, validation, JSON models, status codes
//! - [`gitconfig`] - Config document parsing, flattening, write validation
//! - [`status`] - Status bit decoding, categories, repository state
//! - [`provider`] - Repository resolution, config and status capabilities
//! - [`git`] - Single interface for all Git operations
//! - [`core`] - Service configuration and URL/path mapping
//!
//! # Invariants
//!
//! 1. Only [`git`] talks to libgit2
//! 2. Nothing is cached between requests
//! 3. A rejected write never reaches the repository
//! 4. Request paths never escape the workspace

pub mod api;
pub mod cli;
pub mod core;
pub mod git;
pub mod gitconfig;
pub mod provider;
pub mod status;
