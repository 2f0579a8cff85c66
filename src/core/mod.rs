//! core
//!
//! Service configuration and workspace path mapping.
//!
//! # Modules
//!
//! - [`config`] - Service settings schema and loading
//! - [`paths`] - URL path to workspace directory mapping

pub mod config;
pub mod paths;
