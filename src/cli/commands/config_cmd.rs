//! config command - List, get, set, add, or delete configuration entries

use anyhow::Result;
use serde_json::json;

use super::Context;
use crate::api::location::{config_entry_location, config_list_location};
use crate::api::Method;

/// List configuration entries, optionally filtered by key substring.
pub fn list(ctx: &Context, path: Option<&str>, filter: Option<&str>) -> Result<()> {
    let repo_path = ctx.repo_path(path)?;
    ctx.request(Method::Get, &config_list_location(&repo_path), filter, None)
}

/// Get one configuration entry.
pub fn get(ctx: &Context, key: &str, path: Option<&str>) -> Result<()> {
    let repo_path = ctx.repo_path(path)?;
    ctx.request(Method::Get, &config_entry_location(key, &repo_path), None, None)
}

/// Replace a configuration entry.
///
/// All values are sent; more than one is answered with "not implemented".
pub fn set(ctx: &Context, key: &str, values: &[String], path: Option<&str>) -> Result<()> {
    let repo_path = ctx.repo_path(path)?;
    let body = json!({ "Value": values });
    ctx.request(
        Method::Put,
        &config_entry_location(key, &repo_path),
        None,
        Some(body),
    )
}

/// Create a configuration entry.
pub fn add(ctx: &Context, key: &str, value: &str, path: Option<&str>) -> Result<()> {
    let repo_path = ctx.repo_path(path)?;
    let body = json!({ "Key": key, "Value": value });
    ctx.request(Method::Post, &config_list_location(&repo_path), None, Some(body))
}

/// Remove a configuration entry.
pub fn delete(ctx: &Context, key: &str, path: Option<&str>) -> Result<()> {
    let repo_path = ctx.repo_path(path)?;
    ctx.request(
        Method::Delete,
        &config_entry_location(key, &repo_path),
        None,
        None,
    )
}
