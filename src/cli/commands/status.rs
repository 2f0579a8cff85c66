//! status command - Show classified working tree status

use anyhow::Result;

use super::Context;
use crate::api::location::STATUS;
use crate::api::Method;

/// Show the status of the repository at `path`.
pub fn status(ctx: &Context, path: Option<&str>) -> Result<()> {
    let repo_path = ctx.repo_path(path)?;
    ctx.request(Method::Get, &format!("{}{}", STATUS, repo_path), None, None)
}
