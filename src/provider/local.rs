//! provider::local
//!
//! Provider backed by repositories on the local filesystem.
//!
//! Repositories are discovered under the workspace directory with
//! [`Git::open`]. libgit2 calls block, so each one runs on tokio's blocking
//! pool with a freshly opened repository.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::traits::{
    ConfigSource, ProviderError, RepoHandle, RepoResolver, StatusSnapshot, StatusSource,
};
use crate::core::config::Config;
use crate::core::paths::{canonical, WorkspacePaths};
use crate::git::Git;

/// Provider for repositories inside one workspace directory.
#[derive(Debug, Clone)]
pub struct LocalProvider {
    paths: WorkspacePaths,
}

impl LocalProvider {
    /// Serve repositories under `workspace_dir`, addressed below `file_root`.
    pub fn new(file_root: impl Into<String>, workspace_dir: impl Into<PathBuf>) -> Self {
        Self {
            paths: WorkspacePaths::new(file_root, workspace_dir),
        }
    }

    /// Build a provider from the service configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.file_root(), config.workspace_dir())
    }

    /// The path mapping in use.
    pub fn paths(&self) -> &WorkspacePaths {
        &self.paths
    }
}

/// Run a libgit2 job against the repository at `work_dir`.
async fn with_git<T, F>(work_dir: &Path, job: F) -> Result<T, ProviderError>
where
    T: Send + 'static,
    F: FnOnce(&Git) -> Result<T, ProviderError> + Send + 'static,
{
    let work_dir = work_dir.to_path_buf();
    tokio::task::spawn_blocking(move || {
        let git = Git::open(&work_dir)?;
        job(&git)
    })
    .await
    .map_err(|e| ProviderError::Task(e.to_string()))?
}

/// Canonical form of `path`, or `path` itself if it cannot be resolved.
#[async_trait]
impl RepoResolver for LocalProvider {
    #[instrument(skip(self))]
    async fn resolve(&self, path: &str) -> Result<Option<RepoHandle>, ProviderError> {
        let Some(target) = self.paths.to_fs(path) else {
            debug!("path is outside the workspace");
            return Ok(None);
        };

        let file_root = self.paths.file_root().to_string();
        let workspace = self.paths.workspace_dir().to_path_buf();

        tokio::task::spawn_blocking(move || -> Result<Option<RepoHandle>, ProviderError> {
            let git = match Git::open(&target) {
                Ok(git) => git,
                Err(e) if e.is_not_found() => {
                    debug!(target = %target.display(), "no repository found");
                    return Ok(None);
                }
                Err(e) => return Err(ProviderError::from(e)),
            };
            let info = git.info()?;

            let work_dir = canonical(&info.work_dir);
            let paths = WorkspacePaths::new(file_root, canonical(&workspace));
            let Some(file_dir) = paths.to_url(&work_dir) else {
                debug!(work_dir = %work_dir.display(), "repository lies outside the workspace");
                return Ok(None);
            };

            Ok(Some(RepoHandle {
                work_dir,
                git_dir: info.git_dir,
                file_dir,
            }))
        })
        .await
        .map_err(|e| ProviderError::Task(e.to_string()))?
    }
}

#[async_trait]
impl ConfigSource for LocalProvider {
    #[instrument(skip(self, repo), fields(repo = %repo.file_dir))]
    async fn read_config(&self, repo: &RepoHandle) -> Result<String, ProviderError> {
        let path = repo.config_path();
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ProviderError::ConfigRead {
                path,
                message: e.to_string(),
            })
    }

    #[instrument(skip(self, repo, value), fields(repo = %repo.file_dir))]
    async fn set_string(
        &self,
        repo: &RepoHandle,
        key: &str,
        value: &str,
    ) -> Result<(), ProviderError> {
        let key = key.to_string();
        let value = value.to_string();
        with_git(&repo.work_dir, move |git| {
            git.set_config_string(&key, &value)?;
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl StatusSource for LocalProvider {
    #[instrument(skip(self, repo), fields(repo = %repo.file_dir))]
    async fn status(&self, repo: &RepoHandle) -> Result<StatusSnapshot, ProviderError> {
        with_git(&repo.work_dir, |git| {
            let entries = git
                .status_entries()
                .map_err(|e| ProviderError::Status(e.to_string()))?;
            let state = git.state();
            debug!(files = entries.len(), %state, "status collected");
            Ok(StatusSnapshot {
                entries,
                operations: state.operations(),
            })
        })
        .await
    }
}
