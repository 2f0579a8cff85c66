//! provider::mock
//!
//! In-memory provider for deterministic testing.
//!
//! # Design
//!
//! Repositories are registered under a URL prefix together with their
//! config text and status snapshot. Every call is recorded so tests can
//! assert which capabilities were (or were not) invoked, and any
//! capability can be configured to fail.
//!
//! # Example
//!
//! ```
//! use gitapi::provider::mock::{MockOperation, MockProvider, MockRepo};
//! use gitapi::provider::{ConfigSource, RepoResolver};
//!
//! # tokio_test::block_on(async {
//! let provider = MockProvider::new()
//!     .with_repo("/file/project/", MockRepo::new().config("[user]\n\tname = Ada\n"));
//!
//! let repo = provider.resolve("/file/project/").await.unwrap().unwrap();
//! assert_eq!(repo.file_dir, "/file/project/");
//!
//! let text = provider.read_config(&repo).await.unwrap();
//! assert!(text.contains("Ada"));
//! assert_eq!(provider.operations().len(), 2);
//! # });
//! ```

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::traits::{
    ConfigSource, ProviderError, RepoHandle, RepoResolver, StatusSnapshot, StatusSource,
};
use crate::status::{OperationFlags, StatusEntry};

/// A registered in-memory repository.
#[derive(Debug, Clone, Default)]
pub struct MockRepo {
    config_text: String,
    snapshot: StatusSnapshot,
}

impl MockRepo {
    /// An empty repository: no config, clean status.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the config document text.
    pub fn config(mut self, text: impl Into<String>) -> Self {
        self.config_text = text.into();
        self
    }

    /// Add a changed file.
    pub fn entry(mut self, path: impl Into<String>, bit: u32) -> Self {
        self.snapshot.entries.push(StatusEntry::new(path, bit));
        self
    }

    /// Set the operation signals.
    pub fn operations(mut self, operations: OperationFlags) -> Self {
        self.snapshot.operations = operations;
        self
    }
}

/// Configuration for which capability should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail resolve with the given error.
    Resolve(ProviderError),
    /// Fail read_config with the given error.
    ReadConfig(ProviderError),
    /// Fail set_string with the given error.
    SetString(ProviderError),
    /// Fail status with the given error.
    Status(ProviderError),
}

/// Recorded call for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    Resolve { path: String },
    ReadConfig { file_dir: String },
    SetString { file_dir: String, key: String, value: String },
    Status { file_dir: String },
}

/// Mock provider for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    inner: Arc<Mutex<MockProviderInner>>,
}

#[derive(Debug, Default)]
struct MockProviderInner {
    /// Registered repositories by URL prefix, in registration order.
    repos: Vec<(String, MockRepo)>,
    fail_on: Option<FailOn>,
    operations: Vec<MockOperation>,
}

impl MockProvider {
    /// Create a provider with no repositories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a repository addressed by `file_dir` (e.g. `/file/project/`).
    ///
    /// Any request path starting with `file_dir`, or equal to it without
    /// the trailing slash, resolves to this repository.
    pub fn with_repo(self, file_dir: impl Into<String>, repo: MockRepo) -> Self {
        let mut file_dir = file_dir.into();
        if !file_dir.ends_with('/') {
            file_dir.push('/');
        }
        self.inner.lock().unwrap().repos.push((file_dir, repo));
        self
    }

    /// Configure the mock to fail on a specific capability.
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        self.inner.lock().unwrap().fail_on = Some(fail_on);
        self
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.inner.lock().unwrap().operations.clone()
    }

    /// Recorded config writes as `(key, value)` pairs.
    pub fn writes(&self) -> Vec<(String, String)> {
        self.operations()
            .into_iter()
            .filter_map(|op| match op {
                MockOperation::SetString { key, value, .. } => Some((key, value)),
                _ => None,
            })
            .collect()
    }

    /// Clear recorded operations.
    pub fn clear_operations(&self) {
        self.inner.lock().unwrap().operations.clear();
    }

    fn record(&self, op: MockOperation) {
        self.inner.lock().unwrap().operations.push(op);
    }

    fn check_fail(&self, pick: fn(&FailOn) -> Option<&ProviderError>) -> Result<(), ProviderError> {
        let inner = self.inner.lock().unwrap();
        match inner.fail_on.as_ref().and_then(pick) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn repo(&self, handle: &RepoHandle) -> Result<MockRepo, ProviderError> {
        let inner = self.inner.lock().unwrap();
        inner
            .repos
            .iter()
            .find(|(dir, _)| *dir == handle.file_dir)
            .map(|(_, repo)| repo.clone())
            .ok_or_else(|| ProviderError::Repository(format!("unknown repository {}", handle.file_dir)))
    }
}

fn handle_for(file_dir: &str) -> RepoHandle {
    let work_dir = PathBuf::from("/mock").join(file_dir.trim_matches('/'));
    RepoHandle {
        git_dir: work_dir.join(".git"),
        work_dir,
        file_dir: file_dir.to_string(),
    }
}

#[async_trait]
impl RepoResolver for MockProvider {
    async fn resolve(&self, path: &str) -> Result<Option<RepoHandle>, ProviderError> {
        self.record(MockOperation::Resolve {
            path: path.to_string(),
        });
        self.check_fail(|f| match f {
            FailOn::Resolve(e) => Some(e),
            _ => None,
        })?;

        let inner = self.inner.lock().unwrap();
        let found = inner
            .repos
            .iter()
            .find(|(dir, _)| path.starts_with(dir.as_str()) || path == dir.trim_end_matches('/'))
            .map(|(dir, _)| handle_for(dir));
        Ok(found)
    }
}

#[async_trait]
impl ConfigSource for MockProvider {
    async fn read_config(&self, repo: &RepoHandle) -> Result<String, ProviderError> {
        self.record(MockOperation::ReadConfig {
            file_dir: repo.file_dir.clone(),
        });
        self.check_fail(|f| match f {
            FailOn::ReadConfig(e) => Some(e),
            _ => None,
        })?;

        Ok(self.repo(repo)?.config_text)
    }

    async fn set_string(
        &self,
        repo: &RepoHandle,
        key: &str,
        value: &str,
    ) -> Result<(), ProviderError> {
        self.record(MockOperation::SetString {
            file_dir: repo.file_dir.clone(),
            key: key.to_string(),
            value: value.to_string(),
        });
        self.check_fail(|f| match f {
            FailOn::SetString(e) => Some(e),
            _ => None,
        })?;

        self.repo(repo).map(|_| ())
    }
}

#[async_trait]
impl StatusSource for MockProvider {
    async fn status(&self, repo: &RepoHandle) -> Result<StatusSnapshot, ProviderError> {
        self.record(MockOperation::Status {
            file_dir: repo.file_dir.clone(),
        });
        self.check_fail(|f| match f {
            FailOn::Status(e) => Some(e),
            _ => None,
        })?;

        Ok(self.repo(repo)?.snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::bits;

    #[tokio::test]
    async fn resolves_by_prefix() {
        let provider = MockProvider::new().with_repo("/file/a", MockRepo::new());

        assert!(provider.resolve("/file/a/").await.unwrap().is_some());
        assert!(provider.resolve("/file/a").await.unwrap().is_some());
        assert!(provider.resolve("/file/a/src/").await.unwrap().is_some());
        assert!(provider.resolve("/file/ab/").await.unwrap().is_none());
        assert!(provider.resolve("/file/b/").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn status_returns_registered_snapshot() {
        let provider = MockProvider::new().with_repo(
            "/file/a/",
            MockRepo::new()
                .entry("x", bits::WT_NEW)
                .operations(OperationFlags {
                    merging: true,
                    ..Default::default()
                }),
        );
        let repo = provider.resolve("/file/a/").await.unwrap().unwrap();
        let snapshot = provider.status(&repo).await.unwrap();

        assert_eq!(snapshot.entries, vec![StatusEntry::new("x", bits::WT_NEW)]);
        assert!(snapshot.operations.merging);
    }

    #[tokio::test]
    async fn fail_on_returns_error_and_records() {
        let provider = MockProvider::new()
            .with_repo("/file/a/", MockRepo::new())
            .fail_on(FailOn::SetString(ProviderError::ConfigWrite(
                "locked".to_string(),
            )));
        let repo = provider.resolve("/file/a/").await.unwrap().unwrap();

        let err = provider.set_string(&repo, "user.name", "x").await.unwrap_err();
        assert_eq!(err, ProviderError::ConfigWrite("locked".to_string()));
        assert_eq!(
            provider.writes(),
            vec![("user.name".to_string(), "x".to_string())]
        );
    }

    #[tokio::test]
    async fn clear_operations_resets_log() {
        let provider = MockProvider::new();
        provider.resolve("/file/x/").await.unwrap();
        assert_eq!(provider.operations().len(), 1);
        provider.clear_operations();
        assert!(provider.operations().is_empty());
    }
}
