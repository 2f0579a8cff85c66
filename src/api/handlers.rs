//! api::handlers
//!
//! Config and status handlers plus the method/path dispatcher.
//!
//! # Flow
//!
//! Every handler resolves the target repository through the provider, runs
//! the matching core component, and serializes the result. Request bodies
//! are validated before the provider is touched, so a rejected write never
//! reaches it.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::error::ApiError;
use super::location::{CONFIG, STATUS};
use super::model::{ConfigEntryJson, ConfigListJson, StatusJson};
use crate::gitconfig::{flatten_filtered, lookup, parse, ConfigWrite};
use crate::provider::{Provider, ProviderError, RepoHandle};
use crate::status::classify;

/// Request methods the API understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "PUT" => Ok(Method::Put),
            "POST" => Ok(Method::Post),
            "DELETE" => Ok(Method::Delete),
            other => Err(ApiError::MethodNotAllowed(format!(
                "Method {} is not supported",
                other
            ))),
        }
    }
}

/// A response: status code plus JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn json<T: Serialize>(status: u16, body: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Internal(e.to_string()))?;
        Ok(Self { status, body })
    }

    /// Whether the status code signals success.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl From<ApiError> for ApiResponse {
    fn from(err: ApiError) -> Self {
        Self {
            status: err.status_code(),
            body: err.to_body(),
        }
    }
}

/// What a config path addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigTarget<'a> {
    /// `/clone/<repo path>`: the whole listing
    List { repo_path: &'a str },
    /// `/<key>/clone/<repo path>`: one entry
    Entry { key: &'a str, repo_path: &'a str },
}

impl<'a> ConfigTarget<'a> {
    /// Parse the part of a config path following `/gitapi/config`.
    ///
    /// ```
    /// use gitapi::api::ConfigTarget;
    ///
    /// assert_eq!(
    ///     ConfigTarget::parse("/user.name/clone/file/p/").unwrap(),
    ///     ConfigTarget::Entry { key: "user.name", repo_path: "/file/p/" }
    /// );
    /// assert_eq!(
    ///     ConfigTarget::parse("/clone/file/p/").unwrap(),
    ///     ConfigTarget::List { repo_path: "/file/p/" }
    /// );
    /// ```
    pub fn parse(rest: &'a str) -> Result<Self, ApiError> {
        let invalid = || ApiError::BadRequest(format!("Invalid config location: {}", rest));

        let rest = rest.strip_prefix('/').ok_or_else(invalid)?;
        if let Some(repo_path) = strip_clone(rest) {
            return Ok(ConfigTarget::List { repo_path });
        }

        let (key, tail) = rest.split_once('/').ok_or_else(invalid)?;
        if key.is_empty() {
            return Err(invalid());
        }
        let repo_path = strip_clone(tail).ok_or_else(invalid)?;
        Ok(ConfigTarget::Entry { key, repo_path })
    }

    fn repo_path(&self) -> &'a str {
        match self {
            ConfigTarget::List { repo_path } | ConfigTarget::Entry { repo_path, .. } => *repo_path,
        }
    }
}

/// `clone/<path>` to `/<path>`; bare `clone` to the empty path.
fn strip_clone(s: &str) -> Option<&str> {
    match s.strip_prefix("clone")? {
        "" => Some(""),
        tail if tail.starts_with('/') => Some(tail),
        _ => None,
    }
}

/// The git API over one provider.
#[derive(Clone)]
pub struct GitApi {
    provider: Arc<dyn Provider>,
}

impl fmt::Debug for GitApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitApi").finish_non_exhaustive()
    }
}

impl GitApi {
    pub fn new(provider: impl Provider + 'static) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Share an existing provider.
    pub fn from_arc(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }

    /// Route a request to its handler.
    ///
    /// `path` is the full request path (e.g.
    /// `/gitapi/config/user.name/clone/file/p/`). Errors are folded into
    /// the response.
    #[instrument(skip(self, body))]
    pub async fn dispatch(
        &self,
        method: Method,
        path: &str,
        filter: Option<&str>,
        body: Option<&Value>,
    ) -> ApiResponse {
        let result = if let Some(rest) = service_rest(path, CONFIG) {
            match method {
                Method::Get => self.get_config(rest, filter).await,
                Method::Put => self.put_config(rest, body).await,
                Method::Post => self.post_config(rest, body).await,
                Method::Delete => self.delete_config(rest).await,
            }
        } else if let Some(rest) = service_rest(path, STATUS) {
            match method {
                Method::Get => self.get_status(rest).await,
                other => Err(ApiError::MethodNotAllowed(format!(
                    "Method {} is not supported for status",
                    other
                ))),
            }
        } else {
            Err(ApiError::NotFound(format!("No route for {}", path)))
        };

        match result {
            Ok(response) => response,
            Err(err) => {
                debug!(status = err.status_code(), error = %err, "request failed");
                err.into()
            }
        }
    }

    /// Read one entry or the filtered listing.
    pub async fn get_config(
        &self,
        rest: &str,
        filter: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        let target = ConfigTarget::parse(rest)?;
        let repo = self.resolve(target.repo_path()).await?;
        let text = self.provider.read_config(&repo).await.map_err(internal)?;
        let tree = parse(&text).map_err(|e| internal(ProviderError::from(e)))?;

        match target {
            ConfigTarget::List { .. } => {
                let entries = flatten_filtered(&tree, filter);
                debug!(count = entries.len(), "listing config");
                ApiResponse::json(200, &ConfigListJson::new(entries, &repo.file_dir))
            }
            ConfigTarget::Entry { key, .. } => {
                let value = lookup(&tree, key);
                ApiResponse::json(200, &ConfigEntryJson::new(key, value, &repo.file_dir))
            }
        }
    }

    /// Replace one entry. Body: `{"Value": ["v"]}`.
    pub async fn put_config(&self, rest: &str, body: Option<&Value>) -> Result<ApiResponse, ApiError> {
        let ConfigTarget::Entry { key, repo_path } = ConfigTarget::parse(rest)? else {
            return Err(ApiError::BadRequest(
                "Config entry key must be provided".to_string(),
            ));
        };
        let write = ConfigWrite::from_array(key, body.and_then(|b| b.get("Value")))?;
        self.write(repo_path, write).await
    }

    /// Create one entry. Body: `{"Key": "k", "Value": "v"}`.
    pub async fn post_config(
        &self,
        rest: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse, ApiError> {
        let ConfigTarget::List { repo_path } = ConfigTarget::parse(rest)? else {
            return Err(ApiError::BadRequest(format!(
                "Config entries are created at {}/clone/<path>",
                CONFIG
            )));
        };
        let key = body.and_then(|b| b.get("Key")).and_then(Value::as_str);
        let write = ConfigWrite::from_loose(key, body.and_then(|b| b.get("Value")))?;
        self.write(repo_path, write).await
    }

    /// Remove one entry by writing the empty string.
    pub async fn delete_config(&self, rest: &str) -> Result<ApiResponse, ApiError> {
        let ConfigTarget::Entry { key, repo_path } = ConfigTarget::parse(rest)? else {
            return Err(ApiError::BadRequest(
                "Config entry key must be provided".to_string(),
            ));
        };
        let write = ConfigWrite::delete(key)?;
        self.write(repo_path, write).await
    }

    /// Classified working tree status.
    ///
    /// Every failure collapses into [`ApiError::Forbidden`].
    #[instrument(skip(self))]
    pub async fn get_status(&self, rest: &str) -> Result<ApiResponse, ApiError> {
        let repo = self.resolve(rest).await?;
        let snapshot = self.provider.status(&repo).await.map_err(|e| {
            warn!(error = %e, "status query failed");
            ApiError::Forbidden
        })?;

        let classification = classify(&snapshot.entries, &snapshot.operations);
        debug!(state = %classification.state, clean = classification.is_clean(), "status classified");
        ApiResponse::json(200, &StatusJson::new(&classification, &repo.file_dir, rest))
    }

    #[instrument(skip(self, write), fields(key = write.key(), delete = write.is_delete()))]
    async fn write(&self, repo_path: &str, write: ConfigWrite) -> Result<ApiResponse, ApiError> {
        let repo = self.resolve(repo_path).await?;
        self.provider
            .set_string(&repo, write.key(), write.value())
            .await
            .map_err(internal)?;

        let entry = ConfigEntryJson::new(write.key(), Some(write.value()), &repo.file_dir);
        ApiResponse::json(201, &entry)
    }

    async fn resolve(&self, path: &str) -> Result<RepoHandle, ApiError> {
        match self.provider.resolve(path).await {
            Ok(Some(repo)) => Ok(repo),
            Ok(None) => {
                debug!(path, "no repository at path");
                Err(ApiError::Forbidden)
            }
            Err(e) => {
                warn!(path, error = %e, "repository resolution failed");
                Err(ApiError::Forbidden)
            }
        }
    }
}

/// The remainder of `path` after `prefix`, if `path` is under it.
fn service_rest<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(prefix)?;
    (rest.is_empty() || rest.starts_with('/')).then_some(rest)
}

fn internal(err: ProviderError) -> ApiError {
    warn!(error = %err, "provider failure");
    ApiError::Internal(err.to_string())
}
