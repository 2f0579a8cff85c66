//! core::paths
//!
//! Mapping between client-visible URL paths and workspace directories.
//!
//! # Layout
//!
//! Clients address workspace content under a URL prefix (the file root,
//! `/file` by default). A repository checked out at
//! `<workspace_dir>/project` is addressed as `/file/project/`, and every
//! location the API hands back is built from that directory form.
//!
//! **Hard rule:** request paths never escape the workspace. A path with a
//! `..` segment, or one outside the file root, maps to nothing.
//!
//! # Example
//!
//! ```
//! use gitapi::core::paths::WorkspacePaths;
//! use std::path::{Path, PathBuf};
//!
//! let paths = WorkspacePaths::new("/file", "/srv/ws");
//!
//! assert_eq!(
//!     paths.to_fs("/file/project/src"),
//!     Some(PathBuf::from("/srv/ws/project/src"))
//! );
//! assert_eq!(
//!     paths.to_url(Path::new("/srv/ws/project")),
//!     Some("/file/project/".to_string())
//! );
//! ```

use std::path::{Component, Path, PathBuf};

/// Join two URL path fragments with exactly one `/` between them.
///
/// ```
/// use gitapi::core::paths::join_url;
///
/// assert_eq!(join_url("/file/project/", "/src/lib.rs"), "/file/project/src/lib.rs");
/// assert_eq!(join_url("/file", "project"), "/file/project");
/// assert_eq!(join_url("/file/", ""), "/file/");
/// ```
pub fn join_url(base: &str, rest: &str) -> String {
    let base = base.trim_end_matches('/');
    let rest = rest.trim_start_matches('/');
    format!("{}/{}", base, rest)
}

/// Resolve symlinks in `path`, falling back to `path` itself when it cannot
/// be resolved (e.g. it does not exist).
pub fn canonical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Translates between URL paths under the file root and filesystem paths
/// under the workspace directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePaths {
    /// URL prefix, without a trailing slash (`/` for the bare root).
    file_root: String,
    /// Filesystem directory the prefix maps onto.
    workspace_dir: PathBuf,
}

impl WorkspacePaths {
    /// Create a mapping from `file_root` onto `workspace_dir`.
    pub fn new(file_root: impl Into<String>, workspace_dir: impl Into<PathBuf>) -> Self {
        let file_root = file_root.into();
        let file_root = match file_root.trim_end_matches('/') {
            "" => "/".to_string(),
            trimmed => trimmed.to_string(),
        };
        Self {
            file_root,
            workspace_dir: workspace_dir.into(),
        }
    }

    /// The URL prefix.
    pub fn file_root(&self) -> &str {
        &self.file_root
    }

    /// The workspace directory.
    pub fn workspace_dir(&self) -> &Path {
        &self.workspace_dir
    }

    /// Map a URL path to a filesystem path inside the workspace.
    ///
    /// Returns `None` when the path lies outside the file root or tries to
    /// climb out of the workspace.
    pub fn to_fs(&self, url_path: &str) -> Option<PathBuf> {
        let rest = self.strip_file_root(url_path)?;

        let mut path = self.workspace_dir.clone();
        for segment in rest.split('/').filter(|s| !s.is_empty() && *s != ".") {
            if segment == ".." || segment.contains('\\') {
                return None;
            }
            path.push(segment);
        }
        Some(path)
    }

    /// Map a directory inside the workspace to its URL form, with a
    /// trailing slash.
    ///
    /// Returns `None` when `dir` is not inside the workspace.
    pub fn to_url(&self, dir: &Path) -> Option<String> {
        let relative = dir.strip_prefix(&self.workspace_dir).ok()?;

        let mut segments = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(name) => segments.push(name.to_string_lossy().into_owned()),
                Component::CurDir => {}
                _ => return None,
            }
        }

        if segments.is_empty() {
            return Some(join_url(&self.file_root, ""));
        }
        Some(join_url(&self.file_root, &format!("{}/", segments.join("/"))))
    }

    /// The part of `url_path` after the file root, or `None` if the path is
    /// not under it.
    fn strip_file_root<'a>(&self, url_path: &'a str) -> Option<&'a str> {
        if self.file_root == "/" {
            return url_path.strip_prefix('/');
        }
        let rest = url_path.strip_prefix(self.file_root.as_str())?;
        if rest.is_empty() || rest.starts_with('/') {
            Some(rest)
        } else {
            None
        }
    }
}
