//! api::location
//!
//! Route prefixes and the locations built from them.
//!
//! Locations are plain string concatenation of a route prefix and a
//! client-visible path such as `/file/project/`. Clients follow these links
//! verbatim, so the shapes here must not change.

use crate::core::paths::join_url;
use crate::status::DiffKind;

pub const CLONE: &str = "/gitapi/clone";
pub const CONFIG: &str = "/gitapi/config";
pub const COMMIT_HEAD: &str = "/gitapi/commit/HEAD";
pub const DIFF: &str = "/gitapi/diff";
pub const INDEX: &str = "/gitapi/index";
pub const STATUS: &str = "/gitapi/status";

/// `/gitapi/clone` + path.
pub fn clone_location(path: &str) -> String {
    format!("{}{}", CLONE, path)
}

/// Location of one config entry: `/gitapi/config/<key>/clone` + file dir.
///
/// ```
/// use gitapi::api::location::config_entry_location;
///
/// assert_eq!(
///     config_entry_location("user.name", "/file/project/"),
///     "/gitapi/config/user.name/clone/file/project/"
/// );
/// ```
pub fn config_entry_location(key: &str, file_dir: &str) -> String {
    format!("{}/{}/clone{}", CONFIG, key, file_dir)
}

/// Location of the config listing: `/gitapi/config/clone` + file dir.
pub fn config_list_location(file_dir: &str) -> String {
    format!("{}/clone{}", CONFIG, file_dir)
}

/// Locations attached to a status report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLocations {
    pub clone: String,
    pub commit: String,
    pub index: String,
    pub status: String,
}

impl StatusLocations {
    /// Locations for the repository addressed by `path`.
    pub fn for_path(path: &str) -> Self {
        Self {
            clone: clone_location(path),
            commit: format!("{}{}", COMMIT_HEAD, path),
            index: format!("{}{}", INDEX, path),
            status: format!("{}{}", STATUS, path),
        }
    }
}

/// Links for one file inside a status category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLinks {
    /// Client-visible file location (`file_dir` joined with the path)
    pub location: String,
    pub commit: String,
    pub diff: String,
    pub index: String,
}

impl FileLinks {
    /// Links for `path` inside the repository at `file_dir`.
    ///
    /// ```
    /// use gitapi::api::location::FileLinks;
    /// use gitapi::status::DiffKind;
    ///
    /// let links = FileLinks::new("/file/project/", "src/lib.rs", DiffKind::Cached);
    /// assert_eq!(links.location, "/file/project/src/lib.rs");
    /// assert_eq!(links.diff, "/gitapi/diff/Cached/file/project/src/lib.rs");
    /// ```
    pub fn new(file_dir: &str, path: &str, kind: DiffKind) -> Self {
        let location = join_url(file_dir, path);
        Self {
            commit: format!("{}{}", COMMIT_HEAD, location),
            diff: format!("{}/{}{}", DIFF, kind, location),
            index: format!("{}{}", INDEX, location),
            location,
        }
    }
}
