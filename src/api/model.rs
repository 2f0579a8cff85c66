//! api::model
//!
//! JSON bodies produced by the API.
//!
//! Field names are PascalCase on the wire and serialize in declaration order.

use serde::{Deserialize, Serialize};

use super::location::{
    clone_location, config_entry_location, config_list_location, FileLinks, StatusLocations,
};
use crate::gitconfig::FlatEntry;
use crate::status::{Category, Classification, RepositoryState, StatusEntry};

/// One configuration entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConfigEntryJson {
    pub key: String,
    pub clone_location: String,
    pub location: String,
    /// Always one element; `[null]` when the key is absent.
    pub value: Vec<Option<String>>,
}

impl ConfigEntryJson {
    /// Entry for `key` in the repository at `file_dir`.
    pub fn new(key: &str, value: Option<&str>, file_dir: &str) -> Self {
        Self {
            key: key.to_string(),
            clone_location: clone_location(file_dir),
            location: config_entry_location(key, file_dir),
            value: vec![value.map(str::to_string)],
        }
    }
}

/// Every configuration entry of one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConfigListJson {
    pub children: Vec<ConfigEntryJson>,
    pub clone_location: String,
    pub location: String,
    #[serde(rename = "Type")]
    pub kind: String,
}

impl ConfigListJson {
    /// Listing of `entries` for the repository at `file_dir`.
    pub fn new(entries: Vec<FlatEntry>, file_dir: &str) -> Self {
        let children = entries
            .into_iter()
            .map(|e| ConfigEntryJson::new(&e.key, Some(e.value.as_str()), file_dir))
            .collect();
        Self {
            children,
            clone_location: clone_location(file_dir),
            location: config_list_location(file_dir),
            kind: "Config".to_string(),
        }
    }
}

/// Links attached to a changed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileGitJson {
    pub commit_location: String,
    pub diff_location: String,
    pub index_location: String,
}

/// One changed file inside a status category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileJson {
    pub git: FileGitJson,
    pub location: String,
    pub name: String,
    pub path: String,
}

impl FileJson {
    fn new(entry: &StatusEntry, category: Category, file_dir: &str) -> Self {
        let links = FileLinks::new(file_dir, &entry.path, category.diff_kind());
        Self {
            git: FileGitJson {
                commit_location: links.commit,
                diff_location: links.diff,
                index_location: links.index,
            },
            location: links.location,
            name: entry.path.clone(),
            path: entry.path.clone(),
        }
    }
}

/// Working tree status of one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatusJson {
    pub added: Vec<FileJson>,
    pub changed: Vec<FileJson>,
    pub clone_location: String,
    pub commit_location: String,
    pub conflicting: Vec<FileJson>,
    pub index_location: String,
    pub location: String,
    pub missing: Vec<FileJson>,
    pub modified: Vec<FileJson>,
    pub removed: Vec<FileJson>,
    pub repository_state: RepositoryState,
    #[serde(rename = "Type")]
    pub kind: String,
    pub untracked: Vec<FileJson>,
}

impl StatusJson {
    /// Report for `classification`.
    ///
    /// File locations hang off `file_dir` (the repository root); the report
    /// locations hang off `request_path` as the client addressed it.
    pub fn new(classification: &Classification, file_dir: &str, request_path: &str) -> Self {
        let files = |category: Category| -> Vec<FileJson> {
            classification
                .get(category)
                .iter()
                .map(|entry| FileJson::new(entry, category, file_dir))
                .collect()
        };
        let locations = StatusLocations::for_path(request_path);

        Self {
            added: files(Category::Added),
            changed: files(Category::Changed),
            clone_location: locations.clone,
            commit_location: locations.commit,
            conflicting: files(Category::Conflicting),
            index_location: locations.index,
            location: locations.status,
            missing: files(Category::Missing),
            modified: files(Category::Modified),
            removed: files(Category::Removed),
            repository_state: classification.state,
            kind: "Status".to_string(),
            untracked: files(Category::Untracked),
        }
    }
}
