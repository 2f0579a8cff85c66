//! status::classify
//!
//! Decomposes status entries into the seven reported categories and reduces
//! the repository's operation flags to a single state.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::flags::{StatusEntry, StatusFlags};

/// Which diff view a file descriptor links to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffKind {
    /// Working tree against the index.
    Default,
    /// Index against HEAD.
    Cached,
}

impl DiffKind {
    /// Path segment used in diff locations.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffKind::Default => "Default",
            DiffKind::Cached => "Cached",
        }
    }
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The seven output categories, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Added,
    Changed,
    Conflicting,
    Missing,
    Modified,
    Removed,
    Untracked,
}

impl Category {
    /// All categories in report order.
    pub const ALL: [Category; 7] = [
        Category::Added,
        Category::Changed,
        Category::Conflicting,
        Category::Missing,
        Category::Modified,
        Category::Removed,
        Category::Untracked,
    ];

    /// Staged modifications and removals link to the cached diff.
    pub fn diff_kind(&self) -> DiffKind {
        match self {
            Category::Changed | Category::Removed => DiffKind::Cached,
            _ => DiffKind::Default,
        }
    }

    /// Whether `flags` places a file in this category.
    pub fn matches(&self, flags: &StatusFlags) -> bool {
        match self {
            Category::Added => flags.index_new,
            Category::Changed => flags.index_modified,
            Category::Conflicting => flags.conflicted,
            Category::Missing => flags.wt_deleted,
            Category::Modified => flags.wt_modified,
            Category::Removed => flags.index_deleted,
            Category::Untracked => flags.wt_new,
        }
    }
}

/// In-progress operation signals from the repository.
///
/// Normally at most one is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationFlags {
    pub rebasing: bool,
    pub reverting: bool,
    pub merging: bool,
    pub cherry_picking: bool,
}

/// The repository's operation state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepositoryState {
    #[default]
    Safe,
    Rebasing,
    Reverting,
    Merging,
    CherryPicking,
}

impl RepositoryState {
    /// Reduce operation flags to one state.
    ///
    /// If several flags are set, the first in the order rebasing, reverting,
    /// merging, cherry-picking wins.
    ///
    /// ```
    /// use gitapi::status::{OperationFlags, RepositoryState};
    ///
    /// let ops = OperationFlags { rebasing: true, merging: true, ..Default::default() };
    /// assert_eq!(RepositoryState::from_operations(&ops), RepositoryState::Rebasing);
    /// ```
    pub fn from_operations(ops: &OperationFlags) -> Self {
        if ops.rebasing {
            RepositoryState::Rebasing
        } else if ops.reverting {
            RepositoryState::Reverting
        } else if ops.merging {
            RepositoryState::Merging
        } else if ops.cherry_picking {
            RepositoryState::CherryPicking
        } else {
            RepositoryState::Safe
        }
    }

    /// Wire name of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            RepositoryState::Safe => "SAFE",
            RepositoryState::Rebasing => "REBASING",
            RepositoryState::Reverting => "REVERTING",
            RepositoryState::Merging => "MERGING",
            RepositoryState::CherryPicking => "CHERRY_PICKING",
        }
    }
}

impl fmt::Display for RepositoryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status entries sorted into categories, plus the repository state.
///
/// Every category is always present; entries keep the provider's order
/// within each category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub added: Vec<StatusEntry>,
    pub changed: Vec<StatusEntry>,
    pub conflicting: Vec<StatusEntry>,
    pub missing: Vec<StatusEntry>,
    pub modified: Vec<StatusEntry>,
    pub removed: Vec<StatusEntry>,
    pub untracked: Vec<StatusEntry>,
    pub state: RepositoryState,
}

impl Classification {
    /// Entries in `category`.
    pub fn get(&self, category: Category) -> &[StatusEntry] {
        match category {
            Category::Added => &self.added,
            Category::Changed => &self.changed,
            Category::Conflicting => &self.conflicting,
            Category::Missing => &self.missing,
            Category::Modified => &self.modified,
            Category::Removed => &self.removed,
            Category::Untracked => &self.untracked,
        }
    }

    fn get_mut(&mut self, category: Category) -> &mut Vec<StatusEntry> {
        match category {
            Category::Added => &mut self.added,
            Category::Changed => &mut self.changed,
            Category::Conflicting => &mut self.conflicting,
            Category::Missing => &mut self.missing,
            Category::Modified => &mut self.modified,
            Category::Removed => &mut self.removed,
            Category::Untracked => &mut self.untracked,
        }
    }

    /// Whether no file landed in any category.
    pub fn is_clean(&self) -> bool {
        Category::ALL.iter().all(|c| self.get(*c).is_empty())
    }
}

/// Classify status entries and reduce the operation flags.
///
/// Each entry is decoded once and tested against every category; an entry
/// may land in several.
///
/// # Example
///
/// ```
/// use gitapi::status::{bits, classify, OperationFlags, StatusEntry};
///
/// let entries = vec![StatusEntry::new("a.txt", bits::INDEX_MODIFIED | bits::WT_MODIFIED)];
/// let result = classify(&entries, &OperationFlags::default());
///
/// assert_eq!(result.changed.len(), 1);
/// assert_eq!(result.modified.len(), 1);
/// assert!(result.added.is_empty());
/// ```
pub fn classify(entries: &[StatusEntry], ops: &OperationFlags) -> Classification {
    let mut result = Classification {
        state: RepositoryState::from_operations(ops),
        ..Default::default()
    };

    for entry in entries {
        let flags = entry.flags();
        for category in Category::ALL {
            if category.matches(&flags) {
                result.get_mut(category).push(entry.clone());
            }
        }
    }

    result
}
