//! status
//!
//! Working tree status classification.
//!
//! # Overview
//!
//! The status provider reports one [`StatusEntry`] per changed file with a
//! raw bitmask. Each bitmask is decoded once into [`StatusFlags`] and tested
//! against seven independent categories:
//!
//! | Flag | Category | Diff kind |
//! |---|---|---|
//! | conflicted | Conflicting | Default |
//! | working tree modified | Modified | Default |
//! | working tree deleted | Missing | Default |
//! | working tree new | Untracked | Default |
//! | index new | Added | Default |
//! | index modified | Changed | Cached |
//! | index deleted | Removed | Cached |
//!
//! The four operation-in-progress signals reduce to one [`RepositoryState`]
//! with priority rebasing > reverting > merging > cherry-picking > safe.

mod classify;
mod flags;

pub use classify::{
    classify, Category, Classification, DiffKind, OperationFlags, RepositoryState,
};
pub use flags::{bits, StatusEntry, StatusFlags};
