//! gitconfig::codec
//!
//! Translation between a [`ConfigNode`] tree and flat dotted keys.
//!
//! # Reads
//!
//! Both [`flatten`] and [`lookup`] walk the tree depth-first, normalizing
//! each child name with [`normalize_segment`] and accumulating the dotted
//! prefix. Leaves are emitted in traversal order, which is the order their
//! sections were first seen in the document.
//!
//! Two different tree paths can normalize to the same key, for example
//! `[branch "main"]` and the legacy `[branch.main]`. Lookups resolve this
//! deterministically: the leaf visited last wins.
//!
//! # Writes
//!
//! The codec never mutates the tree. A write is validated into a
//! [`ConfigWrite`] and handed to the provider, which re-reads the document
//! on the next request. Deleting a key is a write of the empty string.

use serde_json::Value;
use thiserror::Error;

use super::node::{join_path, normalize_segment, ConfigNode};

/// A flattened configuration leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    /// Dotted key path, e.g. `branch.main.remote`.
    pub key: String,
    /// The leaf value.
    pub value: String,
}

/// Errors from validating a configuration write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    /// No key was supplied.
    #[error("Config entry key must be provided")]
    MissingKey,

    /// No value was supplied.
    #[error("Config entry value must be provided")]
    MissingValue,

    /// The value was not a JSON array.
    #[error("Config entry value must be array")]
    NotAnArray,

    /// A value in the array was not a string.
    #[error("Config entry value must be a string")]
    NotAString,

    /// More than one value was supplied for a single key.
    #[error("Multivar config entries are not implemented")]
    Multivar {
        /// Number of values supplied
        count: usize,
    },
}

impl WriteError {
    /// Whether this error means "unsupported" rather than "malformed".
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, WriteError::Multivar { .. })
    }
}

/// A validated single-value configuration write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWrite {
    key: String,
    value: String,
}

impl ConfigWrite {
    /// Build a write of `value` to `key`.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Result<Self, WriteError> {
        let key = key.into();
        if key.is_empty() {
            return Err(WriteError::MissingKey);
        }
        Ok(Self {
            key,
            value: value.into(),
        })
    }

    /// Build the write that removes `key`.
    ///
    /// Removal is expressed as setting the key to the empty string, which
    /// is what existing clients expect. It cannot be told apart from an
    /// explicit empty value.
    pub fn delete(key: impl Into<String>) -> Result<Self, WriteError> {
        Self::new(key, "")
    }

    /// Validate a replacement body value, which must be an array holding
    /// exactly one string.
    ///
    /// # Example
    ///
    /// ```
    /// use gitapi::gitconfig::{ConfigWrite, WriteError};
    /// use serde_json::json;
    ///
    /// let write = ConfigWrite::from_array("user.name", Some(&json!(["Ada"]))).unwrap();
    /// assert_eq!(write.value(), "Ada");
    ///
    /// let err = ConfigWrite::from_array("user.name", Some(&json!(["a", "b"]))).unwrap_err();
    /// assert_eq!(err, WriteError::Multivar { count: 2 });
    /// ```
    pub fn from_array(key: impl Into<String>, value: Option<&Value>) -> Result<Self, WriteError> {
        let values = match value {
            None | Some(Value::Null) => return Err(WriteError::MissingValue),
            Some(Value::Array(values)) => values,
            Some(_) => return Err(WriteError::NotAnArray),
        };
        Self::new(key, single_value(values)?)
    }

    /// Validate a creation body value, which may be a bare string or an
    /// array holding exactly one string.
    pub fn from_loose(key: Option<&str>, value: Option<&Value>) -> Result<Self, WriteError> {
        let key = key.filter(|k| !k.is_empty()).ok_or(WriteError::MissingKey)?;
        let value = match value {
            None | Some(Value::Null) => return Err(WriteError::MissingValue),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Array(values)) => single_value(values)?,
            Some(_) => return Err(WriteError::NotAString),
        };
        Self::new(key, value)
    }

    /// The dotted key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The value to store.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether this write removes the key.
    pub fn is_delete(&self) -> bool {
        self.value.is_empty()
    }
}

fn single_value(values: &[Value]) -> Result<String, WriteError> {
    match values {
        [] => Err(WriteError::MissingValue),
        [Value::String(s)] => Ok(s.clone()),
        [_] => Err(WriteError::NotAString),
        _ => Err(WriteError::Multivar {
            count: values.len(),
        }),
    }
}

/// Flatten the tree into dotted entries, in traversal order.
///
/// # Example
///
/// ```
/// use gitapi::gitconfig::{flatten, parse};
///
/// let tree = parse("[user]\n\tname = Ada\n[branch \"main\"]\n\tremote = origin\n").unwrap();
/// let keys: Vec<_> = flatten(&tree).into_iter().map(|e| e.key).collect();
/// assert_eq!(keys, vec!["user.name", "branch.main.remote"]);
/// ```
pub fn flatten(root: &ConfigNode) -> Vec<FlatEntry> {
    fold_leaves(root, String::new(), Vec::new(), &mut |mut acc, key, value| {
        acc.push(FlatEntry {
            key,
            value: value.to_string(),
        });
        acc
    })
}

/// Flatten, keeping only keys that contain `filter` as a substring.
///
/// `None` and the empty filter keep everything.
pub fn flatten_filtered(root: &ConfigNode, filter: Option<&str>) -> Vec<FlatEntry> {
    match filter.filter(|f| !f.is_empty()) {
        None => flatten(root),
        Some(needle) => flatten(root)
            .into_iter()
            .filter(|e| e.key.contains(needle))
            .collect(),
    }
}

/// Find the value stored under a dotted key.
///
/// Returns `None` when no leaf matches. When several leaves normalize to
/// the same key, the one visited last is returned.
///
/// ```
/// use gitapi::gitconfig::{lookup, parse};
///
/// let tree = parse("[branch \"main\"]\nremote = origin\n[branch.main]\nremote = upstream\n").unwrap();
/// assert_eq!(lookup(&tree, "branch.main.remote"), Some("upstream"));
/// assert_eq!(lookup(&tree, "branch.main.merge"), None);
/// ```
pub fn lookup<'a>(root: &'a ConfigNode, key: &str) -> Option<&'a str> {
    fold_leaves(root, String::new(), None, &mut |found, path, value| {
        if path == key {
            Some(value)
        } else {
            found
        }
    })
}

/// Depth-first fold over every leaf, threading the accumulator through.
fn fold_leaves<'a, A, F>(node: &'a ConfigNode, prefix: String, acc: A, f: &mut F) -> A
where
    F: FnMut(A, String, &'a str) -> A,
{
    match node {
        ConfigNode::Leaf(value) => f(acc, prefix, value),
        ConfigNode::Section(children) => children.iter().fold(acc, |acc, (name, child)| {
            let path = join_path(&prefix, &normalize_segment(name));
            fold_leaves(child, path, acc, f)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gitconfig::parse;
    use serde_json::json;

    const EXAMPLE: &str = "[user]\n\tname = Ada\n[branch \"main\"]\n\tremote = origin";

    mod reads {
        use super::*;

        #[test]
        fn end_to_end_example() {
            let tree = parse(EXAMPLE).unwrap();
            assert_eq!(
                flatten(&tree),
                vec![
                    FlatEntry {
                        key: "user.name".into(),
                        value: "Ada".into()
                    },
                    FlatEntry {
                        key: "branch.main.remote".into(),
                        value: "origin".into()
                    },
                ]
            );
        }

        #[test]
        fn flatten_keeps_document_order() {
            let tree = parse("[z]\na = 1\n[a]\nz = 2\n[m]\nm = 3\n").unwrap();
            let keys: Vec<_> = flatten(&tree).into_iter().map(|e| e.key).collect();
            assert_eq!(keys, vec!["z.a", "a.z", "m.m"]);
        }

        #[test]
        fn filter_is_substring_match() {
            let tree = parse("[user]\nname = Ada\nemail = a@b\n[core]\nbare = false\n").unwrap();
            let keys: Vec<_> = flatten_filtered(&tree, Some("user"))
                .into_iter()
                .map(|e| e.key)
                .collect();
            assert_eq!(keys, vec!["user.name", "user.email"]);

            let keys: Vec<_> = flatten_filtered(&tree, Some("a"))
                .into_iter()
                .map(|e| e.key)
                .collect();
            assert_eq!(keys, vec!["user.name", "user.email", "core.bare"]);
        }

        #[test]
        fn empty_filter_keeps_everything() {
            let tree = parse(EXAMPLE).unwrap();
            assert_eq!(flatten_filtered(&tree, Some("")).len(), 2);
            assert_eq!(flatten_filtered(&tree, None).len(), 2);
        }

        #[test]
        fn lookup_hits_and_misses() {
            let tree = parse(EXAMPLE).unwrap();
            assert_eq!(lookup(&tree, "user.name"), Some("Ada"));
            assert_eq!(lookup(&tree, "branch.main.remote"), Some("origin"));
            assert_eq!(lookup(&tree, "user"), None);
            assert_eq!(lookup(&tree, "user.email"), None);
        }

        #[test]
        fn duplicate_paths_last_visited_wins() {
            let mut root = ConfigNode::section();
            root.section_mut("branch \"main\"").set_leaf("remote", "first");
            root.section_mut("branch").section_mut("main").set_leaf("remote", "second");

            assert_eq!(lookup(&root, "branch.main.remote"), Some("second"));
            let keys: Vec<_> = flatten(&root).into_iter().map(|e| e.key).collect();
            assert_eq!(keys, vec!["branch.main.remote", "branch.main.remote"]);
        }

        #[test]
        fn empty_tree_flattens_to_nothing() {
            assert!(flatten(&ConfigNode::section()).is_empty());
            assert_eq!(lookup(&ConfigNode::section(), "a.b"), None);
        }
    }

    mod writes {
        use super::*;

        #[test]
        fn single_element_array_accepted() {
            let write = ConfigWrite::from_array("user.name", Some(&json!(["Ada"]))).unwrap();
            assert_eq!(write.key(), "user.name");
            assert_eq!(write.value(), "Ada");
            assert!(!write.is_delete());
        }

        #[test]
        fn missing_value_rejected() {
            assert_eq!(
                ConfigWrite::from_array("user.name", None),
                Err(WriteError::MissingValue)
            );
            assert_eq!(
                ConfigWrite::from_array("user.name", Some(&Value::Null)),
                Err(WriteError::MissingValue)
            );
            assert_eq!(
                ConfigWrite::from_array("user.name", Some(&json!([]))),
                Err(WriteError::MissingValue)
            );
        }

        #[test]
        fn non_array_rejected() {
            assert_eq!(
                ConfigWrite::from_array("user.name", Some(&json!("Ada"))),
                Err(WriteError::NotAnArray)
            );
        }

        #[test]
        fn multivar_is_not_implemented() {
            let err = ConfigWrite::from_array("remote.origin.fetch", Some(&json!(["a", "b"])))
                .unwrap_err();
            assert_eq!(err, WriteError::Multivar { count: 2 });
            assert!(err.is_not_implemented());
            assert!(!WriteError::MissingValue.is_not_implemented());
        }

        #[test]
        fn loose_accepts_string_or_array() {
            let a = ConfigWrite::from_loose(Some("user.name"), Some(&json!("Ada"))).unwrap();
            let b = ConfigWrite::from_loose(Some("user.name"), Some(&json!(["Ada"]))).unwrap();
            assert_eq!(a, b);
        }

        #[test]
        fn loose_requires_key() {
            assert_eq!(
                ConfigWrite::from_loose(None, Some(&json!("Ada"))),
                Err(WriteError::MissingKey)
            );
            assert_eq!(
                ConfigWrite::from_loose(Some(""), Some(&json!("Ada"))),
                Err(WriteError::MissingKey)
            );
        }

        #[test]
        fn loose_rejects_multivar() {
            assert_eq!(
                ConfigWrite::from_loose(Some("a.b"), Some(&json!(["1", "2", "3"]))),
                Err(WriteError::Multivar { count: 3 })
            );
        }

        #[test]
        fn delete_is_empty_write() {
            let delete = ConfigWrite::delete("user.name").unwrap();
            let write = ConfigWrite::new("user.name", "").unwrap();
            assert_eq!(delete, write);
            assert!(delete.is_delete());
        }
    }
}
