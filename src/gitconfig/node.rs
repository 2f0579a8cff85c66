//! gitconfig::node
//!
//! The parsed configuration tree.
//!
//! A [`ConfigNode`] is either a leaf holding one value or a section holding
//! named children in insertion order. Child names are kept exactly as they
//! appear in the document (`branch "main"`); [`normalize_segment`] turns them
//! into dotted path segments during traversal.

/// Path delimiter for flattened configuration keys.
pub const PATH_DELIMITER: char = '.';

/// A node in the configuration tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigNode {
    /// A single configuration value.
    Leaf(String),
    /// Named children, in the order they were first inserted.
    Section(Vec<(String, ConfigNode)>),
}

impl Default for ConfigNode {
    fn default() -> Self {
        ConfigNode::Section(Vec::new())
    }
}

impl ConfigNode {
    /// Create an empty section.
    pub fn section() -> Self {
        Self::default()
    }

    /// Create a leaf.
    pub fn leaf(value: impl Into<String>) -> Self {
        ConfigNode::Leaf(value.into())
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, ConfigNode::Leaf(_))
    }

    /// The leaf value, if this node is a leaf.
    pub fn value(&self) -> Option<&str> {
        match self {
            ConfigNode::Leaf(v) => Some(v),
            ConfigNode::Section(_) => None,
        }
    }

    /// Children of a section, empty for leaves.
    pub fn children(&self) -> &[(String, ConfigNode)] {
        match self {
            ConfigNode::Leaf(_) => &[],
            ConfigNode::Section(children) => children,
        }
    }

    /// Look up a direct child by its raw name.
    pub fn child(&self, name: &str) -> Option<&ConfigNode> {
        self.children()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, node)| node)
    }

    /// Get the child section `name`, creating it if missing.
    ///
    /// A leaf already stored under `name` is replaced by an empty section.
    /// Calling this on a leaf turns the leaf into a section first.
    pub fn section_mut(&mut self, name: &str) -> &mut ConfigNode {
        let children = self.as_children_mut();
        let idx = match children.iter().position(|(n, _)| n == name) {
            Some(idx) => {
                if children[idx].1.is_leaf() {
                    children[idx].1 = ConfigNode::section();
                }
                idx
            }
            None => {
                children.push((name.to_string(), ConfigNode::section()));
                children.len() - 1
            }
        };
        &mut children[idx].1
    }

    /// Store `value` under `name`.
    ///
    /// An existing child with the same name is overwritten in place, so the
    /// last value wins but keeps the position of the first occurrence.
    pub fn set_leaf(&mut self, name: &str, value: impl Into<String>) {
        let value = ConfigNode::Leaf(value.into());
        let children = self.as_children_mut();
        match children.iter_mut().find(|(n, _)| n == name) {
            Some((_, node)) => *node = value,
            None => children.push((name.to_string(), value)),
        }
    }

    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            ConfigNode::Leaf(_) => 1,
            ConfigNode::Section(children) => children.iter().map(|(_, c)| c.leaf_count()).sum(),
        }
    }

    fn as_children_mut(&mut self) -> &mut Vec<(String, ConfigNode)> {
        if self.is_leaf() {
            *self = ConfigNode::section();
        }
        match self {
            ConfigNode::Section(children) => children,
            ConfigNode::Leaf(_) => unreachable!("leaf replaced by section above"),
        }
    }
}

/// Normalize a raw child name into a dotted path segment.
///
/// Quote characters are removed and the whitespace separating a section
/// from its subsection becomes the path delimiter. Whitespace inside the
/// subsection itself is kept.
///
/// ```
/// use gitapi::gitconfig::normalize_segment;
///
/// assert_eq!(normalize_segment("branch \"origin\""), "branch.origin");
/// assert_eq!(normalize_segment("  branch   \"origin\" "), "branch.origin");
/// assert_eq!(normalize_segment("core"), "core");
/// ```
pub fn normalize_segment(raw: &str) -> String {
    let unquoted: String = raw.chars().filter(|c| *c != '"').collect();
    let trimmed = unquoted.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((section, subsection)) => {
            let mut segment = String::with_capacity(trimmed.len());
            segment.push_str(section);
            segment.push(PATH_DELIMITER);
            segment.push_str(subsection.trim_start());
            segment
        }
        None => trimmed.to_string(),
    }
}

/// Append a segment to a dotted prefix.
pub(crate) fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}{}{}", prefix, PATH_DELIMITER, segment)
    }
}
