//! gitconfig
//!
//! Bidirectional codec between a repository's nested configuration document
//! and the flat dotted-key space used by API clients.
//!
//! # Modules
//!
//! - `node`: The [`ConfigNode`] tree and path-segment normalization
//! - `parser`: Git config text to [`ConfigNode`]
//! - `codec`: Flattening, key lookup, and write validation
//!
//! # Example
//!
//! ```
//! use gitapi::gitconfig::{flatten, lookup, parse};
//!
//! let tree = parse("[user]\n\tname = Ada\n[branch \"main\"]\n\tremote = origin").unwrap();
//!
//! assert_eq!(lookup(&tree, "user.name"), Some("Ada"));
//! assert_eq!(flatten(&tree).len(), 2);
//! ```

mod codec;
mod node;
mod parser;

pub use codec::{flatten, flatten_filtered, lookup, ConfigWrite, FlatEntry, WriteError};
pub use node::{normalize_segment, ConfigNode, PATH_DELIMITER};
pub use parser::{parse, ParseError};
