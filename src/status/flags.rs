//! status::flags
//!
//! Per-file status bits and their decoded form.
//!
//! Bit positions follow libgit2's `git_status_t` layout so entries coming
//! out of the git layer can be passed through unchanged.

use serde::{Deserialize, Serialize};

/// libgit2 status bit positions.
pub mod bits {
    pub const INDEX_NEW: u32 = 1 << 0;
    pub const INDEX_MODIFIED: u32 = 1 << 1;
    pub const INDEX_DELETED: u32 = 1 << 2;
    pub const INDEX_RENAMED: u32 = 1 << 3;
    pub const INDEX_TYPECHANGE: u32 = 1 << 4;
    pub const WT_NEW: u32 = 1 << 7;
    pub const WT_MODIFIED: u32 = 1 << 8;
    pub const WT_DELETED: u32 = 1 << 9;
    pub const WT_TYPECHANGE: u32 = 1 << 10;
    pub const WT_RENAMED: u32 = 1 << 11;
    pub const IGNORED: u32 = 1 << 14;
    pub const CONFLICTED: u32 = 1 << 15;
}

/// One changed file as reported by the status provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    /// Path relative to the working directory, `/`-separated.
    pub path: String,
    /// Raw status bitmask.
    pub bit: u32,
}

impl StatusEntry {
    /// Create an entry.
    pub fn new(path: impl Into<String>, bit: u32) -> Self {
        Self {
            path: path.into(),
            bit,
        }
    }

    /// Decode this entry's bitmask.
    pub fn flags(&self) -> StatusFlags {
        StatusFlags::from_bits(self.bit)
    }
}

/// The status bits this API reports on, decoded into named booleans.
///
/// The flags are independent: a file that was staged and then edited again
/// has both `index_modified` and `wt_modified` set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusFlags {
    pub conflicted: bool,
    pub wt_modified: bool,
    pub wt_deleted: bool,
    pub wt_new: bool,
    pub index_new: bool,
    pub index_modified: bool,
    pub index_deleted: bool,
}

impl StatusFlags {
    /// Decode a raw bitmask. Bits without a category are ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use gitapi::status::{bits, StatusFlags};
    ///
    /// let flags = StatusFlags::from_bits(bits::INDEX_MODIFIED | bits::WT_MODIFIED);
    /// assert!(flags.index_modified);
    /// assert!(flags.wt_modified);
    /// assert!(!flags.conflicted);
    /// ```
    pub fn from_bits(bit: u32) -> Self {
        let has = |mask: u32| bit & mask != 0;
        Self {
            conflicted: has(bits::CONFLICTED),
            wt_modified: has(bits::WT_MODIFIED),
            wt_deleted: has(bits::WT_DELETED),
            wt_new: has(bits::WT_NEW),
            index_new: has(bits::INDEX_NEW),
            index_modified: has(bits::INDEX_MODIFIED),
            index_deleted: has(bits::INDEX_DELETED),
        }
    }

    /// Whether none of the reported flags is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_decodes_to_nothing() {
        assert!(StatusFlags::from_bits(0).is_empty());
    }

    #[test]
    fn each_bit_maps_to_its_flag() {
        assert!(StatusFlags::from_bits(bits::CONFLICTED).conflicted);
        assert!(StatusFlags::from_bits(bits::WT_MODIFIED).wt_modified);
        assert!(StatusFlags::from_bits(bits::WT_DELETED).wt_deleted);
        assert!(StatusFlags::from_bits(bits::WT_NEW).wt_new);
        assert!(StatusFlags::from_bits(bits::INDEX_NEW).index_new);
        assert!(StatusFlags::from_bits(bits::INDEX_MODIFIED).index_modified);
        assert!(StatusFlags::from_bits(bits::INDEX_DELETED).index_deleted);
    }

    #[test]
    fn unreported_bits_ignored() {
        let flags = StatusFlags::from_bits(
            bits::INDEX_RENAMED
                | bits::INDEX_TYPECHANGE
                | bits::WT_TYPECHANGE
                | bits::WT_RENAMED
                | bits::IGNORED,
        );
        assert!(flags.is_empty());
    }

    #[test]
    fn combined_bits_decode_independently() {
        let flags = StatusFlags::from_bits(bits::INDEX_NEW | bits::WT_MODIFIED | bits::WT_DELETED);
        assert_eq!(
            flags,
            StatusFlags {
                index_new: true,
                wt_modified: true,
                wt_deleted: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn entry_decodes_own_bits() {
        let entry = StatusEntry::new("src/lib.rs", bits::WT_NEW);
        assert!(entry.flags().wt_new);
    }
}
