//! Storage layer for spawnedit - formatting-preserving record stores.
//!
//! Both stores keep the backing file as a line buffer plus a position index
//! of where each record lives, so an edit rewrites only that record's lines.
//! `SpawnStore` owns `spawns.json`; `DynamicNpcStore` owns the commented
//! line-script spawn list.

pub mod buffer;
mod dynamic_store;
pub mod index;
pub mod scan;
mod spawn_store;

use std::fmt;

pub use buffer::{LineBuffer, LineEnding};
pub use dynamic_store::DynamicNpcStore;
pub use index::LineSpan;
pub use spawn_store::SpawnStore;

/// How a load ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded,
    /// Backing file absent; the collection starts empty
    Missing,
    /// File present but its root is not the expected shape
    MalformedRoot,
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoadStatus::Loaded => "loaded",
            LoadStatus::Missing => "missing",
            LoadStatus::MalformedRoot => "malformed root",
        };
        f.write_str(s)
    }
}

/// Outcome of a store load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub status: LoadStatus,
    /// Records decoded from the file
    pub decoded: usize,
    /// Records whose line range is known
    pub indexed: usize,
}

impl LoadSummary {
    pub fn new(status: LoadStatus, decoded: usize, indexed: usize) -> Self {
        Self {
            status,
            decoded,
            indexed,
        }
    }

    /// Records that can only be edited by a full rewrite
    pub fn unindexed(&self) -> usize {
        self.decoded.saturating_sub(self.indexed)
    }
}

impl fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} records, {} indexed", self.status, self.decoded, self.indexed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_display() {
        let summary = LoadSummary::new(LoadStatus::Loaded, 5, 4);
        assert_eq!(summary.to_string(), "loaded: 5 records, 4 indexed");
        assert_eq!(summary.unindexed(), 1);
    }

    #[test]
    fn test_missing_summary_is_empty() {
        let summary = LoadSummary::new(LoadStatus::Missing, 0, 0);
        assert_eq!(summary.unindexed(), 0);
        assert_eq!(summary.to_string(), "missing: 0 records, 0 indexed");
    }
}
