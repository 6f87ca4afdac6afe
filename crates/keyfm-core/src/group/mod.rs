//! Tree synthesis from flat key lists.
//!
//! A grouping strategy turns the caller's flat entry list into a tree of
//! synthesized folder entries. [`Grouping::Folder`] follows the `/`
//! structure of the keys; [`Grouping::Modified`] buckets files into
//! relative time windows ("Today", "Last Week", one folder per month, ...).
//!
//! Both strategies are total: every input yields a tree, the input slice is
//! never mutated, and the output is rebuilt from scratch on every call.

pub mod folder;
pub mod modified;
pub mod windows;

use serde::{Deserialize, Serialize};

use crate::entry::KeyedEntry;

pub use folder::group_by_folder;
pub use modified::{group_by_modified, group_by_modified_at};
pub use windows::{relative_time_windows, TimeWindow};

/// How a flat entry list is arranged into a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grouping {
    /// Nest entries under synthesized folders following their keys.
    #[default]
    #[serde(alias = "by_folder")]
    Folder,
    /// Bucket files by modification time relative to now.
    #[serde(alias = "by_modified")]
    Modified,
}

impl Grouping {
    /// Builds the tree for `entries` below `root`.
    pub fn apply(self, entries: &[KeyedEntry], root: &str) -> Vec<KeyedEntry> {
        tracing::trace!(grouping = ?self, count = entries.len(), root, "grouping entries");
        match self {
            Self::Folder => group_by_folder(entries, root),
            Self::Modified => group_by_modified(entries, root),
        }
    }
}

/// Collects the keys of every leaf (non-folder) entry in `tree`.
pub fn leaf_keys(tree: &[KeyedEntry]) -> Vec<&str> {
    let mut keys = Vec::new();
    for entry in tree {
        entry.walk(&mut |e| {
            if e.children().is_none() {
                keys.push(e.key());
            }
        });
    }
    keys
}
