//! Recursive ordering of grouped trees.
//!
//! Every strategy keeps folders (entries with `children`) ahead of files at
//! each level, orders folders by natural name with drafts last, and
//! recurses into folder children. Sorting is stable and returns a new
//! `Vec`; the input slice is never mutated.

pub mod natural;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::entry::KeyedEntry;

pub use natural::natural_cmp;

/// The field by which files are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sorting {
    /// Natural order of display names.
    #[default]
    Name,
    /// Ascending modification time; unknown times count as epoch 0.
    Modified,
}

impl Sorting {
    /// Orders `entries` and, recursively, every folder's children.
    pub fn apply(self, entries: &[KeyedEntry]) -> Vec<KeyedEntry> {
        tracing::trace!(sorting = ?self, count = entries.len(), "sorting tree");
        sort_tree(entries, self)
    }
}

/// Orders `entries` by natural name. Shorthand for [`Sorting::Name`].
pub fn sort_by_name(entries: &[KeyedEntry]) -> Vec<KeyedEntry> {
    sort_tree(entries, Sorting::Name)
}

/// Orders files by modification time. Shorthand for [`Sorting::Modified`].
pub fn sort_by_modified(entries: &[KeyedEntry]) -> Vec<KeyedEntry> {
    sort_tree(entries, Sorting::Modified)
}

fn sort_tree(entries: &[KeyedEntry], sorting: Sorting) -> Vec<KeyedEntry> {
    let (mut folders, mut files): (Vec<KeyedEntry>, Vec<KeyedEntry>) = entries
        .iter()
        .cloned()
        .partition(|e| e.children().is_some());

    folders.sort_by(compare_folders);
    match sorting {
        Sorting::Name => files.sort_by(compare_names),
        Sorting::Modified => files.sort_by_key(KeyedEntry::modified_or_epoch),
    }

    folders
        .into_iter()
        .map(|folder| {
            let children = folder.children().map(|c| sort_tree(c, sorting));
            folder.with_children(children)
        })
        .chain(files)
        .collect()
}

fn compare_names(a: &KeyedEntry, b: &KeyedEntry) -> Ordering {
    natural_cmp(a.display_name(), b.display_name())
}

/// Natural order, except a draft always sorts after its non-draft siblings.
fn compare_folders(a: &KeyedEntry, b: &KeyedEntry) -> Ordering {
    a.is_draft()
        .cmp(&b.is_draft())
        .then_with(|| compare_names(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::group_by_folder;

    fn folder(key: &str, children: Vec<KeyedEntry>) -> KeyedEntry {
        KeyedEntry::new(key).with_children(Some(children))
    }

    fn keys(entries: &[KeyedEntry]) -> Vec<&str> {
        entries.iter().map(KeyedEntry::key).collect()
    }

    #[test]
    fn files_in_natural_order() {
        let entries = vec![
            KeyedEntry::new("file2.png"),
            KeyedEntry::new("file10.png"),
            KeyedEntry::new("file1.png"),
        ];
        let sorted = sort_by_name(&entries);
        assert_eq!(keys(&sorted), vec!["file1.png", "file2.png", "file10.png"]);
    }

    #[test]
    fn folders_precede_files_regardless_of_input_order() {
        let entries = vec![
            KeyedEntry::new("a.txt"),
            folder("z/", vec![]),
            KeyedEntry::new("b.txt"),
            folder("m/", vec![]),
        ];
        let sorted = sort_by_name(&entries);
        assert_eq!(keys(&sorted), vec!["m/", "z/", "a.txt", "b.txt"]);
    }

    #[test]
    fn draft_folder_sorts_after_non_draft_siblings() {
        let entries = vec![
            folder("a/__new__/", vec![]).with_draft(true),
            folder("a/zeta/", vec![]),
            folder("a/alpha/", vec![]),
        ];
        let sorted = sort_by_name(&entries);
        assert_eq!(keys(&sorted), vec!["a/alpha/", "a/zeta/", "a/__new__/"]);

        let by_time = sort_by_modified(&entries);
        assert_eq!(keys(&by_time), vec!["a/alpha/", "a/zeta/", "a/__new__/"]);
    }

    #[test]
    fn children_are_sorted_recursively() {
        let entries = vec![folder(
            "a/",
            vec![
                KeyedEntry::new("a/10.txt"),
                folder("a/b/", vec![KeyedEntry::new("a/b/y"), KeyedEntry::new("a/b/X")]),
                KeyedEntry::new("a/9.txt"),
            ],
        )];
        let sorted = sort_by_name(&entries);
        let a = sorted[0].children().unwrap();
        assert_eq!(keys(a), vec!["a/b/", "a/9.txt", "a/10.txt"]);
        assert_eq!(keys(a[0].children().unwrap()), vec!["a/b/X", "a/b/y"]);
    }

    #[test]
    fn files_by_modified_ascending_with_unknown_first() {
        let entries = vec![
            KeyedEntry::new("c").with_modified(300),
            KeyedEntry::new("a").with_modified(100),
            KeyedEntry::new("unknown"),
        ];
        let sorted = sort_by_modified(&entries);
        assert_eq!(keys(&sorted), vec!["unknown", "a", "c"]);
    }

    #[test]
    fn modified_sort_orders_folders_by_name() {
        let entries = vec![
            folder("b/", vec![]).with_modified(1),
            folder("a/", vec![]).with_modified(2),
        ];
        let sorted = sort_by_modified(&entries);
        assert_eq!(keys(&sorted), vec!["a/", "b/"]);
    }

    #[test]
    fn sort_does_not_mutate_input() {
        let entries = vec![KeyedEntry::new("b"), KeyedEntry::new("a")];
        let before = entries.clone();
        let _ = sort_by_name(&entries);
        assert_eq!(entries, before);
    }

    #[test]
    fn grouped_scenario_yields_single_folder_with_file() {
        let entries = vec![KeyedEntry::new("a/b.txt"), KeyedEntry::new("a/")];
        let tree = Sorting::Name.apply(&group_by_folder(&entries, ""));
        assert_eq!(keys(&tree), vec!["a/"]);
        assert_eq!(keys(tree[0].children().unwrap()), vec!["a/b.txt"]);
    }
}
