//! Grouping by folder path.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::entry::KeyedEntry;

/// One directory level discovered while walking the keys.
///
/// Nodes live in an arena and refer to their sub-folders by index. A child
/// is always pushed after its parent, so every child index is greater than
/// its parent's.
#[derive(Debug, Default)]
struct FolderNode {
    /// Path relative to the grouping root, without the trailing slash.
    relative: String,
    /// Sub-folders by segment name, in first-encounter order.
    folders: IndexMap<String, usize>,
    /// Leaf entries placed directly in this folder.
    files: Vec<KeyedEntry>,
    /// Raw folder record found at exactly this key, if any.
    record: Option<KeyedEntry>,
}

#[derive(Debug)]
struct FolderArena {
    nodes: Vec<FolderNode>,
}

impl FolderArena {
    const ROOT: usize = 0;

    fn new() -> Self {
        Self {
            nodes: vec![FolderNode::default()],
        }
    }

    /// Returns the index of sub-folder `segment` of `parent`, creating it if needed.
    fn child(&mut self, parent: usize, segment: &str) -> usize {
        if let Some(&idx) = self.nodes[parent].folders.get(segment) {
            return idx;
        }
        let relative = if self.nodes[parent].relative.is_empty() {
            segment.to_string()
        } else {
            format!("{}/{}", self.nodes[parent].relative, segment)
        };
        let idx = self.nodes.len();
        self.nodes.push(FolderNode {
            relative,
            ..FolderNode::default()
        });
        self.nodes[parent].folders.insert(segment.to_string(), idx);
        idx
    }

    fn insert(&mut self, entry: &KeyedEntry, root: &str) {
        let effective = entry.effective_key();
        let relative = effective.strip_prefix(root).unwrap_or(effective);
        let is_folder = entry.is_folder();
        let segments: Vec<&str> = relative.split('/').collect();
        let last = segments.len() - 1;

        let mut current = Self::ROOT;
        for (idx, segment) in segments.iter().enumerate() {
            if idx == last && is_folder {
                if current != Self::ROOT {
                    let node = &mut self.nodes[current];
                    if node.record.is_some() {
                        tracing::warn!(key = entry.key(), "duplicate folder record");
                    }
                    node.record = Some(entry.clone());
                }
            }
            if segment.is_empty() {
                continue;
            }
            if idx == last && !is_folder {
                let leaf = entry
                    .clone()
                    .with_relative_key(relative)
                    .with_key_derived(true);
                self.nodes[current].files.push(leaf);
            } else {
                current = self.child(current, segment);
            }
        }
    }

    /// Flattens the arena into entries, building deepest folders first.
    fn into_entries(self, root: &str) -> Vec<KeyedEntry> {
        let mut nodes = self.nodes;
        let mut built: Vec<Option<KeyedEntry>> = vec![None; nodes.len()];

        for idx in (Self::ROOT + 1..nodes.len()).rev() {
            let node = std::mem::take(&mut nodes[idx]);
            let children = collect_level(&node, &mut built);
            let folder = KeyedEntry::new(format!("{root}{}/", node.relative))
                .with_relative_key(format!("{}/", node.relative))
                .with_size(0)
                .with_key_derived(true)
                .with_children(Some(children));
            built[idx] = Some(match &node.record {
                Some(record) => folder.merged_with(record),
                None => folder,
            });
        }

        let root_node = std::mem::take(&mut nodes[Self::ROOT]);
        collect_level(&root_node, &mut built)
    }
}

/// Sub-folders first, in first-encounter order, then the leaf entries.
fn collect_level(node: &FolderNode, built: &mut [Option<KeyedEntry>]) -> Vec<KeyedEntry> {
    node.folders
        .values()
        .filter_map(|&idx| built[idx].take())
        .chain(node.files.iter().cloned())
        .collect()
}

/// Groups `entries` into a folder tree below `root`.
///
/// Every directory level implied by a key becomes a synthesized folder
/// entry (`key_derived`, size `0`, no name) whose key is `root` plus the
/// relative path plus `/`. Files are copied in as `key_derived` leaves with
/// their `relative_key` set. A raw folder record at a folder's exact key is
/// merged onto the synthesized node, so it can carry a name, a draft flag
/// or extension fields. At each level, sub-folders come before files.
///
/// Keys are taken from `new_key` while a rename is pending. Keys that do not
/// start with `root` are placed by their full key.
///
/// # Examples
///
/// ```
/// use keyfm_core::{group::group_by_folder, KeyedEntry};
///
/// let entries = vec![KeyedEntry::new("a/b.txt"), KeyedEntry::new("a/")];
/// let tree = group_by_folder(&entries, "");
///
/// assert_eq!(tree.len(), 1);
/// assert_eq!(tree[0].key(), "a/");
/// assert_eq!(tree[0].children().unwrap()[0].key(), "a/b.txt");
/// ```
pub fn group_by_folder(entries: &[KeyedEntry], root: &str) -> Vec<KeyedEntry> {
    let mut arena = FolderArena::new();
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.key()) {
            tracing::warn!(key = entry.key(), "duplicate key in entry list");
        }
        arena.insert(entry, root);
    }
    arena.into_entries(root)
}
