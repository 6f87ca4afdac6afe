//! Keyed entry representation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::key;

/// Whether an entry is a leaf file or a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Folder,
}

impl EntryKind {
    /// Classifies a key by its trailing slash.
    pub fn of_key(key: &str) -> Self {
        if key::is_folder(key) {
            Self::Folder
        } else {
            Self::File
        }
    }
}

/// A single file or folder identified by its path-like key.
///
/// `KeyedEntry` is immutable: derive modified copies through the consuming
/// `with_*` methods rather than mutating fields. `children` is only ever
/// populated by the grouping pass; it is derived data and never
/// authoritative.
///
/// Arbitrary caller-supplied fields are kept in an extension bag so they
/// survive a round trip through grouping and sorting.
///
/// ```
/// use keyfm_core::KeyedEntry;
///
/// let entry = KeyedEntry::new("photos/cats/a.png").with_size(2048);
/// assert_eq!(entry.display_name(), "a.png");
/// assert!(!entry.is_folder());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyedEntry {
    key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    modified: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    draft: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<KeyedEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    new_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    relative_key: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    key_derived: bool,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl KeyedEntry {
    /// Creates an entry with only a key; every other field is unset.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Returns the canonical key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the explicit name, if one was supplied or merged.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the name to show: the explicit name, else one derived from
    /// the key (the pending `new_key` while a rename is in flight).
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => key::name(self.effective_key()),
        }
    }

    /// Returns the last-modified time in epoch milliseconds, if known.
    pub fn modified(&self) -> Option<i64> {
        self.modified
    }

    /// Returns the last-modified time, treating an unknown time as epoch 0.
    pub fn modified_or_epoch(&self) -> i64 {
        self.modified.unwrap_or(0)
    }

    /// Returns the size in bytes, if known.
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    /// Returns `true` for an unconfirmed, in-progress create.
    pub fn is_draft(&self) -> bool {
        self.draft
    }

    /// Returns the synthesized children, present only on grouped folders.
    pub fn children(&self) -> Option<&[KeyedEntry]> {
        self.children.as_deref()
    }

    /// Returns the proposed key of an in-flight rename.
    pub fn new_key(&self) -> Option<&str> {
        self.new_key.as_deref()
    }

    /// Returns `new_key` if set, otherwise `key`.
    pub fn effective_key(&self) -> &str {
        self.new_key.as_deref().unwrap_or(&self.key)
    }

    /// Returns the key relative to the grouping root.
    pub fn relative_key(&self) -> Option<&str> {
        self.relative_key.as_deref()
    }

    /// Returns `true` if the entry was produced by grouping.
    pub fn is_key_derived(&self) -> bool {
        self.key_derived
    }

    /// Returns `true` if the key ends with `/`.
    pub fn is_folder(&self) -> bool {
        key::is_folder(&self.key)
    }

    /// Returns whether this entry is a file or a folder.
    pub fn kind(&self) -> EntryKind {
        EntryKind::of_key(&self.key)
    }

    /// Returns a caller-supplied extension field.
    pub fn extra(&self, field: &str) -> Option<&Value> {
        self.extra.get(field)
    }

    /// Returns the whole extension bag.
    pub fn extras(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    pub fn with_key(self, key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..self
        }
    }

    pub fn with_name(self, name: Option<String>) -> Self {
        Self { name, ..self }
    }

    pub fn with_modified(self, modified: i64) -> Self {
        Self {
            modified: Some(modified),
            ..self
        }
    }

    pub fn with_size(self, size: u64) -> Self {
        Self {
            size: Some(size),
            ..self
        }
    }

    pub fn with_draft(self, draft: bool) -> Self {
        Self { draft, ..self }
    }

    pub fn with_children(self, children: Option<Vec<KeyedEntry>>) -> Self {
        Self { children, ..self }
    }

    pub fn with_new_key(self, new_key: Option<String>) -> Self {
        Self { new_key, ..self }
    }

    pub fn with_relative_key(self, relative_key: impl Into<String>) -> Self {
        Self {
            relative_key: Some(relative_key.into()),
            ..self
        }
    }

    pub fn with_key_derived(self, key_derived: bool) -> Self {
        Self {
            key_derived,
            ..self
        }
    }

    /// Returns a copy with one extension field set.
    pub fn with_extra(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut extra = self.extra;
        extra.insert(field.into(), value.into());
        Self { extra, ..self }
    }

    /// Overlays the caller-facing fields of `record` onto this entry.
    ///
    /// Used when a raw folder record sits at the same key as a synthesized
    /// folder: the record's name, timestamps, draft flag, pending rename and
    /// extension fields win; key, size and children stay synthesized.
    pub fn merged_with(self, record: &KeyedEntry) -> Self {
        let mut extra = self.extra;
        extra.extend(record.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self {
            name: record.name.clone().or(self.name),
            modified: record.modified.or(self.modified),
            draft: self.draft || record.draft,
            new_key: record.new_key.clone().or(self.new_key),
            extra,
            ..self
        }
    }

    /// Visits this entry and all of its descendants, depth first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a KeyedEntry)) {
        let mut stack = vec![self];
        while let Some(entry) = stack.pop() {
            visit(entry);
            if let Some(children) = entry.children() {
                stack.extend(children.iter().rev());
            }
        }
    }
}

/// Finds the raw entry for `key`.
///
/// An exact key match is returned as is. When there is no exact match but
/// some key starts with `key` (an implied folder with no record of its own),
/// a placeholder with zero size and timestamp is returned. Otherwise `None`.
pub fn lookup(entries: &[KeyedEntry], key: &str) -> Option<KeyedEntry> {
    if let Some(exact) = entries.iter().find(|e| e.key() == key) {
        return Some(exact.clone());
    }
    if entries.iter().any(|e| e.key().starts_with(key)) {
        return Some(
            KeyedEntry::new(key)
                .with_name(Some(key.to_string()))
                .with_modified(0)
                .with_size(0)
                .with_relative_key(key),
        );
    }
    None
}
