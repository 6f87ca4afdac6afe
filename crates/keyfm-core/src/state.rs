//! Selection, action and open-folder state of one mounted tree.
//!
//! [`BrowserState`] follows the project-wide immutability convention: every
//! transition consumes `self` and returns the next state. It owns no
//! entries and fires no callbacks; the [`crate::browser::FileBrowser`]
//! coordinator pairs each transition with the matching notification.

use std::collections::BTreeSet;

use indexmap::IndexSet;

use crate::entry::KeyedEntry;
use crate::key::{self, NEW_FOLDER_SEGMENT};

/// Number of filtered rows shown per "show more" step.
pub const RESULTS_PER_PAGE: usize = 20;

/// The action currently in progress, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveAction {
    #[default]
    None,
    Rename,
    Delete,
    CreateFolder,
}

/// Selection and action state.
///
/// Invariant: `active_action != ActiveAction::None` implies
/// `action_targets` is non-empty. Selection and open folders are
/// independent sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserState {
    selection: IndexSet<String>,
    open_folders: BTreeSet<String>,
    active_action: ActiveAction,
    action_targets: Vec<String>,
    name_filter: String,
    results_per_page: usize,
    results_shown: usize,
}

impl Default for BrowserState {
    fn default() -> Self {
        Self::with_page_size(RESULTS_PER_PAGE)
    }
}

impl BrowserState {
    /// Creates an empty state with the default page size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty state showing `results_per_page` filtered rows per page.
    pub fn with_page_size(results_per_page: usize) -> Self {
        Self {
            selection: IndexSet::new(),
            open_folders: BTreeSet::new(),
            active_action: ActiveAction::None,
            action_targets: Vec::new(),
            name_filter: String::new(),
            results_per_page,
            results_shown: results_per_page,
        }
    }

    /// Selected keys in selection order.
    pub fn selection(&self) -> impl Iterator<Item = &str> {
        self.selection.iter().map(String::as_str)
    }

    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.selection.contains(key)
    }

    /// Expanded folder keys.
    pub fn open_folders(&self) -> impl Iterator<Item = &str> {
        self.open_folders.iter().map(String::as_str)
    }

    pub fn is_open(&self, key: &str) -> bool {
        self.open_folders.contains(key)
    }

    pub fn active_action(&self) -> ActiveAction {
        self.active_action
    }

    pub fn action_targets(&self) -> &[String] {
        &self.action_targets
    }

    /// Returns `true` if `key` is a target of the in-progress `action`.
    pub fn is_target_of(&self, key: &str, action: ActiveAction) -> bool {
        self.active_action == action && self.action_targets.iter().any(|t| t == key)
    }

    pub fn name_filter(&self) -> &str {
        &self.name_filter
    }

    /// Number of filtered rows currently revealed.
    pub fn results_shown(&self) -> usize {
        self.results_shown
    }

    /// Selects `key`.
    ///
    /// Without `extend` the selection becomes exactly `{key}`; with `extend`
    /// (ctrl/shift) membership of `key` is toggled. Selecting a key outside
    /// the current action targets cancels the in-progress action.
    pub fn select(self, key: &str, extend: bool) -> Self {
        let cancels_action =
            !self.action_targets.is_empty() && !self.action_targets.iter().any(|t| t == key);

        let selection = if extend {
            let mut selection = self.selection;
            if !selection.shift_remove(key) {
                selection.insert(key.to_string());
            }
            selection
        } else {
            IndexSet::from([key.to_string()])
        };

        let next = Self { selection, ..self };
        if cancels_action {
            next.without_action()
        } else {
            next
        }
    }

    /// Starts `action` on `targets`.
    ///
    /// `ActiveAction::None` or an empty target list clears the action instead.
    pub fn begin_action(self, action: ActiveAction, targets: Vec<String>) -> Self {
        if action == ActiveAction::None || targets.is_empty() {
            return self.without_action();
        }
        Self {
            active_action: action,
            action_targets: targets,
            ..self
        }
    }

    /// Ends the in-progress action and drops unconfirmed new-folder
    /// placeholders from the selection.
    pub fn end_action(self) -> Self {
        let mut selection = self.selection;
        selection.retain(|k| !key::is_new_folder_placeholder(k));
        Self { selection, ..self }.without_action()
    }

    /// Starts creating a folder.
    ///
    /// The placeholder goes inside the first selected folder, next to the
    /// first selected file, or at the root when nothing is selected. The
    /// placeholder becomes the sole target and the sole selection, and the
    /// folder that will contain it is opened. No-op while a folder is
    /// already being created.
    pub fn begin_create_folder(self) -> Self {
        if self.active_action == ActiveAction::CreateFolder {
            return self;
        }
        let parent = match self.selection.first() {
            Some(k) if key::is_folder(k) => k.clone(),
            Some(k) => key::parent_folder(k).to_string(),
            None => String::new(),
        };
        let placeholder = if key::is_new_folder_placeholder(&parent) {
            parent.clone()
        } else {
            format!("{parent}{NEW_FOLDER_SEGMENT}/")
        };

        let mut open_folders = self.open_folders;
        if !parent.is_empty() {
            open_folders.insert(parent);
        }
        Self {
            selection: IndexSet::from([placeholder.clone()]),
            open_folders,
            active_action: ActiveAction::CreateFolder,
            action_targets: vec![placeholder],
            ..self
        }
    }

    /// The draft folder entry spliced into the tree while a folder is being created.
    pub fn draft_entry(&self) -> Option<KeyedEntry> {
        if self.active_action != ActiveAction::CreateFolder {
            return None;
        }
        self.action_targets.first().map(|target| {
            KeyedEntry::new(target.as_str())
                .with_size(0)
                .with_draft(true)
        })
    }

    /// Opens `key` if closed, closes it if open.
    pub fn toggle_folder(self, key: &str) -> Self {
        let mut open_folders = self.open_folders;
        if !open_folders.remove(key) {
            open_folders.insert(key.to_string());
        }
        Self {
            open_folders,
            ..self
        }
    }

    pub fn open_folder(self, key: &str) -> Self {
        let mut open_folders = self.open_folders;
        open_folders.insert(key.to_string());
        Self {
            open_folders,
            ..self
        }
    }

    /// Replaces the filter text and resets paging.
    pub fn update_filter(self, text: impl Into<String>) -> Self {
        Self {
            name_filter: text.into(),
            results_shown: self.results_per_page,
            ..self
        }
    }

    /// Reveals one more page of filtered rows.
    pub fn show_more_results(self) -> Self {
        Self {
            results_shown: self.results_shown + self.results_per_page,
            ..self
        }
    }

    /// Pointer-down outside the browser: drops selection and any action.
    pub fn clear(self) -> Self {
        Self {
            selection: IndexSet::new(),
            ..self
        }
        .without_action()
    }

    /// Optimistic update after files were handed to the backend for creation.
    pub fn created_files(self, prefix: &str) -> Self {
        let next = Self {
            selection: IndexSet::new(),
            ..self
        };
        if prefix.is_empty() {
            next
        } else {
            next.open_folder(prefix)
        }
    }

    /// Optimistic update after a folder create was requested.
    pub fn created_folder(self, key: &str) -> Self {
        self.without_action().selected_only(key)
    }

    /// Optimistic update after a file was moved or renamed.
    pub fn moved_file(self, new_key: &str) -> Self {
        self.without_action().selected_only(new_key)
    }

    /// Optimistic update after a folder was moved or renamed.
    ///
    /// Open folders at or below `old_key` are carried over to `new_key`.
    pub fn moved_folder(self, old_key: &str, new_key: &str) -> Self {
        let open_folders = self
            .open_folders
            .iter()
            .map(|k| key::rebase(k, old_key, new_key).unwrap_or_else(|| k.clone()))
            .collect();
        Self {
            open_folders,
            ..self
        }
        .without_action()
        .selected_only(new_key)
    }

    /// Optimistic update after files were deleted.
    pub fn deleted_files(self) -> Self {
        self.clear()
    }

    /// Optimistic update after a folder was deleted: it and its open
    /// descendants are closed.
    pub fn deleted_folder(self, key: &str) -> Self {
        let mut open_folders = self.open_folders;
        open_folders.retain(|k| !k.starts_with(key));
        Self {
            open_folders,
            ..self
        }
        .clear()
    }

    /// Optimistic update after a download was requested.
    pub fn downloaded(self) -> Self {
        self.without_action()
    }

    fn without_action(self) -> Self {
        Self {
            active_action: ActiveAction::None,
            action_targets: Vec::new(),
            ..self
        }
    }

    fn selected_only(self, key: &str) -> Self {
        Self {
            selection: IndexSet::from([key.to_string()]),
            ..self
        }
    }
}
