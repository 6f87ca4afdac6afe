//! The mutation coordinator.
//!
//! [`FileBrowser`] owns the caller's flat entry list, the [`BrowserState`]
//! and the registered [`Callbacks`]. Each user intent derives the new
//! key(s), forwards the request to the backend callback and applies the
//! optimistic state update, all within one synchronous call.

use tracing::{debug, warn};

use crate::action::{ActionBar, ActionDescriptor, ActionRegistry, ToolbarAction};
use crate::callbacks::{Callbacks, Capability};
use crate::config::{BrowserConfig, Config};
use crate::entry::{lookup, KeyedEntry};
use crate::error::CoreError;
use crate::filter::filter_entries;
use crate::group::Grouping;
use crate::key;
use crate::sort::Sorting;
use crate::state::{ActiveAction, BrowserState};
use crate::view::{self, BrowserView};

/// Outcome of a user intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// State was updated and, for backend operations, the callback invoked.
    Applied,
    /// The owner registered no callback for the operation; nothing changed.
    Unsupported,
    /// The input was invalid or there was nothing to act on; nothing changed.
    Rejected,
}

impl Dispatch {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }

    /// Folds several outcomes: applied if any was, else unsupported if any
    /// was, else rejected.
    fn combine(outcomes: impl IntoIterator<Item = Self>) -> Self {
        outcomes
            .into_iter()
            .fold(Self::Rejected, |acc, next| match (acc, next) {
                (Self::Applied, _) | (_, Self::Applied) => Self::Applied,
                (Self::Unsupported, _) | (_, Self::Unsupported) => Self::Unsupported,
                _ => Self::Rejected,
            })
    }
}

/// An interactive browser over a flat list of keyed entries.
///
/// ```
/// use keyfm_core::{Callbacks, FileBrowser, KeyedEntry};
///
/// let mut browser = FileBrowser::new(Callbacks::new());
/// browser.set_entries(vec![KeyedEntry::new("a/b.txt")]);
/// browser.toggle_folder("a/");
///
/// let view = browser.view();
/// assert_eq!(view.rows().len(), 2);
/// assert_eq!(view.rows()[1].entry.key(), "a/b.txt");
/// ```
#[derive(Debug)]
pub struct FileBrowser {
    entries: Vec<KeyedEntry>,
    state: BrowserState,
    callbacks: Callbacks,
    config: BrowserConfig,
    registry: ActionRegistry,
    preview: Option<KeyedEntry>,
}

impl FileBrowser {
    /// Creates a browser with the default configuration.
    pub fn new(callbacks: Callbacks) -> Self {
        Self::with_config(&Config::default(), callbacks)
    }

    pub fn with_config(config: &Config, callbacks: Callbacks) -> Self {
        Self {
            entries: Vec::new(),
            state: BrowserState::with_page_size(config.browser.results_per_page),
            callbacks,
            config: config.browser.clone(),
            registry: ActionRegistry::new(),
            preview: None,
        }
    }

    /// Replaces the flat entry list. Called once per cycle with the
    /// backend's current view of the world.
    pub fn set_entries(&mut self, entries: Vec<KeyedEntry>) {
        self.entries = entries;
    }

    pub fn entries(&self) -> &[KeyedEntry] {
        &self.entries
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    pub fn callbacks(&self) -> &Callbacks {
        &self.callbacks
    }

    /// The entry shown in the detail pane, if any.
    pub fn previewed(&self) -> Option<&KeyedEntry> {
        self.preview.as_ref()
    }

    pub fn set_grouping(&mut self, grouping: Grouping) {
        self.config.grouping = grouping;
    }

    pub fn set_sorting(&mut self, sorting: Sorting) {
        self.config.sorting = sorting;
    }

    fn transition(&mut self, f: impl FnOnce(BrowserState) -> BrowserState) {
        let state = std::mem::take(&mut self.state);
        self.state = f(state);
    }

    fn unsupported(operation: &'static str) -> Dispatch {
        debug!(operation, "no callback registered, ignoring");
        Dispatch::Unsupported
    }

    // --- Rendering ---

    /// Builds the tree for this cycle: raw entries plus any draft folder,
    /// filtered, grouped below the root and sorted.
    pub fn tree(&self) -> Vec<KeyedEntry> {
        let mut entries = self.entries.clone();
        if let Some(draft) = self.state.draft_entry() {
            entries.push(draft);
        }
        let filtered = filter_entries(&entries, self.state.name_filter(), self.config.filter_mode);
        let grouped = self.config.grouping.apply(&filtered, "");
        self.config.sorting.apply(&grouped)
    }

    pub fn view(&self) -> BrowserView {
        BrowserView::build(self.tree(), &self.state, self.config.show_folders_on_filter)
    }

    /// The toolbar for the current selection.
    pub fn action_bar(&self) -> ActionBar {
        let items = view::selected_items(&self.tree(), &self.state);
        ActionBar::for_selection(&items, self.state.name_filter(), &self.callbacks)
    }

    /// Labelled buttons for the current selection, in display order.
    pub fn toolbar_buttons(&self) -> Vec<&ActionDescriptor> {
        self.action_bar().buttons(&self.registry)
    }

    // --- Selection and folders ---

    /// Selects `key`, toggling its membership when `extend` is set.
    ///
    /// Select notifications fire only when the key resolves to an entry.
    pub fn select(&mut self, key: &str, extend: bool) {
        let resolved = lookup(&self.entries, key);
        self.transition(|s| s.select(key, extend));
        match resolved {
            Some(entry) => self.callbacks.selected(&entry),
            None => debug!(key, "selected key has no entry, skipping notification"),
        }
    }

    pub fn toggle_folder(&mut self, key: &str) {
        let was_open = self.state.is_open(key);
        self.transition(|s| s.toggle_folder(key));
        if let Some(entry) = lookup(&self.entries, key) {
            if was_open {
                self.callbacks.folder_closed(&entry);
            } else {
                self.callbacks.folder_opened(&entry);
            }
        }
    }

    pub fn open_folder(&mut self, key: &str) {
        self.transition(|s| s.open_folder(key));
        if let Some(entry) = lookup(&self.entries, key) {
            self.callbacks.folder_opened(&entry);
        }
    }

    pub fn begin_action(&mut self, action: ActiveAction, targets: Vec<String>) {
        self.transition(|s| s.begin_action(action, targets));
    }

    pub fn end_action(&mut self) {
        self.transition(BrowserState::end_action);
    }

    pub fn update_filter(&mut self, text: impl Into<String>) {
        self.transition(|s| s.update_filter(text));
    }

    pub fn show_more_results(&mut self) {
        self.transition(BrowserState::show_more_results);
    }

    /// A pointer-down landed outside the browser: drop selection and action.
    pub fn pointer_down_outside(&mut self) {
        self.transition(BrowserState::clear);
    }

    // --- Backend mutations ---

    /// Hands `files` to the backend for creation under `prefix`.
    pub fn create_files(&mut self, files: &[KeyedEntry], prefix: &str) -> Dispatch {
        if !self.callbacks.supports(Capability::CreateFiles) {
            return Self::unsupported("create_files");
        }
        debug!(count = files.len(), prefix, "create files");
        self.transition(|s| s.created_files(prefix));
        self.callbacks.create_files(files, prefix);
        Dispatch::Applied
    }

    pub fn create_folder(&mut self, key: &str) -> Dispatch {
        if !self.callbacks.supports(Capability::CreateFolder) {
            return Self::unsupported("create_folder");
        }
        debug!(key, "create folder");
        self.transition(|s| s.created_folder(key));
        self.callbacks.create_folder(key);
        Dispatch::Applied
    }

    pub fn move_file(&mut self, old_key: &str, new_key: &str) -> Dispatch {
        if !self.callbacks.supports(Capability::MoveFile) {
            return Self::unsupported("move_file");
        }
        debug!(old_key, new_key, "move file");
        self.transition(|s| s.moved_file(new_key));
        self.callbacks.move_file(old_key, new_key);
        Dispatch::Applied
    }

    pub fn move_folder(&mut self, old_key: &str, new_key: &str) -> Dispatch {
        if !self.callbacks.supports(Capability::MoveFolder) {
            return Self::unsupported("move_folder");
        }
        debug!(old_key, new_key, "move folder");
        self.transition(|s| s.moved_folder(old_key, new_key));
        self.callbacks.move_folder(old_key, new_key);
        Dispatch::Applied
    }

    pub fn rename_file(&mut self, old_key: &str, new_key: &str) -> Dispatch {
        if !self.callbacks.supports(Capability::RenameFile) {
            return Self::unsupported("rename_file");
        }
        debug!(old_key, new_key, "rename file");
        self.transition(|s| s.moved_file(new_key));
        self.callbacks.rename_file(old_key, new_key);
        Dispatch::Applied
    }

    pub fn rename_folder(&mut self, old_key: &str, new_key: &str) -> Dispatch {
        if !self.callbacks.supports(Capability::RenameFolder) {
            return Self::unsupported("rename_folder");
        }
        debug!(old_key, new_key, "rename folder");
        self.transition(|s| s.moved_folder(old_key, new_key));
        self.callbacks.rename_folder(old_key, new_key);
        Dispatch::Applied
    }

    pub fn delete_file(&mut self, keys: &[String]) -> Dispatch {
        if !self.callbacks.supports(Capability::DeleteFile) {
            return Self::unsupported("delete_file");
        }
        debug!(?keys, "delete files");
        self.transition(BrowserState::deleted_files);
        self.callbacks.delete_file(keys);
        Dispatch::Applied
    }

    pub fn delete_folder(&mut self, key: &str) -> Dispatch {
        if !self.callbacks.supports(Capability::DeleteFolder) {
            return Self::unsupported("delete_folder");
        }
        debug!(key, "delete folder");
        self.transition(|s| s.deleted_folder(key));
        self.callbacks.delete_folder(key);
        Dispatch::Applied
    }

    pub fn download_file(&mut self, keys: &[String]) -> Dispatch {
        if !self.callbacks.supports(Capability::DownloadFile) {
            return Self::unsupported("download_file");
        }
        debug!(?keys, "download files");
        self.transition(BrowserState::downloaded);
        self.callbacks.download_file(keys);
        Dispatch::Applied
    }

    pub fn download_folder(&mut self, keys: &[String]) -> Dispatch {
        if !self.callbacks.supports(Capability::DownloadFolder) {
            return Self::unsupported("download_folder");
        }
        debug!(?keys, "download folders");
        self.transition(BrowserState::downloaded);
        self.callbacks.download_folder(keys);
        Dispatch::Applied
    }

    // --- Toolbar and form entry points ---

    /// Submits the rename field for `key`.
    ///
    /// Files keep their parent prefix, folders their parent folder. A
    /// submission for an unconfirmed new-folder placeholder creates the
    /// folder instead. Invalid names are rejected without any callback.
    pub fn submit_rename(&mut self, key: &str, name: &str) -> Dispatch {
        let is_draft = key::is_new_folder_placeholder(key);
        let capability = match (key::is_folder(key), is_draft) {
            (true, true) => Capability::CreateFolder,
            (true, false) => Capability::RenameFolder,
            (false, _) => Capability::RenameFile,
        };
        if !self.callbacks.supports(capability) {
            return Self::unsupported("submit_rename");
        }

        let new_key = if key::is_folder(key) {
            key::renamed_folder_key(key, name)
        } else {
            key::renamed_file_key(key, name)
        };
        let new_key = match new_key {
            Ok(new_key) => new_key,
            Err(err) => {
                debug!(key, %err, "rename rejected");
                return Dispatch::Rejected;
            }
        };

        match capability {
            Capability::CreateFolder => self.create_folder(&new_key),
            Capability::RenameFolder => self.rename_folder(key, &new_key),
            _ => self.rename_file(key, &new_key),
        }
    }

    /// Drops the current selection onto folder `destination`.
    ///
    /// The destination is opened first. Moves that would leave a key
    /// unchanged or nest a folder inside itself are skipped.
    pub fn move_selection_to(&mut self, destination: &str) -> Dispatch {
        let selection: Vec<String> = self.state.selection().map(str::to_string).collect();
        if selection.is_empty() {
            return Dispatch::Rejected;
        }
        if !destination.is_empty() {
            self.open_folder(destination);
        }

        let (folders, files): (Vec<String>, Vec<String>) =
            selection.into_iter().partition(|k| key::is_folder(k));
        let mut outcomes = Vec::with_capacity(folders.len() + files.len());

        for folder in &folders {
            match key::moved_folder_key(folder, destination) {
                Ok(new_key) => outcomes.push(self.move_folder(folder, &new_key)),
                Err(err @ CoreError::NestedInItself { .. }) => {
                    debug!(%err, "skipping folder move");
                    outcomes.push(Dispatch::Rejected);
                }
                Err(err) => {
                    warn!(%err, "unexpected error computing folder move");
                    outcomes.push(Dispatch::Rejected);
                }
            }
        }
        for file in &files {
            let new_key = key::moved_file_key(file, destination);
            if new_key == *file {
                debug!(key = %file, "file already in destination, skipping");
                outcomes.push(Dispatch::Rejected);
                continue;
            }
            outcomes.push(self.move_file(file, &new_key));
        }

        Dispatch::combine(outcomes)
    }

    /// Runs a toolbar button.
    pub fn run_toolbar_action(&mut self, action: ToolbarAction) -> Dispatch {
        match action {
            ToolbarAction::AddFolder | ToolbarAction::AddSubfolder => self.begin_create_folder(),
            ToolbarAction::Rename => self.begin_rename_selection(),
            ToolbarAction::Delete => self.begin_delete_selection(),
            ToolbarAction::Download => self.download_selection(),
        }
    }

    /// Runs the toolbar button whose descriptor id is `id`.
    pub fn run_toolbar_button(&mut self, id: &str) -> Dispatch {
        match self.registry.find_by_id(id) {
            Some(action) => self.run_toolbar_action(action),
            None => {
                warn!(id, "unknown toolbar button");
                Dispatch::Rejected
            }
        }
    }

    /// Puts every selected item into rename mode.
    pub fn begin_rename_selection(&mut self) -> Dispatch {
        self.begin_on_selection(ActiveAction::Rename)
    }

    /// Asks for delete confirmation on every selected item.
    pub fn begin_delete_selection(&mut self) -> Dispatch {
        self.begin_on_selection(ActiveAction::Delete)
    }

    fn begin_on_selection(&mut self, action: ActiveAction) -> Dispatch {
        let targets: Vec<String> = self.state.selection().map(str::to_string).collect();
        if targets.is_empty() {
            return Dispatch::Rejected;
        }
        debug!(?action, count = targets.len(), "begin action on selection");
        self.begin_action(action, targets);
        Dispatch::Applied
    }

    /// Inserts a draft folder next to the selection and puts it in rename mode.
    pub fn begin_create_folder(&mut self) -> Dispatch {
        if !self.callbacks.supports(Capability::CreateFolder) {
            return Self::unsupported("begin_create_folder");
        }
        self.transition(BrowserState::begin_create_folder);
        Dispatch::Applied
    }

    /// Downloads the selection: as a folder when exactly one folder is
    /// selected, as files otherwise.
    pub fn download_selection(&mut self) -> Dispatch {
        let keys: Vec<String> = self.state.selection().map(str::to_string).collect();
        if keys.is_empty() {
            return Dispatch::Rejected;
        }
        let items = view::selected_items(&self.tree(), &self.state);
        match items.as_slice() {
            [only] if only.is_folder() => self.download_folder(&keys),
            _ => self.download_file(&keys),
        }
    }

    /// Confirms deletion of the whole selection: each folder through the
    /// folder callback, each file on its own through the file callback.
    pub fn confirm_delete_selection(&mut self) -> Dispatch {
        let selection: Vec<String> = self.state.selection().map(str::to_string).collect();
        if selection.is_empty() {
            return Dispatch::Rejected;
        }
        let (folders, files): (Vec<String>, Vec<String>) =
            selection.into_iter().partition(|k| key::is_folder(k));

        let mut outcomes = Vec::with_capacity(folders.len() + files.len());
        for folder in &folders {
            outcomes.push(self.delete_folder(folder));
        }
        for file in files {
            outcomes.push(self.delete_file(&[file]));
        }
        Dispatch::combine(outcomes)
    }

    // --- Preview ---

    /// Shows `entry` in the detail pane, closing a different open preview first.
    pub fn preview(&mut self, entry: KeyedEntry) {
        if self.preview.as_ref().is_some_and(|p| p.key() != entry.key()) {
            self.close_preview();
        }
        self.callbacks.preview_opened(&entry);
        self.preview = Some(entry);
    }

    pub fn close_preview(&mut self) {
        if let Some(current) = self.preview.take() {
            self.callbacks.preview_closed(&current);
        }
    }
}
