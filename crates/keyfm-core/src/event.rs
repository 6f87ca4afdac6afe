//! User intents as values.
//!
//! The presentation layer translates input into [`Intent`]s and hands them
//! to [`FileBrowser::dispatch`]. This decoupling lets any frontend (or a
//! test) drive the same core logic.

use crate::action::ToolbarAction;
use crate::browser::{Dispatch, FileBrowser};
use crate::entry::KeyedEntry;
use crate::state::ActiveAction;

/// Something the user asked the browser to do.
///
/// Intents flow **presentation → core**. The core never creates them itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Select a key; `extend` toggles it in a multi-selection.
    Select { key: String, extend: bool },
    ToggleFolder(String),
    OpenFolder(String),
    BeginAction(ActiveAction, Vec<String>),
    EndAction,
    UpdateFilter(String),
    ShowMoreResults,
    /// A pointer-down landed outside the browser region.
    PointerDownOutside,
    /// Upload `files` into folder `prefix`.
    CreateFiles { files: Vec<KeyedEntry>, prefix: String },
    CreateFolder(String),
    MoveFile { old_key: String, new_key: String },
    MoveFolder { old_key: String, new_key: String },
    RenameFile { old_key: String, new_key: String },
    RenameFolder { old_key: String, new_key: String },
    DeleteFile(Vec<String>),
    DeleteFolder(String),
    DownloadFile(Vec<String>),
    DownloadFolder(Vec<String>),
    /// The rename field for `key` was submitted with `name`.
    SubmitRename { key: String, name: String },
    /// The selection was dropped onto a folder.
    MoveSelectionTo(String),
    Toolbar(ToolbarAction),
    /// A toolbar button was pressed, identified by its descriptor id.
    ToolbarButton(String),
    ConfirmDeleteSelection,
    Preview(KeyedEntry),
    ClosePreview,
}

impl FileBrowser {
    /// Executes `intent`.
    ///
    /// State-only intents always report [`Dispatch::Applied`].
    pub fn dispatch(&mut self, intent: Intent) -> Dispatch {
        tracing::trace!(?intent, "dispatching intent");
        match intent {
            Intent::Select { key, extend } => self.select(&key, extend),
            Intent::ToggleFolder(key) => self.toggle_folder(&key),
            Intent::OpenFolder(key) => self.open_folder(&key),
            Intent::BeginAction(action, targets) => self.begin_action(action, targets),
            Intent::EndAction => self.end_action(),
            Intent::UpdateFilter(text) => self.update_filter(text),
            Intent::ShowMoreResults => self.show_more_results(),
            Intent::PointerDownOutside => self.pointer_down_outside(),
            Intent::Preview(entry) => self.preview(entry),
            Intent::ClosePreview => self.close_preview(),
            Intent::CreateFiles { files, prefix } => return self.create_files(&files, &prefix),
            Intent::CreateFolder(key) => return self.create_folder(&key),
            Intent::MoveFile { old_key, new_key } => return self.move_file(&old_key, &new_key),
            Intent::MoveFolder { old_key, new_key } => {
                return self.move_folder(&old_key, &new_key)
            }
            Intent::RenameFile { old_key, new_key } => {
                return self.rename_file(&old_key, &new_key)
            }
            Intent::RenameFolder { old_key, new_key } => {
                return self.rename_folder(&old_key, &new_key)
            }
            Intent::DeleteFile(keys) => return self.delete_file(&keys),
            Intent::DeleteFolder(key) => return self.delete_folder(&key),
            Intent::DownloadFile(keys) => return self.download_file(&keys),
            Intent::DownloadFolder(keys) => return self.download_folder(&keys),
            Intent::SubmitRename { key, name } => return self.submit_rename(&key, &name),
            Intent::MoveSelectionTo(destination) => return self.move_selection_to(&destination),
            Intent::Toolbar(action) => return self.run_toolbar_action(action),
            Intent::ToolbarButton(id) => return self.run_toolbar_button(&id),
            Intent::ConfirmDeleteSelection => return self.confirm_delete_selection(),
        }
        Dispatch::Applied
    }
}
