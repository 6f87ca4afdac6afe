//! Toolbar actions offered for the current selection.
//!
//! Every toolbar button is represented by the [`ToolbarAction`] enum.
//! [`ActionBar::for_selection`] decides which actions apply right now, and
//! [`ActionRegistry`] turns them into labelled buttons and resolves button
//! ids back to actions.

use crate::callbacks::{Callbacks, Capability};
use crate::entry::KeyedEntry;

/// Every toolbar action.
///
/// Variants carry no parameters: the selection is read at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarAction {
    AddFolder,
    AddSubfolder,
    Rename,
    Delete,
    Download,
}

/// Metadata for a single toolbar action.
#[derive(Debug, Clone)]
pub struct ActionDescriptor {
    pub action: ToolbarAction,
    /// Snake-case identifier (e.g. `"add_subfolder"`).
    pub id: &'static str,
    /// Button label (e.g. `"Add Subfolder"`).
    pub label: &'static str,
    pub description: &'static str,
}

/// Registry of all toolbar actions.
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    descriptors: Vec<ActionDescriptor>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        let descriptors = vec![
            ActionDescriptor {
                action: ToolbarAction::AddFolder,
                id: "add_folder",
                label: "Add Folder",
                description: "Create a folder at the root",
            },
            ActionDescriptor {
                action: ToolbarAction::AddSubfolder,
                id: "add_subfolder",
                label: "Add Subfolder",
                description: "Create a folder inside the selected folder",
            },
            ActionDescriptor {
                action: ToolbarAction::Rename,
                id: "rename",
                label: "Rename",
                description: "Rename the selected item",
            },
            ActionDescriptor {
                action: ToolbarAction::Delete,
                id: "delete",
                label: "Delete",
                description: "Delete the selected items",
            },
            ActionDescriptor {
                action: ToolbarAction::Download,
                id: "download",
                label: "Download",
                description: "Download the selected items",
            },
        ];
        Self { descriptors }
    }

    /// Finds an action by its string id.
    pub fn find_by_id(&self, id: &str) -> Option<ToolbarAction> {
        self.descriptors
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.action)
    }

    pub fn descriptor_for(&self, action: ToolbarAction) -> Option<&ActionDescriptor> {
        self.descriptors.iter().find(|d| d.action == action)
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Backend work already in flight for the whole selection, as reported by
/// the caller through each entry's `action` extension field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingStatus {
    Deleting,
    Renaming,
    Moving,
}

impl PendingStatus {
    fn from_field(value: &str) -> Self {
        match value {
            "delete" => Self::Deleting,
            "rename" => Self::Renaming,
            _ => Self::Moving,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Deleting => "Deleting ...",
            Self::Renaming => "Renaming ...",
            Self::Moving => "Moving ...",
        }
    }
}

/// What the toolbar shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionBar {
    /// Every selected item reports the same in-flight operation.
    Pending(PendingStatus),
    /// Buttons to offer, in display order. May be empty.
    Actions(Vec<ToolbarAction>),
}

impl ActionBar {
    /// Computes the toolbar for `selected_items`.
    ///
    /// Adding a folder is never offered while `name_filter` is non-empty.
    /// Rename and delete require every selected item to be key-derived;
    /// renaming files is single-item only. Every button is gated on the
    /// owner having registered the matching callback.
    pub fn for_selection(
        selected_items: &[KeyedEntry],
        name_filter: &str,
        callbacks: &Callbacks,
    ) -> Self {
        let filtering = !name_filter.is_empty();

        if selected_items.is_empty() {
            let mut actions = Vec::new();
            if callbacks.supports(Capability::CreateFolder) && !filtering {
                actions.push(ToolbarAction::AddFolder);
            }
            return Self::Actions(actions);
        }

        if let Some(status) = pending_status(selected_items) {
            return Self::Pending(status);
        }

        let is_folder = matches!(selected_items, [only] if only.is_folder());
        let all_derived = selected_items.iter().all(KeyedEntry::is_key_derived);
        let mut actions = Vec::new();

        if is_folder && callbacks.supports(Capability::CreateFolder) && !filtering {
            actions.push(ToolbarAction::AddSubfolder);
        }

        let can_rename = if is_folder {
            callbacks.supports(Capability::RenameFolder)
        } else {
            callbacks.supports(Capability::RenameFile) && selected_items.len() == 1
        };
        if all_derived && can_rename {
            actions.push(ToolbarAction::Rename);
        }

        let can_delete = if is_folder {
            callbacks.supports(Capability::DeleteFolder)
        } else {
            callbacks.supports(Capability::DeleteFile)
        };
        if all_derived && can_delete {
            actions.push(ToolbarAction::Delete);
        }

        let can_download = if is_folder {
            callbacks.supports(Capability::DownloadFolder)
        } else {
            callbacks.supports(Capability::DownloadFile)
        };
        if can_download {
            actions.push(ToolbarAction::Download);
        }

        Self::Actions(actions)
    }

    /// The offered buttons, empty while an operation is pending.
    pub fn actions(&self) -> &[ToolbarAction] {
        match self {
            Self::Pending(_) => &[],
            Self::Actions(actions) => actions,
        }
    }

    /// Display metadata for the offered buttons, in display order.
    pub fn buttons<'r>(&self, registry: &'r ActionRegistry) -> Vec<&'r ActionDescriptor> {
        self.actions()
            .iter()
            .filter_map(|&action| registry.descriptor_for(action))
            .collect()
    }
}

fn pending_status(selected_items: &[KeyedEntry]) -> Option<PendingStatus> {
    let mut fields = selected_items
        .iter()
        .map(|e| e.extra("action").and_then(|v| v.as_str()).filter(|s| !s.is_empty()));
    let first = fields.next().flatten()?;
    fields
        .all(|field| field == Some(first))
        .then(|| PendingStatus::from_field(first))
}
