//! Owner-supplied callbacks.
//!
//! Backend callbacks (create, move, rename, delete, download) double as
//! capability flags: when one is not registered, the matching operation is
//! unsupported and the coordinator neither calls out nor changes state.
//! Notification callbacks (select, folder open/close, preview) are purely
//! informational.
//!
//! All callbacks are fire-and-forget. The core never waits for the backend
//! and has no failure channel; a failed backend call shows up as a
//! corrected entry list on the next cycle.

use std::fmt;

use crate::entry::KeyedEntry;

type CreateFilesFn = Box<dyn FnMut(&[KeyedEntry], &str)>;
type KeyFn = Box<dyn FnMut(&str)>;
type KeysFn = Box<dyn FnMut(&[String])>;
type MoveFn = Box<dyn FnMut(&str, &str)>;
type EntryFn = Box<dyn FnMut(&KeyedEntry)>;

/// A backend operation the owner may or may not support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    CreateFiles,
    CreateFolder,
    MoveFile,
    MoveFolder,
    RenameFile,
    RenameFolder,
    DeleteFile,
    DeleteFolder,
    DownloadFile,
    DownloadFolder,
}

/// The set of callbacks registered by the owner of a browser.
///
/// Build with the `on_*` methods:
///
/// ```
/// use keyfm_core::{Callbacks, Capability};
///
/// let callbacks = Callbacks::new().on_delete_file(|keys| println!("delete {keys:?}"));
/// assert!(callbacks.supports(Capability::DeleteFile));
/// assert!(!callbacks.supports(Capability::RenameFile));
/// ```
#[derive(Default)]
pub struct Callbacks {
    create_files: Option<CreateFilesFn>,
    create_folder: Option<KeyFn>,
    move_file: Option<MoveFn>,
    move_folder: Option<MoveFn>,
    rename_file: Option<MoveFn>,
    rename_folder: Option<MoveFn>,
    delete_file: Option<KeysFn>,
    delete_folder: Option<KeyFn>,
    download_file: Option<KeysFn>,
    download_folder: Option<KeysFn>,
    select: Option<EntryFn>,
    select_file: Option<EntryFn>,
    select_folder: Option<EntryFn>,
    folder_open: Option<EntryFn>,
    folder_close: Option<EntryFn>,
    preview_open: Option<EntryFn>,
    preview_close: Option<EntryFn>,
}

impl Callbacks {
    /// Creates an empty set: every capability unsupported.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the owner registered the callback for `capability`.
    pub fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::CreateFiles => self.create_files.is_some(),
            Capability::CreateFolder => self.create_folder.is_some(),
            Capability::MoveFile => self.move_file.is_some(),
            Capability::MoveFolder => self.move_folder.is_some(),
            Capability::RenameFile => self.rename_file.is_some(),
            Capability::RenameFolder => self.rename_folder.is_some(),
            Capability::DeleteFile => self.delete_file.is_some(),
            Capability::DeleteFolder => self.delete_folder.is_some(),
            Capability::DownloadFile => self.download_file.is_some(),
            Capability::DownloadFolder => self.download_folder.is_some(),
        }
    }

    pub fn on_create_files(mut self, f: impl FnMut(&[KeyedEntry], &str) + 'static) -> Self {
        self.create_files = Some(Box::new(f));
        self
    }

    pub fn on_create_folder(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.create_folder = Some(Box::new(f));
        self
    }

    pub fn on_move_file(mut self, f: impl FnMut(&str, &str) + 'static) -> Self {
        self.move_file = Some(Box::new(f));
        self
    }

    pub fn on_move_folder(mut self, f: impl FnMut(&str, &str) + 'static) -> Self {
        self.move_folder = Some(Box::new(f));
        self
    }

    pub fn on_rename_file(mut self, f: impl FnMut(&str, &str) + 'static) -> Self {
        self.rename_file = Some(Box::new(f));
        self
    }

    pub fn on_rename_folder(mut self, f: impl FnMut(&str, &str) + 'static) -> Self {
        self.rename_folder = Some(Box::new(f));
        self
    }

    pub fn on_delete_file(mut self, f: impl FnMut(&[String]) + 'static) -> Self {
        self.delete_file = Some(Box::new(f));
        self
    }

    pub fn on_delete_folder(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.delete_folder = Some(Box::new(f));
        self
    }

    pub fn on_download_file(mut self, f: impl FnMut(&[String]) + 'static) -> Self {
        self.download_file = Some(Box::new(f));
        self
    }

    pub fn on_download_folder(mut self, f: impl FnMut(&[String]) + 'static) -> Self {
        self.download_folder = Some(Box::new(f));
        self
    }

    pub fn on_select(mut self, f: impl FnMut(&KeyedEntry) + 'static) -> Self {
        self.select = Some(Box::new(f));
        self
    }

    pub fn on_select_file(mut self, f: impl FnMut(&KeyedEntry) + 'static) -> Self {
        self.select_file = Some(Box::new(f));
        self
    }

    pub fn on_select_folder(mut self, f: impl FnMut(&KeyedEntry) + 'static) -> Self {
        self.select_folder = Some(Box::new(f));
        self
    }

    pub fn on_folder_open(mut self, f: impl FnMut(&KeyedEntry) + 'static) -> Self {
        self.folder_open = Some(Box::new(f));
        self
    }

    pub fn on_folder_close(mut self, f: impl FnMut(&KeyedEntry) + 'static) -> Self {
        self.folder_close = Some(Box::new(f));
        self
    }

    pub fn on_preview_open(mut self, f: impl FnMut(&KeyedEntry) + 'static) -> Self {
        self.preview_open = Some(Box::new(f));
        self
    }

    pub fn on_preview_close(mut self, f: impl FnMut(&KeyedEntry) + 'static) -> Self {
        self.preview_close = Some(Box::new(f));
        self
    }

    pub(crate) fn create_files(&mut self, files: &[KeyedEntry], prefix: &str) {
        if let Some(f) = self.create_files.as_mut() {
            f(files, prefix);
        }
    }

    pub(crate) fn create_folder(&mut self, key: &str) {
        if let Some(f) = self.create_folder.as_mut() {
            f(key);
        }
    }

    pub(crate) fn move_file(&mut self, old_key: &str, new_key: &str) {
        if let Some(f) = self.move_file.as_mut() {
            f(old_key, new_key);
        }
    }

    pub(crate) fn move_folder(&mut self, old_key: &str, new_key: &str) {
        if let Some(f) = self.move_folder.as_mut() {
            f(old_key, new_key);
        }
    }

    pub(crate) fn rename_file(&mut self, old_key: &str, new_key: &str) {
        if let Some(f) = self.rename_file.as_mut() {
            f(old_key, new_key);
        }
    }

    pub(crate) fn rename_folder(&mut self, old_key: &str, new_key: &str) {
        if let Some(f) = self.rename_folder.as_mut() {
            f(old_key, new_key);
        }
    }

    pub(crate) fn delete_file(&mut self, keys: &[String]) {
        if let Some(f) = self.delete_file.as_mut() {
            f(keys);
        }
    }

    pub(crate) fn delete_folder(&mut self, key: &str) {
        if let Some(f) = self.delete_folder.as_mut() {
            f(key);
        }
    }

    pub(crate) fn download_file(&mut self, keys: &[String]) {
        if let Some(f) = self.download_file.as_mut() {
            f(keys);
        }
    }

    pub(crate) fn download_folder(&mut self, keys: &[String]) {
        if let Some(f) = self.download_folder.as_mut() {
            f(keys);
        }
    }

    /// Fires `on_select` and then the kind-specific select callback.
    pub(crate) fn selected(&mut self, entry: &KeyedEntry) {
        notify(&mut self.select, entry);
        if entry.is_folder() {
            notify(&mut self.select_folder, entry);
        } else {
            notify(&mut self.select_file, entry);
        }
    }

    pub(crate) fn folder_opened(&mut self, entry: &KeyedEntry) {
        notify(&mut self.folder_open, entry);
    }

    pub(crate) fn folder_closed(&mut self, entry: &KeyedEntry) {
        notify(&mut self.folder_close, entry);
    }

    pub(crate) fn preview_opened(&mut self, entry: &KeyedEntry) {
        notify(&mut self.preview_open, entry);
    }

    pub(crate) fn preview_closed(&mut self, entry: &KeyedEntry) {
        notify(&mut self.preview_close, entry);
    }
}

fn notify(callback: &mut Option<EntryFn>, entry: &KeyedEntry) {
    if let Some(f) = callback.as_mut() {
        f(entry);
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registered: Vec<&str> = [
            ("create_files", self.create_files.is_some()),
            ("create_folder", self.create_folder.is_some()),
            ("move_file", self.move_file.is_some()),
            ("move_folder", self.move_folder.is_some()),
            ("rename_file", self.rename_file.is_some()),
            ("rename_folder", self.rename_folder.is_some()),
            ("delete_file", self.delete_file.is_some()),
            ("delete_folder", self.delete_folder.is_some()),
            ("download_file", self.download_file.is_some()),
            ("download_folder", self.download_folder.is_some()),
            ("select", self.select.is_some()),
            ("select_file", self.select_file.is_some()),
            ("select_folder", self.select_folder.is_some()),
            ("folder_open", self.folder_open.is_some()),
            ("folder_close", self.folder_close.is_some()),
            ("preview_open", self.preview_open.is_some()),
            ("preview_close", self.preview_close.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect();
        f.debug_struct("Callbacks")
            .field("registered", &registered)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn empty_set_supports_nothing() {
        let callbacks = Callbacks::new();
        for capability in [
            Capability::CreateFiles,
            Capability::CreateFolder,
            Capability::MoveFile,
            Capability::MoveFolder,
            Capability::RenameFile,
            Capability::RenameFolder,
            Capability::DeleteFile,
            Capability::DeleteFolder,
            Capability::DownloadFile,
            Capability::DownloadFolder,
        ] {
            assert!(!callbacks.supports(capability), "{capability:?}");
        }
    }

    #[test]
    fn select_fires_generic_then_kind_specific() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (a, b, c) = (log.clone(), log.clone(), log.clone());
        let mut callbacks = Callbacks::new()
            .on_select(move |e| a.borrow_mut().push(format!("select {}", e.key())))
            .on_select_file(move |e| b.borrow_mut().push(format!("file {}", e.key())))
            .on_select_folder(move |e| c.borrow_mut().push(format!("folder {}", e.key())));

        callbacks.selected(&KeyedEntry::new("a.txt"));
        callbacks.selected(&KeyedEntry::new("d/"));

        assert_eq!(
            *log.borrow(),
            vec!["select a.txt", "file a.txt", "select d/", "folder d/"]
        );
    }

    #[test]
    fn missing_callback_is_silent() {
        let mut callbacks = Callbacks::new();
        callbacks.delete_file(&["a".to_string()]);
        callbacks.folder_opened(&KeyedEntry::new("a/"));
    }

    #[test]
    fn debug_lists_registered_callbacks() {
        let callbacks = Callbacks::new().on_create_folder(|_| {});
        let debug = format!("{callbacks:?}");
        assert!(debug.contains("create_folder"));
        assert!(!debug.contains("delete_file"));
    }
}
