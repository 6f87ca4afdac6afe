//! KeyFM core library: a key-derived virtual file tree.
//!
//! `keyfm-core` presents a flat list of path-like keys
//! (`"photos/cats/a.png"`) as an interactive folder tree. It synthesizes the
//! folders the keys imply, orders them, and keeps selection and open-folder
//! state consistent while the owner's storage backend applies create,
//! rename, move and delete requests. It does no I/O and draws nothing.
//!
//! # Modules
//!
//! - [`key`]: Pure path-key helpers for names, parents and key rewriting.
//! - [`entry`]: [`KeyedEntry`], the immutable file/folder value.
//! - [`group`]: Tree synthesis by folder path or by modification time window.
//! - [`sort`]: Recursive natural-name or modification-time ordering.
//! - [`filter`]: Term and fuzzy name filters.
//! - [`state`]: [`BrowserState`], the selection/action state machine.
//! - [`browser`]: [`FileBrowser`], the mutation coordinator.
//! - [`view`], [`action`]: Render-ready rows and toolbar actions.
//! - [`event`]: [`Intent`] values for driving the browser.
//! - [`config`]: TOML-based configuration.
//! - [`error`]: Unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod action;
pub mod browser;
pub mod callbacks;
pub mod config;
pub mod entry;
pub mod error;
pub mod event;
pub mod filter;
pub mod group;
pub mod key;
pub mod sort;
pub mod state;
pub mod view;

pub use action::{ActionBar, ActionDescriptor, ActionRegistry, PendingStatus, ToolbarAction};
pub use browser::{Dispatch, FileBrowser};
pub use callbacks::{Callbacks, Capability};
pub use config::{BrowserConfig, Config};
pub use entry::{lookup, EntryKind, KeyedEntry};
pub use error::{CoreError, CoreResult};
pub use event::Intent;
pub use filter::{filter_entries, fuzzy_filter, FilterMode, FuzzyMatch};
pub use group::{group_by_folder, group_by_modified, Grouping, TimeWindow};
pub use sort::{natural_cmp, sort_by_modified, sort_by_name, Sorting};
pub use state::{ActiveAction, BrowserState, RESULTS_PER_PAGE};
pub use view::{BrowserView, Row};

/// Normalises a string to NFC (composed) form.
///
/// Keys coming from macOS file systems are often NFD (decomposed), so
/// Korean Hangul shows up as individual Jamo and fails to match a composed
/// filter term. This helper re-composes them.
pub fn nfc_string(s: &str) -> String {
    use unicode_normalization::UnicodeNormalization;
    s.nfc().collect()
}
