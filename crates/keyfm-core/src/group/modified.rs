//! Grouping by relative modification time.

use chrono::{DateTime, Local, TimeZone};

use super::windows::{relative_time_windows, TimeWindow};
use crate::entry::KeyedEntry;

/// Groups the files in `entries` into relative time windows as of now,
/// using the local time zone.
///
/// See [`group_by_modified_at`].
pub fn group_by_modified(entries: &[KeyedEntry], root: &str) -> Vec<KeyedEntry> {
    group_by_modified_at(entries, root, &Local::now())
}

/// Groups the files in `entries` into time windows relative to `now`.
///
/// Folder entries are skipped. Each file goes to the first window whose
/// `(begins, ends]` interval holds its modification time (unknown times
/// count as epoch 0). A file that fits no window opens a new window for its
/// calendar month, which later files can also join. Windows that end up
/// empty are dropped; every other window becomes a synthesized folder keyed
/// by `root` plus the normalized window name.
pub fn group_by_modified_at<Tz: TimeZone>(
    entries: &[KeyedEntry],
    root: &str,
    now: &DateTime<Tz>,
) -> Vec<KeyedEntry> {
    let tz = now.timezone();
    let mut windows = relative_time_windows(now);

    for entry in entries.iter().filter(|e| !e.is_folder()) {
        let leaf = entry.clone().with_key_derived(true);
        let modified = leaf.modified_or_epoch();
        if let Some(idx) = windows.iter().position(|w| w.contains(modified)) {
            windows[idx].push(leaf);
            continue;
        }
        let mut window = TimeWindow::month_of(modified, &tz);
        let key = window.key();
        match windows.iter().position(|w| w.key() == key) {
            Some(idx) => windows[idx].push(leaf),
            None => {
                window.push(leaf);
                windows.push(window);
            }
        }
    }

    windows
        .into_iter()
        .filter(|w| !w.items().is_empty())
        .map(|w| {
            let relative = w.key();
            let name = w.name().to_string();
            KeyedEntry::new(format!("{root}{relative}"))
                .with_name(Some(name))
                .with_relative_key(relative)
                .with_size(0)
                .with_key_derived(true)
                .with_children(Some(w.into_items()))
        })
        .collect()
}
