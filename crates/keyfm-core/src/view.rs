//! Flattened, render-ready rows for the presentation layer.
//!
//! A [`BrowserView`] is computed from the grouped and sorted tree plus the
//! current [`BrowserState`]. Without a filter, a folder's children are
//! listed only while it is open. With a filter every level is listed flat
//! at depth 0, folders are hidden unless configured otherwise, and the
//! rows are cut to the current page.

use crate::entry::KeyedEntry;
use crate::state::{ActiveAction, BrowserState};

/// One visible line of the browser.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub entry: KeyedEntry,
    /// Nesting level; always 0 while filtering.
    pub depth: usize,
    pub selected: bool,
    /// Folder rows only: whether the children are listed.
    pub open: bool,
    pub renaming: bool,
    pub deleting: bool,
    pub draft: bool,
}

/// Everything the presentation layer needs for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserView {
    tree: Vec<KeyedEntry>,
    rows: Vec<Row>,
    selected_items: Vec<KeyedEntry>,
    total_rows: usize,
    has_more: bool,
}

impl BrowserView {
    pub(crate) fn build(tree: Vec<KeyedEntry>, state: &BrowserState, show_folders_on_filter: bool) -> Self {
        let filtering = !state.name_filter().is_empty();
        let mut rows = collect_rows(&tree, state, filtering, show_folders_on_filter);
        let total_rows = rows.len();
        let has_more = filtering && total_rows > state.results_shown();
        if has_more {
            rows.truncate(state.results_shown());
        }
        let selected_items = selected_items(&tree, state);
        Self {
            tree,
            rows,
            selected_items,
            total_rows,
            has_more,
        }
    }

    /// The grouped and sorted tree the rows were taken from.
    pub fn tree(&self) -> &[KeyedEntry] {
        &self.tree
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Tree entries whose key is selected, in tree order.
    pub fn selected_items(&self) -> &[KeyedEntry] {
        &self.selected_items
    }

    /// Row count before paging.
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// `true` when a filter is active and rows were cut off by paging.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn collect_rows(
    tree: &[KeyedEntry],
    state: &BrowserState,
    filtering: bool,
    show_folders_on_filter: bool,
) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut stack: Vec<(&KeyedEntry, usize)> = tree.iter().rev().map(|e| (e, 0)).collect();

    while let Some((entry, depth)) = stack.pop() {
        let is_folder = entry.is_folder();
        let open = is_folder && (filtering || state.is_open(entry.key()));

        if !is_folder || !filtering || show_folders_on_filter {
            rows.push(Row {
                entry: entry.clone(),
                depth: if filtering { 0 } else { depth },
                selected: state.is_selected(entry.key()),
                open,
                renaming: state.is_target_of(entry.key(), ActiveAction::Rename),
                deleting: state.is_target_of(entry.key(), ActiveAction::Delete),
                draft: entry.is_draft(),
            });
        }

        if open {
            if let Some(children) = entry.children() {
                stack.extend(children.iter().rev().map(|c| (c, depth + 1)));
            }
        }
    }
    rows
}

pub(crate) fn selected_items(tree: &[KeyedEntry], state: &BrowserState) -> Vec<KeyedEntry> {
    let mut found = Vec::new();
    for entry in tree {
        entry.walk(&mut |e| {
            if state.is_selected(e.key()) {
                found.push(e.clone());
            }
        });
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(key: &str, children: Vec<KeyedEntry>) -> KeyedEntry {
        KeyedEntry::new(key).with_children(Some(children))
    }

    fn tree() -> Vec<KeyedEntry> {
        vec![
            folder(
                "a/",
                vec![
                    folder("a/b/", vec![KeyedEntry::new("a/b/deep.txt")]),
                    KeyedEntry::new("a/one.txt"),
                ],
            ),
            KeyedEntry::new("top.txt"),
        ]
    }

    fn row_keys(view: &BrowserView) -> Vec<(&str, usize)> {
        view.rows()
            .iter()
            .map(|r| (r.entry.key(), r.depth))
            .collect()
    }

    #[test]
    fn closed_folders_hide_children() {
        let view = BrowserView::build(tree(), &BrowserState::new(), false);
        assert_eq!(row_keys(&view), vec![("a/", 0), ("top.txt", 0)]);
        assert!(!view.has_more());
    }

    #[test]
    fn open_folders_list_children_with_depth() {
        let state = BrowserState::new().open_folder("a/");
        let view = BrowserView::build(tree(), &state, false);
        assert_eq!(
            row_keys(&view),
            vec![("a/", 0), ("a/b/", 1), ("a/one.txt", 1), ("top.txt", 0)]
        );
        assert!(view.rows()[0].open);
        assert!(!view.rows()[1].open);
    }

    #[test]
    fn filter_flattens_and_hides_folders() {
        let state = BrowserState::new().update_filter("txt");
        let view = BrowserView::build(tree(), &state, false);
        assert_eq!(
            row_keys(&view),
            vec![("a/b/deep.txt", 0), ("a/one.txt", 0), ("top.txt", 0)]
        );
    }

    #[test]
    fn filter_can_show_folders() {
        let state = BrowserState::new().update_filter("txt");
        let view = BrowserView::build(tree(), &state, true);
        assert_eq!(view.rows().len(), 5);
        assert!(view.rows().iter().all(|r| r.depth == 0));
    }

    #[test]
    fn filtered_rows_are_paged() {
        let state = BrowserState::with_page_size(2).update_filter("txt");
        let view = BrowserView::build(tree(), &state, false);
        assert_eq!(view.rows().len(), 2);
        assert_eq!(view.total_rows(), 3);
        assert!(view.has_more());

        let state = state.show_more_results();
        let view = BrowserView::build(tree(), &state, false);
        assert_eq!(view.rows().len(), 3);
        assert!(!view.has_more());
    }

    #[test]
    fn unfiltered_rows_are_not_paged() {
        let state = BrowserState::with_page_size(1).open_folder("a/");
        let view = BrowserView::build(tree(), &state, false);
        assert_eq!(view.rows().len(), 4);
        assert!(!view.has_more());
    }

    #[test]
    fn row_flags_follow_state() {
        let state = BrowserState::new()
            .select("top.txt", false)
            .begin_action(ActiveAction::Rename, vec!["top.txt".into()]);
        let view = BrowserView::build(tree(), &state, false);
        let top = &view.rows()[1];
        assert!(top.selected);
        assert!(top.renaming);
        assert!(!top.deleting);
        assert!(!view.rows()[0].selected);
    }

    #[test]
    fn selected_items_are_found_at_any_depth() {
        let state = BrowserState::new()
            .select("a/b/deep.txt", false)
            .select("top.txt", true);
        let view = BrowserView::build(tree(), &state, false);
        let keys: Vec<&str> = view.selected_items().iter().map(KeyedEntry::key).collect();
        assert_eq!(keys, vec!["a/b/deep.txt", "top.txt"]);
    }

    #[test]
    fn empty_tree_gives_empty_view() {
        let view = BrowserView::build(Vec::new(), &BrowserState::new(), false);
        assert!(view.is_empty());
        assert_eq!(view.total_rows(), 0);
    }
}
