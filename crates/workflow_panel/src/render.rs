//! Pure reconciliation of a listing snapshot with view state into ordered rows.

use std::collections::HashSet;

use workflow_host::{DirectoryEntry, ViewMode};

use crate::model::{ListingTree, RenderRow, ViewState};
use crate::sort::sorted_entries;

/// Flattens `tree` into render order.
///
/// Each listing is sorted independently; an expanded folder's children follow its row directly.
/// Grid mode never inlines children.
pub fn build_rows(tree: &ListingTree, state: &ViewState) -> Vec<RenderRow> {
    let mut rows = Vec::new();
    push_listing(&mut rows, tree, state, &tree.root, 0);
    rows
}

fn push_listing(
    rows: &mut Vec<RenderRow>,
    tree: &ListingTree,
    state: &ViewState,
    entries: &[DirectoryEntry],
    depth: usize,
) {
    for entry in sorted_entries(entries, state.sort_key, state.sort_order) {
        let children = (state.view_mode == ViewMode::List
            && entry.is_directory()
            && state.expanded_folders.contains(&entry.path))
        .then(|| tree.children.get(&entry.path))
        .flatten();

        rows.push(RenderRow {
            visible: state.matches_filter(&entry.name),
            selected: state.is_selected(&entry.path),
            expanded: children.is_some(),
            depth,
            entry,
        });
        if let Some(children) = children {
            push_listing(rows, tree, state, children, depth + 1);
        }
    }
}

/// Paths of the rows a user can see, in render order.
pub fn visible_order(rows: &[RenderRow]) -> Vec<String> {
    rows.iter()
        .filter(|row| row.visible)
        .map(|row| row.entry.path.clone())
        .collect()
}

/// Drops selection members that are no longer rendered and repairs the anchor.
///
/// Returns `true` when the selection changed.
pub fn prune_selection(state: &mut ViewState, rows: &mut [RenderRow]) -> bool {
    let present: HashSet<&str> = rows.iter().map(|row| row.entry.path.as_str()).collect();
    let before = state.selected_items.len();
    state
        .selected_items
        .retain(|path| present.contains(path.as_str()));
    let changed = before != state.selected_items.len();
    crate::selection::repair_anchor(state);
    for row in rows.iter_mut() {
        row.selected = state.selected_items.contains(&row.entry.path);
    }
    changed
}
