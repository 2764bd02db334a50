//! View-model state owned by one panel instance.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use workflow_host::{DirectoryEntry, ViewMode};

use crate::preview::PreviewCache;

/// Client-side bound on a preview image fetch.
pub const PREVIEW_TIMEOUT_MS: u32 = 8_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Column the listing is sorted by.
pub enum SortKey {
    /// Entry name.
    #[default]
    Name,
    /// Modification time.
    Modified,
    /// Document size (directories count as zero).
    Size,
}

impl SortKey {
    /// Stable token used by sort controls.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Modified => "modified",
            Self::Size => "size",
        }
    }

    /// Parses a sort control token.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "name" => Some(Self::Name),
            "modified" => Some(Self::Modified),
            "size" => Some(Self::Size),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Direction of the active sort.
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortOrder {
    /// Returns the opposite direction.
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Whether a pending paste moves or duplicates its items.
pub enum ClipboardOp {
    /// Move on paste; the clipboard empties after a successful paste.
    Cut,
    /// Copy on paste; the clipboard survives for repeated pastes.
    Copy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Paths staged by cut or copy.
pub struct Clipboard {
    /// Staged paths in selection order.
    pub paths: Vec<String>,
    /// Pending operation.
    pub operation: ClipboardOp,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Options for a directory load.
pub struct LoadOptions {
    /// Keep the local view mode even if the server reports a different one.
    pub skip_view_mode_apply: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Mutable UI state of one panel.
///
/// Invariants maintained by the panel after every reconciliation:
/// - every path in `selected_items` is present in the rendered rows;
/// - `last_selected_item`, when set, is a member of `selected_items`;
/// - `expanded_folders` is empty in grid mode.
pub struct ViewState {
    /// Directory shown at the top level (`""` = root).
    pub current_path: String,
    /// Highlighted paths.
    pub selected_items: BTreeSet<String>,
    /// Anchor for range selection.
    pub last_selected_item: Option<String>,
    /// Pending cut or copy.
    pub clipboard: Option<Clipboard>,
    /// Active sort column.
    pub sort_key: SortKey,
    /// Active sort direction.
    pub sort_order: SortOrder,
    /// Folders whose children are inlined (list mode only).
    pub expanded_folders: BTreeSet<String>,
    /// Fetched preview images keyed by document path.
    pub image_cache: PreviewCache,
    /// List or grid presentation.
    pub view_mode: ViewMode,
    /// Search term; non-matching rows stay rendered but hidden.
    pub filter: String,
}

impl ViewState {
    /// Returns `true` when `path` is selected.
    pub fn is_selected(&self, path: &str) -> bool {
        self.selected_items.contains(path)
    }

    /// Returns `true` when `name` passes the search filter (case-insensitive substring).
    pub fn matches_filter(&self, name: &str) -> bool {
        let term = self.filter.trim();
        term.is_empty() || name.to_lowercase().contains(&term.to_lowercase())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Latest server snapshot: the current directory plus every inlined folder listing.
pub struct ListingTree {
    /// Entries of `current_path`, in server order.
    pub root: Vec<DirectoryEntry>,
    /// Entries of expanded folders keyed by folder path, in server order.
    pub children: HashMap<String, Vec<DirectoryEntry>>,
}

#[derive(Debug, Clone, PartialEq)]
/// One row of the flattened render model.
pub struct RenderRow {
    /// Entry shown by this row.
    pub entry: DirectoryEntry,
    /// Nesting depth (0 = child of `current_path`).
    pub depth: usize,
    /// Folder row with its children inlined below.
    pub expanded: bool,
    /// Row passes the search filter.
    pub visible: bool,
    /// Row is part of the selection.
    pub selected: bool,
}

impl RenderRow {
    /// Row key.
    pub fn path(&self) -> &str {
        &self.entry.path
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Row counts shown in the status bar.
pub struct PanelStatus {
    /// Rendered rows, including filtered ones.
    pub total: usize,
    /// Rows passing the filter.
    pub visible: usize,
    /// Selected rows.
    pub selected: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Properties of the current selection, in render order.
pub struct SelectionProperties {
    /// Selected entries as last listed by the server.
    pub entries: Vec<DirectoryEntry>,
    /// Selected folders.
    pub folders: usize,
    /// Selected documents.
    pub documents: usize,
    /// Bytes across the selected documents.
    pub total_size: u64,
    /// Documents reported directly inside the selected folders.
    pub nested_documents: u64,
}

impl SelectionProperties {
    /// Summarizes `entries`.
    pub fn from_entries(entries: Vec<DirectoryEntry>) -> Self {
        let mut properties = Self::default();
        for entry in &entries {
            if entry.kind.is_directory() {
                properties.folders += 1;
                properties.nested_documents += u64::from(entry.child_document_count.unwrap_or(0));
            } else {
                properties.documents += 1;
                properties.total_size += entry.size.unwrap_or(0);
            }
        }
        properties.entries = entries;
        properties
    }

    /// The entry when exactly one item is selected.
    pub fn single(&self) -> Option<&DirectoryEntry> {
        match self.entries.as_slice() {
            [entry] => Some(entry),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_is_case_insensitive_substring() {
        let mut state = ViewState::default();
        assert!(state.matches_filter("anything"));
        state.filter = " FLOW ".to_string();
        assert!(state.matches_filter("my_flow.json"));
        assert!(!state.matches_filter("other.json"));
    }

    #[test]
    fn sort_tokens_round_trip() {
        for key in [SortKey::Name, SortKey::Modified, SortKey::Size] {
            assert_eq!(SortKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(SortKey::parse("type"), None);
        assert_eq!(SortOrder::Asc.reversed(), SortOrder::Desc);
    }

    #[test]
    fn selection_properties_count_folders_and_documents() {
        let properties = SelectionProperties::from_entries(vec![
            DirectoryEntry::directory("team", 3),
            DirectoryEntry::document("a.json", 100, 1.0),
            DirectoryEntry::document("b.json", 50, 2.0),
        ]);
        assert_eq!(properties.folders, 1);
        assert_eq!(properties.documents, 2);
        assert_eq!(properties.total_size, 150);
        assert_eq!(properties.nested_documents, 3);
        assert_eq!(properties.single(), None);

        let one = SelectionProperties::from_entries(vec![DirectoryEntry::directory("x", 0)]);
        assert_eq!(one.single().map(|entry| entry.path.as_str()), Some("x"));
    }
}
