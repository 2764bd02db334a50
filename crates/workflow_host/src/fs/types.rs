//! Directory-tree data types shared between the panel core and its backend adapters.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// File extension (without the dot) that marks an entry as a workflow document.
pub const DOCUMENT_EXTENSION: &str = "json";
/// Server config key mirroring the last browsed directory.
pub const LAST_PATH_CONFIG_KEY: &str = "lastPath";
/// Server config key mirroring the list/grid view mode.
pub const VIEW_MODE_CONFIG_KEY: &str = "viewMode";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Kind of a directory entry as reported by the backend.
pub enum EntryKind {
    /// A folder that may contain documents and further folders.
    #[serde(rename = "directory")]
    Directory,
    /// A leaf workflow document.
    #[serde(rename = "workflow", alias = "document")]
    Document,
}

impl EntryKind {
    /// Returns `true` for [`EntryKind::Directory`].
    pub const fn is_directory(self) -> bool {
        matches!(self, Self::Directory)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One row of a server-reported directory listing.
pub struct DirectoryEntry {
    /// Base name of the entry.
    pub name: String,
    /// Relative slash-separated path; unique key for the node.
    pub path: String,
    /// Directory or document.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Last-modified time in unix seconds.
    #[serde(default)]
    pub modified: f64,
    /// Document size in bytes (documents only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Number of documents directly inside (directories only).
    #[serde(
        default,
        rename = "workflow_count",
        alias = "childDocumentCount",
        skip_serializing_if = "Option::is_none"
    )]
    pub child_document_count: Option<u32>,
}

impl DirectoryEntry {
    /// Builds a directory entry.
    pub fn directory(path: &str, child_document_count: u32) -> Self {
        Self {
            name: crate::fs::path::file_name(path).to_string(),
            path: path.to_string(),
            kind: EntryKind::Directory,
            modified: 0.0,
            size: None,
            child_document_count: Some(child_document_count),
        }
    }

    /// Builds a document entry.
    pub fn document(path: &str, size: u64, modified: f64) -> Self {
        Self {
            name: crate::fs::path::file_name(path).to_string(),
            path: path.to_string(),
            kind: EntryKind::Document,
            modified,
            size: Some(size),
            child_document_count: None,
        }
    }

    /// Returns `true` when the entry is a directory.
    pub fn is_directory(&self) -> bool {
        self.kind.is_directory()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Panel presentation mode.
pub enum ViewMode {
    /// Detail rows; supports inline folder expansion.
    #[default]
    List,
    /// Thumbnail tiles; shows previews, never expansion.
    Grid,
}

impl ViewMode {
    /// Stable token used for persistence and CSS hooks.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Grid => "grid",
        }
    }

    /// Returns the other mode.
    pub const fn toggled(self) -> Self {
        match self {
            Self::List => Self::Grid,
            Self::Grid => Self::List,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Server-side panel configuration delivered alongside browse results.
pub struct PanelConfig {
    /// Preferred view mode, if the server has one stored.
    #[serde(default)]
    pub view_mode: Option<ViewMode>,
    /// Last directory the user browsed.
    #[serde(default)]
    pub last_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Successful payload of a directory browse request.
pub struct BrowseResult {
    /// Child entries of the requested directory, in server order.
    #[serde(default)]
    pub items: Vec<DirectoryEntry>,
    /// Optional panel configuration.
    #[serde(default)]
    pub config: Option<PanelConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One document queued for upload into a target directory.
pub struct UploadFile {
    /// File name (no directory component).
    pub name: String,
    /// UTF-8 document body.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A preview image returned by the backend.
pub struct PreviewImage {
    /// MIME type (for example `image/png`).
    pub content_type: String,
    /// Raw image bytes.
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A user-chosen image replacing a document's preview.
pub struct PreviewUpload {
    /// Original file name of the image.
    pub file_name: String,
    /// MIME type reported by the picker.
    pub content_type: String,
    /// Raw image bytes.
    pub bytes: Vec<u8>,
}

impl PreviewUpload {
    /// Returns `true` when the content type is an `image/*` type.
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
/// A file or folder dropped onto the panel from outside the application.
pub enum DroppedItem {
    /// A dropped file with its text contents.
    File {
        /// File name.
        name: String,
        /// File contents decoded as UTF-8.
        text: String,
    },
    /// A dropped folder and everything inside it.
    Directory {
        /// Folder name.
        name: String,
        /// Child files and folders.
        #[serde(default)]
        children: Vec<DroppedItem>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A document fetched for opening in the host editor.
pub struct OpenDocumentRequest {
    /// Relative document path; opaque, case-sensitive identifier for the host.
    pub path: String,
    /// Display name (file name without the document extension).
    pub title: String,
    /// Parsed document body.
    pub document: Value,
}

impl OpenDocumentRequest {
    /// Builds a request from a document path and its parsed body.
    pub fn new(path: &str, document: Value) -> Self {
        let name = crate::fs::path::file_name(path);
        Self {
            path: path.to_string(),
            title: crate::fs::path::strip_extension(name, DOCUMENT_EXTENSION).to_string(),
            document,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn directory_entry_reads_backend_wire_names() {
        let raw = json!([
            {"name": "a", "path": "a", "type": "directory", "modified": 10.5, "workflow_count": 2},
            {"name": "b.json", "path": "b.json", "type": "workflow", "modified": 1000, "size": 120}
        ]);
        let entries: Vec<DirectoryEntry> = serde_json::from_value(raw).expect("deserialize");

        assert_eq!(entries[0], {
            let mut dir = DirectoryEntry::directory("a", 2);
            dir.modified = 10.5;
            dir
        });
        assert_eq!(entries[1], DirectoryEntry::document("b.json", 120, 1000.0));
        assert!(entries[0].is_directory());
    }

    #[test]
    fn entry_kind_accepts_document_alias_and_serializes_backend_token() {
        let kind: EntryKind = serde_json::from_str("\"document\"").expect("deserialize");
        assert_eq!(kind, EntryKind::Document);
        assert_eq!(
            serde_json::to_string(&EntryKind::Document).expect("serialize"),
            "\"workflow\""
        );
    }

    #[test]
    fn panel_config_uses_camel_case_keys() {
        let config: PanelConfig =
            serde_json::from_value(json!({"viewMode": "grid", "lastPath": "a/b"}))
                .expect("deserialize");
        assert_eq!(config.view_mode, Some(ViewMode::Grid));
        assert_eq!(config.last_path.as_deref(), Some("a/b"));
        assert_eq!(ViewMode::Grid.toggled(), ViewMode::List);
    }

    #[test]
    fn dropped_items_are_tagged_by_kind() {
        let tree: DroppedItem = serde_json::from_value(json!({
            "kind": "directory",
            "name": "pack",
            "children": [{"kind": "file", "name": "x.json", "text": "{}"}]
        }))
        .expect("deserialize");
        match tree {
            DroppedItem::Directory { name, children } => {
                assert_eq!(name, "pack");
                assert_eq!(children.len(), 1);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn open_request_title_drops_document_extension() {
        let request = OpenDocumentRequest::new("team/flow.JSON", json!({"nodes": []}));
        assert_eq!(request.title, "flow");
        assert_eq!(request.path, "team/flow.JSON");
    }
}
