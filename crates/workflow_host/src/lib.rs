//! Typed host contracts and shared models for the workflow directory panel.
//!
//! This crate is the boundary between the panel core and its environment. It exposes the
//! directory-tree wire models, path helpers, and the backend, notification, timer, and editor
//! opener service traits, plus in-memory adapters. Browser adapters live in `workflow_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod fs;
pub mod host;
pub mod notifications;
pub mod opener;
pub mod time;

pub use fs::format::{format_date, format_file_size};
pub use fs::memory::{DirectoryCall, MemoryDirectoryClient};
pub use fs::path::{
    breadcrumbs, file_name, has_extension, is_same_or_descendant, is_strict_descendant,
    is_within_any, join_path, normalize_tree_path, parent_path, strip_extension, Breadcrumb,
};
pub use fs::service::{DirectoryClient, DirectoryFuture, NoopDirectoryClient};
pub use fs::types::{
    BrowseResult, DirectoryEntry, DroppedItem, EntryKind, OpenDocumentRequest, PanelConfig,
    PreviewImage, PreviewUpload, UploadFile, ViewMode, DOCUMENT_EXTENSION, LAST_PATH_CONFIG_KEY,
    VIEW_MODE_CONFIG_KEY,
};
pub use host::{HostStrategy, PanelHostServices};
pub use notifications::{
    MemoryNotificationService, NoopNotificationService, NotificationFuture, NotificationLevel,
    NotificationService,
};
pub use opener::{DocumentOpener, MemoryDocumentOpener, OpenerFuture};
pub use time::{unix_time_ms_now, ImmediateTimer, PendingTimer, Timer, TimerFuture};
