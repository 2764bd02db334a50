//! Directory view-model for the workflow sidebar.
//!
//! [`WorkflowPanel`] reconciles server directory snapshots with local UI state (selection,
//! expansion, sort, clipboard, preview cache) and runs every user operation as a
//! backend-call-then-reload cycle. Rendering is left to the embedding UI, which observes the panel
//! through [`PanelObserver`] and reads [`RenderRow`]s.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod drag_drop;
pub mod error;
pub mod keymap;
pub mod model;
pub mod open;
pub mod operations;
pub mod panel;
pub mod preview;
pub mod render;
pub mod selection;
pub mod sort;
pub mod upload;

#[cfg(test)]
mod test_support;

pub use drag_drop::{is_valid_drop_target, DragPhase, DragSession, DropEffect, DropTarget};
pub use error::PanelError;
pub use keymap::{command_for_key, KeyContext, PanelCommand};
pub use model::{
    Clipboard, ClipboardOp, ListingTree, LoadOptions, PanelStatus, RenderRow, SelectionProperties,
    SortKey, SortOrder, ViewState, PREVIEW_TIMEOUT_MS,
};
pub use open::open_with_chain;
pub use operations::{predicted_rename_target, BatchTally};
pub use panel::{PanelEvent, PanelObserver, WorkflowPanel};
pub use preview::PreviewCache;
pub use render::{build_rows, visible_order};
pub use selection::Modifiers;
pub use upload::{plan_external_drop, UploadPlan};
