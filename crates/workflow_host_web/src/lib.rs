//! Browser (`wasm32`) implementations of the [`workflow_host`] service contracts.
//!
//! This crate is the concrete browser-side wiring for the workflow panel: the HTTP directory
//! backend, DOM toasts, the `setTimeout` timer, the host editor opener chain, and native drop
//! and file-picker input. All JS interop lives in the private `bridge` module, which compiles to
//! an "unsupported" shim outside wasm32 so the crate still builds and tests natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Browser composition of the panel's host services.
pub mod adapters;
mod bridge;
pub mod client;
pub mod dom;
pub mod notifications;
pub mod openers;
pub mod routes;
pub mod timer;

pub use adapters::build_host_services;
pub use client::HttpDirectoryClient;
pub use dom::{dropped_items, pick_preview_image, preview_url, revoke_preview_url};
pub use notifications::ToastNotificationService;
pub use openers::{default_openers, EditorStrategy, HostEditorOpener};
pub use routes::ApiRoutes;
pub use timer::WebTimer;
