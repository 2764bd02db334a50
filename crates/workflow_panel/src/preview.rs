//! Preview thumbnails: the per-panel image cache and fetch/replace operations.

use std::collections::HashMap;

use futures::future::{select, Either};
use leptos::logging::warn;
use workflow_host::{
    is_same_or_descendant, strip_extension, EntryKind, NotificationLevel, PreviewImage,
    PreviewUpload, DOCUMENT_EXTENSION,
};

use crate::error::PanelError;
use crate::model::PREVIEW_TIMEOUT_MS;
use crate::panel::{PanelEvent, WorkflowPanel};

#[derive(Debug, Clone, Default, PartialEq)]
/// Fetched preview images keyed by document path.
pub struct PreviewCache {
    entries: HashMap<String, PreviewImage>,
}

impl PreviewCache {
    /// Cached image for `path`.
    pub fn get(&self, path: &str) -> Option<&PreviewImage> {
        self.entries.get(path)
    }

    /// Returns `true` when `path` has a cached image.
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Stores an image for `path`.
    pub fn insert(&mut self, path: &str, image: PreviewImage) {
        self.entries.insert(path.to_string(), image);
    }

    /// Number of cached images.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry that may show the node at `path`.
    ///
    /// Covers the exact key, keys equal to it once the document extension is stripped, and every
    /// key beneath it when `path` is a folder.
    pub fn invalidate(&mut self, path: &str) {
        let stem = strip_extension(path, DOCUMENT_EXTENSION);
        self.entries.retain(|key, _| {
            !(is_same_or_descendant(key, path) || strip_extension(key, DOCUMENT_EXTENSION) == stem)
        });
    }

    /// Drops everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl WorkflowPanel {
    /// Counter bumped each time the preview of `path` is replaced or refetched.
    ///
    /// Renderers holding a decoded image for `path` redraw it when this changes.
    pub fn preview_revision(&self, path: &str) -> u64 {
        self.preview_revisions
            .borrow()
            .get(path)
            .copied()
            .unwrap_or(0)
    }

    fn preview_changed(&self, path: &str) {
        *self
            .preview_revisions
            .borrow_mut()
            .entry(path.to_string())
            .or_insert(0) += 1;
        self.emit(PanelEvent::PreviewChanged(path.to_string()));
    }

    /// Returns the preview for a document, fetching it on a cache miss.
    ///
    /// A fetch slower than the preview timeout, a failure, or a document without a preview all
    /// yield `None`; the renderer shows its placeholder icon.
    pub async fn load_preview(&self, path: &str) -> Option<PreviewImage> {
        if let Some(image) = self.state.borrow().image_cache.get(path) {
            return Some(image.clone());
        }

        let fetch = self.services.directory.fetch_preview(path);
        let timeout = self.services.timer.sleep_ms(PREVIEW_TIMEOUT_MS);
        match select(fetch, timeout).await {
            Either::Left((Ok(Some(image)), _)) => {
                self.state
                    .borrow_mut()
                    .image_cache
                    .insert(path, image.clone());
                Some(image)
            }
            Either::Left((Ok(None), _)) => None,
            Either::Left((Err(err), _)) => {
                warn!("workflow panel: preview of {path:?} failed: {err}");
                None
            }
            Either::Right(((), _)) => {
                warn!("workflow panel: preview of {path:?} timed out");
                None
            }
        }
    }

    /// Drops and refetches the previews of the selected documents; returns how many loaded.
    pub async fn refresh_previews(&self) -> Result<usize, PanelError> {
        let documents: Vec<String> = self
            .view_state()
            .selected_items
            .into_iter()
            .filter(|path| self.kind_of(path) == Some(EntryKind::Document))
            .collect();
        if documents.is_empty() {
            return self.fail(PanelError::NothingSelected).await;
        }

        let mut loaded = 0;
        for path in &documents {
            self.state.borrow_mut().image_cache.invalidate(path);
            if self.load_preview(path).await.is_some() {
                loaded += 1;
            }
            self.preview_changed(path);
        }
        self.notify(
            NotificationLevel::Info,
            &format!("Refreshed {loaded} of {} previews", documents.len()),
        )
        .await;
        Ok(loaded)
    }

    /// Replaces the preview image of the document at `path`.
    pub async fn change_preview(
        &self,
        path: &str,
        upload: &PreviewUpload,
    ) -> Result<(), PanelError> {
        if !upload.is_image() {
            return self
                .fail(PanelError::NotAnImage(upload.file_name.clone()))
                .await;
        }
        if let Err(err) = self.services.directory.upload_preview(path, upload).await {
            return self.fail(PanelError::Backend(err)).await;
        }
        self.state.borrow_mut().image_cache.invalidate(path);
        self.preview_changed(path);
        self.notify(NotificationLevel::Success, "Preview updated").await;
        Ok(())
    }
}
