//! Mutating operations. Each validates cheaply, calls the backend, invalidates affected previews,
//! reports one aggregate notification, and reloads the current directory after any success.

use leptos::logging::warn;
use workflow_host::{
    file_name, has_extension, is_same_or_descendant, join_path, parent_path, DroppedItem,
    EntryKind, NotificationLevel, DOCUMENT_EXTENSION,
};

use crate::drag_drop::{is_valid_drop_target, DropEffect, DropTarget};
use crate::error::PanelError;
use crate::model::{Clipboard, ClipboardOp};
use crate::panel::{PanelEvent, WorkflowPanel};
use crate::upload::plan_external_drop;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Outcome counts of a multi-item operation. Individual failures are logged, not returned.
pub struct BatchTally {
    /// Items the backend accepted.
    pub succeeded: usize,
    /// Items rejected locally or by the backend.
    pub failed: usize,
    /// Items excluded before the backend was called (invalid document content).
    pub skipped: usize,
}

impl BatchTally {
    /// Attempted items.
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Notification level for the aggregate report.
    pub fn level(&self) -> NotificationLevel {
        if self.succeeded == 0 {
            NotificationLevel::Error
        } else if self.failed > 0 || self.skipped > 0 {
            NotificationLevel::Warning
        } else {
            NotificationLevel::Success
        }
    }

    /// One-line report such as `Moved 2 of 3 items, 1 failed`.
    pub fn summary(&self, verb: &str) -> String {
        let mut message = format!("{verb} {} of {} items", self.succeeded, self.total());
        if self.failed > 0 {
            message.push_str(&format!(", {} failed", self.failed));
        }
        if self.skipped > 0 {
            message.push_str(&format!(", {} skipped", self.skipped));
        }
        message
    }
}

fn effect_verb(effect: DropEffect) -> &'static str {
    match effect {
        DropEffect::Move => "Moved",
        DropEffect::Copy => "Copied",
    }
}

fn validate_name(name: &str) -> Result<String, PanelError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PanelError::EmptyName);
    }
    if name.contains('/') || name.contains('\\') {
        return Err(PanelError::InvalidName(name.to_string()));
    }
    Ok(name.to_string())
}

/// Path the backend will give `path` after renaming it to `new_name`.
///
/// Documents keep the document extension when the new name omits it.
pub fn predicted_rename_target(path: &str, new_name: &str, kind: EntryKind) -> String {
    let name = if kind == EntryKind::Document && !has_extension(new_name, DOCUMENT_EXTENSION) {
        format!("{new_name}.{DOCUMENT_EXTENSION}")
    } else {
        new_name.to_string()
    };
    join_path(&parent_path(path), &name)
}

impl WorkflowPanel {
    async fn finish_batch(&self, tally: BatchTally, verb: &str) -> BatchTally {
        self.notify(tally.level(), &tally.summary(verb)).await;
        if tally.succeeded > 0 {
            self.reload().await;
        }
        tally
    }

    async fn transfer(
        &self,
        sources: &[String],
        target_dir: &str,
        effect: DropEffect,
    ) -> BatchTally {
        let mut tally = BatchTally::default();
        for source in sources {
            if is_same_or_descendant(target_dir, source) {
                warn!("workflow panel: cannot place {source:?} inside itself ({target_dir:?})");
                tally.failed += 1;
                continue;
            }
            let result = match effect {
                DropEffect::Move => self.services.directory.move_entry(source, target_dir).await,
                DropEffect::Copy => self.services.directory.copy_entry(source, target_dir).await,
            };
            match result {
                Ok(()) => {
                    tally.succeeded += 1;
                    let destination = join_path(target_dir, file_name(source));
                    let mut state = self.state.borrow_mut();
                    if effect == DropEffect::Move {
                        state.image_cache.invalidate(source);
                    }
                    state.image_cache.invalidate(&destination);
                }
                Err(err) => {
                    warn!("workflow panel: {} {source:?} failed: {err}", effect_verb(effect));
                    tally.failed += 1;
                }
            }
        }
        tally
    }

    /// Creates `name` inside the current directory.
    pub async fn create_folder(&self, name: &str) -> Result<(), PanelError> {
        let name = match validate_name(name) {
            Ok(name) => name,
            Err(err) => return self.fail(err).await,
        };
        let parent = self.current_path();
        if let Err(err) = self.services.directory.create_folder(&name, &parent).await {
            return self.fail(PanelError::Backend(err)).await;
        }
        self.notify(NotificationLevel::Success, &format!("Created folder {name}"))
            .await;
        self.reload().await;
        Ok(())
    }

    /// Renames the rendered entry `path`. A name that resolves to the same path does nothing.
    pub async fn rename(&self, path: &str, new_name: &str) -> Result<(), PanelError> {
        let name = match validate_name(new_name) {
            Ok(name) => name,
            Err(err) => return self.fail(err).await,
        };
        let Some(kind) = self.kind_of(path) else {
            return self.fail(PanelError::UnknownEntry(path.to_string())).await;
        };
        let target = predicted_rename_target(path, &name, kind);
        if target == path {
            return Ok(());
        }

        if let Err(err) = self.services.directory.rename(path, &name).await {
            return self.fail(PanelError::Backend(err)).await;
        }
        {
            let mut state = self.state.borrow_mut();
            state.image_cache.invalidate(path);
            state.image_cache.invalidate(&target);
        }
        self.notify(
            NotificationLevel::Success,
            &format!("Renamed to {}", file_name(&target)),
        )
        .await;
        self.reload().await;
        Ok(())
    }

    /// Renames the single selected entry.
    pub async fn rename_selected(&self, new_name: &str) -> Result<(), PanelError> {
        let selected: Vec<String> = self.view_state().selected_items.into_iter().collect();
        match selected.as_slice() {
            [] => self.fail(PanelError::NothingSelected).await,
            [only] => self.rename(only, new_name).await,
            _ => self.fail(PanelError::NotSingleSelection).await,
        }
    }

    /// Deletes every path in `paths`, continuing past failures.
    pub async fn delete_paths(&self, paths: &[String]) -> Result<BatchTally, PanelError> {
        if paths.is_empty() {
            return self.fail(PanelError::NothingSelected).await;
        }
        let mut tally = BatchTally::default();
        for path in paths {
            match self.services.directory.delete(path).await {
                Ok(()) => {
                    tally.succeeded += 1;
                    self.state.borrow_mut().image_cache.invalidate(path);
                }
                Err(err) => {
                    warn!("workflow panel: delete {path:?} failed: {err}");
                    tally.failed += 1;
                }
            }
        }
        Ok(self.finish_batch(tally, "Deleted").await)
    }

    /// Deletes the selection.
    pub async fn delete_selected(&self) -> Result<BatchTally, PanelError> {
        let selected: Vec<String> = self.view_state().selected_items.into_iter().collect();
        self.delete_paths(&selected).await
    }

    /// Moves `sources` into `target_dir`.
    pub async fn move_items(
        &self,
        sources: &[String],
        target_dir: &str,
    ) -> Result<BatchTally, PanelError> {
        if sources.is_empty() {
            return self.fail(PanelError::NothingSelected).await;
        }
        let tally = self.transfer(sources, target_dir, DropEffect::Move).await;
        Ok(self.finish_batch(tally, "Moved").await)
    }

    /// Copies `sources` into `target_dir`.
    pub async fn copy_items(
        &self,
        sources: &[String],
        target_dir: &str,
    ) -> Result<BatchTally, PanelError> {
        if sources.is_empty() {
            return self.fail(PanelError::NothingSelected).await;
        }
        let tally = self.transfer(sources, target_dir, DropEffect::Copy).await;
        Ok(self.finish_batch(tally, "Copied").await)
    }

    async fn stage_selection(&self, operation: ClipboardOp) -> Result<usize, PanelError> {
        let paths: Vec<String> = self.view_state().selected_items.into_iter().collect();
        if paths.is_empty() {
            return self.fail(PanelError::NothingSelected).await;
        }
        let count = paths.len();
        self.state.borrow_mut().clipboard = Some(Clipboard { paths, operation });
        let verb = match operation {
            ClipboardOp::Cut => "cut",
            ClipboardOp::Copy => "copied",
        };
        self.notify(NotificationLevel::Info, &format!("{count} items {verb}"))
            .await;
        Ok(count)
    }

    /// Stages the selection for a move.
    pub async fn cut_selection(&self) -> Result<usize, PanelError> {
        self.stage_selection(ClipboardOp::Cut).await
    }

    /// Stages the selection for a copy.
    pub async fn copy_selection(&self) -> Result<usize, PanelError> {
        self.stage_selection(ClipboardOp::Copy).await
    }

    /// Directory a paste lands in: the single selected folder, else the current directory.
    pub fn paste_target(&self) -> String {
        let state = self.state.borrow();
        if state.selected_items.len() == 1 {
            if let Some(only) = state.selected_items.iter().next() {
                if self.kind_of(only) == Some(EntryKind::Directory) {
                    return only.clone();
                }
            }
        }
        state.current_path.clone()
    }

    /// Applies the clipboard. A cut clipboard empties after at least one item moved.
    pub async fn paste(&self) -> Result<BatchTally, PanelError> {
        let staged = self.state.borrow().clipboard.clone();
        let Some(clipboard) = staged else {
            return self.fail(PanelError::EmptyClipboard).await;
        };
        let target = self.paste_target();
        let effect = match clipboard.operation {
            ClipboardOp::Cut => DropEffect::Move,
            ClipboardOp::Copy => DropEffect::Copy,
        };
        let tally = self.transfer(&clipboard.paths, &target, effect).await;
        if clipboard.operation == ClipboardOp::Cut && tally.succeeded > 0 {
            self.state.borrow_mut().clipboard = None;
        }
        Ok(self.finish_batch(tally, effect_verb(effect)).await)
    }

    /// Completes an internal drag by moving (or copying, with `copy`) the payload into `target`.
    pub async fn drop_on(&self, target: &DropTarget, copy: bool) -> Result<BatchTally, PanelError> {
        let payload = self.drag.borrow_mut().finish();
        self.emit(PanelEvent::DragChanged);
        if payload.is_empty() {
            return self.fail(PanelError::NoActiveDrag).await;
        }
        let target = target.resolve(&self.current_path());
        if !is_valid_drop_target(&target, &payload) {
            return self.fail(PanelError::InvalidDropTarget(target)).await;
        }
        let effect = DropEffect::from_modifier(copy);
        let tally = self.transfer(&payload, &target, effect).await;
        Ok(self.finish_batch(tally, effect_verb(effect)).await)
    }

    /// Uploads documents dropped from outside the application, recreating their folder layout
    /// under `target`.
    pub async fn drop_external(
        &self,
        target: &DropTarget,
        items: &[DroppedItem],
    ) -> Result<BatchTally, PanelError> {
        let target = target.resolve(&self.current_path());
        let plan = plan_external_drop(&target, items);
        if plan.is_empty() {
            return self.fail(PanelError::NothingToUpload).await;
        }

        let mut tally = BatchTally {
            skipped: plan.rejected,
            ..BatchTally::default()
        };
        for (dir, files) in &plan.groups {
            match self.services.directory.upload_documents(dir, files, true).await {
                Ok(uploaded) => {
                    let uploaded = uploaded.min(files.len());
                    tally.succeeded += uploaded;
                    tally.failed += files.len() - uploaded;
                    let mut state = self.state.borrow_mut();
                    for file in files {
                        state.image_cache.invalidate(&join_path(dir, &file.name));
                    }
                }
                Err(err) => {
                    warn!("workflow panel: upload into {dir:?} failed: {err}");
                    tally.failed += files.len();
                }
            }
        }
        Ok(self.finish_batch(tally, "Uploaded").await)
    }
}
