//! Activation and the editor hand-off chain.

use std::rc::Rc;

use leptos::logging::{log, warn};
use workflow_host::{DocumentOpener, EntryKind, NotificationLevel, OpenDocumentRequest};

use crate::error::PanelError;
use crate::model::LoadOptions;
use crate::panel::{PanelEvent, WorkflowPanel};

/// Tries `openers` in order; returns the name of the first that accepted `request`.
///
/// Unavailable strategies are skipped and failing ones fall through to the next.
pub async fn open_with_chain(
    openers: &[Rc<dyn DocumentOpener>],
    request: &OpenDocumentRequest,
) -> Option<&'static str> {
    for opener in openers {
        if !opener.is_available() {
            log!("workflow panel: opener {} unavailable", opener.name());
            continue;
        }
        match opener.open(request).await {
            Ok(()) => return Some(opener.name()),
            Err(err) => warn!("workflow panel: opener {} failed: {err}", opener.name()),
        }
    }
    None
}

impl WorkflowPanel {
    /// Fetches the document at `path` and hands it to the editor.
    ///
    /// Returns the name of the opener strategy that took it.
    pub async fn open_document(&self, path: &str) -> Result<&'static str, PanelError> {
        let document = match self.services.directory.read_document(path).await {
            Ok(document) => document,
            Err(err) => return self.fail(PanelError::Backend(err)).await,
        };
        let request = OpenDocumentRequest::new(path, document);

        let Some(strategy) = open_with_chain(&self.services.openers, &request).await else {
            return self.fail(PanelError::NoOpener(path.to_string())).await;
        };
        self.emit(PanelEvent::DocumentOpened(path.to_string()));
        self.notify(
            NotificationLevel::Success,
            &format!("Opened {}", request.title),
        )
        .await;
        Ok(strategy)
    }

    /// Double-click or Enter: enters a directory, opens a document.
    pub async fn activate(&self, path: &str) -> Result<(), PanelError> {
        match self.kind_of(path) {
            Some(EntryKind::Directory) => {
                self.load_path(path, LoadOptions::default()).await;
                Ok(())
            }
            Some(EntryKind::Document) => self.open_document(path).await.map(|_| ()),
            None => self.fail(PanelError::UnknownEntry(path.to_string())).await,
        }
    }

    /// Activates the single selected entry (keyboard Enter).
    pub async fn activate_selected(&self) -> Result<(), PanelError> {
        let selected: Vec<String> = self.view_state().selected_items.into_iter().collect();
        match selected.as_slice() {
            [path] => self.activate(path).await,
            [] => self.fail(PanelError::NothingSelected).await,
            _ => self.fail(PanelError::NotSingleSelection).await,
        }
    }
}
