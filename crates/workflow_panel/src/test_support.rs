//! Shared fixtures for panel tests.

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use futures::channel::oneshot;
use serde_json::Value;
use workflow_host::{
    BrowseResult, DirectoryClient, DirectoryFuture, MemoryDirectoryClient,
    MemoryNotificationService, PanelHostServices, PendingTimer, PreviewImage, PreviewUpload,
    UploadFile, ViewMode,
};

use crate::model::RenderRow;
use crate::panel::{PanelEvent, PanelObserver, WorkflowPanel};

pub(crate) struct TestPanel {
    pub panel: WorkflowPanel,
    pub client: MemoryDirectoryClient,
    pub notes: MemoryNotificationService,
}

impl TestPanel {
    pub fn new(client: MemoryDirectoryClient) -> Self {
        Self::with_services(client, |services| services)
    }

    pub fn with_services(
        client: MemoryDirectoryClient,
        configure: impl FnOnce(PanelHostServices) -> PanelHostServices,
    ) -> Self {
        Self::custom(Rc::new(client.clone()), client, configure)
    }

    pub fn with_client(directory: Rc<dyn DirectoryClient>, client: MemoryDirectoryClient) -> Self {
        Self::custom(directory, client, |services| services)
    }

    pub fn custom(
        directory: Rc<dyn DirectoryClient>,
        client: MemoryDirectoryClient,
        configure: impl FnOnce(PanelHostServices) -> PanelHostServices,
    ) -> Self {
        let notes = MemoryNotificationService::default();
        let services = PanelHostServices::headless(directory)
            .with_notifications(Rc::new(notes.clone()))
            .with_timer(Rc::new(PendingTimer));
        Self {
            panel: WorkflowPanel::new(configure(services)),
            client,
            notes,
        }
    }
}

pub(crate) fn paths(rows: &[RenderRow]) -> Vec<String> {
    rows.iter().map(|row| row.entry.path.clone()).collect()
}

#[derive(Default)]
pub(crate) struct RecordingObserver {
    events: RefCell<Vec<PanelEvent>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<PanelEvent> {
        self.events.borrow().clone()
    }
}

impl PanelObserver for RecordingObserver {
    fn panel_event(&self, event: &PanelEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

#[derive(Default)]
struct Gates {
    pending: VecDeque<oneshot::Sender<()>>,
    permits: usize,
}

/// Memory client whose `browse` calls wait until released, oldest first.
#[derive(Clone)]
pub(crate) struct GatedDirectoryClient {
    inner: MemoryDirectoryClient,
    gates: Rc<RefCell<Gates>>,
}

impl GatedDirectoryClient {
    pub fn new(inner: MemoryDirectoryClient) -> Self {
        Self {
            inner,
            gates: Rc::default(),
        }
    }

    pub fn inner(&self) -> MemoryDirectoryClient {
        self.inner.clone()
    }

    /// Releases the oldest waiting browse, or lets the next one through.
    pub fn release(&self) {
        let mut gates = self.gates.borrow_mut();
        match gates.pending.pop_front() {
            Some(sender) => {
                let _ = sender.send(());
            }
            None => gates.permits += 1,
        }
    }

    /// Releases the most recent waiting browse.
    pub fn release_latest(&self) {
        if let Some(sender) = self.gates.borrow_mut().pending.pop_back() {
            let _ = sender.send(());
        }
    }
}

impl DirectoryClient for GatedDirectoryClient {
    fn browse<'a>(&'a self, path: &'a str) -> DirectoryFuture<'a, Result<BrowseResult, String>> {
        Box::pin(async move {
            let gate = {
                let mut gates = self.gates.borrow_mut();
                if gates.permits > 0 {
                    gates.permits -= 1;
                    None
                } else {
                    let (sender, receiver) = oneshot::channel();
                    gates.pending.push_back(sender);
                    Some(receiver)
                }
            };
            if let Some(receiver) = gate {
                let _ = receiver.await;
            }
            self.inner.browse(path).await
        })
    }

    fn create_folder<'a>(
        &'a self,
        name: &'a str,
        parent_path: &'a str,
    ) -> DirectoryFuture<'a, Result<(), String>> {
        self.inner.create_folder(name, parent_path)
    }

    fn rename<'a>(
        &'a self,
        old_path: &'a str,
        new_name: &'a str,
    ) -> DirectoryFuture<'a, Result<(), String>> {
        self.inner.rename(old_path, new_name)
    }

    fn delete<'a>(&'a self, path: &'a str) -> DirectoryFuture<'a, Result<(), String>> {
        self.inner.delete(path)
    }

    fn move_entry<'a>(
        &'a self,
        source_path: &'a str,
        target_dir: &'a str,
    ) -> DirectoryFuture<'a, Result<(), String>> {
        self.inner.move_entry(source_path, target_dir)
    }

    fn copy_entry<'a>(
        &'a self,
        source_path: &'a str,
        target_dir: &'a str,
    ) -> DirectoryFuture<'a, Result<(), String>> {
        self.inner.copy_entry(source_path, target_dir)
    }

    fn read_document<'a>(&'a self, path: &'a str) -> DirectoryFuture<'a, Result<Value, String>> {
        self.inner.read_document(path)
    }

    fn upload_documents<'a>(
        &'a self,
        target_dir: &'a str,
        files: &'a [UploadFile],
        create_dirs: bool,
    ) -> DirectoryFuture<'a, Result<usize, String>> {
        self.inner.upload_documents(target_dir, files, create_dirs)
    }

    fn fetch_preview<'a>(
        &'a self,
        path: &'a str,
    ) -> DirectoryFuture<'a, Result<Option<PreviewImage>, String>> {
        self.inner.fetch_preview(path)
    }

    fn upload_preview<'a>(
        &'a self,
        path: &'a str,
        image: &'a PreviewUpload,
    ) -> DirectoryFuture<'a, Result<(), String>> {
        self.inner.upload_preview(path, image)
    }

    fn save_view_mode<'a>(&'a self, mode: ViewMode) -> DirectoryFuture<'a, Result<(), String>> {
        self.inner.save_view_mode(mode)
    }

    fn save_last_path<'a>(&'a self, path: &'a str) -> DirectoryFuture<'a, Result<(), String>> {
        self.inner.save_last_path(path)
    }
}

/// Memory client whose preview fetches never complete.
pub(crate) struct StalledPreviewClient {
    inner: MemoryDirectoryClient,
}

impl StalledPreviewClient {
    pub fn new(inner: MemoryDirectoryClient) -> Self {
        Self { inner }
    }
}

impl DirectoryClient for StalledPreviewClient {
    fn browse<'a>(&'a self, path: &'a str) -> DirectoryFuture<'a, Result<BrowseResult, String>> {
        self.inner.browse(path)
    }

    fn create_folder<'a>(
        &'a self,
        name: &'a str,
        parent_path: &'a str,
    ) -> DirectoryFuture<'a, Result<(), String>> {
        self.inner.create_folder(name, parent_path)
    }

    fn rename<'a>(
        &'a self,
        old_path: &'a str,
        new_name: &'a str,
    ) -> DirectoryFuture<'a, Result<(), String>> {
        self.inner.rename(old_path, new_name)
    }

    fn delete<'a>(&'a self, path: &'a str) -> DirectoryFuture<'a, Result<(), String>> {
        self.inner.delete(path)
    }

    fn move_entry<'a>(
        &'a self,
        source_path: &'a str,
        target_dir: &'a str,
    ) -> DirectoryFuture<'a, Result<(), String>> {
        self.inner.move_entry(source_path, target_dir)
    }

    fn copy_entry<'a>(
        &'a self,
        source_path: &'a str,
        target_dir: &'a str,
    ) -> DirectoryFuture<'a, Result<(), String>> {
        self.inner.copy_entry(source_path, target_dir)
    }

    fn read_document<'a>(&'a self, path: &'a str) -> DirectoryFuture<'a, Result<Value, String>> {
        self.inner.read_document(path)
    }

    fn upload_documents<'a>(
        &'a self,
        target_dir: &'a str,
        files: &'a [UploadFile],
        create_dirs: bool,
    ) -> DirectoryFuture<'a, Result<usize, String>> {
        self.inner.upload_documents(target_dir, files, create_dirs)
    }

    fn fetch_preview<'a>(
        &'a self,
        _path: &'a str,
    ) -> DirectoryFuture<'a, Result<Option<PreviewImage>, String>> {
        Box::pin(std::future::pending())
    }

    fn upload_preview<'a>(
        &'a self,
        path: &'a str,
        image: &'a PreviewUpload,
    ) -> DirectoryFuture<'a, Result<(), String>> {
        self.inner.upload_preview(path, image)
    }

    fn save_view_mode<'a>(&'a self, mode: ViewMode) -> DirectoryFuture<'a, Result<(), String>> {
        self.inner.save_view_mode(mode)
    }

    fn save_last_path<'a>(&'a self, path: &'a str) -> DirectoryFuture<'a, Result<(), String>> {
        self.inner.save_last_path(path)
    }
}
