//! The panel view-model: owned state, directory loading, expansion, navigation, and selection.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
};

use leptos::logging::{log, warn};
use workflow_host::{
    breadcrumbs, is_same_or_descendant, parent_path, Breadcrumb, DirectoryEntry, EntryKind,
    NotificationLevel, PanelConfig, PanelHostServices, ViewMode,
};

use crate::drag_drop::{drag_payload, DragPhase, DragSession, DropTarget};
use crate::error::PanelError;
use crate::model::{
    ListingTree, LoadOptions, PanelStatus, RenderRow, SelectionProperties, SortKey, SortOrder,
    ViewState,
};
use crate::render::{build_rows, prune_selection, visible_order};
use crate::selection::{self, Modifiers};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Change notifications delivered to the renderer.
pub enum PanelEvent {
    /// Rows were rebuilt.
    RowsChanged,
    /// Selection or anchor changed without a rebuild.
    SelectionChanged,
    /// A directory load started (`true`) or finished (`false`).
    LoadingChanged(bool),
    /// The drag gesture changed phase.
    DragChanged,
    /// A document was handed to the editor.
    DocumentOpened(String),
    /// The preview of the document at this path was replaced or refetched.
    PreviewChanged(String),
}

/// Receiver of [`PanelEvent`]s; the renderer's only coupling to the panel core.
pub trait PanelObserver {
    /// Called after the panel's state changed. No panel borrow is held during the call.
    fn panel_event(&self, event: &PanelEvent);
}

/// One directory panel: owns its [`ViewState`] and talks to the injected host services.
///
/// All methods take `&self`; share the panel through `Rc` with the tasks driving it.
pub struct WorkflowPanel {
    pub(crate) services: PanelHostServices,
    pub(crate) state: RefCell<ViewState>,
    pub(crate) tree: RefCell<ListingTree>,
    rows: RefCell<Vec<RenderRow>>,
    pub(crate) drag: RefCell<DragSession>,
    server_config: RefCell<PanelConfig>,
    loading: Cell<bool>,
    generation: Cell<u64>,
    pub(crate) preview_revisions: RefCell<HashMap<String, u64>>,
    observer: RefCell<Option<Rc<dyn PanelObserver>>>,
}

struct LoadingGuard<'a> {
    panel: &'a WorkflowPanel,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.panel.loading.set(false);
        self.panel.emit(PanelEvent::LoadingChanged(false));
    }
}

impl WorkflowPanel {
    /// Creates an empty panel at the root over `services`.
    pub fn new(services: PanelHostServices) -> Self {
        Self {
            services,
            state: RefCell::new(ViewState::default()),
            tree: RefCell::new(ListingTree::default()),
            rows: RefCell::new(Vec::new()),
            drag: RefCell::new(DragSession::default()),
            server_config: RefCell::new(PanelConfig::default()),
            loading: Cell::new(false),
            generation: Cell::new(0),
            preview_revisions: RefCell::new(HashMap::new()),
            observer: RefCell::new(None),
        }
    }

    /// Installs the change observer.
    pub fn set_observer(&self, observer: Rc<dyn PanelObserver>) {
        *self.observer.borrow_mut() = Some(observer);
    }

    /// Injected host services.
    pub fn services(&self) -> &PanelHostServices {
        &self.services
    }

    /// Snapshot of the view state.
    pub fn view_state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Directory shown at the top level.
    pub fn current_path(&self) -> String {
        self.state.borrow().current_path.clone()
    }

    /// Active presentation mode.
    pub fn view_mode(&self) -> ViewMode {
        self.state.borrow().view_mode
    }

    /// Rows in render order.
    pub fn rows(&self) -> Vec<RenderRow> {
        self.rows.borrow().clone()
    }

    /// Looks up a rendered entry (properties dialog, activation).
    pub fn entry(&self, path: &str) -> Option<DirectoryEntry> {
        self.rows
            .borrow()
            .iter()
            .find(|row| row.entry.path == path)
            .map(|row| row.entry.clone())
    }

    /// Properties of the selected entries, in render order; `None` without a selection.
    pub fn properties(&self) -> Option<SelectionProperties> {
        let entries: Vec<DirectoryEntry> = {
            let state = self.state.borrow();
            self.rows
                .borrow()
                .iter()
                .filter(|row| state.selected_items.contains(&row.entry.path))
                .map(|row| row.entry.clone())
                .collect()
        };
        if entries.is_empty() {
            return None;
        }
        Some(SelectionProperties::from_entries(entries))
    }

    /// Status-bar counts.
    pub fn status(&self) -> PanelStatus {
        let rows = self.rows.borrow();
        PanelStatus {
            total: rows.len(),
            visible: rows.iter().filter(|row| row.visible).count(),
            selected: self.state.borrow().selected_items.len(),
        }
    }

    /// Returns `true` while a directory load is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    /// Breadcrumb trail of the current directory, root first.
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        breadcrumbs(&self.state.borrow().current_path)
    }

    /// Server config from the most recent successful browse.
    pub fn server_config(&self) -> PanelConfig {
        self.server_config.borrow().clone()
    }

    pub(crate) fn emit(&self, event: PanelEvent) {
        let observer = self.observer.borrow().clone();
        if let Some(observer) = observer {
            observer.panel_event(&event);
        }
    }

    pub(crate) async fn notify(&self, level: NotificationLevel, message: &str) {
        if let Err(err) = self.services.notifications.notify(level, message).await {
            warn!("workflow panel notification failed: {err}");
        }
    }

    /// Surfaces `err` as a notification and returns it.
    pub(crate) async fn fail<T>(&self, err: PanelError) -> Result<T, PanelError> {
        self.notify(err.severity(), &err.to_string()).await;
        Err(err)
    }

    pub(crate) fn kind_of(&self, path: &str) -> Option<EntryKind> {
        self.rows
            .borrow()
            .iter()
            .find(|row| row.entry.path == path)
            .map(|row| row.entry.kind)
    }

    fn renders_directory(&self, path: &str) -> bool {
        self.kind_of(path) == Some(EntryKind::Directory)
    }

    fn is_inlined(&self, path: &str) -> bool {
        self.state.borrow().expanded_folders.contains(path)
            && self.tree.borrow().children.contains_key(path)
    }

    /// Rebuilds rows from the listing tree and re-establishes the selection invariants.
    pub(crate) fn rerender(&self) {
        let rows = {
            let tree = self.tree.borrow();
            let mut state = self.state.borrow_mut();
            let mut rows = build_rows(&tree, &state);
            prune_selection(&mut state, &mut rows);
            rows
        };
        *self.rows.borrow_mut() = rows;
        self.emit(PanelEvent::RowsChanged);
    }

    fn sync_selection(&self) {
        {
            let state = self.state.borrow();
            for row in self.rows.borrow_mut().iter_mut() {
                row.selected = state.selected_items.contains(&row.entry.path);
            }
        }
        self.emit(PanelEvent::SelectionChanged);
    }

    /// Loads `path` as the current directory.
    ///
    /// The path goes to the server as given, minus surrounding slashes; the server decides whether
    /// it is acceptable. Dropped without effect while another load is in flight. Failures render
    /// an empty listing and are reported only through a notification.
    pub async fn load_path(&self, path: &str, options: LoadOptions) {
        let path = path.trim_matches('/').to_string();
        if self.loading.get() {
            log!("workflow panel: load of {path:?} dropped, another load is in flight");
            return;
        }
        self.loading.set(true);
        self.emit(PanelEvent::LoadingChanged(true));
        let _guard = LoadingGuard { panel: self };

        match self.services.directory.browse(&path).await {
            Ok(result) => {
                self.generation.set(self.generation.get() + 1);
                if let Some(config) = result.config {
                    *self.server_config.borrow_mut() = config;
                }
                let moved = {
                    let mut state = self.state.borrow_mut();
                    let moved = state.current_path != path;
                    state.current_path = path.clone();
                    if !options.skip_view_mode_apply {
                        let server_mode = self.server_config.borrow().view_mode;
                        if let Some(mode) = server_mode.filter(|mode| *mode != state.view_mode) {
                            state.view_mode = mode;
                            state.expanded_folders.clear();
                        }
                    }
                    moved
                };
                {
                    let mut tree = self.tree.borrow_mut();
                    tree.root = result.items;
                    tree.children.clear();
                }
                self.rerender();

                if moved {
                    self.persist_last_path(&path).await;
                }
                self.refresh_expanded().await;
            }
            Err(err) => {
                warn!("workflow panel: browse {path:?} failed: {err}");
                *self.tree.borrow_mut() = ListingTree::default();
                self.rerender();
                self.notify(NotificationLevel::Error, &err).await;
            }
        }
    }

    async fn persist_last_path(&self, path: &str) {
        if let Err(err) = self.services.directory.save_last_path(path).await {
            warn!("workflow panel: saving last path failed: {err}");
        }
    }

    async fn refresh_expanded(&self) {
        let expanded: Vec<String> = self.state.borrow().expanded_folders.iter().cloned().collect();
        for path in expanded {
            if !self.renders_directory(&path) {
                self.state.borrow_mut().expanded_folders.remove(&path);
                continue;
            }
            match self.services.directory.browse(&path).await {
                Ok(result) => {
                    self.tree.borrow_mut().children.insert(path, result.items);
                }
                Err(err) => {
                    warn!("workflow panel: collapsing {path:?}, listing failed: {err}");
                    self.state.borrow_mut().expanded_folders.remove(&path);
                }
            }
            self.rerender();
        }
    }

    /// Re-runs the current directory load, keeping the local view mode.
    pub(crate) async fn reload(&self) {
        let current = self.current_path();
        self.load_path(
            &current,
            LoadOptions {
                skip_view_mode_apply: true,
            },
        )
        .await;
    }

    /// First load after mount: the root, then the server's remembered directory if any.
    pub async fn open_initial(&self) {
        self.load_path("", LoadOptions::default()).await;
        let last = self
            .server_config
            .borrow()
            .last_path
            .as_deref()
            .map(|last| last.trim_matches('/').to_string())
            .unwrap_or_default();
        if last.is_empty() {
            return;
        }
        let restore = LoadOptions {
            skip_view_mode_apply: true,
        };
        self.load_path(&last, restore).await;
        if self.current_path() != last {
            self.load_path("", restore).await;
            if self.current_path().is_empty() {
                self.persist_last_path("").await;
            }
        }
    }

    /// Goes to the parent directory; no-op at the root.
    pub async fn navigate_back(&self) {
        let current = self.current_path();
        if current.is_empty() {
            return;
        }
        self.load_path(&parent_path(&current), LoadOptions::default())
            .await;
    }

    /// Goes to the root directory.
    pub async fn go_home(&self) {
        self.load_path("", LoadOptions::default()).await;
    }

    /// Reloads the current directory and every expanded folder.
    pub async fn refresh(&self) {
        self.reload().await;
    }

    /// Inlines the children of the directory row `path` (list mode only).
    ///
    /// Already inlined folders are left alone. A listing that arrives after a newer directory load,
    /// or after its row disappeared, is discarded.
    pub async fn expand(&self, path: &str) -> Result<(), PanelError> {
        if self.view_mode() == ViewMode::Grid || self.is_inlined(path) {
            return Ok(());
        }
        if !self.renders_directory(path) {
            return self.fail(PanelError::UnknownEntry(path.to_string())).await;
        }

        let generation = self.generation.get();
        let listing = match self.services.directory.browse(path).await {
            Ok(result) => result.items,
            Err(err) => return self.fail(PanelError::Backend(err)).await,
        };

        if generation != self.generation.get()
            || !self.renders_directory(path)
            || self.view_mode() == ViewMode::Grid
        {
            log!("workflow panel: discarding stale listing of {path:?}");
            return Ok(());
        }
        if self.is_inlined(path) {
            return Ok(());
        }
        self.tree
            .borrow_mut()
            .children
            .insert(path.to_string(), listing);
        self.state
            .borrow_mut()
            .expanded_folders
            .insert(path.to_string());
        self.rerender();
        Ok(())
    }

    /// Removes `path` and every folder expanded beneath it from the render.
    pub fn collapse(&self, path: &str) {
        self.state
            .borrow_mut()
            .expanded_folders
            .retain(|expanded| !is_same_or_descendant(expanded, path));
        self.tree
            .borrow_mut()
            .children
            .retain(|listed, _| !is_same_or_descendant(listed, path));
        self.rerender();
    }

    /// Collapses an expanded folder or expands a collapsed one.
    pub async fn toggle_expand(&self, path: &str) -> Result<(), PanelError> {
        let expanded = self.state.borrow().expanded_folders.contains(path);
        if expanded {
            self.collapse(path);
            Ok(())
        } else {
            self.expand(path).await
        }
    }

    /// Pointer click on a row.
    pub fn click(&self, path: &str, modifiers: Modifiers) {
        let order = visible_order(&self.rows.borrow());
        if !order.iter().any(|p| p == path) {
            return;
        }
        selection::click(&mut self.state.borrow_mut(), &order, path, modifiers);
        self.sync_selection();
    }

    /// Click on the blank canvas.
    pub fn click_empty(&self) {
        selection::clear(&mut self.state.borrow_mut());
        self.sync_selection();
    }

    /// Selects every visible row.
    pub fn select_all(&self) {
        let order = visible_order(&self.rows.borrow());
        selection::select_all(&mut self.state.borrow_mut(), &order);
        self.sync_selection();
    }

    /// Sets the search term.
    pub fn set_filter(&self, term: &str) {
        self.state.borrow_mut().filter = term.to_string();
        self.rerender();
    }

    /// Changes the sort without refetching.
    pub fn set_sort(&self, key: SortKey, order: SortOrder) {
        {
            let mut state = self.state.borrow_mut();
            state.sort_key = key;
            state.sort_order = order;
        }
        self.rerender();
    }

    /// Switches list/grid mode, dropping expansion, and mirrors it to server config.
    pub async fn set_view_mode(&self, mode: ViewMode) {
        {
            let mut state = self.state.borrow_mut();
            if state.view_mode == mode {
                return;
            }
            state.view_mode = mode;
            state.expanded_folders.clear();
        }
        self.tree.borrow_mut().children.clear();
        self.rerender();
        if let Err(err) = self.services.directory.save_view_mode(mode).await {
            warn!("workflow panel: saving view mode failed: {err}");
        }
    }

    /// Flips between list and grid mode.
    pub async fn toggle_view_mode(&self) {
        let next = self.view_mode().toggled();
        self.set_view_mode(next).await;
    }

    /// Starts a drag on `path` and returns the payload (empty means no gesture started).
    pub fn begin_drag(&self, path: &str) -> Vec<String> {
        if self.kind_of(path).is_none() {
            return Vec::new();
        }
        let payload = {
            let mut state = self.state.borrow_mut();
            drag_payload(&mut state, path, |candidate| self.kind_of(candidate))
        };
        self.sync_selection();
        if !payload.is_empty() {
            self.drag.borrow_mut().start(payload.clone());
            self.emit(PanelEvent::DragChanged);
        }
        payload
    }

    /// Updates hover feedback; returns whether dropping on `target` is allowed.
    pub fn drag_over(&self, target: &DropTarget, copy: bool) -> bool {
        let target = target.resolve(&self.current_path());
        let valid = self.drag.borrow_mut().hover(target, copy);
        self.emit(PanelEvent::DragChanged);
        valid
    }

    /// The pointer left every drop target.
    pub fn drag_leave(&self) {
        self.drag.borrow_mut().leave();
        self.emit(PanelEvent::DragChanged);
    }

    /// Abandons the gesture (dragend without drop).
    pub fn end_drag(&self) {
        self.drag.borrow_mut().finish();
        self.emit(PanelEvent::DragChanged);
    }

    /// Current drag phase.
    pub fn drag_phase(&self) -> DragPhase {
        self.drag.borrow().phase().clone()
    }
}
