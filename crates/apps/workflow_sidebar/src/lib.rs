//! Leptos sidebar that renders a [`WorkflowPanel`] and feeds it pointer, drag, and keyboard input.
//!
//! All state lives in the panel; the component only keeps a revision counter that the panel's
//! observer bumps, and re-reads rows, status, and breadcrumbs when it changes.

mod chrome;
mod display;
mod input;
mod row;

use std::{future::Future, rc::Rc};

use leptos::*;
use serde_json::Value;
use workflow_host::ViewMode;
use workflow_host_web::{build_host_services, ApiRoutes};
use workflow_panel::{DragPhase, DropTarget, PanelEvent, PanelObserver, RenderRow, WorkflowPanel};

/// Shared panel handle. Mutating calls go through `get_value()` so no storage borrow is held
/// while the panel notifies observers.
pub(crate) type PanelHandle = StoredValue<Rc<WorkflowPanel>>;

#[derive(Clone, Copy)]
pub(crate) struct SidebarSignals {
    pub revision: RwSignal<u64>,
    pub loading: RwSignal<bool>,
}

struct SignalObserver(SidebarSignals);

impl PanelObserver for SignalObserver {
    fn panel_event(&self, event: &PanelEvent) {
        match event {
            PanelEvent::LoadingChanged(loading) => self.0.loading.set(*loading),
            PanelEvent::DocumentOpened(path) => {
                logging::log!("workflow sidebar: opened {path}");
            }
            _ => self.0.revision.update(|revision| *revision += 1),
        }
    }
}

/// Runs an async panel operation on the local executor.
pub(crate) fn spawn_panel<F, Fut>(panel: PanelHandle, op: F)
where
    F: FnOnce(Rc<WorkflowPanel>) -> Fut,
    Fut: Future<Output = ()> + 'static,
{
    spawn_local(op(panel.get_value()));
}

fn routes_from_launch_params(launch_params: &Value) -> ApiRoutes {
    let Some(raw) = launch_params.get("routes") else {
        return ApiRoutes::default();
    };
    match serde_json::from_value(raw.clone()) {
        Ok(routes) => routes,
        Err(err) => {
            logging::warn!("workflow sidebar: ignoring malformed routes: {err}");
            ApiRoutes::default()
        }
    }
}

/// A row plus what its rendering depends on beyond the row itself.
#[derive(Clone)]
struct RowItem {
    mode: ViewMode,
    preview_revision: u64,
    row: RenderRow,
}

type RowKey = (ViewMode, String, bool, bool, bool, u64, u64);

fn row_key(item: &RowItem) -> RowKey {
    let row = &item.row;
    (
        item.mode,
        row.entry.path.clone(),
        row.selected,
        row.expanded,
        row.visible,
        row.entry.modified.to_bits(),
        item.preview_revision,
    )
}

/// Workflow directory sidebar.
///
/// `launch_params.routes` may override the backend endpoint layout (see [`ApiRoutes`]).
#[component]
pub fn WorkflowSidebar(launch_params: Value) -> impl IntoView {
    let signals = SidebarSignals {
        revision: create_rw_signal(0),
        loading: create_rw_signal(false),
    };
    let panel = Rc::new(WorkflowPanel::new(build_host_services(
        routes_from_launch_params(&launch_params),
    )));
    panel.set_observer(Rc::new(SignalObserver(signals)));
    let panel: PanelHandle = store_value(panel);
    spawn_panel(panel, |panel| async move { panel.open_initial().await });

    let rows = create_memo(move |_| {
        let _ = signals.revision.get();
        panel.with_value(|panel| panel.rows())
    });
    let view_mode = create_memo(move |_| {
        let _ = signals.revision.get();
        panel.with_value(|panel| panel.view_mode())
    });

    let on_list_dragover = move |ev: web_sys::DragEvent| {
        let copy = ev.ctrl_key() || ev.meta_key();
        if input::internal_drag_active(panel) {
            if panel.get_value().drag_over(&DropTarget::CurrentDirectory, copy) {
                ev.prevent_default();
                input::set_drop_effect(&ev, copy);
            }
        } else {
            ev.prevent_default();
        }
    };
    let on_list_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        input::handle_drop(panel, DropTarget::CurrentDirectory, &ev);
    };

    view! {
        <div
            class=move || {
                if view_mode.get() == ViewMode::Grid {
                    "app-shell workflow-sidebar grid-view"
                } else {
                    "app-shell workflow-sidebar list-view"
                }
            }
            tabindex="0"
            on:keydown=move |ev: web_sys::KeyboardEvent| input::handle_keydown(panel, &ev)
        >
            <chrome::Toolbar panel=panel signals=signals />
            <chrome::Breadcrumbs panel=panel signals=signals />

            <div
                class=move || {
                    let phase = {
                        let _ = signals.revision.get();
                        panel.with_value(|panel| panel.drag_phase())
                    };
                    match phase {
                        DragPhase::HoverValid { target, .. }
                            if target == panel.with_value(|panel| panel.current_path()) =>
                        {
                            "workflow-list drop-valid"
                        }
                        _ => "workflow-list",
                    }
                }
                role="tree"
                aria-busy=move || signals.loading.get().to_string()
                on:click=move |_| panel.get_value().click_empty()
                on:dragover=on_list_dragover
                on:dragleave=move |_| panel.get_value().drag_leave()
                on:drop=on_list_drop
            >
                <Show
                    when=move || rows.with(|rows| !rows.is_empty())
                    fallback=|| view! { <div class="workflow-empty">"This folder is empty"</div> }
                >
                    <For
                        each=move || {
                            let _ = signals.revision.get();
                            let mode = view_mode.get();
                            let rows = rows.get();
                            panel.with_value(|panel| {
                                rows.into_iter()
                                    .map(|row| RowItem {
                                        mode,
                                        preview_revision: panel.preview_revision(row.path()),
                                        row,
                                    })
                                    .collect::<Vec<_>>()
                            })
                        }
                        key=row_key
                        let:item
                    >
                        <row::WorkflowRow mode=item.mode row=item.row panel=panel signals=signals />
                    </For>
                </Show>
            </div>

            <chrome::StatusBar panel=panel signals=signals />
        </div>
    }
}

/// Mounts the sidebar into the element with id `container_id` (or `<body>` when absent).
///
/// `launch_params_json` is the JSON object passed to [`WorkflowSidebar`]; malformed JSON falls
/// back to the stock configuration.
#[cfg(all(feature = "csr", target_arch = "wasm32"))]
#[wasm_bindgen::prelude::wasm_bindgen(js_name = mountWorkflowSidebar)]
pub fn mount(container_id: &str, launch_params_json: &str) {
    use wasm_bindgen::JsCast;

    console_error_panic_hook::set_once();
    let launch_params = serde_json::from_str::<Value>(launch_params_json).unwrap_or_else(|err| {
        logging::warn!("workflow sidebar: ignoring malformed launch params: {err}");
        Value::Null
    });
    let container = document()
        .get_element_by_id(container_id)
        .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok());
    match container {
        Some(container) => {
            mount_to(container, move || view! { <WorkflowSidebar launch_params=launch_params /> })
        }
        None => mount_to_body(move || view! { <WorkflowSidebar launch_params=launch_params /> }),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn launch_params_override_routes() {
        let routes = routes_from_launch_params(&json!({"routes": {"baseUrl": "/wm"}}));
        assert_eq!(routes.url(&routes.browse), "/wm/browse");
        assert_eq!(routes_from_launch_params(&json!({})), ApiRoutes::default());
        assert_eq!(
            routes_from_launch_params(&json!({"routes": 7})),
            ApiRoutes::default()
        );
    }
    #[test]
    fn replaced_preview_changes_the_row_key() {
        let row = RenderRow {
            entry: workflow_host::DirectoryEntry::document("x.json", 2, 1.0),
            depth: 0,
            selected: true,
            expanded: false,
            visible: true,
        };
        let before = RowItem {
            mode: ViewMode::Grid,
            preview_revision: 0,
            row,
        };
        let after = RowItem {
            preview_revision: 1,
            ..before.clone()
        };
        assert_ne!(row_key(&before), row_key(&after));
        assert_eq!(row_key(&before), row_key(&before.clone()));
    }
}
