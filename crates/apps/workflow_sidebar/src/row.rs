//! One rendered directory row (list mode) or tile (grid mode).

use leptos::*;
use workflow_host::ViewMode;
use workflow_host_web::{preview_url, revoke_preview_url};
use workflow_panel::{DragPhase, DropTarget, RenderRow};

use crate::{display, input, spawn_panel, PanelHandle, SidebarSignals};

fn load_preview_into(panel: PanelHandle, path: String, preview: RwSignal<Option<String>>) {
    spawn_panel(panel, move |panel| async move {
        let Some(image) = panel.load_preview(&path).await else {
            return;
        };
        match preview_url(&image) {
            Ok(url) => {
                if let Some(Some(unused)) = preview.try_set(Some(url)) {
                    revoke_preview_url(&unused);
                }
            }
            Err(err) => logging::warn!("workflow sidebar: preview for {path} not shown: {err}"),
        }
    });
    on_cleanup(move || {
        if let Some(url) = preview.try_get_untracked().flatten() {
            revoke_preview_url(&url);
        }
    });
}

#[component]
pub(crate) fn WorkflowRow(
    mode: ViewMode,
    row: RenderRow,
    panel: PanelHandle,
    signals: SidebarSignals,
) -> impl IntoView {
    let path = row.entry.path.clone();
    let is_dir = row.entry.is_directory();
    let label = display::row_label(&row.entry).to_string();
    let meta = display::row_meta(&row.entry);
    let indent = format!("padding-left: {}px", 8 + row.depth * 16);
    let static_class = format!(
        "workflow-row {}{}{}{}",
        if is_dir { "is-directory" } else { "is-document" },
        if row.selected { " selected" } else { "" },
        if row.expanded { " expanded" } else { "" },
        if row.visible { "" } else { " filtered-out" },
    );

    let preview = create_rw_signal::<Option<String>>(None);
    if mode == ViewMode::Grid && !is_dir {
        load_preview_into(panel, path.clone(), preview);
    }

    let class = {
        let path = path.clone();
        move || {
            let _ = signals.revision.get();
            let drop_class = panel.with_value(|panel| match panel.drag_phase() {
                DragPhase::HoverValid { target, .. } if target == path => " drop-valid",
                DragPhase::HoverInvalid { target } if target == path => " drop-invalid",
                _ => "",
            });
            format!("{static_class}{drop_class}")
        }
    };

    let on_click = {
        let path = path.clone();
        move |ev: web_sys::MouseEvent| {
            ev.stop_propagation();
            panel.get_value().click(&path, input::modifiers_of(&ev));
        }
    };
    let on_dblclick = {
        let path = path.clone();
        move |ev: web_sys::MouseEvent| {
            ev.stop_propagation();
            let path = path.clone();
            spawn_panel(panel, move |panel| async move {
                let _ = panel.activate(&path).await;
            });
        }
    };
    let on_toggle = {
        let path = path.clone();
        move |ev: web_sys::MouseEvent| {
            ev.stop_propagation();
            let path = path.clone();
            spawn_panel(panel, move |panel| async move {
                let _ = panel.toggle_expand(&path).await;
            });
        }
    };
    let on_dragstart = {
        let path = path.clone();
        move |ev: web_sys::DragEvent| {
            let payload = panel.get_value().begin_drag(&path);
            if payload.is_empty() {
                ev.prevent_default();
                return;
            }
            if let Some(transfer) = ev.data_transfer() {
                let _ = transfer.set_data("text/plain", &payload.join("\n"));
                transfer.set_effect_allowed("copyMove");
            }
        }
    };
    let on_dragover = {
        let path = path.clone();
        move |ev: web_sys::DragEvent| {
            if !is_dir {
                return;
            }
            ev.stop_propagation();
            let copy = ev.ctrl_key() || ev.meta_key();
            if !input::internal_drag_active(panel) {
                ev.prevent_default();
                return;
            }
            let target = DropTarget::Directory(path.clone());
            if panel.get_value().drag_over(&target, copy) {
                ev.prevent_default();
                input::set_drop_effect(&ev, copy);
            }
        }
    };
    let on_drop = {
        let path = path.clone();
        move |ev: web_sys::DragEvent| {
            if !is_dir {
                return;
            }
            ev.prevent_default();
            ev.stop_propagation();
            input::handle_drop(panel, DropTarget::Directory(path.clone()), &ev);
        }
    };

    let toggle_glyph = if row.expanded { "▾" } else { "▸" };
    let show_toggle = is_dir && mode == ViewMode::List;

    view! {
        <div
            class=class
            style=indent
            role="treeitem"
            aria-selected=row.selected.to_string()
            aria-expanded=is_dir.then(|| row.expanded.to_string())
            title=path.clone()
            draggable="true"
            on:click=on_click
            on:dblclick=on_dblclick
            on:dragstart=on_dragstart
            on:dragover=on_dragover
            on:dragleave=move |_| panel.get_value().drag_leave()
            on:drop=on_drop
            on:dragend=move |_| panel.get_value().end_drag()
        >
            <Show
                when=move || show_toggle
                fallback=|| view! { <span class="workflow-row-spacer"></span> }
            >
                <button type="button" class="workflow-row-toggle" on:click=on_toggle.clone()>
                    {toggle_glyph}
                </button>
            </Show>
            <span class="workflow-row-icon">
                {move || match preview.get() {
                    Some(url) => {
                        view! { <img class="workflow-preview" src=url alt="" /> }.into_view()
                    }
                    None => view! { <span>{if is_dir { "[D]" } else { "[W]" }}</span> }.into_view(),
                }}
            </span>
            <span class="workflow-row-name">{label}</span>
            <span class="workflow-row-meta">{meta}</span>
        </div>
    }
}
