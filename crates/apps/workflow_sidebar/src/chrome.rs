//! Toolbar, breadcrumb trail, and status bar around the row list.

use leptos::*;
use workflow_host::{Breadcrumb, ViewMode};
use workflow_host_web::pick_preview_image;
use workflow_panel::{LoadOptions, SortKey, SortOrder};

use crate::{display, input, spawn_panel, PanelHandle, SidebarSignals};

const SORT_KEYS: [SortKey; 3] = [SortKey::Name, SortKey::Modified, SortKey::Size];

fn change_selected_preview(panel: PanelHandle) {
    let selected: Vec<String> =
        panel.with_value(|panel| panel.view_state().selected_items.into_iter().collect());
    let [path] = selected.as_slice() else {
        logging::log!("workflow sidebar: change preview needs exactly one document");
        return;
    };
    let path = path.clone();
    spawn_panel(panel, move |panel| async move {
        match pick_preview_image().await {
            Ok(Some(upload)) => {
                let _ = panel.change_preview(&path, &upload).await;
            }
            Ok(None) => {}
            Err(err) => logging::warn!("workflow sidebar: image picker failed: {err}"),
        }
    });
}

#[component]
pub(crate) fn Toolbar(panel: PanelHandle, signals: SidebarSignals) -> impl IntoView {
    let sort = create_memo(move |_| {
        let _ = signals.revision.get();
        panel.with_value(|panel| {
            let state = panel.view_state();
            (state.sort_key, state.sort_order)
        })
    });
    let view_mode = create_memo(move |_| {
        let _ = signals.revision.get();
        panel.with_value(|panel| panel.view_mode())
    });

    view! {
        <div class="app-toolbar workflow-toolbar">
            <button
                type="button"
                title="Up one level"
                on:click=move |_| {
                    spawn_panel(panel, |panel| async move { panel.navigate_back().await })
                }
            >
                "Up"
            </button>
            <button
                type="button"
                title="Workflow root"
                on:click=move |_| spawn_panel(panel, |panel| async move { panel.go_home().await })
            >
                "Home"
            </button>
            <button
                type="button"
                on:click=move |_| spawn_panel(panel, |panel| async move { panel.refresh().await })
            >
                "Refresh"
            </button>
            <button type="button" on:click=move |_| input::prompt_new_folder(panel)>
                "New folder"
            </button>
            <button type="button" on:click=move |_| input::show_properties(panel)>
                "Properties"
            </button>
            <button
                type="button"
                on:click=move |_| {
                    spawn_panel(panel, |panel| async move { panel.toggle_view_mode().await })
                }
            >
                {move || match view_mode.get() {
                    ViewMode::List => "Grid view",
                    ViewMode::Grid => "List view",
                }}
            </button>
            <select
                aria-label="Sort by"
                on:change=move |ev| {
                    if let Some(key) = SortKey::parse(&event_target_value(&ev)) {
                        let (_, order) = sort.get_untracked();
                        panel.get_value().set_sort(key, order);
                    }
                }
            >
                {SORT_KEYS
                    .into_iter()
                    .map(|key| {
                        view! {
                            <option
                                value=key.as_str()
                                selected=move || sort.get().0 == key
                            >
                                {move || display::sort_label(key, sort.get().1)}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
            <button
                type="button"
                title="Reverse sort order"
                on:click=move |_| {
                    let (key, order) = sort.get_untracked();
                    panel.get_value().set_sort(key, order.reversed());
                }
            >
                {move || match sort.get().1 {
                    SortOrder::Asc => "Asc",
                    SortOrder::Desc => "Desc",
                }}
            </button>
            <input
                type="search"
                class="workflow-filter"
                placeholder="Filter"
                on:input=move |ev| panel.get_value().set_filter(&event_target_value(&ev))
            />
            <Show when=move || view_mode.get() == ViewMode::Grid fallback=|| ()>
                <button
                    type="button"
                    on:click=move |_| {
                        spawn_panel(panel, |panel| async move {
                            let _ = panel.refresh_previews().await;
                        })
                    }
                >
                    "Refresh previews"
                </button>
                <button type="button" on:click=move |_| change_selected_preview(panel)>
                    "Change preview"
                </button>
            </Show>
        </div>
    }
}

#[component]
pub(crate) fn Breadcrumbs(panel: PanelHandle, signals: SidebarSignals) -> impl IntoView {
    let trail = create_memo(move |_| {
        let _ = signals.revision.get();
        panel.with_value(|panel| panel.breadcrumbs())
    });

    view! {
        <nav class="workflow-breadcrumbs" aria-label="Location">
            <For each=move || trail.get() key=|crumb: &Breadcrumb| crumb.path.clone() let:crumb>
                <button
                    type="button"
                    class="workflow-crumb"
                    on:click={
                        let path = crumb.path.clone();
                        move |_| {
                            let path = path.clone();
                            spawn_panel(panel, move |panel| async move {
                                panel.load_path(&path, LoadOptions::default()).await;
                            });
                        }
                    }
                >
                    {display::crumb_label(&crumb.label).to_string()}
                </button>
            </For>
        </nav>
    }
}

#[component]
pub(crate) fn StatusBar(panel: PanelHandle, signals: SidebarSignals) -> impl IntoView {
    let summary = create_memo(move |_| {
        let _ = signals.revision.get();
        panel.with_value(|panel| {
            let clipboard = panel
                .view_state()
                .clipboard
                .map(|clipboard| clipboard.paths.len())
                .unwrap_or(0);
            (display::status_line(panel.status()), clipboard)
        })
    });

    view! {
        <div class="app-statusbar workflow-statusbar">
            <span>{move || summary.get().0}</span>
            <span>
                {move || match summary.get().1 {
                    0 => String::new(),
                    count => format!("Clipboard: {count}"),
                }}
            </span>
            <span>{move || if signals.loading.get() { "Loading…" } else { "Ready" }}</span>
        </div>
    }
}
