//! Pointer, drag, and keyboard plumbing between DOM events and the panel.

use leptos::*;
use wasm_bindgen::JsCast;
use workflow_host_web::dropped_items;
use workflow_panel::{command_for_key, DragPhase, DropTarget, KeyContext, Modifiers, PanelCommand};

use crate::{spawn_panel, PanelHandle};

pub(crate) fn modifiers_of(ev: &web_sys::MouseEvent) -> Modifiers {
    Modifiers {
        ctrl: ev.ctrl_key() || ev.meta_key(),
        shift: ev.shift_key(),
    }
}

pub(crate) fn internal_drag_active(panel: PanelHandle) -> bool {
    panel.with_value(|panel| panel.drag_phase() != DragPhase::Idle)
}

pub(crate) fn set_drop_effect(ev: &web_sys::DragEvent, copy: bool) {
    if let Some(transfer) = ev.data_transfer() {
        transfer.set_drop_effect(if copy { "copy" } else { "move" });
    }
}

/// Finishes a drop on `target`: an internal drag moves or copies, anything else is treated as an
/// upload from the desktop.
pub(crate) fn handle_drop(panel: PanelHandle, target: DropTarget, ev: &web_sys::DragEvent) {
    let copy = ev.ctrl_key() || ev.meta_key();
    if internal_drag_active(panel) {
        spawn_panel(panel, move |panel| async move {
            if let Err(err) = panel.drop_on(&target, copy).await {
                logging::log!("workflow sidebar: drop rejected: {err}");
            }
        });
        return;
    }

    let Some(transfer) = ev.data_transfer() else {
        return;
    };
    let pending = dropped_items(&transfer);
    spawn_panel(panel, move |panel| async move {
        match pending.await {
            Ok(items) => {
                if let Err(err) = panel.drop_external(&target, &items).await {
                    logging::log!("workflow sidebar: upload rejected: {err}");
                }
            }
            Err(err) => logging::warn!("workflow sidebar: unreadable drop: {err}"),
        }
    });
}

fn prompt(message: &str, default: &str) -> Option<String> {
    window()
        .prompt_with_message_and_default(message, default)
        .ok()
        .flatten()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn confirm(message: &str) -> bool {
    window().confirm_with_message(message).unwrap_or(false)
}

pub(crate) fn prompt_new_folder(panel: PanelHandle) {
    let Some(name) = prompt("New folder name", "") else {
        return;
    };
    spawn_panel(panel, move |panel| async move {
        let _ = panel.create_folder(&name).await;
    });
}

pub(crate) fn prompt_rename(panel: PanelHandle) {
    let selected = panel.with_value(|panel| panel.view_state().selected_items);
    let current = match selected.iter().next() {
        Some(path) if selected.len() == 1 => crate::display::rename_seed(path),
        _ => {
            spawn_panel(panel, |panel| async move {
                let _ = panel.rename_selected("").await;
            });
            return;
        }
    };
    let Some(name) = prompt("Rename to", &current) else {
        return;
    };
    spawn_panel(panel, move |panel| async move {
        let _ = panel.rename_selected(&name).await;
    });
}

pub(crate) fn confirm_delete(panel: PanelHandle) {
    let count = panel.with_value(|panel| panel.status().selected);
    if count == 0 || !confirm(&format!("Delete {count} item(s)?")) {
        return;
    }
    spawn_panel(panel, |panel| async move {
        let _ = panel.delete_selected().await;
    });
}

pub(crate) fn show_properties(panel: PanelHandle) {
    let Some(properties) = panel.with_value(|panel| panel.properties()) else {
        logging::log!("workflow sidebar: properties need a selection");
        return;
    };
    let text = crate::display::properties_text(&properties);
    if let Err(err) = window().alert_with_message(&text) {
        logging::warn!("workflow sidebar: properties dialog failed: {err:?}");
    }
}

fn run_command(panel: PanelHandle, command: PanelCommand) {
    match command {
        PanelCommand::Rename => prompt_rename(panel),
        PanelCommand::Delete => confirm_delete(panel),
        PanelCommand::NewFolder => prompt_new_folder(panel),
        PanelCommand::SelectAll => panel.get_value().select_all(),
        PanelCommand::Activate => spawn_panel(panel, |panel| async move {
            let _ = panel.activate_selected().await;
        }),
        PanelCommand::NavigateBack => spawn_panel(panel, |panel| async move {
            panel.navigate_back().await;
        }),
        PanelCommand::Copy => spawn_panel(panel, |panel| async move {
            let _ = panel.copy_selection().await;
        }),
        PanelCommand::Cut => spawn_panel(panel, |panel| async move {
            let _ = panel.cut_selection().await;
        }),
        PanelCommand::Paste => spawn_panel(panel, |panel| async move {
            let _ = panel.paste().await;
        }),
    }
}

fn is_text_entry(ev: &web_sys::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
        .map(|element| matches!(element.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT"))
        .unwrap_or(false)
}

pub(crate) fn handle_keydown(panel: PanelHandle, ev: &web_sys::KeyboardEvent) {
    if ev.alt_key() || is_text_entry(ev) {
        return;
    }
    let context = panel.with_value(|panel| {
        let state = panel.view_state();
        KeyContext {
            has_selection: !state.selected_items.is_empty(),
            has_clipboard: state.clipboard.is_some(),
        }
    });
    let modifiers = Modifiers {
        ctrl: ev.ctrl_key() || ev.meta_key(),
        shift: ev.shift_key(),
    };
    let Some(command) = command_for_key(&ev.key(), modifiers, context) else {
        return;
    };
    ev.prevent_default();
    ev.stop_propagation();
    run_command(panel, command);
}
