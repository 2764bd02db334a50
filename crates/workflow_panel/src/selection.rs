//! Click, ctrl-click, and shift-click selection over the visible render order.

use crate::model::ViewState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Modifier keys held during a pointer or keyboard gesture.
pub struct Modifiers {
    /// Ctrl on Windows/Linux, Cmd on macOS.
    pub ctrl: bool,
    /// Shift.
    pub shift: bool,
}

impl Modifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
    };
    /// Ctrl/Cmd only.
    pub const CTRL: Self = Self {
        ctrl: true,
        shift: false,
    };
    /// Shift only.
    pub const SHIFT: Self = Self {
        ctrl: false,
        shift: true,
    };
}

/// Applies a click on `path`.
///
/// `order` is the visible render order; it decides shift ranges. A shift range is added to the
/// current selection, so repeating a shift-click on the same endpoint leaves the set unchanged.
pub fn click(state: &mut ViewState, order: &[String], path: &str, modifiers: Modifiers) {
    if modifiers.shift {
        let anchor_index = state
            .last_selected_item
            .as_deref()
            .and_then(|anchor| order.iter().position(|p| p == anchor));
        let target_index = order.iter().position(|p| p == path);
        if let (Some(anchor), Some(target)) = (anchor_index, target_index) {
            let (start, end) = if anchor <= target {
                (anchor, target)
            } else {
                (target, anchor)
            };
            state
                .selected_items
                .extend(order[start..=end].iter().cloned());
            state.last_selected_item = Some(path.to_string());
            return;
        }
        select_single(state, path);
        return;
    }

    if modifiers.ctrl {
        toggle(state, path);
        return;
    }

    select_single(state, path);
}

/// Replaces the selection with `path` and anchors on it.
pub fn select_single(state: &mut ViewState, path: &str) {
    state.selected_items.clear();
    state.selected_items.insert(path.to_string());
    state.last_selected_item = Some(path.to_string());
}

/// Toggles membership of `path`, anchoring on it when added.
pub fn toggle(state: &mut ViewState, path: &str) {
    if state.selected_items.remove(path) {
        repair_anchor(state);
    } else {
        state.selected_items.insert(path.to_string());
        state.last_selected_item = Some(path.to_string());
    }
}

/// Clears selection and anchor (click on empty canvas).
pub fn clear(state: &mut ViewState) {
    state.selected_items.clear();
    state.last_selected_item = None;
}

/// Selects every visible row; the anchor becomes the first one.
pub fn select_all(state: &mut ViewState, order: &[String]) {
    state.selected_items = order.iter().cloned().collect();
    state.last_selected_item = order.first().cloned();
}

/// Reassigns an anchor that left the selection to the first remaining member in path order.
pub(crate) fn repair_anchor(state: &mut ViewState) {
    let stale = state
        .last_selected_item
        .as_ref()
        .is_some_and(|anchor| !state.selected_items.contains(anchor));
    if stale || (state.last_selected_item.is_none() && !state.selected_items.is_empty()) {
        state.last_selected_item = state.selected_items.iter().next().cloned();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn order(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    fn selected(state: &ViewState) -> Vec<&str> {
        state.selected_items.iter().map(String::as_str).collect()
    }

    #[test]
    fn plain_click_selects_single_and_anchors() {
        let mut state = ViewState::default();
        let order = order(&["a", "b.json"]);
        click(&mut state, &order, "b.json", Modifiers::NONE);
        click(&mut state, &order, "a", Modifiers::NONE);
        assert_eq!(selected(&state), vec!["a"]);
        assert_eq!(state.last_selected_item.as_deref(), Some("a"));
    }

    #[test]
    fn shift_click_selects_inclusive_range_and_moves_anchor() {
        let mut state = ViewState::default();
        let order = order(&["a", "b.json"]);
        click(&mut state, &order, "a", Modifiers::NONE);
        click(&mut state, &order, "b.json", Modifiers::SHIFT);
        assert_eq!(selected(&state), vec!["a", "b.json"]);
        assert_eq!(state.last_selected_item.as_deref(), Some("b.json"));
    }

    #[test]
    fn shift_click_same_endpoint_twice_is_idempotent() {
        let mut state = ViewState::default();
        let order = order(&["d", "a/x.json", "a/y.json", "e.json", "f.json"]);
        click(&mut state, &order, "a/x.json", Modifiers::NONE);
        click(&mut state, &order, "f.json", Modifiers::SHIFT);
        let first = state.selected_items.clone();
        click(&mut state, &order, "f.json", Modifiers::SHIFT);
        assert_eq!(state.selected_items, first);
        assert_eq!(
            selected(&state),
            vec!["a/x.json", "a/y.json", "e.json", "f.json"]
        );
    }

    #[test]
    fn shift_click_with_hidden_anchor_falls_back_to_plain_click() {
        let mut state = ViewState::default();
        state.selected_items.insert("a/x.json".to_string());
        state.last_selected_item = Some("a/x.json".to_string());
        let order = order(&["a", "b.json", "c.json"]);
        click(&mut state, &order, "c.json", Modifiers::SHIFT);
        assert_eq!(selected(&state), vec!["c.json"]);
        assert_eq!(state.last_selected_item.as_deref(), Some("c.json"));
    }

    #[test]
    fn ctrl_click_toggles_and_reassigns_anchor() {
        let mut state = ViewState::default();
        let order = order(&["a", "b.json", "c.json"]);
        click(&mut state, &order, "c.json", Modifiers::NONE);
        click(&mut state, &order, "a", Modifiers::CTRL);
        click(&mut state, &order, "b.json", Modifiers::CTRL);
        assert_eq!(state.last_selected_item.as_deref(), Some("b.json"));

        click(&mut state, &order, "b.json", Modifiers::CTRL);
        assert_eq!(selected(&state), vec!["a", "c.json"]);
        assert_eq!(state.last_selected_item.as_deref(), Some("a"));

        click(&mut state, &order, "a", Modifiers::CTRL);
        click(&mut state, &order, "c.json", Modifiers::CTRL);
        assert!(state.selected_items.is_empty());
        assert_eq!(state.last_selected_item, None);
    }

    #[test]
    fn select_all_and_clear() {
        let mut state = ViewState::default();
        let order = order(&["a", "b.json"]);
        select_all(&mut state, &order);
        assert_eq!(selected(&state), vec!["a", "b.json"]);
        assert_eq!(state.last_selected_item.as_deref(), Some("a"));
        clear(&mut state);
        assert!(state.selected_items.is_empty());
        assert_eq!(state.last_selected_item, None);
    }
}
