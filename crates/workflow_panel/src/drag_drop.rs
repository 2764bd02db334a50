//! Internal drag gesture: payload selection, drop validity, and the hover state machine.

use workflow_host::{has_extension, is_within_any, EntryKind, DOCUMENT_EXTENSION};

use crate::model::ViewState;
use crate::selection::select_single;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Operation a drop performs.
pub enum DropEffect {
    /// Relocate the dragged entries.
    Move,
    /// Duplicate the dragged entries.
    Copy,
}

impl DropEffect {
    /// Ctrl/Cmd held means copy.
    pub const fn from_modifier(copy: bool) -> Self {
        if copy {
            Self::Copy
        } else {
            Self::Move
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Where a drag is hovering or dropping.
pub enum DropTarget {
    /// A directory row.
    Directory(String),
    /// The empty-folder placeholder or blank canvas; resolves to the current directory.
    CurrentDirectory,
}

impl DropTarget {
    /// Resolves the target to a directory path.
    pub fn resolve(&self, current_path: &str) -> String {
        match self {
            Self::Directory(path) => path.clone(),
            Self::CurrentDirectory => current_path.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Phase of one drag gesture. Row highlighting is a projection of this value.
pub enum DragPhase {
    /// No gesture.
    #[default]
    Idle,
    /// Dragging, not over a drop target.
    Dragging,
    /// Over a directory that accepts the payload.
    HoverValid {
        /// Resolved target directory.
        target: String,
        /// Operation a drop would perform.
        effect: DropEffect,
    },
    /// Over a directory that rejects the payload.
    HoverInvalid {
        /// Resolved target directory.
        target: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// State of the current drag gesture.
pub struct DragSession {
    phase: DragPhase,
    payload: Vec<String>,
}

impl DragSession {
    /// Current phase.
    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    /// Dragged paths (empty when idle).
    pub fn payload(&self) -> &[String] {
        &self.payload
    }

    /// Returns `true` while a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.phase != DragPhase::Idle
    }

    /// `Idle → Dragging`.
    pub fn start(&mut self, payload: Vec<String>) {
        self.payload = payload;
        self.phase = DragPhase::Dragging;
    }

    /// Updates the hover sub-state for `target` and returns whether a drop there is valid.
    pub fn hover(&mut self, target: String, copy: bool) -> bool {
        if !self.is_active() {
            return false;
        }
        let valid = is_valid_drop_target(&target, &self.payload);
        self.phase = if valid {
            DragPhase::HoverValid {
                target,
                effect: DropEffect::from_modifier(copy),
            }
        } else {
            DragPhase::HoverInvalid { target }
        };
        valid
    }

    /// Pointer left every drop target.
    pub fn leave(&mut self) {
        if self.is_active() {
            self.phase = DragPhase::Dragging;
        }
    }

    /// Ends the gesture (drop or dragend) and hands back the payload.
    pub fn finish(&mut self) -> Vec<String> {
        self.phase = DragPhase::Idle;
        std::mem::take(&mut self.payload)
    }
}

/// Returns `true` when `target` is neither a dragged path nor inside one.
pub fn is_valid_drop_target<S: AsRef<str>>(target: &str, dragged: &[S]) -> bool {
    !dragged.is_empty() && !is_within_any(target, dragged)
}

/// Computes the payload for a drag starting on `path`.
///
/// An unselected item becomes the single selection first. When the dragged item is a document,
/// only documents with the document extension travel with it.
pub fn drag_payload(
    state: &mut ViewState,
    path: &str,
    kind_of: impl Fn(&str) -> Option<EntryKind>,
) -> Vec<String> {
    if !state.is_selected(path) {
        select_single(state, path);
    }

    let dragged_is_document = kind_of(path) == Some(EntryKind::Document);
    state
        .selected_items
        .iter()
        .filter(|selected| {
            !dragged_is_document
                || (kind_of(selected) == Some(EntryKind::Document)
                    && has_extension(selected, DOCUMENT_EXTENSION))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn kind(path: &str) -> Option<EntryKind> {
        if path.ends_with(".json") || path.ends_with(".txt") {
            Some(EntryKind::Document)
        } else {
            Some(EntryKind::Directory)
        }
    }

    #[test]
    fn drop_onto_self_or_descendant_is_rejected() {
        let dragged = vec!["a".to_string()];
        for target in ["a", "a/sub", "a/sub/deeper"] {
            assert!(!is_valid_drop_target(target, &dragged), "target={target}");
        }
        assert!(is_valid_drop_target("ab", &dragged));
        assert!(is_valid_drop_target("", &dragged));
        assert!(!is_valid_drop_target::<String>("x", &[]));
    }

    #[test]
    fn every_ancestor_rejects_drop_onto_descendant() {
        let path = "p/q/r/s";
        let mut ancestor = String::new();
        for segment in path.split('/') {
            ancestor = workflow_host::join_path(&ancestor, segment);
            assert!(!is_valid_drop_target(path, &[ancestor.as_str()]));
        }
    }

    #[test]
    fn drag_start_selects_unselected_item_and_filters_documents() {
        let mut state = ViewState::default();
        for path in ["dir", "x.json", "notes.txt"] {
            state.selected_items.insert(path.to_string());
        }

        let payload = drag_payload(&mut state, "x.json", kind);
        assert_eq!(payload, vec!["x.json".to_string()]);

        let payload = drag_payload(&mut state, "dir", kind);
        assert_eq!(payload.len(), 3);

        let payload = drag_payload(&mut state, "other.json", kind);
        assert_eq!(payload, vec!["other.json".to_string()]);
        assert_eq!(state.last_selected_item.as_deref(), Some("other.json"));
    }

    #[test]
    fn gesture_moves_through_hover_states_and_back_to_idle() {
        let mut session = DragSession::default();
        assert!(!session.hover("b".to_string(), false));
        assert_eq!(session.phase(), &DragPhase::Idle);

        session.start(vec!["a".to_string()]);
        assert!(session.hover("b".to_string(), true));
        assert_eq!(
            session.phase(),
            &DragPhase::HoverValid {
                target: "b".to_string(),
                effect: DropEffect::Copy
            }
        );
        assert!(!session.hover("a/sub".to_string(), false));
        assert!(matches!(session.phase(), DragPhase::HoverInvalid { .. }));
        session.leave();
        assert_eq!(session.phase(), &DragPhase::Dragging);

        assert_eq!(session.finish(), vec!["a".to_string()]);
        assert!(!session.is_active());
        assert!(session.payload().is_empty());
    }
}
