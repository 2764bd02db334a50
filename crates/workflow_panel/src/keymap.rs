//! Keyboard shortcut mapping for a focused panel.

use crate::selection::Modifiers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Panel action bound to a key.
pub enum PanelCommand {
    /// F2.
    Rename,
    /// Delete.
    Delete,
    /// Enter.
    Activate,
    /// Backspace.
    NavigateBack,
    /// Ctrl+A.
    SelectAll,
    /// Ctrl+C.
    Copy,
    /// Ctrl+X.
    Cut,
    /// Ctrl+V.
    Paste,
    /// Ctrl+N.
    NewFolder,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Panel facts that gate shortcuts.
pub struct KeyContext {
    /// At least one row is selected.
    pub has_selection: bool,
    /// The clipboard holds a cut or copy.
    pub has_clipboard: bool,
}

/// Maps a `KeyboardEvent.key` value to a command; `None` leaves the event to the browser.
pub fn command_for_key(
    key: &str,
    modifiers: Modifiers,
    context: KeyContext,
) -> Option<PanelCommand> {
    if modifiers.ctrl {
        return match key.to_ascii_lowercase().as_str() {
            "a" => Some(PanelCommand::SelectAll),
            "c" if context.has_selection => Some(PanelCommand::Copy),
            "x" if context.has_selection => Some(PanelCommand::Cut),
            "v" if context.has_clipboard => Some(PanelCommand::Paste),
            "n" => Some(PanelCommand::NewFolder),
            _ => None,
        };
    }

    match key {
        "F2" if context.has_selection => Some(PanelCommand::Rename),
        "Delete" if context.has_selection => Some(PanelCommand::Delete),
        "Enter" if context.has_selection => Some(PanelCommand::Activate),
        "Backspace" => Some(PanelCommand::NavigateBack),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortcuts_respect_selection_and_clipboard() {
        let empty = KeyContext::default();
        let selected = KeyContext {
            has_selection: true,
            has_clipboard: false,
        };

        assert_eq!(command_for_key("F2", Modifiers::NONE, empty), None);
        assert_eq!(
            command_for_key("F2", Modifiers::NONE, selected),
            Some(PanelCommand::Rename)
        );
        assert_eq!(
            command_for_key("Backspace", Modifiers::NONE, empty),
            Some(PanelCommand::NavigateBack)
        );
        assert_eq!(
            command_for_key("A", Modifiers::CTRL, empty),
            Some(PanelCommand::SelectAll)
        );
        assert_eq!(command_for_key("v", Modifiers::CTRL, selected), None);
        assert_eq!(
            command_for_key(
                "v",
                Modifiers::CTRL,
                KeyContext {
                    has_clipboard: true,
                    ..empty
                }
            ),
            Some(PanelCommand::Paste)
        );
        assert_eq!(command_for_key("x", Modifiers::NONE, selected), None);
    }
}
