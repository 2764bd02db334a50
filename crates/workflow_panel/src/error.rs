//! Panel operation errors.

use thiserror::Error;
use workflow_host::NotificationLevel;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures reported by panel operations. Every one is also surfaced as a notification.
pub enum PanelError {
    /// A name was empty after trimming.
    #[error("name must not be empty")]
    EmptyName,
    /// A name contained a path separator.
    #[error("name must not contain '/': {0}")]
    InvalidName(String),
    /// The operation needs a selection.
    #[error("nothing is selected")]
    NothingSelected,
    /// Rename and keyboard activation need exactly one selected item.
    #[error("select exactly one item")]
    NotSingleSelection,
    /// Paste with nothing staged.
    #[error("the clipboard is empty")]
    EmptyClipboard,
    /// The path is not a rendered row.
    #[error("not in the current listing: {0}")]
    UnknownEntry(String),
    /// Drop target is a dragged path or inside one.
    #[error("cannot drop into {0}: it is part of the dragged selection")]
    InvalidDropTarget(String),
    /// A drop arrived without an active drag.
    #[error("no drag in progress")]
    NoActiveDrag,
    /// An external drop carried no workflow documents.
    #[error("no workflow documents to upload")]
    NothingToUpload,
    /// A preview replacement was not an image.
    #[error("not an image: {0}")]
    NotAnImage(String),
    /// The backend or transport rejected a request.
    #[error("{0}")]
    Backend(String),
    /// Every editor hand-off strategy was unavailable or failed.
    #[error("could not open {0} in the editor")]
    NoOpener(String),
}

impl PanelError {
    /// Notification level used when the error is shown to the user.
    pub const fn severity(&self) -> NotificationLevel {
        match self {
            Self::Backend(_) | Self::NoOpener(_) => NotificationLevel::Error,
            _ => NotificationLevel::Warning,
        }
    }

    /// Returns `true` for errors caught before any backend call.
    pub const fn is_validation(&self) -> bool {
        !matches!(self, Self::Backend(_) | Self::NoOpener(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_warn_and_backend_errors_fail() {
        assert_eq!(PanelError::EmptyName.severity(), NotificationLevel::Warning);
        assert!(PanelError::InvalidDropTarget("a/sub".into()).is_validation());
        let backend = PanelError::Backend("disk full".into());
        assert_eq!(backend.severity(), NotificationLevel::Error);
        assert_eq!(backend.to_string(), "disk full");
        assert!(!backend.is_validation());
    }
}
