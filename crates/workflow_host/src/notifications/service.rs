//! Notification service contracts, no-op adapter, and recording adapter.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`NotificationService`].
pub type NotificationFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Severity of a transient user notification.
pub enum NotificationLevel {
    /// Neutral information.
    Info,
    /// A completed operation.
    Success,
    /// A rejected request or partial failure.
    Warning,
    /// A failed operation.
    Error,
}

impl NotificationLevel {
    /// Returns a stable token used by toast renderers.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Host service for user-visible notifications.
pub trait NotificationService {
    /// Dispatches a notification message.
    fn notify<'a>(
        &'a self,
        level: NotificationLevel,
        message: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op notification service for unsupported targets.
pub struct NoopNotificationService;

impl NotificationService for NoopNotificationService {
    fn notify<'a>(
        &'a self,
        _level: NotificationLevel,
        _message: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// Notification service that records every message; clones share the log.
pub struct MemoryNotificationService {
    inner: Rc<RefCell<Vec<(NotificationLevel, String)>>>,
}

impl MemoryNotificationService {
    /// Returns the recorded notifications in order.
    pub fn messages(&self) -> Vec<(NotificationLevel, String)> {
        self.inner.borrow().clone()
    }

    /// Returns the most recent notification.
    pub fn last(&self) -> Option<(NotificationLevel, String)> {
        self.inner.borrow().last().cloned()
    }

    /// Clears the recorded notifications.
    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }
}

impl NotificationService for MemoryNotificationService {
    fn notify<'a>(
        &'a self,
        level: NotificationLevel,
        message: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().push((level, message.to_string()));
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn memory_notifications_share_log_across_clones() {
        let notes = MemoryNotificationService::default();
        let handle = notes.clone();
        let service: &dyn NotificationService = &notes;

        block_on(service.notify(NotificationLevel::Warning, "nothing selected")).expect("notify");
        block_on(NoopNotificationService.notify(NotificationLevel::Info, "dropped")).expect("noop");

        assert_eq!(
            handle.last(),
            Some((NotificationLevel::Warning, "nothing selected".to_string()))
        );
        assert_eq!(handle.messages().len(), 1);
        handle.clear();
        assert!(notes.messages().is_empty());
    }
}
