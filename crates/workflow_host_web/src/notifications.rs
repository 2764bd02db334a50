//! Toast notification adapter for the browser panel.

use workflow_host::{NotificationFuture, NotificationLevel, NotificationService};

#[derive(Debug, Clone, Copy, Default)]
/// Notification adapter that renders transient DOM toasts.
pub struct ToastNotificationService;

impl NotificationService for ToastNotificationService {
    fn notify<'a>(
        &'a self,
        level: NotificationLevel,
        message: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async move {
            if message.trim().is_empty() {
                return Ok(());
            }
            crate::bridge::show_toast(level.as_str(), message)
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn blank_messages_are_dropped_before_the_bridge() {
        let service = ToastNotificationService;
        block_on(service.notify(NotificationLevel::Info, "   ")).expect("blank message");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn toasts_are_unsupported_outside_the_browser() {
        let service: &dyn NotificationService = &ToastNotificationService;
        assert!(block_on(service.notify(NotificationLevel::Error, "boom")).is_err());
    }
}
