//! Host service bundle injected into a workflow panel.

use std::rc::Rc;

use crate::{
    DirectoryClient, DocumentOpener, ImmediateTimer, NoopDirectoryClient, NoopNotificationService,
    NotificationService, Timer,
};

/// Host strategy selected for the current build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Browser composition backed by HTTP and the page's editor globals.
    Browser,
    /// Composition without a browser (tests, offline previews).
    Headless,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Headless => "headless",
        }
    }
}

/// Runtime-selected services a panel talks to.
///
/// Environment-specific selection happens before this bundle reaches `workflow_panel`, which keeps
/// the panel free of browser details.
#[derive(Clone)]
pub struct PanelHostServices {
    /// Directory backend.
    pub directory: Rc<dyn DirectoryClient>,
    /// Transient user notifications.
    pub notifications: Rc<dyn NotificationService>,
    /// Timer used for preview timeouts.
    pub timer: Rc<dyn Timer>,
    /// Editor hand-off strategies, tried in order.
    pub openers: Vec<Rc<dyn DocumentOpener>>,
    /// Strategy identifier for diagnostics.
    pub host_strategy: HostStrategy,
}

impl PanelHostServices {
    /// Builds a headless bundle over `directory` with silent notifications and no openers.
    pub fn headless(directory: Rc<dyn DirectoryClient>) -> Self {
        Self {
            directory,
            notifications: Rc::new(NoopNotificationService),
            timer: Rc::new(ImmediateTimer),
            openers: Vec::new(),
            host_strategy: HostStrategy::Headless,
        }
    }

    /// Replaces the notification service.
    pub fn with_notifications(mut self, notifications: Rc<dyn NotificationService>) -> Self {
        self.notifications = notifications;
        self
    }

    /// Replaces the timer.
    pub fn with_timer(mut self, timer: Rc<dyn Timer>) -> Self {
        self.timer = timer;
        self
    }

    /// Appends an opener strategy to the end of the chain.
    pub fn with_opener(mut self, opener: Rc<dyn DocumentOpener>) -> Self {
        self.openers.push(opener);
        self
    }
}

impl Default for PanelHostServices {
    fn default() -> Self {
        Self::headless(Rc::new(NoopDirectoryClient))
    }
}

impl std::fmt::Debug for PanelHostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelHostServices")
            .field("host_strategy", &self.host_strategy)
            .field(
                "openers",
                &self.openers.iter().map(|o| o.name()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryDocumentOpener;

    #[test]
    fn builder_appends_openers_in_order() {
        let services = PanelHostServices::default()
            .with_opener(Rc::new(MemoryDocumentOpener::new("first")))
            .with_opener(Rc::new(MemoryDocumentOpener::new("second")));
        let names: Vec<_> = services.openers.iter().map(|o| o.name()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(services.host_strategy.as_str(), "headless");
        assert!(format!("{services:?}").contains("second"));
    }
}
