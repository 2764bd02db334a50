//! Browser composition of [`PanelHostServices`].

use std::rc::Rc;

use workflow_host::{HostStrategy, PanelHostServices};

use crate::{default_openers, ApiRoutes, HttpDirectoryClient, ToastNotificationService, WebTimer};

/// Builds the browser service bundle: HTTP backend over `routes`, DOM toasts, `setTimeout`
/// timer, and the full editor opener chain.
pub fn build_host_services(routes: ApiRoutes) -> PanelHostServices {
    PanelHostServices {
        directory: Rc::new(HttpDirectoryClient::new(routes)),
        notifications: Rc::new(ToastNotificationService),
        timer: Rc::new(WebTimer),
        openers: default_openers(),
        host_strategy: HostStrategy::Browser,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_bundle_wires_every_service() {
        let services = build_host_services(ApiRoutes::with_base_url("/wm"));
        assert_eq!(services.host_strategy, HostStrategy::Browser);
        assert_eq!(services.openers.len(), 4);
        assert_eq!(services.openers[0].name(), "load-graph-data");
    }
}
