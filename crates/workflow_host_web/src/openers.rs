//! Host editor strategies probed on the page's editor global.

use std::rc::Rc;

use workflow_host::{DocumentOpener, OpenDocumentRequest, OpenerFuture};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One editor entry point the page may expose.
pub enum EditorStrategy {
    /// `app.loadGraphData(document, ..., path)`.
    LoadGraphData,
    /// `app.workflowStore.openWorkflow({...})`.
    WorkflowStore,
    /// `app.workflowService.openWorkflow({...})`.
    WorkflowService,
    /// `app.handleFile(file)` with a synthesized JSON `File`.
    SyntheticFile,
}

impl EditorStrategy {
    /// Strategies in the order the panel should try them.
    pub const ORDERED: [Self; 4] = [
        Self::LoadGraphData,
        Self::WorkflowStore,
        Self::WorkflowService,
        Self::SyntheticFile,
    ];

    /// Stable token shared with the JS probe.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LoadGraphData => "load-graph-data",
            Self::WorkflowStore => "workflow-store",
            Self::WorkflowService => "workflow-service",
            Self::SyntheticFile => "synthetic-file",
        }
    }
}

#[derive(Debug, Clone, Copy)]
/// [`DocumentOpener`] delegating to one [`EditorStrategy`].
pub struct HostEditorOpener {
    strategy: EditorStrategy,
}

impl HostEditorOpener {
    /// Creates an opener for `strategy`.
    pub const fn new(strategy: EditorStrategy) -> Self {
        Self { strategy }
    }

    /// Returns the wrapped strategy.
    pub const fn strategy(&self) -> EditorStrategy {
        self.strategy
    }
}

impl DocumentOpener for HostEditorOpener {
    fn name(&self) -> &'static str {
        self.strategy.as_str()
    }

    fn is_available(&self) -> bool {
        crate::bridge::editor_probe(self.strategy.as_str())
    }

    fn open<'a>(
        &'a self,
        request: &'a OpenDocumentRequest,
    ) -> OpenerFuture<'a, Result<(), String>> {
        Box::pin(async move {
            crate::bridge::open_in_editor(self.strategy.as_str(), request).await
        })
    }
}

/// Returns the full opener chain in fallback order.
pub fn default_openers() -> Vec<Rc<dyn DocumentOpener>> {
    EditorStrategy::ORDERED
        .into_iter()
        .map(|strategy| Rc::new(HostEditorOpener::new(strategy)) as Rc<dyn DocumentOpener>)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_chain_keeps_fallback_order() {
        let names: Vec<_> = default_openers().iter().map(|o| o.name()).collect();
        assert_eq!(
            names,
            vec![
                "load-graph-data",
                "workflow-store",
                "workflow-service",
                "synthetic-file"
            ]
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn strategies_are_unavailable_outside_the_browser() {
        assert!(default_openers().iter().all(|opener| !opener.is_available()));
        let opener = HostEditorOpener::new(EditorStrategy::WorkflowStore);
        assert_eq!(opener.strategy(), EditorStrategy::WorkflowStore);
    }
}
