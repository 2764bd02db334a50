//! Host editor hand-off contract: an ordered chain of document opener strategies.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use crate::fs::types::OpenDocumentRequest;

/// Object-safe boxed future used by [`DocumentOpener`].
pub type OpenerFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// One way of handing a fetched document to the host editor.
///
/// The panel tries strategies in order and stops at the first available one that succeeds.
pub trait DocumentOpener {
    /// Stable strategy name for diagnostics.
    fn name(&self) -> &'static str;

    /// Returns whether the host currently exposes this strategy.
    fn is_available(&self) -> bool;

    /// Hands `request` to the host editor.
    fn open<'a>(
        &'a self,
        request: &'a OpenDocumentRequest,
    ) -> OpenerFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone)]
/// Recording opener for tests; clones share the record of opened paths.
pub struct MemoryDocumentOpener {
    name: &'static str,
    available: bool,
    failure: Option<String>,
    opened: Rc<RefCell<Vec<String>>>,
}

impl MemoryDocumentOpener {
    /// Creates an available opener that accepts every request.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            available: true,
            failure: None,
            opened: Rc::default(),
        }
    }

    /// Creates an opener that reports itself unavailable.
    pub fn unavailable(name: &'static str) -> Self {
        Self {
            available: false,
            ..Self::new(name)
        }
    }

    /// Creates an available opener that rejects every request with `message`.
    pub fn failing(name: &'static str, message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new(name)
        }
    }

    /// Returns the paths this opener was asked to open, including rejected ones.
    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl DocumentOpener for MemoryDocumentOpener {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn open<'a>(
        &'a self,
        request: &'a OpenDocumentRequest,
    ) -> OpenerFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.opened.borrow_mut().push(request.path.clone());
            match &self.failure {
                Some(message) => Err(message.clone()),
                None => Ok(()),
            }
        })
    }
}
