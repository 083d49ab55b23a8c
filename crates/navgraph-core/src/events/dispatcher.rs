//! EventDispatcher: synchronous event dispatch with zero overhead when empty.

use std::sync::Arc;

use super::handler::LinkEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn LinkEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: Arc<dyn LinkEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit to every handler. A panicking handler is logged and skipped so
    /// later handlers still receive the event.
    fn emit<F: Fn(&dyn LinkEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!("link event handler panicked; continuing");
            }
        }
    }

    pub fn emit_link_started(&self, event: &LinkStartedEvent) {
        self.emit(|h| h.on_link_started(event));
    }

    pub fn emit_relationship_emitted(&self, event: &RelationshipEmittedEvent) {
        self.emit(|h| h.on_relationship_emitted(event));
    }

    pub fn emit_unresolved_reference(&self, event: &UnresolvedReferenceEvent) {
        self.emit(|h| h.on_unresolved_reference(event));
    }

    pub fn emit_link_complete(&self, event: &LinkCompleteEvent) {
        self.emit(|h| h.on_link_complete(event));
    }

    pub fn emit_batch_aggregated(&self, event: &BatchAggregatedEvent) {
        self.emit(|h| h.on_batch_aggregated(event));
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
