//! Tests for the navgraph event system.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use navgraph_core::events::dispatcher::EventDispatcher;
use navgraph_core::events::handler::LinkEventHandler;
use navgraph_core::events::types::*;

/// A test handler that counts events.
#[derive(Default)]
struct CountingHandler {
    started: AtomicUsize,
    emitted: AtomicUsize,
    unresolved: AtomicUsize,
    complete: AtomicUsize,
    aggregated: AtomicUsize,
}

impl LinkEventHandler for CountingHandler {
    fn on_link_started(&self, _event: &LinkStartedEvent) {
        self.started.fetch_add(1, Ordering::Relaxed);
    }

    fn on_relationship_emitted(&self, _event: &RelationshipEmittedEvent) {
        self.emitted.fetch_add(1, Ordering::Relaxed);
    }

    fn on_unresolved_reference(&self, _event: &UnresolvedReferenceEvent) {
        self.unresolved.fetch_add(1, Ordering::Relaxed);
    }

    fn on_link_complete(&self, _event: &LinkCompleteEvent) {
        self.complete.fetch_add(1, Ordering::Relaxed);
    }

    fn on_batch_aggregated(&self, _event: &BatchAggregatedEvent) {
        self.aggregated.fetch_add(1, Ordering::Relaxed);
    }
}

fn emitted_event() -> RelationshipEmittedEvent {
    RelationshipEmittedEvent {
        integrator: "navigation".into(),
        relationship_type: "SCREEN_CALLS_ACTION".into(),
        source_id: "screen:1".into(),
        target_id: "class:1".into(),
        match_kind: "exact".into(),
        fallback: false,
    }
}

#[test]
fn test_handler_noop_defaults() {
    struct NoopHandler;
    impl LinkEventHandler for NoopHandler {}

    let handler = NoopHandler;
    handler.on_link_started(&LinkStartedEvent {
        integrator: "navigation".into(),
        source_count: 3,
        target_count: 7,
    });
    handler.on_relationship_emitted(&emitted_event());
    handler.on_batch_aggregated(&BatchAggregatedEvent {
        received: 4,
        kept: 4,
        duplicates_dropped: 0,
        dangling_dropped: 0,
    });
}

#[test]
fn test_dispatcher_fans_out_to_every_handler() {
    let a = Arc::new(CountingHandler::default());
    let b = Arc::new(CountingHandler::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(a.clone());
    dispatcher.register(b.clone());
    assert_eq!(dispatcher.handler_count(), 2);

    dispatcher.emit_relationship_emitted(&emitted_event());
    dispatcher.emit_unresolved_reference(&UnresolvedReferenceEvent {
        integrator: "navigation".into(),
        source_id: "screen:1".into(),
        hop: "screen_view".into(),
        reference: "invoice.jsp".into(),
    });
    dispatcher.emit_link_complete(&LinkCompleteEvent {
        integrator: "navigation".into(),
        relationship_count: 1,
        unresolved_count: 1,
        duration_ms: 0,
    });

    for h in [&a, &b] {
        assert_eq!(h.emitted.load(Ordering::Relaxed), 1);
        assert_eq!(h.unresolved.load(Ordering::Relaxed), 1);
        assert_eq!(h.complete.load(Ordering::Relaxed), 1);
        assert_eq!(h.started.load(Ordering::Relaxed), 0);
        assert_eq!(h.aggregated.load(Ordering::Relaxed), 0);
    }
}

#[test]
fn test_panicking_handler_does_not_block_others() {
    struct PanickingHandler;
    impl LinkEventHandler for PanickingHandler {
        fn on_relationship_emitted(&self, _event: &RelationshipEmittedEvent) {
            panic!("handler failure");
        }
    }

    let counter = Arc::new(CountingHandler::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(Arc::new(PanickingHandler));
    dispatcher.register(counter.clone());

    dispatcher.emit_relationship_emitted(&emitted_event());
    assert_eq!(counter.emitted.load(Ordering::Relaxed), 1);
}

#[test]
fn test_empty_dispatcher() {
    let dispatcher = EventDispatcher::default();
    assert!(dispatcher.is_empty());
    dispatcher.emit_relationship_emitted(&emitted_event());
}

#[test]
fn test_events_serialize() {
    let json = serde_json::to_value(emitted_event()).unwrap();
    assert_eq!(json["relationship_type"], "SCREEN_CALLS_ACTION");
    assert_eq!(json["fallback"], false);
}
