//! LinkEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for observing linking events.
///
/// Handlers override only the events they care about. Events never drive
/// control flow. `Send + Sync` because integrators may run on rayon workers.
pub trait LinkEventHandler: Send + Sync {
    fn on_link_started(&self, _event: &LinkStartedEvent) {}
    fn on_relationship_emitted(&self, _event: &RelationshipEmittedEvent) {}
    fn on_unresolved_reference(&self, _event: &UnresolvedReferenceEvent) {}
    fn on_link_complete(&self, _event: &LinkCompleteEvent) {}
    fn on_batch_aggregated(&self, _event: &BatchAggregatedEvent) {}
}
