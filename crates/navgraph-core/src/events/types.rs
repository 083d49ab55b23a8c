//! Event payloads emitted during linking and aggregation.

use serde::{Deserialize, Serialize};

/// An integrator started a pass over one snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkStartedEvent {
    pub integrator: String,
    pub source_count: usize,
    pub target_count: usize,
}

/// A relationship was emitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipEmittedEvent {
    pub integrator: String,
    pub relationship_type: String,
    pub source_id: String,
    pub target_id: String,
    pub match_kind: String,
    /// Emitted by the fallback pass rather than from a source entity.
    pub fallback: bool,
}

/// A declared reference could not be resolved. Informational only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnresolvedReferenceEvent {
    pub integrator: String,
    pub source_id: String,
    /// The hop that failed, e.g. "screen_action".
    pub hop: String,
    /// The declared key that matched nothing.
    pub reference: String,
}

/// An integrator finished its pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkCompleteEvent {
    pub integrator: String,
    pub relationship_count: usize,
    pub unresolved_count: usize,
    pub duration_ms: u64,
}

/// Integrator outputs were merged into one deduplicated batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchAggregatedEvent {
    pub received: usize,
    pub kept: usize,
    pub duplicates_dropped: usize,
    pub dangling_dropped: usize,
}
