//! RelationshipAggregator: merges integrator outputs, one edge per
//! (type, source, target).
//!
//! The merge is order-independent and idempotent: the surviving record for a
//! key is chosen by a total order (highest weight, then smallest id, then
//! integrator name, then earliest `created_at`, then properties), never by
//! arrival order, and output is sorted by key.

use std::cmp::Ordering;

use navgraph_core::types::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::entities::EntityIndex;
use crate::relationship::{Relationship, RelationshipKey};

/// Counters for one aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationStats {
    pub received: usize,
    pub kept: usize,
    pub duplicates_dropped: usize,
    pub dangling_dropped: usize,
}

/// Deduplicated relationships, sorted by (type, source, target).
#[derive(Debug, Clone, Default)]
pub struct AggregatedBatch {
    pub relationships: Vec<Relationship>,
    pub stats: AggregationStats,
}

/// Accumulates relationships from any number of integrators.
#[derive(Debug, Default)]
pub struct RelationshipAggregator {
    by_key: FxHashMap<RelationshipKey, Relationship>,
    received: usize,
}

impl RelationshipAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, relationship: Relationship) {
        self.received += 1;
        let key = relationship.key();
        match self.by_key.get_mut(&key) {
            Some(existing) => {
                if prefer(&relationship, existing) == Ordering::Less {
                    *existing = relationship;
                }
            }
            None => {
                self.by_key.insert(key, relationship);
            }
        }
    }

    pub fn extend<I: IntoIterator<Item = Relationship>>(&mut self, relationships: I) {
        for r in relationships {
            self.add(r);
        }
    }

    pub fn received(&self) -> usize {
        self.received
    }

    /// Distinct keys seen so far.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub fn contains(&self, key: &RelationshipKey) -> bool {
        self.by_key.contains_key(key)
    }

    pub fn finish(self) -> AggregatedBatch {
        let received = self.received;
        let mut relationships: Vec<(RelationshipKey, Relationship)> =
            self.by_key.into_iter().collect();
        relationships.sort_by(|a, b| a.0.cmp(&b.0));
        let relationships: Vec<Relationship> =
            relationships.into_iter().map(|(_, r)| r).collect();

        let kept = relationships.len();
        AggregatedBatch {
            relationships,
            stats: AggregationStats {
                received,
                kept,
                duplicates_dropped: received - kept,
                dangling_dropped: 0,
            },
        }
    }

    /// Like [`finish`](Self::finish), additionally dropping relationships
    /// whose source or target is absent from `index`.
    pub fn finish_pruned(self, index: &EntityIndex<'_>) -> AggregatedBatch {
        let mut batch = self.finish();
        let before = batch.relationships.len();
        batch.relationships.retain(|r| {
            let known = index.contains(&r.source_id) && index.contains(&r.target_id);
            if !known {
                tracing::warn!(
                    relationship_type = r.relationship_type.name(),
                    source_id = %r.source_id,
                    target_id = %r.target_id,
                    "Dropping relationship with unknown endpoint"
                );
            }
            known
        });
        batch.stats.dangling_dropped = before - batch.relationships.len();
        batch.stats.kept = batch.relationships.len();
        batch
    }
}

/// `Less` when `a` should replace `b`. Total over every field that can
/// differ between records sharing a key.
fn prefer(a: &Relationship, b: &Relationship) -> Ordering {
    b.weight
        .total_cmp(&a.weight)
        .then_with(|| a.id.cmp(&b.id))
        .then_with(|| integrator_of(a).cmp(integrator_of(b)))
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.entity_id.cmp(&b.entity_id))
        .then_with(|| canonical_properties(a).cmp(&canonical_properties(b)))
}

/// Properties are a `BTreeMap`, so their JSON text is canonical.
fn canonical_properties(r: &Relationship) -> String {
    serde_json::to_string(&r.properties).unwrap_or_default()
}

fn integrator_of(r: &Relationship) -> &str {
    r.properties
        .get("integrator")
        .and_then(|v| v.as_str())
        .unwrap_or("")
}

/// Merge several integrator outputs without endpoint pruning.
pub fn aggregate<I>(outputs: I) -> AggregatedBatch
where
    I: IntoIterator<Item = Vec<Relationship>>,
{
    let mut aggregator = RelationshipAggregator::new();
    for output in outputs {
        aggregator.extend(output);
    }
    aggregator.finish()
}
