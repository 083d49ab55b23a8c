//! RelationshipSink: the persistence hand-off contract.

use std::collections::BTreeMap;
use std::sync::Mutex;

use navgraph_core::errors::SinkError;

use crate::relationship::{Relationship, RelationshipBatch};

/// Accepts relationship batches. Implementations MERGE on `entity_id`:
/// re-persisting an equivalent batch adds no relationships.
pub trait RelationshipSink: Send + Sync {
    /// Persist a batch, returning how many relationships were accepted.
    fn persist(&self, batch: &RelationshipBatch) -> Result<usize, SinkError>;
}

/// In-process sink keyed by relationship entity ID.
#[derive(Debug, Default)]
pub struct InMemorySink {
    state: Mutex<SinkState>,
}

#[derive(Debug, Default)]
struct SinkState {
    merged: BTreeMap<String, Relationship>,
    batches: usize,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut SinkState) -> T) -> Result<T, SinkError> {
        let mut state = self.state.lock().map_err(|_| SinkError::Unavailable {
            message: "in-memory sink lock poisoned".to_string(),
        })?;
        Ok(f(&mut state))
    }

    /// Stored relationships ordered by entity ID.
    pub fn merged(&self) -> Result<Vec<Relationship>, SinkError> {
        self.with_state(|s| s.merged.values().cloned().collect())
    }

    pub fn len(&self) -> Result<usize, SinkError> {
        self.with_state(|s| s.merged.len())
    }

    pub fn is_empty(&self) -> Result<bool, SinkError> {
        self.with_state(|s| s.merged.is_empty())
    }

    pub fn batches_received(&self) -> Result<usize, SinkError> {
        self.with_state(|s| s.batches)
    }
}

impl RelationshipSink for InMemorySink {
    fn persist(&self, batch: &RelationshipBatch) -> Result<usize, SinkError> {
        self.with_state(|s| {
            s.batches += 1;
            for r in &batch.relationships {
                s.merged.insert(r.entity_id.clone(), r.clone());
            }
            batch.len()
        })
    }
}
