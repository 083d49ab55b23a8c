//! RelationshipBatch: the immutable hand-off to persistence.

use chrono::{DateTime, Utc};
use navgraph_core::errors::SinkError;
use serde::{Deserialize, Serialize};

use super::types::{Relationship, RelationshipType};

/// Deduplicated relationships from one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipBatch {
    pub created_at: DateTime<Utc>,
    pub relationships: Vec<Relationship>,
}

impl RelationshipBatch {
    pub fn new(created_at: DateTime<Utc>, relationships: Vec<Relationship>) -> Self {
        Self {
            created_at,
            relationships,
        }
    }

    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }

    pub fn of_type(&self, relationship_type: RelationshipType) -> impl Iterator<Item = &Relationship> {
        self.relationships
            .iter()
            .filter(move |r| r.relationship_type == relationship_type)
    }

    pub fn to_json(&self) -> Result<String, SinkError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, SinkError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
