//! Relationships: typed, directed, weighted edges between entities.

pub mod batch;
pub mod builder;
pub mod context;
pub mod types;

pub use batch::RelationshipBatch;
pub use builder::{LinkPass, RelationshipBuilder};
pub use context::LinkContext;
pub use types::{MatchKind, Relationship, RelationshipKey, RelationshipType};
