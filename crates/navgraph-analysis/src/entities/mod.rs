//! Entity collections produced upstream by the per-artifact parsers.
//!
//! Entities are immutable once parsed: integrators read them, never mutate
//! them. Each constructor derives the deterministic entity ID from the
//! kind's composite key.

pub mod collections;
pub mod kind;
pub mod types;

pub use collections::{EntityCollections, EntityIndex, EntityRef};
pub use kind::EntityKind;
pub use types::{ClassNode, Entity, JspPage, MenuItem, Properties, Screen, WebFlowDefinition};
