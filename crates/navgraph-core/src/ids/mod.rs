//! Identifier generation.
//!
//! Two kinds of IDs coexist:
//! - entity IDs: a pure function of (kind, composite key), stable across
//!   runs and process restarts, used as the MERGE key by persistence;
//! - instance IDs: unique only within one analysis run, allocated from an
//!   explicitly threaded [`InstanceCounter`].

pub mod entity;
pub mod instance;

pub use entity::entity_id;
pub use instance::{instance_id, normalize_key, InstanceCounter};
