//! navgraph-core: shared foundation for the navgraph integration layer.
//!
//! - `ids`: deterministic entity IDs and run-scoped instance IDs
//! - `errors`: one `thiserror` enum per subsystem
//! - `config`: TOML configuration with layered resolution
//! - `events`: linking lifecycle events with no-op handler defaults
//! - `tracing`: `NAVGRAPH_LOG`-driven subscriber setup
//! - `types`: collection aliases used across the workspace

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod ids;
pub mod tracing;
pub mod types;

pub use config::NavgraphConfig;
pub use ids::{entity_id, instance_id, InstanceCounter};
