//! Configuration system for navgraph.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod linker_config;
pub mod navgraph_config;
pub mod projector_config;

pub use linker_config::{AmbiguityPolicy, LinkerConfig, MatchWeights};
pub use navgraph_config::{ConfigOverrides, NavgraphConfig};
pub use projector_config::ProjectorConfig;
