//! Shared constants for the navgraph integration layer.

/// navgraph version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "NAVGRAPH_LOG";

/// Filter used when `NAVGRAPH_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "navgraph=info";

/// Project-level config file name.
pub const PROJECT_CONFIG_FILE: &str = "navgraph.toml";

/// Directory (under the home directory) holding the user config.
pub const USER_CONFIG_DIR: &str = ".navgraph";

// ---- Match weights ----

/// Weight of an edge resolved by case-sensitive full equality.
pub const DEFAULT_EXACT_WEIGHT: f64 = 1.0;

/// Weight of an edge resolved by case-insensitive full equality.
pub const DEFAULT_CASE_INSENSITIVE_WEIGHT: f64 = 0.8;

/// Weight of an edge resolved by case-insensitive substring containment.
pub const DEFAULT_SUBSTRING_WEIGHT: f64 = 0.6;

// ---- Identifiers ----

/// Prefix for relationship entity IDs.
pub const RELATIONSHIP_ID_PREFIX: &str = "rel";

/// Placeholder used when a key normalizes to nothing.
pub const EMPTY_KEY_PLACEHOLDER: &str = "anon";
