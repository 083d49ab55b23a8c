//! Error handling for navgraph.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.
//!
//! Unmatched cross-references are never errors; these enums cover the
//! edges of the layer: configuration, projection queries, and batch hand-off.

pub mod config_error;
pub mod error_code;
pub mod pipeline_error;
pub mod projection_error;
pub mod sink_error;

pub use config_error::ConfigError;
pub use error_code::NavgraphErrorCode;
pub use pipeline_error::PipelineError;
pub use projection_error::ProjectionError;
pub use sink_error::SinkError;
