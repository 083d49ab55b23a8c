//! Pipeline errors.

use super::error_code::NavgraphErrorCode;
use super::{ConfigError, SinkError};

/// Errors that can occur while running a linking pipeline.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
}

impl NavgraphErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Sink(e) => e.error_code(),
        }
    }
}
