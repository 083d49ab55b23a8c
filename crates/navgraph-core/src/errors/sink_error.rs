//! Relationship sink (persistence hand-off) errors.

use super::error_code::{self, NavgraphErrorCode};

/// Errors raised by a relationship sink while accepting a batch.
/// Retry policy belongs to the sink implementation, not to navgraph.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Sink unavailable: {message}")]
    Unavailable { message: String },

    #[error("Sink rejected {rejected} of {total} relationships: {message}")]
    Rejected {
        rejected: usize,
        total: usize,
        message: String,
    },

    #[error("Batch serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl NavgraphErrorCode for SinkError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } => error_code::SINK_ERROR,
            Self::Rejected { .. } => error_code::SINK_REJECTED,
            Self::Serialization(_) => error_code::SERIALIZATION_ERROR,
        }
    }
}
