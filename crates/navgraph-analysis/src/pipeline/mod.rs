//! Pipeline: run integrators over one snapshot, aggregate, hand off.

pub mod runner;
pub mod sink;

pub use runner::{LinkPipeline, PipelineOutput};
pub use sink::{InMemorySink, RelationshipSink};
