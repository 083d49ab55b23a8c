//! navgraph-analysis: the code knowledge graph integration layer.
//!
//! Cross-links entities extracted from menu configuration, web-flow
//! definitions, JSP views, and server-side classes into one deduplicated
//! relationship batch, and answers feature-context queries over the result.

pub mod aggregate;
pub mod entities;
pub mod feature;
pub mod graph;
pub mod integrators;
pub mod matching;
pub mod pipeline;
pub mod relationship;

pub use aggregate::{aggregate, AggregatedBatch, AggregationStats, RelationshipAggregator};
pub use entities::{
    ClassNode, Entity, EntityCollections, EntityIndex, EntityKind, EntityRef, JspPage,
    MenuItem, Properties, Screen, WebFlowDefinition,
};
pub use feature::{FeatureContext, FeatureContextProjector, FlowSummary, ScreenSummary};
pub use graph::NavigationGraph;
pub use integrators::{Hop, Integrator, LinkDiagnostics, LinkOutput, NavigationLinker};
pub use pipeline::{InMemorySink, LinkPipeline, PipelineOutput, RelationshipSink};
pub use relationship::{
    LinkContext, MatchKind, Relationship, RelationshipBatch, RelationshipKey, RelationshipType,
};
