//! Relationship aggregation and the dedup guard.

pub mod aggregator;

pub use aggregator::{aggregate, AggregatedBatch, AggregationStats, RelationshipAggregator};
