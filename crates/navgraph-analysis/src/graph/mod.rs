//! In-memory graph slice over entities and aggregated relationships.

pub mod navigation_graph;

pub use navigation_graph::NavigationGraph;
