//! Integrators: pure functions from entity collections to relationships.
//!
//! Each integrator owns one family of cross-artifact links. The pipeline
//! runs several concurrently and merges their outputs through the aggregator,
//! so integrators share no mutable state and never deduplicate across each
//! other.

pub mod diagnostics;
pub mod navigation;

pub use diagnostics::{Hop, LinkDiagnostics};
pub use navigation::NavigationLinker;

use crate::entities::EntityCollections;
use crate::relationship::{LinkContext, Relationship};

/// Result of one integrator pass.
#[derive(Debug, Clone, Default)]
pub struct LinkOutput {
    /// Relationships in discovery order.
    pub relationships: Vec<Relationship>,
    pub diagnostics: LinkDiagnostics,
}

/// A component discovering relationships between entity collections.
///
/// `link` must not mutate anything but `ctx`, and must only reference
/// entities present in `input`.
pub trait Integrator: Send + Sync {
    fn name(&self) -> &'static str;

    fn link(&self, input: &EntityCollections, ctx: &mut LinkContext) -> LinkOutput;
}
