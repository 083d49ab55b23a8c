//! Feature context: everything reachable from one menu entry point.

pub mod projector;
pub mod types;

pub use projector::FeatureContextProjector;
pub use types::{FeatureContext, FlowSummary, ScreenSummary};
