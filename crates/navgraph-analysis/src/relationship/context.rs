//! Per-run linking context.

use chrono::{DateTime, SubsecRound, Utc};
use navgraph_core::InstanceCounter;

/// Explicit state for one linking call: the instance-ID counter and the
/// timestamp stamped on every relationship. A new context starts a new run.
#[derive(Debug, Clone)]
pub struct LinkContext {
    pub counter: InstanceCounter,
    pub created_at: DateTime<Utc>,
}

impl LinkContext {
    /// Context stamped with the current time, truncated to milliseconds.
    pub fn new() -> Self {
        Self::at(Utc::now().trunc_subsecs(3))
    }

    /// Context with a fixed timestamp, for reproducible output.
    pub fn at(created_at: DateTime<Utc>) -> Self {
        Self {
            counter: InstanceCounter::new(),
            created_at,
        }
    }
}

impl Default for LinkContext {
    fn default() -> Self {
        Self::new()
    }
}
