//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;

/// SmallVec for per-screen view keys and action methods (usually <2).
pub type SmallVec2<T> = SmallVec<[T; 2]>;
