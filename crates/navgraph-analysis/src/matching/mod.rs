//! Name matching shared by integrators.
//!
//! Tiers, tried in order of decreasing confidence; the first tier with a
//! candidate wins:
//! - exact: case-sensitive full equality (never ambiguous, first wins)
//! - case-insensitive full equality
//! - substring (views only): the key, extension stripped, is contained
//!   case-insensitively in the candidate name
//!
//! Several loose candidates are resolved by the configured `AmbiguityPolicy`.

pub mod index;
pub mod text;

pub use index::{MatchOutcome, NameIndex, NameMatch};
pub use text::{file_name, strip_extension, view_stem};
