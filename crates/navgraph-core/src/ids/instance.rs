//! Run-scoped instance IDs.

use crate::constants::EMPTY_KEY_PLACEHOLDER;

/// Monotonic counter threaded through every instance-ID allocation of one
/// analysis pass. Not shared: each run (and each integrator in a parallel
/// pipeline) owns its own counter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceCounter {
    next: u64,
}

impl InstanceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter whose first allocation returns `start`.
    pub fn starting_at(start: u64) -> Self {
        Self { next: start }
    }

    /// Value the next allocation will return.
    pub fn current(&self) -> u64 {
        self.next
    }

    /// Return the current value and advance.
    pub fn advance(&mut self) -> u64 {
        let value = self.next;
        self.next += 1;
        value
    }

    pub fn reset(&mut self) {
        self.next = 0;
    }
}

/// Lower-case `key`, collapse every run of non-alphanumeric characters to a
/// single `_`, and trim leading/trailing underscores.
pub fn normalize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut pending_sep = false;
    for ch in key.chars() {
        if ch.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.extend(ch.to_lowercase());
        } else {
            pending_sep = true;
        }
    }
    if out.is_empty() {
        out.push_str(EMPTY_KEY_PLACEHOLDER);
    }
    out
}

/// Allocate an instance ID: `<kind>_<normalized key>_<n>`, then advance the
/// counter. Unique within the counter's run even for identical keys.
pub fn instance_id(counter: &mut InstanceCounter, kind: &str, key: &[&str]) -> String {
    let n = counter.advance();
    let joined = key.join("_");
    format!("{}_{}_{}", kind, normalize_key(&joined), n)
}
