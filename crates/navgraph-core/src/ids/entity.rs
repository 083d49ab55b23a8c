//! Deterministic entity IDs via xxh3.

use xxhash_rust::xxh3::Xxh3;

/// Derive the deterministic ID for `kind` and its composite `key`.
///
/// Parts are length-prefixed before hashing so `["ab", "c"]` and
/// `["a", "bc"]` never collide structurally. Output: `<kind>:<16 hex>`.
pub fn entity_id(kind: &str, key: &[&str]) -> String {
    let mut hasher = Xxh3::new();
    hasher.update(kind.as_bytes());
    hasher.update(&[0x1fu8]);
    for part in key {
        hasher.update(&(part.len() as u64).to_le_bytes());
        hasher.update(part.as_bytes());
    }
    format!("{}:{:016x}", kind, hasher.digest())
}
