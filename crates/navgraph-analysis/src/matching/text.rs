//! String helpers for name matching.

/// Last path segment of a view key: `/WEB-INF/jsp/orderList.jsp` → `orderList.jsp`.
pub fn file_name(key: &str) -> &str {
    key.rfind(['/', '\\']).map_or(key, |i| &key[i + 1..])
}

/// Strip the final extension from the last path segment:
/// `orderList.jsp` → `orderList`. Dot-files keep their name.
pub fn strip_extension(key: &str) -> &str {
    let segment_start = key.len() - file_name(key).len();
    match key[segment_start..].rfind('.') {
        Some(0) | None => key,
        Some(dot) => &key[..segment_start + dot],
    }
}

/// Needle for substring view matching: the trimmed key without its file
/// extension. Directory prefixes are kept.
pub fn view_stem(key: &str) -> &str {
    strip_extension(key.trim())
}
