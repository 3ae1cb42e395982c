//! Case-insensitive substring matching for the search box.

/// Normalize a raw search query: trim surrounding whitespace and lowercase.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Does `haystack` contain an already-normalized query?
///
/// The haystack is lowercased here so callers can pass attribute text as-is.
/// An empty query matches everything.
pub fn matches(haystack: &str, normalized_query: &str) -> bool {
    normalized_query.is_empty() || haystack.to_lowercase().contains(normalized_query)
}
