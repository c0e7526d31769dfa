//! Search filter for the photo grid

use super::data::PhotoItem;

/// Trim and lowercase a query or description for comparison
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Case-insensitive substring match against an already normalized query.
/// An empty query matches everything.
pub fn matches(item: &PhotoItem, normalized_query: &str) -> bool {
    normalized_query.is_empty() || normalize(&item.description).contains(normalized_query)
}
