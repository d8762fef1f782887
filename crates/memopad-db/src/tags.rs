//! Tag-column codec.
//!
//! SQLite has no array column, so the tag list is stored as JSON array text.
//! A note created without tags stores NULL; an explicitly emptied list stores
//! `[]`. Both decode to the empty list, and element order round-trips exactly.

use tracing::warn;

/// Encode a tag list for storage. `None` means the caller never supplied
/// tags (stored as NULL); `Some(list)` stores the JSON text, `[]` included.
pub fn encode(tags: Option<&[String]>) -> Option<String> {
    tags.map(|list| {
        serde_json::to_string(list).unwrap_or_else(|e| {
            warn!("Failed to encode tag list: {}", e);
            "[]".to_string()
        })
    })
}

/// Decode the raw tag column. NULL, empty text, and corrupt JSON all yield
/// the empty list rather than failing the whole read.
pub fn decode(raw: Option<&str>) -> Vec<String> {
    match raw {
        None => Vec::new(),
        Some("") => Vec::new(),
        Some(text) => serde_json::from_str(text).unwrap_or_else(|e| {
            warn!("Corrupt tag column '{}': {}", text, e);
            Vec::new()
        }),
    }
}
