//! Key path parsing and comparison utilities
//!
//! Configuration keys are colon-delimited paths into the tree.
//!
//! # Path Syntax
//!
//! - Colon-separated keys: `Logging:LogLevel:Default`
//! - Array elements: `Servers:0:Host` (zero-based decimal index segment)
//! - Lookup is case-insensitive across all segments
//!
//! # Examples
//!
//! ```
//! use appsettings_tree::path::{combine, keys_equal, split_key};
//!
//! assert_eq!(split_key("Servers:0:Host"), vec!["Servers", "0", "Host"]);
//! assert_eq!(combine("Servers:0", "Host"), "Servers:0:Host");
//! assert!(keys_equal("host", "HOST"));
//! ```

/// Separator between key path segments.
pub const KEY_DELIMITER: &str = ":";

/// Split a key path into its segments.
///
/// The empty path addresses the root and yields no segments. Empty segments
/// inside a path (`a::b`) are kept as literal empty keys.
///
/// # Examples
///
/// ```
/// use appsettings_tree::path::split_key;
///
/// assert_eq!(split_key("a:b:c"), vec!["a", "b", "c"]);
/// assert!(split_key("").is_empty());
/// assert_eq!(split_key("a::b"), vec!["a", "", "b"]);
/// ```
pub fn split_key(key: &str) -> Vec<&str> {
    if key.is_empty() {
        return Vec::new();
    }
    key.split(KEY_DELIMITER).collect()
}

/// Join a parent path and a child key.
pub fn combine(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{parent}{KEY_DELIMITER}{child}")
    }
}

/// Compare two key segments ignoring case.
pub fn keys_equal(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.to_lowercase() == b.to_lowercase()
}

/// Parse a segment as a zero-based array index.
///
/// Only plain decimal digits qualify, so `"+1"` or `" 1"` are ordinary keys.
pub fn parse_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}
