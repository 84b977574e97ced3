//! Text matching helpers.

/// Case-insensitive substring containment.
///
/// An empty needle matches every haystack.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Case-insensitive containment over an optional haystack. `None` never matches.
pub fn opt_contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| contains_ignore_case(h, needle))
}
