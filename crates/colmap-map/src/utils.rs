//! Utility functions for header handling.

/// Normalizes a header for matching: trims, lowercases and joins
/// whitespace-separated words with `_`.
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_header_joins_words() {
        assert_eq!(normalize_header("  Customer   Name "), "customer_name");
        assert_eq!(normalize_header("E-Mail"), "e-mail");
        assert_eq!(normalize_header("row_id"), "row_id");
    }
}
