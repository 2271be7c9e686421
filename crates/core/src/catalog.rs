//! Product naming.

/// Compose a product's display name from its type, variety and quality.
///
/// Blank segments (empty or whitespace only) are skipped; the rest are
/// joined with a single space in the order given.
///
/// ```
/// use farmstand_core::display_name;
///
/// assert_eq!(display_name("Tomato", "Cherry", "Extra"), "Tomato Cherry Extra");
/// assert_eq!(display_name("Tomato", "", "Extra"), "Tomato Extra");
/// assert_eq!(display_name("Lettuce", " ", ""), "Lettuce");
/// ```
#[must_use]
pub fn display_name(product_type: &str, variety: &str, quality: &str) -> String {
    [product_type, variety, quality]
        .into_iter()
        .filter(|segment| !segment.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_segments() {
        assert_eq!(display_name("Apple", "Gala", "A"), "Apple Gala A");
    }

    #[test]
    fn test_skips_blank_segments_in_any_position() {
        assert_eq!(display_name("", "Gala", "A"), "Gala A");
        assert_eq!(display_name("Apple", "\t", "A"), "Apple A");
        assert_eq!(display_name("Apple", "Gala", ""), "Apple Gala");
    }

    #[test]
    fn test_all_blank() {
        assert_eq!(display_name("", " ", ""), "");
    }

    #[test]
    fn test_preserves_order() {
        assert_eq!(display_name("c", "b", "a"), "c b a");
    }
}
