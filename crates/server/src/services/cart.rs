//! Cart variant and quantity rules.
//!
//! The stored form of a variant selection is a plain string: empty means
//! "no selection". Normalizing at this one seam is what makes
//! `(product_id, size, color)` identity work in the database constraint.

/// Normalize an optional variant selection to its stored form.
///
/// `None` and an explicitly empty string are the same selection.
#[must_use]
pub fn normalize_variant(value: Option<&str>) -> &str {
    value.unwrap_or("")
}

/// Whether a quantity is acceptable for adding an item.
#[must_use]
pub const fn is_valid_add_quantity(quantity: i32) -> bool {
    quantity > 0
}

/// Whether a quantity is acceptable for updating an item. Zero means
/// "remove".
#[must_use]
pub const fn is_valid_update_quantity(quantity: i32) -> bool {
    quantity >= 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_empty_variants_normalize_alike() {
        assert_eq!(normalize_variant(None), "");
        assert_eq!(normalize_variant(Some("")), "");
        assert_eq!(normalize_variant(Some("M")), "M");
    }

    #[test]
    fn differing_selections_stay_distinct() {
        assert_ne!(
            (normalize_variant(Some("M")), normalize_variant(Some("Black"))),
            (normalize_variant(Some("L")), normalize_variant(Some("Black"))),
        );
        assert_ne!(normalize_variant(Some("M")), normalize_variant(None));
    }

    #[test]
    fn add_quantity_must_be_positive() {
        assert!(is_valid_add_quantity(1));
        assert!(!is_valid_add_quantity(0));
        assert!(!is_valid_add_quantity(-3));
    }

    #[test]
    fn update_quantity_allows_zero() {
        assert!(is_valid_update_quantity(0));
        assert!(is_valid_update_quantity(5));
        assert!(!is_valid_update_quantity(-1));
    }
}
