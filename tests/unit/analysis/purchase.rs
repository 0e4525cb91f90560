//! Tests for purchase list resolution

#[cfg(test)]
mod tests {
    use brickmosaic::algorithm::{BrickKind, BrickType};
    use brickmosaic::analysis::parts::PartsEntry;
    use brickmosaic::analysis::purchase::{
        ElementCatalog, ElementListing, SubstitutePart, UnresolvedReason, resolve_purchase_list,
    };
    use brickmosaic::color::{Color, Rgb};

    fn red() -> Color {
        Color::new(1, "Red", Rgb::new(201, 26, 9))
    }

    fn entry(width: usize, height: usize, count: usize) -> PartsEntry {
        PartsEntry {
            brick_type: BrickType::new(1, BrickKind::Plate, width, height),
            color: red(),
            count,
        }
    }

    fn listing(element_id: Option<&str>, price: Option<f64>) -> ElementListing {
        ElementListing {
            element_id: element_id.map(str::to_string),
            price,
            substitutes: vec![],
        }
    }

    // Tests a fully listed part resolves with its price
    // Verified by dropping the unit price
    #[test]
    fn test_resolved_line() {
        let mut catalog = ElementCatalog::new();
        catalog.insert("PLATE 2X4", "red", listing(Some("302021"), Some(0.21)));

        let list = resolve_purchase_list(&[entry(2, 4, 10)], &catalog);
        assert!(list.unresolved.is_empty());
        let item = list.resolved.first().expect("one line");
        assert_eq!(item.element_id, "302021");
        assert_eq!(item.quantity, 10);
        assert!((list.total_price() - 2.1).abs() < 1e-9);
        assert_eq!(list.resolved_pieces(), 10);
    }

    // Tests lookups ignore case of part and color names
    // Verified by keying listings verbatim
    #[test]
    fn test_lookup_ignores_case() {
        let mut catalog = ElementCatalog::new();
        catalog.insert("plate 2x4", "RED", listing(Some("302021"), Some(0.21)));
        assert!(catalog.get("PLATE 2X4", "Red").is_some());
        assert_eq!(catalog.len(), 1);
        assert!(!catalog.is_empty());
    }

    // Tests each unresolved reason is reported
    // Verified by collapsing all reasons to NotListed
    #[test]
    fn test_unresolved_reasons() {
        let mut catalog = ElementCatalog::new();
        catalog.insert("PLATE 2X2", "Red", listing(Some("302221"), None));
        catalog.insert("PLATE 1X2", "Red", listing(None, Some(0.1)));

        let parts = vec![entry(2, 4, 1), entry(2, 2, 2), entry(1, 2, 3)];
        let list = resolve_purchase_list(&parts, &catalog);

        assert!(list.resolved.is_empty());
        let reasons: Vec<UnresolvedReason> = list.unresolved.iter().map(|u| u.reason).collect();
        assert_eq!(
            reasons,
            vec![
                UnresolvedReason::NotListed,
                UnresolvedReason::MissingPrice,
                UnresolvedReason::MissingElementId
            ]
        );
        assert_eq!(list.unresolved_pieces(), 6);
        assert_eq!(UnresolvedReason::MissingPrice.to_string(), "missing price");
    }

    // Tests lines sharing an element id are merged
    // Verified by pushing every line separately
    #[test]
    fn test_merge_by_element_id() {
        let mut catalog = ElementCatalog::new();
        catalog.insert("PLATE 2X4", "Red", listing(Some("302021"), Some(0.21)));

        let parts = vec![entry(2, 4, 3), entry(2, 4, 4)];
        let list = resolve_purchase_list(&parts, &catalog);
        assert_eq!(list.resolved.len(), 1);
        assert_eq!(list.resolved_pieces(), 7);
    }

    // Tests substitute-only listings expand into substitute parts
    // Verified by ignoring the per-substitute quantity
    #[test]
    fn test_substitutes_expanded() {
        let mut catalog = ElementCatalog::new();
        catalog.insert(
            "PLATE 2X4",
            "Red",
            ElementListing {
                element_id: None,
                price: None,
                substitutes: vec![SubstitutePart {
                    brick_type: "PLATE 2X2".to_string(),
                    element_id: "302221".to_string(),
                    quantity: 2,
                }],
            },
        );
        catalog.insert("PLATE 2X2", "Red", listing(Some("302221"), Some(0.15)));

        let list = resolve_purchase_list(&[entry(2, 4, 5)], &catalog);
        let item = list.resolved.first().expect("substitute line");
        assert_eq!(item.brick_type, "PLATE 2X2");
        assert_eq!(item.quantity, 10);
        assert_eq!(item.substitute_for.as_deref(), Some("PLATE 2X4"));
        assert!((item.line_total() - 1.5).abs() < 1e-9);
    }

    // Tests unpriced substitutes end up in the manual lookup partition
    // Verified by resolving substitutes at price zero
    #[test]
    fn test_unpriced_substitute_unresolved() {
        let mut catalog = ElementCatalog::new();
        catalog.insert(
            "PLATE 2X4",
            "Red",
            ElementListing {
                element_id: None,
                price: None,
                substitutes: vec![SubstitutePart {
                    brick_type: "PLATE 1X4".to_string(),
                    element_id: "371021".to_string(),
                    quantity: 2,
                }],
            },
        );

        let list = resolve_purchase_list(&[entry(2, 4, 1)], &catalog);
        let item = list.unresolved.first().expect("unresolved substitute");
        assert_eq!(item.reason, UnresolvedReason::MissingPrice);
        assert_eq!(item.element_id.as_deref(), Some("371021"));
        assert_eq!(item.quantity, 2);
    }
}
