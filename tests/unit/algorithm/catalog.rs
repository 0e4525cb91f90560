//! Tests for brick type parsing and catalog ordering

#[cfg(test)]
mod tests {
    use brickmosaic::MosaicError;
    use brickmosaic::algorithm::{BrickCatalog, BrickKind, BrickType};

    // Tests part names parse in either case
    // Verified by only accepting uppercase 'X'
    #[test]
    fn test_parse_brick_type() {
        let plate = BrickType::parse(3, "plate 1x4").expect("valid name");
        assert_eq!(plate.kind, BrickKind::Plate);
        assert_eq!((plate.width, plate.height), (1, 4));
        assert_eq!(plate.name, "PLATE 1X4");
        assert_eq!(plate.area(), 4);
        assert!(!plate.is_rotated());

        let brick = BrickType::parse(1, "BRICK 2X2").expect("valid name");
        assert_eq!(brick.kind, BrickKind::Brick);
    }

    // Tests malformed part names are rejected
    // Verified by accepting zero dimensions
    #[test]
    fn test_parse_rejects_malformed() {
        for name in ["TILE 1X1", "PLATE", "PLATE 0X2", "PLATE 2X", "PLATE 2X2 ROUND"] {
            assert!(
                matches!(BrickType::parse(1, name), Err(MosaicError::InvalidCatalog { .. })),
                "{name} should be rejected"
            );
        }
    }

    // Tests the catalog sorts by descending area, keeping input order for ties
    // Verified by using an unstable sort
    #[test]
    fn test_catalog_sorted_by_area() {
        let catalog =
            BrickCatalog::from_names(&["PLATE 1X1", "PLATE 1X4", "PLATE 2X2", "PLATE 2X4"])
                .expect("valid catalog");
        let names: Vec<&str> = catalog.types().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["PLATE 2X4", "PLATE 1X4", "PLATE 2X2", "PLATE 1X1"]);
        assert_eq!(catalog.rank(4), Some(0));
        assert_eq!(catalog.rank(1), Some(3));
        assert_eq!(catalog.rank(99), None);
    }

    // Tests catalogs without a 1x1 are rejected
    // Verified by removing the unit fallback check
    #[test]
    fn test_catalog_requires_unit() {
        assert!(matches!(
            BrickCatalog::from_names(&["PLATE 2X2", "PLATE 1X2"]),
            Err(MosaicError::InvalidCatalog { .. })
        ));
        assert!(BrickCatalog::new(vec![]).is_err());
    }

    // Tests duplicate ids are rejected
    // Verified by skipping the id uniqueness scan
    #[test]
    fn test_catalog_rejects_duplicate_ids() {
        let types = vec![
            BrickType::new(1, BrickKind::Plate, 1, 1),
            BrickType::new(1, BrickKind::Plate, 1, 2),
        ];
        assert!(BrickCatalog::new(types).is_err());
    }

    // Tests the standard catalog contents and lookup
    // Verified by omitting the 1x4 entry
    #[test]
    fn test_standard_catalog() {
        let catalog = BrickCatalog::standard(BrickKind::Brick).expect("built-in catalog");
        assert_eq!(catalog.len(), 5);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.types().first().map(|t| t.name.as_str()), Some("BRICK 2X4"));
        assert_eq!(catalog.types().last().map(BrickType::is_unit), Some(true));
        assert_eq!(catalog.by_name("brick 1x2").map(|t| t.id), Some(4));
        assert_eq!(catalog.get(2).map(|t| t.area()), Some(4));
    }

    // Tests rotations add one variant per non-square part
    // Verified by rotating square parts as well
    #[test]
    fn test_with_rotations() {
        let catalog = BrickCatalog::standard(BrickKind::Plate)
            .expect("built-in catalog")
            .with_rotations();
        assert_eq!(catalog.len(), 8);

        let rotated: Vec<&BrickType> = catalog.types().iter().filter(|t| t.is_rotated()).collect();
        assert_eq!(rotated.len(), 3);
        for variant in rotated {
            let source = catalog.get(variant.canonical_id).expect("source part");
            assert_eq!((variant.width, variant.height), (source.height, source.width));
            assert_eq!(variant.name, source.name);
        }

        let twice = catalog.with_rotations();
        assert_eq!(twice.len(), 8);
    }

    // Tests kind names round-trip through parsing
    // Verified by mapping both kinds to the same string
    #[test]
    fn test_kind_names() {
        assert_eq!(BrickKind::Brick.to_string(), "BRICK");
        assert_eq!(BrickKind::parse("Plate"), Some(BrickKind::Plate));
        assert_eq!(BrickKind::parse("tile"), None);
    }
}
