//! Tests for (brick type, color) availability constraints

#[cfg(test)]
mod tests {
    use brickmosaic::algorithm::availability::AvailabilityMap;
    use brickmosaic::algorithm::{BrickCatalog, BrickKind, BrickType};
    use brickmosaic::color::{Color, Rgb};

    fn red() -> Color {
        Color::new(1, "Red", Rgb::new(201, 26, 9))
    }

    // Tests a new map allows everything
    // Verified by defaulting to unavailable
    #[test]
    fn test_new_map_allows_all() {
        let map = AvailabilityMap::new();
        let plate = BrickType::new(1, BrickKind::Plate, 2, 4);
        assert!(map.is_available(&plate, &red()));
        assert_eq!(map.unavailable_count(), 0);
    }

    // Tests marking and unmarking combinations
    // Verified by ignoring the color in the key
    #[test]
    fn test_mark_unavailable_and_available() {
        let mut map = AvailabilityMap::new();
        let plate = BrickType::new(1, BrickKind::Plate, 2, 4);
        let blue = Color::new(2, "Blue", Rgb::new(0, 85, 191));

        map.mark_unavailable(&plate, &red());
        assert!(!map.is_available(&plate, &red()));
        assert!(map.is_available(&plate, &blue));
        assert_eq!(map.unavailable_count(), 1);

        map.mark_available(&plate, &red());
        assert!(map.is_available(&plate, &red()));
    }

    // Tests 1x1 parts stay available even when marked otherwise
    // Verified by removing the unit short-circuit
    #[test]
    fn test_unit_always_available() {
        let mut map = AvailabilityMap::new();
        let unit = BrickType::new(5, BrickKind::Plate, 1, 1);
        map.mark_unavailable(&unit, &red());
        assert!(map.is_available(&unit, &red()));
    }

    // Tests rotated variants share their source part's availability
    // Verified by keying on the variant id instead of the canonical id
    #[test]
    fn test_rotated_variants_share_availability() {
        let catalog = BrickCatalog::standard(BrickKind::Plate)
            .expect("built-in catalog")
            .with_rotations();
        let source = catalog.get(1).expect("2x4 plate");
        let rotated = catalog
            .types()
            .iter()
            .find(|t| t.is_rotated() && t.canonical_id == 1)
            .expect("rotated 2x4");

        let mut map = AvailabilityMap::new();
        map.mark_unavailable(source, &red());
        assert!(!map.is_available(rotated, &red()));
    }
}
