//! Tests for parts aggregation and the savings metric

#[cfg(test)]
mod tests {
    use brickmosaic::algorithm::{BrickCatalog, BrickKind, Placement};
    use brickmosaic::analysis::parts::{
        SavingsReport, summarize, total_pieces, unoptimized_summary,
    };
    use brickmosaic::color::{Color, Rgb};
    use brickmosaic::spatial::ColorGrid;

    fn red() -> Color {
        Color::new(1, "Red", Rgb::new(201, 26, 9))
    }

    fn blue() -> Color {
        Color::new(2, "Blue", Rgb::new(0, 85, 191))
    }

    fn catalog() -> BrickCatalog {
        BrickCatalog::standard(BrickKind::Plate).expect("built-in catalog")
    }

    fn place(catalog: &BrickCatalog, id: usize, name: &str, color: Color) -> Placement {
        Placement {
            id,
            x: 0,
            y: 0,
            brick_type: catalog.by_name(name).expect("known part").clone(),
            color,
        }
    }

    // Tests larger brick types rank first regardless of count
    // Verified by sorting on count before rank
    #[test]
    fn test_larger_types_first() {
        let catalog = catalog();
        let placements = vec![
            place(&catalog, 0, "PLATE 1X1", red()),
            place(&catalog, 1, "PLATE 1X1", red()),
            place(&catalog, 2, "PLATE 2X2", blue()),
        ];
        let parts = summarize(&placements, &catalog);

        assert_eq!(parts.len(), 2);
        let first = parts.first().expect("two entries");
        assert_eq!(first.brick_type.name, "PLATE 2X2");
        assert_eq!(first.color.name(), "Blue");
        assert_eq!(first.count, 1);
        let second = parts.get(1).expect("two entries");
        assert_eq!(second.brick_type.name, "PLATE 1X1");
        assert_eq!(second.count, 2);
        assert_eq!(total_pieces(&parts), 3);
    }

    // Tests ties within a brick type sort by count then color name
    // Verified by sorting colors by id
    #[test]
    fn test_ties_by_count_then_name() {
        let catalog = catalog();
        let green = Color::new(3, "Green", Rgb::new(35, 120, 65));
        let placements = vec![
            place(&catalog, 0, "PLATE 1X2", red()),
            place(&catalog, 1, "PLATE 1X2", green.clone()),
            place(&catalog, 2, "PLATE 1X2", blue()),
            place(&catalog, 3, "PLATE 1X2", blue()),
        ];
        let parts = summarize(&placements, &catalog);
        let colors: Vec<&str> = parts.iter().map(|e| e.color.name()).collect();
        assert_eq!(colors, vec!["Blue", "Green", "Red"]);
    }

    // Tests counts across entries add up to the placement count
    // Verified by counting unique keys instead of placements
    #[test]
    fn test_counts_conserved() {
        let catalog = catalog();
        let placements: Vec<Placement> = (0..10)
            .map(|i| {
                let name = if i % 3 == 0 { "PLATE 2X4" } else { "PLATE 1X1" };
                let color = if i % 2 == 0 { red() } else { blue() };
                place(&catalog, i, name, color)
            })
            .collect();
        let parts = summarize(&placements, &catalog);
        assert_eq!(total_pieces(&parts), 10);
    }

    // Tests the savings percentage rounds and guards division
    // Verified by truncating instead of rounding
    #[test]
    fn test_savings_report() {
        let report = SavingsReport::new(16, 2);
        assert_eq!(report.savings, 14);
        assert_eq!(report.savings_percent, 88);

        let none = SavingsReport::new(4, 4);
        assert_eq!(none.savings, 0);
        assert_eq!(none.savings_percent, 0);

        let empty = SavingsReport::new(0, 0);
        assert_eq!(empty.savings_percent, 0);
    }

    // Tests the unoptimized baseline counts every cell by color
    // Verified by counting distinct colors only
    #[test]
    fn test_unoptimized_summary() {
        let grid = ColorGrid::from_rows(vec![
            vec![red(), red(), blue()],
            vec![red(), blue(), red()],
        ])
        .expect("rectangular rows");
        let summary = unoptimized_summary(&grid);
        let counts: Vec<(&str, usize)> = summary
            .iter()
            .map(|(color, count)| (color.name(), *count))
            .collect();
        assert_eq!(counts, vec![("Red", 4), ("Blue", 2)]);
    }
}
