//! Tests for placement geometry and tiling verification

#[cfg(test)]
mod tests {
    use brickmosaic::algorithm::placement::{TilingDefect, check_tiling};
    use brickmosaic::algorithm::{BrickKind, BrickType, Placement};
    use brickmosaic::color::{Color, Rgb};
    use brickmosaic::spatial::{CellRect, ColorGrid};

    fn red() -> Color {
        Color::new(1, "Red", Rgb::new(201, 26, 9))
    }

    fn blue() -> Color {
        Color::new(2, "Blue", Rgb::new(0, 85, 191))
    }

    fn place(id: usize, x: usize, y: usize, w: usize, h: usize, color: Color) -> Placement {
        Placement {
            id,
            x,
            y,
            brick_type: BrickType::new(id as u32 + 1, BrickKind::Plate, w, h),
            color,
        }
    }

    fn two_by_two_red() -> ColorGrid {
        ColorGrid::filled(2, 2, &red()).expect("positive dimensions")
    }

    // Tests the footprint follows the brick type dimensions
    // Verified by swapping width and height in rect()
    #[test]
    fn test_placement_rect() {
        let placement = place(0, 3, 1, 1, 2, red());
        assert_eq!(placement.rect(), CellRect::new(3, 1, 1, 2));
        assert_eq!(placement.area(), 2);
    }

    // Tests an exact tiling passes
    // Verified by reporting the first cell as uncovered
    #[test]
    fn test_valid_tiling() {
        let placements = vec![place(0, 0, 0, 1, 2, red()), place(1, 1, 0, 1, 2, red())];
        assert_eq!(check_tiling(&two_by_two_red(), &placements), Ok(()));
    }

    // Tests overlapping placements are reported
    // Verified by removing the ownership check
    #[test]
    fn test_overlap_detected() {
        let placements = vec![
            place(0, 0, 0, 2, 2, red()),
            place(1, 1, 1, 1, 1, red()),
        ];
        assert_eq!(
            check_tiling(&two_by_two_red(), &placements),
            Err(TilingDefect::Overlap {
                first: 0,
                second: 1,
                x: 1,
                y: 1
            })
        );
    }

    // Tests uncovered cells are reported
    // Verified by skipping the final scan
    #[test]
    fn test_uncovered_detected() {
        let placements = vec![place(0, 0, 0, 2, 1, red())];
        assert_eq!(
            check_tiling(&two_by_two_red(), &placements),
            Err(TilingDefect::Uncovered { x: 0, y: 1 })
        );
    }

    // Tests color mismatches are reported
    // Verified by comparing against the anchor cell only
    #[test]
    fn test_color_mismatch_detected() {
        let grid = ColorGrid::from_rows(vec![vec![red(), blue()], vec![red(), red()]])
            .expect("rectangular rows");
        let placements = vec![place(0, 0, 0, 2, 1, red())];
        assert_eq!(
            check_tiling(&grid, &placements),
            Err(TilingDefect::ColorMismatch {
                placement: 0,
                x: 1,
                y: 0
            })
        );
    }

    // Tests footprints past the edge are reported
    // Verified by clipping placements to the grid
    #[test]
    fn test_out_of_bounds_detected() {
        let placements = vec![place(0, 1, 0, 2, 1, red())];
        let defect = check_tiling(&two_by_two_red(), &placements);
        assert_eq!(defect, Err(TilingDefect::OutOfBounds { placement: 0 }));
        assert!(
            defect
                .err()
                .is_some_and(|d| d.to_string().contains("extends past"))
        );
    }
}
