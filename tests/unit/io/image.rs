//! Tests for image rasterization into color grids

#[cfg(test)]
mod tests {
    use brickmosaic::MosaicError;
    use brickmosaic::color::{Color, ColorMatcher, Palette, Rgb};
    use brickmosaic::io::configuration::{DEFAULT_MOSAIC_WIDTH, MAX_MOSAIC_DIMENSION};
    use brickmosaic::io::image::{
        composite_on_white, mosaic_dimensions, rasterize_image, rasterize_path,
    };
    use image::{DynamicImage, Rgba, RgbaImage};

    fn matcher() -> ColorMatcher {
        ColorMatcher::new(
            Palette::new(vec![
                Color::new(1, "White", Rgb::new(255, 255, 255)),
                Color::new(2, "Black", Rgb::new(0, 0, 0)),
                Color::new(3, "Red", Rgb::new(201, 26, 9)),
            ])
            .expect("valid palette"),
        )
    }

    // Tests aspect ratio is preserved when one side is given
    // Verified by swapping the width and height ratio
    #[test]
    fn test_mosaic_dimensions() {
        assert_eq!(mosaic_dimensions(200, 100, Some(40), None), (40, 20));
        assert_eq!(mosaic_dimensions(200, 100, None, Some(10)), (20, 10));
        assert_eq!(mosaic_dimensions(200, 100, Some(7), Some(9)), (7, 9));
        assert_eq!(
            mosaic_dimensions(100, 100, None, None),
            (DEFAULT_MOSAIC_WIDTH, DEFAULT_MOSAIC_WIDTH)
        );
        assert_eq!(mosaic_dimensions(1000, 1, Some(10), None), (10, 1));
    }

    // Tests alpha compositing onto white
    // Verified by ignoring the alpha channel
    #[test]
    fn test_composite_on_white() {
        assert_eq!(composite_on_white(Rgba([10, 20, 30, 255])), Rgb::new(10, 20, 30));
        assert_eq!(composite_on_white(Rgba([0, 0, 0, 0])), Rgb::new(255, 255, 255));
        assert_eq!(composite_on_white(Rgba([0, 0, 0, 128])), Rgb::new(127, 127, 127));
    }

    // Tests pixels are matched to their nearest palette entry
    // Verified by transposing the output rows
    #[test]
    fn test_rasterize_image() {
        let mut buffer = RgbaImage::from_pixel(2, 2, Rgba([250, 250, 250, 255]));
        buffer.put_pixel(1, 0, Rgba([200, 30, 20, 255]));
        buffer.put_pixel(0, 1, Rgba([0, 0, 0, 0]));
        buffer.put_pixel(1, 1, Rgba([10, 10, 10, 255]));

        let grid = rasterize_image(&DynamicImage::ImageRgba8(buffer), 2, 2, &matcher())
            .expect("valid size");

        let names: Vec<&str> = grid.iter().map(|(_, _, color)| color.name()).collect();
        assert_eq!(names, vec!["White", "Red", "White", "Black"]);
    }

    // Tests invalid target sizes are rejected
    // Verified by removing the upper bound
    #[test]
    fn test_rasterize_rejects_bad_sizes() {
        let image = DynamicImage::ImageRgba8(RgbaImage::new(4, 4));
        assert!(matches!(
            rasterize_image(&image, 0, 4, &matcher()),
            Err(MosaicError::InvalidParameter { .. })
        ));
        assert!(rasterize_image(&image, 4, MAX_MOSAIC_DIMENSION + 1, &matcher()).is_err());
    }

    // Tests loading from disk and missing files
    // Verified by returning a default grid for missing files
    #[test]
    fn test_rasterize_path() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("red.png");
        RgbaImage::from_pixel(8, 4, Rgba([201, 26, 9, 255]))
            .save(&path)
            .expect("Failed to write test image");

        let grid = rasterize_path(&path, Some(4), None, &matcher()).expect("loads");
        assert_eq!((grid.width(), grid.height()), (4, 2));
        assert!(grid.iter().all(|(_, _, color)| color.name() == "Red"));

        let missing = rasterize_path(dir.path().join("nope.png"), None, None, &matcher());
        assert!(matches!(missing, Err(MosaicError::ImageLoad { .. })));
    }
}
