//! Tests for RGB/HSV conversion and color value accessors

#[cfg(test)]
mod tests {
    use brickmosaic::color::{Color, Hsv, Rgb};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    // Tests hex parsing with and without the leading hash
    // Verified by dropping the trim of '#'
    #[test]
    fn test_from_hex_accepts_both_forms() {
        assert_eq!(
            Rgb::from_hex("#c91a09").expect("valid hex"),
            Rgb::new(0xc9, 0x1a, 0x09)
        );
        assert_eq!(
            Rgb::from_hex("C91A09").expect("valid hex"),
            Rgb::new(0xc9, 0x1a, 0x09)
        );
    }

    // Tests malformed hex strings are rejected
    // Verified by skipping the length check
    #[test]
    fn test_from_hex_rejects_malformed() {
        assert!(Rgb::from_hex("#fff").is_err());
        assert!(Rgb::from_hex("#gg0000").is_err());
        assert!(Rgb::from_hex("#1234567").is_err());
        assert!(Rgb::from_hex("").is_err());
    }

    // Tests hex output is lowercase and zero padded
    // Verified by formatting without padding
    #[test]
    fn test_to_hex_formatting() {
        assert_eq!(Rgb::new(0, 10, 255).to_hex(), "#000aff");
    }

    // Tests primary colors land on their hue angles
    // Verified by swapping the green and blue hue branches
    #[test]
    fn test_to_hsv_primaries() {
        let red = Rgb::new(255, 0, 0).to_hsv();
        assert_close(red.h, 0.0);
        assert_close(red.s, 100.0);
        assert_close(red.v, 100.0);

        let green = Rgb::new(0, 255, 0).to_hsv();
        assert_close(green.h, 120.0);

        let blue = Rgb::new(0, 0, 255).to_hsv();
        assert_close(blue.h, 240.0);
    }

    // Tests hue wraps into [0, 360) for magenta-side colors
    // Verified by removing rem_euclid on the red branch
    #[test]
    fn test_to_hsv_wraps_negative_hue() {
        let pinkish = Rgb::new(255, 0, 128).to_hsv();
        assert!(pinkish.h >= 300.0 && pinkish.h < 360.0);
    }

    // Tests neutral colors have zero saturation and hue
    // Verified by dividing by delta without the zero guard
    #[test]
    fn test_to_hsv_neutral() {
        let gray = Rgb::new(25, 25, 25).to_hsv();
        assert_close(gray.h, 0.0);
        assert_close(gray.s, 0.0);
        assert_close(gray.v, 25.0 / 255.0 * 100.0);

        let black = Rgb::new(0, 0, 0).to_hsv();
        assert_close(black.s, 0.0);
        assert_close(black.v, 0.0);
    }

    // Tests grayscale threshold is inclusive at 10
    // Verified by changing <= to <
    #[test]
    fn test_grayscale_threshold() {
        assert!(Hsv::new(0.0, 10.0, 50.0).is_grayscale());
        assert!(!Hsv::new(0.0, 10.5, 50.0).is_grayscale());
    }

    // Tests color accessors derive hex and HSV from the stored RGB
    // Verified by caching a stale hex value
    #[test]
    fn test_color_derived_values() {
        let color = Color::new(7, "Medium Blue", Rgb::new(0x5a, 0x93, 0xdb));
        assert_eq!(color.id(), 7);
        assert_eq!(color.name(), "Medium Blue");
        assert_eq!(color.hex(), "#5a93db");
        assert!(!color.is_grayscale());
        assert_eq!(color.to_string(), "Medium Blue (#5a93db)");
    }
}
