//! Tests for preview and step rendering

#[cfg(test)]
mod tests {
    use brickmosaic::algorithm::instructions::generate_instructions;
    use brickmosaic::algorithm::{BrickKind, BrickType, Placement};
    use brickmosaic::color::{Color, Rgb};
    use brickmosaic::io::render::{
        BrickStyle, blank_canvas, draw_placement, render_mosaic, render_step, save_png,
    };
    use brickmosaic::spatial::divide_into_regions;
    use image::Rgba;

    fn red_plate(id: usize, x: usize, y: usize) -> Placement {
        Placement {
            id,
            x,
            y,
            brick_type: BrickType::new(1, BrickKind::Plate, 1, 1),
            color: Color::new(1, "Red", Rgb::new(200, 20, 10)),
        }
    }

    // Tests canvas size scales with studs and rejects zero scale
    // Verified by ignoring the scale factor
    #[test]
    fn test_blank_canvas() {
        let canvas = blank_canvas(3, 2, 4).expect("valid canvas");
        assert_eq!(canvas.dimensions(), (12, 8));
        assert!(blank_canvas(3, 2, 0).is_err());
    }

    // Tests bricks get a fill and a darker outline
    // Verified by drawing the outline in the fill color
    #[test]
    fn test_draw_placement() {
        let mut canvas = blank_canvas(1, 1, 8).expect("valid canvas");
        draw_placement(&mut canvas, &red_plate(0, 0, 0), 8, BrickStyle::Plain);

        assert_eq!(canvas.get_pixel(0, 0), &Rgba([120, 12, 6, 255]));
        assert_eq!(canvas.get_pixel(2, 2), &Rgba([200, 20, 10, 255]));
    }

    // Tests highlighted bricks carry a lighter stud
    // Verified by drawing highlighted bricks plain
    #[test]
    fn test_highlighted_stud() {
        let mut canvas = blank_canvas(1, 1, 8).expect("valid canvas");
        draw_placement(&mut canvas, &red_plate(0, 0, 0), 8, BrickStyle::Highlighted);
        assert_eq!(canvas.get_pixel(4, 4), &Rgba([227, 137, 132, 255]));
    }

    // Tests step renders show earlier bricks and omit later ones
    // Verified by drawing the whole sequence for every step
    #[test]
    fn test_render_step() {
        let placements = vec![red_plate(0, 0, 0), red_plate(1, 0, 1)];
        let regions = divide_into_regions(1, 2, 1).expect("valid layout");
        let plan = generate_instructions(&placements, &regions, 1).expect("valid plan");

        let first = plan.step(1).expect("first step");
        let image = render_step(&plan, first, 1, 2, 4).expect("valid canvas");
        assert_eq!(image.get_pixel(2, 6), &Rgba([235, 235, 235, 255]));
        assert_ne!(image.get_pixel(2, 2), &Rgba([235, 235, 235, 255]));

        let full = render_mosaic(&placements, 1, 2, 4).expect("valid canvas");
        assert_ne!(full.get_pixel(2, 6), &Rgba([235, 235, 235, 255]));
    }

    // Tests saving creates parent directories
    // Verified by saving without creating the parent
    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("out/preview.png");
        let image = render_mosaic(&[red_plate(0, 0, 0)], 1, 1, 2).expect("valid canvas");
        save_png(&image, &path).expect("save succeeds");
        assert!(path.exists());
    }
}
