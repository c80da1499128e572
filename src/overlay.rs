use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_line_segment_mut};

use crate::detection::SheetGeometry;

const CONTOUR_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const EDGE_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const GRID_COLOR: Rgb<u8> = Rgb([0, 160, 255]);
const CORNER_COLORS: [Rgb<u8>; 4] = [
    Rgb([255, 0, 0]),
    Rgb([0, 255, 0]),
    Rgb([0, 0, 255]),
    Rgb([255, 255, 0]),
];

/// Draw the detected geometry on top of the upright sheet
pub fn render_overlay(geometry: &SheetGeometry) -> RgbImage {
    let mut canvas = DynamicImage::ImageLuma8(geometry.image.clone()).to_rgb8();
    let (width, height) = canvas.dimensions();

    for contour in &geometry.contours {
        for p in &contour.points {
            if p.x >= 0 && p.y >= 0 && (p.x as u32) < width && (p.y as u32) < height {
                canvas.put_pixel(p.x as u32, p.y as u32, CONTOUR_COLOR);
            }
        }
    }

    let corners = geometry.corners;
    for i in 0..corners.len() {
        let a = corners[i];
        let b = corners[(i + 1) % corners.len()];
        draw_line_segment_mut(
            &mut canvas,
            (a.x as f32, a.y as f32),
            (b.x as f32, b.y as f32),
            EDGE_COLOR,
        );
        draw_hollow_circle_mut(&mut canvas, (a.x, a.y), 10, CORNER_COLORS[i]);
    }

    for &col in &geometry.grid.vertical {
        draw_line_segment_mut(
            &mut canvas,
            (col as f32, 0.0),
            (col as f32, (height - 1) as f32),
            GRID_COLOR,
        );
    }
    for &row in &geometry.grid.horizontal {
        draw_line_segment_mut(
            &mut canvas,
            (0.0, row as f32),
            ((width - 1) as f32, row as f32),
            GRID_COLOR,
        );
    }

    canvas
}
