use image::{GrayImage, Luma};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

pub const WIDTH: u32 = 1200;
pub const HEIGHT: u32 = 1600;

/// Marker centers: top-left, bottom-left, top-right
pub const MARKERS: [(i32, i32); 3] = [(100, 100), (100, 1400), (1100, 100)];
pub const COLUMNS: [u32; 3] = [300, 500, 700];
pub const ROWS: [u32; 3] = [300, 600, 900];

const INK: Luma<u8> = Luma([255]);
const PAPER: Luma<u8> = Luma([0]);

/// Three nested squares: 120px ink, 80px paper, 40px ink
pub fn draw_marker(img: &mut GrayImage, cx: i32, cy: i32) {
    for (half, color) in [(60, INK), (40, PAPER), (20, INK)] {
        let side = (2 * half) as u32;
        draw_filled_rect_mut(img, Rect::at(cx - half, cy - half).of_size(side, side), color);
    }
}

/// Binary sheet (ink = 255) with three corner markers and short 3px grid
/// lines next to the left markers
pub fn sheet() -> GrayImage {
    let mut img = GrayImage::from_pixel(WIDTH, HEIGHT, PAPER);
    for (cx, cy) in MARKERS {
        draw_marker(&mut img, cx, cy);
    }
    for col in COLUMNS {
        draw_filled_rect_mut(&mut img, Rect::at(col as i32 - 1, 1340).of_size(3, 120), INK);
    }
    for row in ROWS {
        draw_filled_rect_mut(&mut img, Rect::at(40, row as i32 - 1).of_size(120, 3), INK);
    }
    img
}

/// Expected upright corners, anti-clockwise from top-left
pub fn expected_corners() -> [(i32, i32); 4] {
    [(100, 100), (100, 1400), (1100, 1400), (1100, 100)]
}

/// Every found position is near an expected one and vice versa
pub fn matches_within(found: &[u32], expected: &[u32], tol: u32) -> bool {
    found
        .iter()
        .all(|&f| expected.iter().any(|&e| f.abs_diff(e) <= tol))
        && expected
            .iter()
            .all(|&e| found.iter().any(|&f| f.abs_diff(e) <= tol))
}

pub fn strictly_increasing(values: &[u32]) -> bool {
    values.windows(2).all(|w| w[0] < w[1])
}
