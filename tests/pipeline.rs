mod common;

use common::{
    draw_marker, expected_corners, matches_within, sheet, strictly_increasing, COLUMNS, MARKERS,
    ROWS,
};
use image::imageops::{overlay, rotate180, rotate270, rotate90};
use image::{GrayImage, Luma};
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};
use sheet_align::{
    correct_orientation, detect_sheet_geometry, extract_grid_lines, locate_corners,
    CoarseRotation, SheetError, SheetParams, Stage,
};

fn blank() -> GrayImage {
    GrayImage::from_pixel(common::WIDTH, common::HEIGHT, Luma([0]))
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn assert_corners_near(corners: &[sheet_align::Center; 4], tol: i32) {
    for (c, (ex, ey)) in corners.iter().zip(expected_corners()) {
        assert!(
            (c.x - ex).abs() <= tol && (c.y - ey).abs() <= tol,
            "corner ({}, {}) expected near ({}, {}), all: {:?}",
            c.x,
            c.y,
            ex,
            ey,
            corners
        );
    }
}

#[test]
fn locates_markers_in_anticlockwise_order() {
    init_logger();
    let contours = locate_corners(&sheet(), &SheetParams::default())
        .expect("three markers on a clean sheet");
    for (contour, (mx, my)) in contours.iter().zip(MARKERS) {
        let c = contour.center().unwrap();
        assert!((c.x - mx).abs() <= 2 && (c.y - my).abs() <= 2, "{:?}", c);
    }
}

#[test]
fn decoy_marker_is_rejected_by_right_triangle_search() {
    init_logger();
    let mut img = sheet();
    draw_marker(&mut img, 700, 300);
    let contours = locate_corners(&img, &SheetParams::default()).expect("markers found");
    for (contour, (mx, my)) in contours.iter().zip(MARKERS) {
        let c = contour.center().unwrap();
        assert!((c.x - mx).abs() <= 2 && (c.y - my).abs() <= 2, "{:?}", c);
    }
}

#[test]
fn two_markers_fail_at_depth_filter() {
    init_logger();
    let mut img = blank();
    draw_marker(&mut img, 100, 100);
    draw_marker(&mut img, 100, 1400);
    let err = locate_corners(&img, &SheetParams::default()).unwrap_err();
    assert!(
        matches!(
            err,
            SheetError::Detection {
                stage: Stage::Depth,
                found: 2
            }
        ),
        "{}",
        err
    );
}

#[test]
fn upright_sheet_is_left_alone() {
    init_logger();
    let sheet = correct_orientation(&sheet(), &SheetParams::default()).unwrap();
    assert_eq!(sheet.coarse, CoarseRotation::Deg0);
    assert!(sheet.skew_degrees.abs() < 1.0, "skew {}", sheet.skew_degrees);
    assert_corners_near(&sheet.corners, 3);
}

#[test]
fn end_to_end_on_upright_sheet() {
    init_logger();
    let geometry = detect_sheet_geometry(&sheet(), &SheetParams::default()).unwrap();
    assert_corners_near(&geometry.corners, 3);
    assert!(
        matches_within(&geometry.grid.vertical, &COLUMNS, 3),
        "{:?}",
        geometry.grid
    );
    assert!(
        matches_within(&geometry.grid.horizontal, &ROWS, 3),
        "{:?}",
        geometry.grid
    );
    assert!(strictly_increasing(&geometry.grid.vertical));
    assert!(strictly_increasing(&geometry.grid.horizontal));
}

#[test]
fn quarter_turned_sheets_are_restored() {
    init_logger();
    let upright = sheet();
    let cases = [
        (rotate90(&upright), CoarseRotation::Deg270),
        (rotate180(&upright), CoarseRotation::Deg180),
        (rotate270(&upright), CoarseRotation::Deg90),
    ];
    for (turned, expected) in cases {
        let geometry = detect_sheet_geometry(&turned, &SheetParams::default()).unwrap();
        assert_eq!(geometry.coarse, expected);
        assert_eq!(geometry.image.dimensions(), upright.dimensions());
        assert!(geometry.skew_degrees.abs() < 1.0, "skew {}", geometry.skew_degrees);
        assert_corners_near(&geometry.corners, 3);
        assert!(
            matches_within(&geometry.grid.vertical, &COLUMNS, 3),
            "{:?} after {:?}",
            geometry.grid,
            expected
        );
        assert!(
            matches_within(&geometry.grid.horizontal, &ROWS, 3),
            "{:?} after {:?}",
            geometry.grid,
            expected
        );
    }
}

#[test]
fn small_skew_is_corrected() {
    init_logger();
    let tilted = rotate_about_center(
        &sheet(),
        2f32.to_radians(),
        Interpolation::Bilinear,
        Luma([0]),
    );
    let geometry = detect_sheet_geometry(&tilted, &SheetParams::default()).unwrap();
    assert_eq!(geometry.coarse, CoarseRotation::Deg0);
    assert!(
        (geometry.skew_degrees + 2.0).abs() < 0.3,
        "skew {}",
        geometry.skew_degrees
    );
    assert_corners_near(&geometry.corners, 4);
    assert!(
        matches_within(&geometry.grid.vertical, &COLUMNS, 4),
        "{:?}",
        geometry.grid
    );
    assert!(
        matches_within(&geometry.grid.horizontal, &ROWS, 4),
        "{:?}",
        geometry.grid
    );
}

#[test]
fn corrected_output_feeds_grid_extraction() {
    init_logger();
    let params = SheetParams::default();
    let sheet = correct_orientation(&rotate90(&sheet()), &params).unwrap();
    let grid = extract_grid_lines(&sheet.image, &sheet.contours, &sheet.corners, &params).unwrap();
    assert!(matches_within(&grid.vertical, &COLUMNS, 3), "{:?}", grid);
    assert!(matches_within(&grid.horizontal, &ROWS, 3), "{:?}", grid);
}

#[test]
fn collinear_markers_are_degenerate() {
    init_logger();
    let mut img = blank();
    for cx in [100, 600, 1100] {
        draw_marker(&mut img, cx, 100);
    }
    let err = correct_orientation(&img, &SheetParams::default()).unwrap_err();
    assert!(matches!(err, SheetError::Geometry { .. }), "{}", err);
}

#[test]
fn nearly_collinear_markers_are_degenerate() {
    init_logger();
    let mut img = blank();
    for (cx, cy) in [(100, 100), (600, 104), (1100, 100)] {
        draw_marker(&mut img, cx, cy);
    }
    let err = correct_orientation(&img, &SheetParams::default()).unwrap_err();
    assert!(matches!(err, SheetError::Geometry { .. }), "{}", err);
    assert!(err.to_string().contains("not a right angle"), "{}", err);
}

#[test]
fn arbitrary_rotations_keep_corner_order() {
    init_logger();
    // room for the sheet to turn freely about the canvas center
    let (pad_x, pad_y) = (400, 200);
    let mut canvas = GrayImage::from_pixel(2000, 2000, Luma([0]));
    overlay(&mut canvas, &sheet(), pad_x, pad_y);

    for degrees in [30.0f32, 135.0, 200.0, 300.0] {
        let turned = rotate_about_center(
            &canvas,
            degrees.to_radians(),
            Interpolation::Bilinear,
            Luma([0]),
        );
        let sheet = correct_orientation(&turned, &SheetParams::default()).unwrap();

        let total = sheet.coarse.degrees() + sheet.skew_degrees + degrees as f64;
        let residual = total.rem_euclid(360.0).min(360.0 - total.rem_euclid(360.0));
        assert!(residual < 0.5, "{:?} + {} after {}°", sheet.coarse, sheet.skew_degrees, degrees);

        for (c, (ex, ey)) in sheet.corners.iter().zip(expected_corners()) {
            let (ex, ey) = (ex + pad_x as i32, ey + pad_y as i32);
            assert!(
                (c.x - ex).abs() <= 5 && (c.y - ey).abs() <= 5,
                "corner ({}, {}) expected near ({}, {}) after {}°",
                c.x,
                c.y,
                ex,
                ey,
                degrees
            );
        }
    }
}
