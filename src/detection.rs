use image::GrayImage;
use log::debug;

use crate::config::SheetParams;
use crate::contour::{Center, Contour};
use crate::error::Result;
use crate::geometry::CoarseRotation;
use crate::gridlines::{extract_grid_lines, GridLines};
use crate::orientation::correct_orientation;

/// Result of the full alignment pipeline
#[derive(Debug, Clone)]
pub struct SheetGeometry {
    /// Upright image the remaining fields refer to
    pub image: GrayImage,
    /// Corner marker contours
    pub contours: [Contour; 3],
    /// Corner centers, anti-clockwise from the right-angle marker
    pub corners: [Center; 4],
    /// Grid boundary positions
    pub grid: GridLines,
    /// Quarter-turn that was applied
    pub coarse: CoarseRotation,
    /// Clockwise skew correction that was applied, in degrees
    pub skew_degrees: f64,
}

/// Main detection function: straighten a sheet and locate its answer grid
pub fn detect_sheet_geometry(image: &GrayImage, params: &SheetParams) -> Result<SheetGeometry> {
    let sheet = correct_orientation(image, params)?;
    let grid = extract_grid_lines(&sheet.image, &sheet.contours, &sheet.corners, params)?;
    debug!(
        "Sheet corners {:?}, rows {:?}, columns {:?}",
        sheet.corners.map(|c| (c.x, c.y)),
        grid.horizontal,
        grid.vertical
    );

    Ok(SheetGeometry {
        image: sheet.image,
        contours: sheet.contours,
        corners: sheet.corners,
        grid,
        coarse: sheet.coarse,
        skew_degrees: sheet.skew_degrees,
    })
}
