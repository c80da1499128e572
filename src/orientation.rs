use image::GrayImage;
use log::{debug, warn};

use crate::config::SheetParams;
use crate::contour::{Center, Contour};
use crate::corners::locate_candidates;
use crate::error::{Result, SheetError};
use crate::geometry::{
    complete_corners, corner_angle_degrees, rotate_contour, rotate_point, skew_correction_degrees,
    triangle_area2, CoarseRotation, Frame,
};
use crate::transform::{rotate_coarse, rotate_fine};

/// A sheet turned upright, with its corner geometry in the new frame
#[derive(Debug, Clone)]
pub struct CorrectedSheet {
    /// Rotated image
    pub image: GrayImage,
    /// Corner marker contours, anti-clockwise from the right-angle marker
    pub contours: [Contour; 3],
    /// Corner centers, anti-clockwise; index 2 is the inferred corner
    pub corners: [Center; 4],
    /// Quarter-turn applied first
    pub coarse: CoarseRotation,
    /// Clockwise skew correction applied after the quarter-turn, in degrees
    pub skew_degrees: f64,
}

/// Rotate a sheet so that its corner markers sit axis-aligned, with the
/// right-angle marker at the top left.
pub fn correct_orientation(image: &GrayImage, params: &SheetParams) -> Result<CorrectedSheet> {
    let [c0, c1, c2] = locate_candidates(image, params)?;
    let detected = [c0.center, c1.center, c2.center];
    let contours = [c0.contour, c1.contour, c2.contour];

    if triangle_area2(detected[0], detected[1], detected[2]) == 0 {
        return Err(SheetError::geometry(format!(
            "corner centers {:?} are collinear",
            detected.map(|c| (c.x, c.y))
        )));
    }
    let angle = corner_angle_degrees(detected[0], detected[1], detected[2]);
    if (angle - 90.0).abs() > params.right_angle_tolerance {
        return Err(SheetError::geometry(format!(
            "corner angle of {:.1}° at {:?} is not a right angle",
            angle,
            (detected[0].x, detected[0].y)
        )));
    }
    let mut corners = complete_corners(detected);

    let source = Frame::of(image);
    let coarse = CoarseRotation::from_corner(corners[0], source);
    let frame = source.rotated(coarse);
    debug!("Coarse rotation: {}°", coarse.degrees());

    let mut rotated = rotate_coarse(image, coarse);
    if coarse != CoarseRotation::Deg0 {
        corners = corners.map(|c| rotate_point(c, coarse.degrees(), source, frame));
    }

    let skew_degrees = skew_correction_degrees(&corners);
    debug!("Skew correction: {:.3}°", skew_degrees);
    if skew_degrees.abs() > params.skew_warn_degrees {
        warn!(
            "Large skew correction of {:.2}°, corner detection may be off",
            skew_degrees
        );
    }

    corners = corners.map(|c| rotate_point(c, skew_degrees, frame, frame));
    if skew_degrees != 0.0 {
        rotated = rotate_fine(&rotated, skew_degrees);
    }

    let total = coarse.degrees() + skew_degrees;
    let contours = contours.map(|c| rotate_contour(&c, total, source, frame));

    Ok(CorrectedSheet {
        image: rotated,
        contours,
        corners,
        coarse,
        skew_degrees,
    })
}
