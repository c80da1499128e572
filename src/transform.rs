use image::imageops::{rotate180, rotate270, rotate90};
use image::{GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};
use imageproc::morphology::dilate;

use crate::config::BinarizeParams;
use crate::geometry::CoarseRotation;

/// Fill value for pixels uncovered by a rotation (binary background)
pub const BACKGROUND: Luma<u8> = Luma([0]);

/// Rotate clockwise by a quarter-turn multiple, swapping the canvas
/// dimensions where needed
pub fn rotate_coarse(img: &GrayImage, coarse: CoarseRotation) -> GrayImage {
    match coarse {
        CoarseRotation::Deg0 => img.clone(),
        CoarseRotation::Deg90 => rotate90(img),
        CoarseRotation::Deg180 => rotate180(img),
        CoarseRotation::Deg270 => rotate270(img),
    }
}

/// Rotate clockwise by `degrees` about the image center, keeping the canvas
/// size. Uncovered pixels become [`BACKGROUND`].
pub fn rotate_fine(img: &GrayImage, degrees: f64) -> GrayImage {
    rotate_about_center(
        img,
        degrees.to_radians() as f32,
        Interpolation::Nearest,
        BACKGROUND,
    )
}

/// Inverse binary threshold followed by a square dilation.
///
/// Ink (at or below the threshold) becomes 255, paper becomes 0.
pub fn binarize(gray: &GrayImage, params: &BinarizeParams) -> GrayImage {
    let (width, height) = gray.dimensions();
    let threshold = params.threshold;
    let binary = GrayImage::from_fn(width, height, |x, y| {
        if gray.get_pixel(x, y)[0] > threshold {
            Luma([0])
        } else {
            Luma([255])
        }
    });

    if params.dilate_radius == 0 {
        return binary;
    }
    dilate(&binary, Norm::LInf, params.dilate_radius)
}
