//! Answer-grid separator lines.
//!
//! Lines are found by sampling narrow stripes that cross the grid next to
//! the corner markers and recording where the column darkness flips.

use image::imageops::crop_imm;
use image::GrayImage;
use log::debug;

use crate::config::{Band, SheetParams};
use crate::contour::{Center, Contour, Rect};
use crate::error::{Result, SheetError, Stripe};

/// Grid boundary positions in absolute image coordinates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridLines {
    /// Row indices, increasing
    pub horizontal: Vec<u32>,
    /// Column indices, increasing
    pub vertical: Vec<u32>,
}

/// Find the grid line positions of an upright sheet.
///
/// `contours` and `corners` are the marker contours and the four corner
/// centers produced by orientation correction.
pub fn extract_grid_lines(
    image: &GrayImage,
    contours: &[Contour; 3],
    corners: &[Center; 4],
    params: &SheetParams,
) -> Result<GridLines> {
    let [r0, r1, _] = bounding_rects(contours)?;

    // between the lower-left marker and the inferred lower-right corner
    let (y0, y1) = band_span(r1.y, r1.height, params.vertical_band);
    let region = Region::clamped(image, r1.right(), y0, corners[2].x, y1);
    let (x_off, stripe) = sample(image, region, Stripe::Vertical)?;
    let vertical: Vec<u32> = separate_grid_lines(&stripe, params.darkness_threshold)
        .into_iter()
        .map(|c| c + x_off.0)
        .collect();

    // between the upper-left and lower-left markers
    let (x0, x1) = band_span(r0.x, r0.width + r1.width, params.horizontal_band);
    let region = Region::clamped(image, x0, r0.bottom(), x1, r1.y);
    let (y_off, stripe) = sample(image, region, Stripe::Horizontal)?;
    let horizontal: Vec<u32> = separate_grid_lines(&stripe, params.darkness_threshold)
        .into_iter()
        .map(|r| r + y_off.1)
        .collect();

    debug!(
        "Found {} horizontal and {} vertical grid boundaries",
        horizontal.len(),
        vertical.len()
    );
    Ok(GridLines {
        horizontal,
        vertical,
    })
}

fn bounding_rects(contours: &[Contour; 3]) -> Result<[Rect; 3]> {
    let mut rects = [Rect {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    }; 3];
    for (rect, contour) in rects.iter_mut().zip(contours) {
        *rect = contour
            .bounding_rect()
            .ok_or_else(|| SheetError::geometry("corner contour has no points"))?;
    }
    Ok(rects)
}

/// `[origin + start * length, origin + end * length)`, truncated
fn band_span(origin: i32, length: i32, band: Band) -> (i32, i32) {
    let start = origin + (band.start * length as f64) as i32;
    let end = origin + (band.end * length as f64) as i32;
    (start, end)
}

/// Half-open pixel region, already clipped to the image
#[derive(Debug, Clone, Copy)]
struct Region {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

impl Region {
    fn clamped(image: &GrayImage, x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let clamp_x = |v: i32| v.clamp(0, image.width() as i32) as u32;
        let clamp_y = |v: i32| v.clamp(0, image.height() as i32) as u32;
        Self {
            x0: clamp_x(x0),
            y0: clamp_y(y0),
            x1: clamp_x(x1),
            y1: clamp_y(y1),
        }
    }
}

fn sample(image: &GrayImage, region: Region, stripe: Stripe) -> Result<((u32, u32), GrayImage)> {
    if region.x1 <= region.x0 || region.y1 <= region.y0 {
        return Err(SheetError::EmptyStripe {
            stripe,
            reason: format!(
                "columns {}..{}, rows {}..{}",
                region.x0, region.x1, region.y0, region.y1
            ),
        });
    }
    let (w, h) = (region.x1 - region.x0, region.y1 - region.y0);
    debug!("{} stripe at ({}, {}) is {}x{}", stripe, region.x0, region.y0, w, h);
    let crop = crop_imm(image, region.x0, region.y0, w, h).to_image();
    Ok(((region.x0, region.y0), crop))
}

/// Positions along the long axis of a stripe where darkness flips.
///
/// Tall stripes are scanned along their rows, wide ones along their columns.
pub fn separate_grid_lines(stripe: &GrayImage, threshold: u8) -> Vec<u32> {
    let mut profile = dark_profile(stripe, threshold);
    smooth(&mut profile);
    transitions(&profile)
}

/// One flag per position along the long axis: more than half of the pixels
/// across the stripe exceed `threshold`.
pub fn dark_profile(stripe: &GrayImage, threshold: u8) -> Vec<bool> {
    let (width, height) = stripe.dimensions();
    let tall = height > width;
    let (len, across) = if tall { (height, width) } else { (width, height) };

    (0..len)
        .map(|i| {
            let count = (0..across)
                .filter(|&j| {
                    let (x, y) = if tall { (j, i) } else { (i, j) };
                    stripe.get_pixel(x, y)[0] > threshold
                })
                .count() as u32;
            count > across / 2
        })
        .collect()
}

/// Clear the leading dark run and flip single-position spikes whose two
/// neighbors agree.
pub fn smooth(profile: &mut [bool]) {
    for flag in profile.iter_mut() {
        if !*flag {
            break;
        }
        *flag = false;
    }

    for i in 1..profile.len().saturating_sub(1) {
        if profile[i] != profile[i - 1] && profile[i - 1] == profile[i + 1] {
            profile[i] = profile[i - 1];
        }
    }
}

/// Indices where the flag differs from its predecessor
pub fn transitions(profile: &[bool]) -> Vec<u32> {
    let Some(&first) = profile.first() else {
        return Vec::new();
    };
    let mut state = first;
    let mut result = Vec::new();
    for (i, &flag) in profile.iter().enumerate().skip(1) {
        if flag != state {
            state = flag;
            result.push(i as u32);
        }
    }
    result
}
