//! Tunable parameters for marker detection and grid sampling.
//!
//! The defaults are calibrated for the printed template with three nested
//! square corner markers. A different marker design or sheet layout needs new
//! values, in particular `marker_depth` and the stripe bands.

/// Fractional band `[start, end)` of a reference length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub start: f64,
    pub end: f64,
}

impl Band {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

/// Binarization applied before detection when starting from a scan
#[derive(Debug, Clone, Copy)]
pub struct BinarizeParams {
    /// Pixels at or below this value count as ink
    pub threshold: u8,
    /// Chebyshev radius of the dilation; 1 is a 3x3 kernel, 0 disables it
    pub dilate_radius: u8,
}

impl Default for BinarizeParams {
    fn default() -> Self {
        Self {
            threshold: 128,
            dilate_radius: 1,
        }
    }
}

/// Parameters shared by the corner locator, orientation corrector and grid
/// line extractor.
#[derive(Debug, Clone)]
pub struct SheetParams {
    /// Canny hysteresis low threshold.
    pub canny_low: f32,
    /// Canny hysteresis high threshold.
    pub canny_high: f32,
    /// Contour nesting depth of a corner marker.
    ///
    /// Canny traces both sides of every printed square edge, and border
    /// following yields an outer and a hole contour per edge band, so three
    /// nested squares give a chain of six contours.
    pub marker_depth: usize,
    /// Maximum `long / short` side ratio of a marker bounding box.
    pub aspect_tolerance: f64,
    /// Intensity above which a stripe pixel is foreground.
    pub darkness_threshold: u8,
    /// Rows of the lower-left marker box sampled for vertical lines.
    pub vertical_band: Band,
    /// Columns, as a fraction of the two left marker widths, sampled for
    /// horizontal lines.
    pub horizontal_band: Band,
    /// Fine skew above which a warning is logged, in degrees.
    pub skew_warn_degrees: f64,
    /// Largest accepted deviation from 90° of the angle at the right-angle
    /// marker, in degrees.
    pub right_angle_tolerance: f64,
    /// Thresholding used by the binary before detection.
    pub binarize: BinarizeParams,
}

impl Default for SheetParams {
    fn default() -> Self {
        Self {
            canny_low: 100.0,
            canny_high: 200.0,
            marker_depth: 6,
            aspect_tolerance: 1.05,
            darkness_threshold: 128,
            vertical_band: Band::new(0.3, 0.7),
            horizontal_band: Band::new(0.15, 0.35),
            skew_warn_degrees: 5.0,
            right_angle_tolerance: 15.0,
            binarize: BinarizeParams::default(),
        }
    }
}
