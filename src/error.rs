use std::fmt;

use thiserror::Error;

/// Locator stage that can run out of corner candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Nesting depth filter
    Depth,
    /// Point-count filter against the mean contour size
    Size,
    /// Near-square bounding box filter
    Shape,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Depth => "depth",
            Stage::Size => "size",
            Stage::Shape => "shape",
        };
        f.write_str(name)
    }
}

/// Stripe sampled by the grid line extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stripe {
    /// Horizontal band used to find vertical lines
    Vertical,
    /// Vertical band used to find horizontal lines
    Horizontal,
}

impl fmt::Display for Stripe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stripe::Vertical => "vertical",
            Stripe::Horizontal => "horizontal",
        };
        f.write_str(name)
    }
}

/// Errors raised while aligning a sheet
#[derive(Debug, Error)]
pub enum SheetError {
    /// Empty or malformed input image
    #[error("invalid input image: {reason}")]
    Input { reason: String },

    /// Too few corner markers survived a locator stage
    #[error("corner detection failed at {stage} filter: {found} candidate(s) left, 3 required")]
    Detection { stage: Stage, found: usize },

    /// Degenerate corner layout
    #[error("degenerate geometry: {reason}")]
    Geometry { reason: String },

    /// A gridline stripe could not be sampled
    #[error("{stripe} stripe is empty: {reason}")]
    EmptyStripe { stripe: Stripe, reason: String },
}

impl SheetError {
    pub(crate) fn input(reason: impl Into<String>) -> Self {
        SheetError::Input {
            reason: reason.into(),
        }
    }

    pub(crate) fn geometry(reason: impl Into<String>) -> Self {
        SheetError::Geometry {
            reason: reason.into(),
        }
    }
}

/// Result type for sheet alignment
pub type Result<T> = std::result::Result<T, SheetError>;
