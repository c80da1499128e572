pub mod cli;
pub mod config;
pub mod contour;
pub mod corners;
pub mod detection;
pub mod error;
pub mod geometry;
pub mod gridlines;
pub mod orientation;
pub mod overlay;
pub mod transform;

pub use cli::Cli;
pub use config::{Band, BinarizeParams, SheetParams};
pub use contour::{Center, Contour, ContourTree};
pub use corners::locate_corners;
pub use detection::{detect_sheet_geometry, SheetGeometry};
pub use error::{Result, SheetError, Stage, Stripe};
pub use geometry::{rotate_point, CoarseRotation, Frame};
pub use gridlines::{extract_grid_lines, GridLines};
pub use orientation::{correct_orientation, CorrectedSheet};
pub use overlay::render_overlay;
pub use transform::binarize;
