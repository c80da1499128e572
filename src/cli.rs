use clap::Parser;
use std::path::PathBuf;

use crate::config::SheetParams;

#[derive(Parser, Debug)]
#[command(name = "sheet-align")]
#[command(version, about = "Straighten a scanned answer sheet and locate its answer grid")]
pub struct Cli {
    /// Input image path
    #[arg(required = true)]
    pub input: PathBuf,

    /// Save the straightened image here
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Save an image with the detected geometry drawn on it
    #[arg(long)]
    pub overlay: Option<PathBuf>,

    /// Input is already binary (ink = white), skip thresholding
    #[arg(long)]
    pub binary: bool,

    /// Binarization threshold; darker pixels count as ink
    #[arg(short, long, default_value = "128")]
    pub threshold: u8,

    /// Contour nesting depth of a corner marker
    #[arg(long, default_value = "6")]
    pub marker_depth: usize,

    /// Maximum side ratio of a marker bounding box
    #[arg(long, default_value = "1.05")]
    pub aspect_tolerance: f64,

    /// Show detection details
    #[arg(long)]
    pub verbose: bool,
}

impl Cli {
    pub fn params(&self) -> SheetParams {
        let mut params = SheetParams {
            marker_depth: self.marker_depth,
            aspect_tolerance: self.aspect_tolerance,
            ..SheetParams::default()
        };
        params.binarize.threshold = self.threshold;
        params
    }
}
