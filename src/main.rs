use anyhow::{Context, Result};
use clap::Parser;
use image::ImageReader;
use log::{info, LevelFilter};

use sheet_align::{binarize, detect_sheet_geometry, render_overlay, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();

    let params = cli.params();

    // Load input image
    let img = ImageReader::open(&cli.input)
        .with_context(|| format!("Failed to open input file: {:?}", cli.input))?
        .decode()
        .with_context(|| format!("Failed to decode image: {:?}", cli.input))?;
    info!("Loaded image: {:?} ({}x{})", cli.input, img.width(), img.height());

    let gray = img.to_luma8();
    let binary = if cli.binary {
        gray
    } else {
        binarize(&gray, &params.binarize)
    };

    let geometry = detect_sheet_geometry(&binary, &params)
        .context("Failed to detect sheet geometry")?;

    info!(
        "Rotation: {}° coarse, {:.3}° skew",
        geometry.coarse.degrees(),
        geometry.skew_degrees
    );
    for (i, c) in geometry.corners.iter().enumerate() {
        println!("corner {}: ({}, {})", i, c.x, c.y);
    }
    println!("horizontal: {:?}", geometry.grid.horizontal);
    println!("vertical: {:?}", geometry.grid.vertical);

    if let Some(path) = &cli.output {
        geometry
            .image
            .save(path)
            .with_context(|| format!("Failed to save output: {:?}", path))?;
        info!("Saved straightened sheet: {:?}", path);
    }

    if let Some(path) = &cli.overlay {
        render_overlay(&geometry)
            .save(path)
            .with_context(|| format!("Failed to save overlay: {:?}", path))?;
        info!("Saved overlay: {:?}", path);
    }

    Ok(())
}
