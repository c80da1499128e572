//! Corner marker detection.
//!
//! The sheet carries three nested-square markers at its top-left,
//! bottom-left and top-right corners. They are found by contour nesting
//! depth, then narrowed by size and squareness, and finally by how well the
//! three centers form a right triangle.

use image::GrayImage;
use imageproc::edges::canny;
use log::debug;

use crate::config::SheetParams;
use crate::contour::{Center, Contour, ContourTree};
use crate::error::{Result, SheetError, Stage};
use crate::geometry::{right_angle_residual, sqr_dist};

/// A contour that survived filtering, with its cached center
#[derive(Debug, Clone)]
pub struct Candidate {
    pub contour: Contour,
    pub center: Center,
}

impl Candidate {
    pub fn new(contour: Contour) -> Option<Self> {
        let center = contour.center()?;
        Some(Self { contour, center })
    }
}

/// Locate the three corner markers of a sheet.
///
/// The contours are returned anti-clockwise, starting with the marker at the
/// right angle of the triangle they form.
pub fn locate_corners(image: &GrayImage, params: &SheetParams) -> Result<[Contour; 3]> {
    let candidates = locate_candidates(image, params)?;
    Ok(candidates.map(|c| c.contour))
}

/// Same as [`locate_corners`] but keeps the centers alongside the contours
pub fn locate_candidates(image: &GrayImage, params: &SheetParams) -> Result<[Candidate; 3]> {
    if image.width() == 0 || image.height() == 0 {
        return Err(SheetError::input("image has no pixels"));
    }

    let edges = canny(image, params.canny_low, params.canny_high);
    let tree = ContourTree::trace(&edges);
    // mean over every contour, before any filtering lifts it
    let size_threshold = tree.mean_len();
    debug!(
        "Traced {} contours, size threshold {:.1}",
        tree.len(),
        size_threshold
    );

    let candidates = filter_by_depth(&tree, params.marker_depth);
    require(Stage::Depth, &candidates)?;

    let candidates = filter_by_size(candidates, size_threshold);
    require(Stage::Size, &candidates)?;

    let candidates = filter_by_shape(candidates, params.aspect_tolerance);
    require(Stage::Shape, &candidates)?;

    let triplet = select_right_triangle(candidates);
    let arranged = arrange_anticlockwise(triplet);
    debug!(
        "Corner centers: {:?}",
        arranged.iter().map(|c| (c.center.x, c.center.y)).collect::<Vec<_>>()
    );
    Ok(arranged)
}

fn require(stage: Stage, candidates: &[Candidate]) -> Result<()> {
    debug!("{} filter kept {} candidate(s)", stage, candidates.len());
    if candidates.len() < 3 {
        return Err(SheetError::Detection {
            stage,
            found: candidates.len(),
        });
    }
    Ok(())
}

/// Keep contours whose longest child chain is exactly `depth` long
pub fn filter_by_depth(tree: &ContourTree, depth: usize) -> Vec<Candidate> {
    tree.depths()
        .into_iter()
        .enumerate()
        .filter(|&(_, d)| d == depth)
        .filter_map(|(i, _)| Candidate::new(tree.contour(i).clone()))
        .collect()
}

/// Keep contours with more points than `threshold`
pub fn filter_by_size(candidates: Vec<Candidate>, threshold: f64) -> Vec<Candidate> {
    candidates
        .into_iter()
        .filter(|c| c.contour.len() as f64 > threshold)
        .collect()
}

/// Keep contours whose bounding box is square within `tolerance`
pub fn filter_by_shape(candidates: Vec<Candidate>, tolerance: f64) -> Vec<Candidate> {
    candidates
        .into_iter()
        .filter(|c| {
            c.contour
                .bounding_rect()
                .is_some_and(|r| r.aspect_ratio() <= tolerance)
        })
        .collect()
}

/// Pick the three candidates whose centers come closest to a right triangle.
///
/// Exhaustive over all triplets; the first triplet with the smallest
/// residual wins. Callers pass at least three candidates.
pub(crate) fn select_right_triangle(candidates: Vec<Candidate>) -> [Candidate; 3] {
    let n = candidates.len();
    let mut best = (0, 1, 2);
    if n > 3 {
        let mut min_err = i64::MAX;
        for i in 0..n {
            for j in i + 1..n {
                for k in j + 1..n {
                    let (a, b, c) = (
                        candidates[i].center,
                        candidates[j].center,
                        candidates[k].center,
                    );
                    let mut edges = [sqr_dist(a, c), sqr_dist(a, b), sqr_dist(b, c)];
                    edges.sort_unstable();
                    let err = (edges[0] + edges[1] - edges[2]).abs();
                    if err < min_err {
                        min_err = err;
                        best = (i, j, k);
                    }
                }
            }
        }
        debug!("Best right triangle {:?} with residual {}", best, min_err);
    }

    // remove from the back so the earlier indices stay valid
    let (i, j, k) = best;
    let mut candidates = candidates;
    let c = candidates.remove(k);
    let b = candidates.remove(j);
    let a = candidates.remove(i);
    [a, b, c]
}

/// Order three candidates anti-clockwise around their centroid, starting with
/// the one sitting at the right angle.
pub fn arrange_anticlockwise(triplet: [Candidate; 3]) -> [Candidate; 3] {
    let cx = triplet.iter().map(|c| c.center.x as f64).sum::<f64>() / 3.0;
    let cy = triplet.iter().map(|c| c.center.y as f64).sum::<f64>() / 3.0;

    // polar angle in a y-up frame, so ascending order is anti-clockwise
    let mut ordered = triplet.map(|c| {
        let theta = (cy - c.center.y as f64).atan2(c.center.x as f64 - cx);
        (theta, c)
    });
    ordered.sort_by(|a, b| a.0.total_cmp(&b.0));

    let centers = [ordered[0].1.center, ordered[1].1.center, ordered[2].1.center];
    let mut right_angle = 0;
    let mut min_err = i64::MAX;
    for t1 in 0..3 {
        let t2 = (t1 + 1) % 3;
        let t3 = (t2 + 1) % 3;
        let err = right_angle_residual(centers[t1], centers[t2], centers[t3]);
        if err < min_err {
            min_err = err;
            right_angle = t1;
        }
    }

    ordered.rotate_left(right_angle);
    ordered.map(|(_, c)| c)
}
