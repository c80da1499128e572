use image::GrayImage;
use imageproc::point::Point;
use nalgebra::{Rotation2, Vector2};

use crate::contour::{Center, Contour};

/// Pixel dimensions of the image a point lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub width: i32,
    pub height: i32,
}

impl Frame {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
        }
    }

    pub fn of(image: &GrayImage) -> Self {
        Self::new(image.width(), image.height())
    }

    /// Frame after applying a quarter-turn rotation with canvas expansion
    pub fn rotated(self, coarse: CoarseRotation) -> Self {
        match coarse {
            CoarseRotation::Deg90 | CoarseRotation::Deg270 => Self {
                width: self.height,
                height: self.width,
            },
            CoarseRotation::Deg0 | CoarseRotation::Deg180 => self,
        }
    }

    fn half(&self) -> (i32, i32) {
        (self.width / 2, self.height / 2)
    }
}

/// Quarter-turn page rotation, clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoarseRotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl CoarseRotation {
    pub fn degrees(&self) -> f64 {
        match self {
            CoarseRotation::Deg0 => 0.0,
            CoarseRotation::Deg90 => 90.0,
            CoarseRotation::Deg180 => 180.0,
            CoarseRotation::Deg270 => 270.0,
        }
    }

    /// Pick the rotation that brings the right-angle corner back into the
    /// top-left quadrant. Corners lying on a center axis are left alone.
    pub fn from_corner(corner: Center, frame: Frame) -> Self {
        let (cx, cy) = frame.half();
        let dx = corner.x - cx;
        let dy = cy - corner.y;
        match (dx.signum(), dy.signum()) {
            (1, 1) => CoarseRotation::Deg270,
            (1, -1) => CoarseRotation::Deg180,
            (-1, -1) => CoarseRotation::Deg90,
            _ => CoarseRotation::Deg0,
        }
    }
}

/// Rotate a point clockwise by `degrees` about the center of `src`, then
/// express it relative to the center of `dst`.
///
/// Rotation happens in a y-up frame; results are rounded to whole pixels.
pub fn rotate_point(point: Center, degrees: f64, src: Frame, dst: Frame) -> Center {
    let (sx, sy) = src.half();
    let (dx, dy) = dst.half();
    let v = Vector2::new((point.x - sx) as f64, (sy - point.y) as f64);
    let r = Rotation2::new(-degrees.to_radians()) * v;
    Point::new(r.x.round() as i32 + dx, dy - r.y.round() as i32)
}

pub fn rotate_contour(contour: &Contour, degrees: f64, src: Frame, dst: Frame) -> Contour {
    Contour::new(
        contour
            .points
            .iter()
            .map(|&p| rotate_point(p, degrees, src, dst))
            .collect(),
    )
}

pub fn sqr_dist(a: Center, b: Center) -> i64 {
    let dx = (a.x - b.x) as i64;
    let dy = (a.y - b.y) as i64;
    dx * dx + dy * dy
}

/// How far the angle at `t1` is from a right angle, as a Pythagorean residual
pub fn right_angle_residual(t1: Center, t2: Center, t3: Center) -> i64 {
    (sqr_dist(t1, t2) + sqr_dist(t1, t3) - sqr_dist(t2, t3)).abs()
}

/// Twice the signed area of the triangle
pub fn triangle_area2(p1: Center, p2: Center, p3: Center) -> i64 {
    let (ax, ay) = ((p2.x - p1.x) as i64, (p2.y - p1.y) as i64);
    let (bx, by) = ((p3.x - p1.x) as i64, (p3.y - p1.y) as i64);
    ax * by - ay * bx
}

/// Angle at `p0` between the rays towards `p1` and `p2`, in degrees
pub fn corner_angle_degrees(p0: Center, p1: Center, p2: Center) -> f64 {
    let a = Vector2::new((p1.x - p0.x) as f64, (p1.y - p0.y) as f64);
    let b = Vector2::new((p2.x - p0.x) as f64, (p2.y - p0.y) as f64);
    a.angle(&b).to_degrees()
}

/// Complete the parallelogram spanned at `p1` by `p2` and `p3`
pub fn last_corner(p1: Center, p2: Center, p3: Center) -> Center {
    Point::new(p2.x + p3.x - p1.x, p2.y + p3.y - p1.y)
}

/// Insert the inferred corner between the two detected neighbors so the four
/// corners stay anti-clockwise.
pub fn complete_corners(detected: [Center; 3]) -> [Center; 4] {
    let [p1, p2, p3] = detected;
    [p1, p2, last_corner(p1, p2, p3), p3]
}

/// Clockwise rotation, in degrees, that levels the sheet edges.
///
/// One estimate comes from the edge `corners[0] -> corners[1]` (expected to
/// point straight down), one from `corners[0] -> corners[3]` (expected to
/// point right). The two are averaged with equal weight.
pub fn skew_correction_degrees(corners: &[Center; 4]) -> f64 {
    let [p0, p1, _, p3] = *corners;
    let d1 = ((p1.y - p0.y) as f64).atan2((p1.x - p0.x) as f64) - std::f64::consts::FRAC_PI_2;
    let d2 = ((p3.y - p0.y) as f64).atan2((p3.x - p0.x) as f64);
    -((d1 + d2) / 2.0).to_degrees()
}
