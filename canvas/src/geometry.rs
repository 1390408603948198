//! Pure 2D math shared by the transform engine, hit-testing, and rendering.
//!
//! Angles are in degrees throughout. The canvas uses a y-down coordinate
//! system, so increasing angles turn clockwise on screen, matching the
//! direction of a positive CSS/Canvas2D rotation.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::consts::SNAP_ANGLE_DEG;

/// A point in either screen or canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise offset by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Angle of `point` as seen from `center`, in degrees (`atan2` range).
#[must_use]
pub fn angle(center: Point, point: Point) -> f64 {
    (point.y - center.y).atan2(point.x - center.x).to_degrees()
}

/// Round an angle to the nearest multiple of 45°. Halves round toward +∞.
#[must_use]
pub fn snap_to_45(angle_deg: f64) -> f64 {
    (angle_deg / SNAP_ANGLE_DEG + 0.5).floor() * SNAP_ANGLE_DEG
}

/// Normalize an angle into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(angle_deg: f64) -> f64 {
    let r = angle_deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0.
    if r >= 360.0 { 0.0 } else { r }
}

/// Rotate `point` about `center` by `angle_deg` (clockwise on screen).
#[must_use]
pub fn rotate_about(point: Point, center: Point, angle_deg: f64) -> Point {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Point { x: center.x + dx * cos - dy * sin, y: center.y + dx * sin + dy * cos }
}
