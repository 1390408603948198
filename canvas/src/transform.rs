//! Scale and rotation gestures.
//!
//! Both gestures are two-phase: a *start* captures a [`GestureSnapshot`]
//! (the pre-gesture value, the pointer-down position, and the pivot), and
//! every subsequent *update* derives the new value from that snapshot and the
//! current pointer. Updates never build on the previous update, so a long
//! stream of small pointer moves cannot accumulate drift.
//!
//! Nothing here listens to pointer events. [`crate::engine::EngineCore`]
//! keeps the snapshot inside its gesture state; [`TransformEngine`] offers the
//! same math behind a one-slot baseline cache for hosts that drive gestures
//! themselves.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use serde::{Deserialize, Serialize};

use crate::doc::clamp_scale;
use crate::geometry::{Point, angle, distance, normalize_degrees, snap_to_45};

/// Which axis a scale handle measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    /// Corner handle: radial distance from the center.
    Corner,
    /// Left/right edge handle: horizontal offset from the center.
    Horizontal,
    /// Top/bottom edge handle: vertical offset from the center.
    Vertical,
}

/// State captured at pointer-down for one scale or rotation gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSnapshot {
    /// Scale or rotation of the image when the gesture began.
    pub baseline: f64,
    /// Pointer position at pointer-down.
    pub start: Point,
    /// Pivot of the gesture (the image's bounding-box center).
    pub center: Point,
}

impl GestureSnapshot {
    #[must_use]
    pub fn new(baseline: f64, start: Point, center: Point) -> Self {
        Self { baseline, start, center }
    }

    /// Scale for the pointer at `current`, clamped to the allowed range.
    #[must_use]
    pub fn scale_to(&self, current: Point, mode: ScaleMode) -> f64 {
        clamp_scale(self.baseline * scale_ratio(self.start, current, self.center, mode))
    }

    /// Rotation for the pointer at `current`, in `[0, 360)`.
    #[must_use]
    pub fn rotate_to(&self, current: Point, snap: bool) -> f64 {
        normalize_degrees(self.baseline + rotation_delta(self.start, current, self.center, snap) + 360.0)
    }
}

/// Ratio between the current and starting pointer extents for `mode`.
///
/// A zero starting extent has no meaningful ratio and yields `1.0`.
#[must_use]
pub fn scale_ratio(start: Point, current: Point, center: Point, mode: ScaleMode) -> f64 {
    let (from, to) = match mode {
        ScaleMode::Corner => (distance(start, center), distance(current, center)),
        ScaleMode::Horizontal => ((start.x - center.x).abs(), (current.x - center.x).abs()),
        ScaleMode::Vertical => ((start.y - center.y).abs(), (current.y - center.y).abs()),
    };
    if from <= f64::EPSILON {
        return 1.0;
    }
    to / from
}

/// Angle swept around `center` from `start` to `current`, optionally snapped
/// to 45° steps.
#[must_use]
pub fn rotation_delta(start: Point, current: Point, center: Point, snap: bool) -> f64 {
    let delta = angle(center, current) - angle(center, start);
    if snap { snap_to_45(delta) } else { delta }
}

/// One-slot baseline cache around the gesture math.
///
/// `scale_start` / `rotation_start` record the baseline; every `*_update`
/// call computes from that baseline until the next start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformEngine {
    scale_baseline: f64,
    rotation_baseline: f64,
}

impl Default for TransformEngine {
    fn default() -> Self {
        Self { scale_baseline: 1.0, rotation_baseline: 0.0 }
    }
}

impl TransformEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the scale at the start of a scale gesture.
    pub fn scale_start(&mut self, current_scale: f64) {
        self.scale_baseline = current_scale;
    }

    /// New scale for a pointer that moved from `start` to `current`.
    #[must_use]
    pub fn scale_update(&self, start: Point, current: Point, center: Point, mode: ScaleMode) -> f64 {
        GestureSnapshot::new(self.scale_baseline, start, center).scale_to(current, mode)
    }

    /// Record the rotation at the start of a rotation gesture.
    pub fn rotation_start(&mut self, current_rotation: f64) {
        self.rotation_baseline = current_rotation;
    }

    /// New rotation for a pointer that moved from `start` to `current`.
    #[must_use]
    pub fn rotation_update(&self, start: Point, current: Point, center: Point, snap: bool) -> f64 {
        GestureSnapshot::new(self.rotation_baseline, start, center).rotate_to(current, snap)
    }
}
