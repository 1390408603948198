//! Shared numeric constants for the canvas crate.

// ── Footprint ───────────────────────────────────────────────────

/// Side length of a placed image at scale 1.0, in canvas pixels.
pub const BASE_IMAGE_SIZE: f64 = 300.0;

// ── Scale ───────────────────────────────────────────────────────

/// Smallest scale a placed image may reach.
pub const MIN_SCALE: f64 = 0.1;

/// Largest scale a placed image may reach.
pub const MAX_SCALE: f64 = 3.0;

// ── Rotation ────────────────────────────────────────────────────

/// Angular step used while the snap modifier is held, in degrees.
pub const SNAP_ANGLE_DEG: f64 = 45.0;

// ── Handles ─────────────────────────────────────────────────────

/// Side length of a square scale handle, in screen pixels.
pub const HANDLE_SIZE_PX: f64 = 20.0;

/// Diameter of the circular rotation handle, in screen pixels.
pub const ROTATE_HANDLE_SIZE_PX: f64 = 24.0;

/// Distance from the top edge to the rotate handle center, measured along the
/// image's own rotated frame.
pub const ROTATE_HANDLE_OFFSET_PX: f64 = 56.0;

/// Extra hit slop around handles, in screen pixels.
pub const HANDLE_SLOP_PX: f64 = 2.0;

// ── Keyboard ────────────────────────────────────────────────────

/// Nudge distance for arrow keys, in canvas pixels.
pub const NUDGE_PX: f64 = 1.0;

/// Nudge distance for arrow keys with Shift held.
pub const NUDGE_LARGE_PX: f64 = 10.0;
