#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::geometry::Point;

/// Placement of the canvas element inside the browser window.
///
/// Pointer events arrive in client (window) coordinates. The canvas element
/// sits at `(origin_x, origin_y)` within the window, which changes whenever
/// the page scrolls or the window is resized. `width` / `height` are the
/// element's CSS size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub origin_x: f64,
    pub origin_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { origin_x: 0.0, origin_y: 0.0, width: 0.0, height: 0.0 }
    }
}

impl Viewport {
    /// Convert a client-space point to canvas coordinates.
    #[must_use]
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point { x: screen.x - self.origin_x, y: screen.y - self.origin_y }
    }

    /// Convert a canvas-space point to client coordinates.
    #[must_use]
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point { x: canvas.x + self.origin_x, y: canvas.y + self.origin_y }
    }
}
