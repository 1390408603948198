//! Drag-and-drop placement from the gallery onto the canvas.
//!
//! The gallery starts a drag with an image reference; dropping on the canvas
//! turns that reference into a new [`PlacedImage`]. Only one drag is active
//! at a time.

#[cfg(test)]
#[path = "placement_test.rs"]
mod placement_test;

use crate::doc::{DocStore, PlacedImage};
use crate::geometry::Point;

/// The gallery asset currently being dragged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraggedItem {
    pub src: String,
}

/// Single-slot holder for the in-flight gallery drag.
#[derive(Debug, Clone, Default)]
pub struct DragDrop {
    dragged: Option<DraggedItem>,
}

impl DragDrop {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin dragging `src`, replacing any previous drag.
    pub fn drag_start(&mut self, src: impl Into<String>) {
        self.dragged = Some(DraggedItem { src: src.into() });
    }

    /// Forget the current drag, whether it completed or was cancelled.
    pub fn drag_end(&mut self) {
        self.dragged = None;
    }

    /// The item being dragged, if any.
    #[must_use]
    pub fn dragged(&self) -> Option<&DraggedItem> {
        self.dragged.as_ref()
    }

    /// Place the dragged item at `at`. Dropping with no active drag does nothing.
    ///
    /// The drag stays active until [`DragDrop::drag_end`]; the browser fires
    /// `dragend` after `drop`.
    pub fn drop_at(&self, doc: &mut DocStore, at: Point) -> Option<PlacedImage> {
        let item = self.dragged.as_ref()?;
        Some(doc.create(item.src.clone(), at))
    }
}
