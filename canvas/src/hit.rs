//! Hit-testing: which image, and which part of it, lies under a point.
//!
//! Handles belong to the selection overlay, which is drawn in the image's own
//! rotated frame: eight square scale handles on the corners and edge
//! midpoints, plus a circular rotate handle above the top edge. All positions
//! returned here are in canvas coordinates.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{HANDLE_SIZE_PX, HANDLE_SLOP_PX, ROTATE_HANDLE_OFFSET_PX, ROTATE_HANDLE_SIZE_PX};
use crate::doc::{DocStore, ImageId, PlacedImage};
use crate::geometry::{Point, distance, rotate_about};
use crate::transform::ScaleMode;

/// Which part of an image was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ScaleHandle(ScaleAnchor),
    RotateHandle,
}

/// Anchor position for scale handles, named by compass direction in the
/// image's unrotated frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleAnchor {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ScaleAnchor {
    /// Every anchor, clockwise from north.
    pub const ALL: [Self; 8] = [Self::N, Self::Ne, Self::E, Self::Se, Self::S, Self::Sw, Self::W, Self::Nw];

    /// Scale mode driven by this handle.
    #[must_use]
    pub fn mode(self) -> ScaleMode {
        match self {
            Self::Ne | Self::Se | Self::Sw | Self::Nw => ScaleMode::Corner,
            Self::E | Self::W => ScaleMode::Horizontal,
            Self::N | Self::S => ScaleMode::Vertical,
        }
    }

    /// CSS cursor shown while hovering this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N => "n-resize",
            Self::Ne => "ne-resize",
            Self::E => "e-resize",
            Self::Se => "se-resize",
            Self::S => "s-resize",
            Self::Sw => "sw-resize",
            Self::W => "w-resize",
            Self::Nw => "nw-resize",
        }
    }

    /// Unit offset from the image center in the unrotated frame.
    fn unit_offset(self) -> (f64, f64) {
        match self {
            Self::N => (0.0, -1.0),
            Self::Ne => (1.0, -1.0),
            Self::E => (1.0, 0.0),
            Self::Se => (1.0, 1.0),
            Self::S => (0.0, 1.0),
            Self::Sw => (-1.0, 1.0),
            Self::W => (-1.0, 0.0),
            Self::Nw => (-1.0, -1.0),
        }
    }
}

impl HitPart {
    /// CSS cursor shown while hovering this part.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Body => "move",
            Self::ScaleHandle(anchor) => anchor.cursor(),
            Self::RotateHandle => "crosshair",
        }
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub image_id: ImageId,
    pub part: HitPart,
}

/// Canvas-space center of each scale handle, in [`ScaleAnchor::ALL`] order.
#[must_use]
pub fn scale_handle_positions(img: &PlacedImage) -> [(ScaleAnchor, Point); 8] {
    let center = img.center();
    let half = img.size() / 2.0;
    ScaleAnchor::ALL.map(|anchor| {
        let (ux, uy) = anchor.unit_offset();
        let local = center.offset(ux * half, uy * half);
        (anchor, rotate_about(local, center, img.rotation))
    })
}

/// Canvas-space center of the rotate handle: above the top edge, along the
/// image's rotated vertical axis.
#[must_use]
pub fn rotate_handle_position(img: &PlacedImage) -> Point {
    let center = img.center();
    let local = center.offset(0.0, -(img.size() / 2.0 + ROTATE_HANDLE_OFFSET_PX));
    rotate_about(local, center, img.rotation)
}

/// The four corners of the rotated footprint, clockwise from top-left.
#[must_use]
pub fn corners(img: &PlacedImage) -> [Point; 4] {
    let center = img.center();
    let half = img.size() / 2.0;
    [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)]
        .map(|(ux, uy)| rotate_about(center.offset(ux * half, uy * half), center, img.rotation))
}

/// Whether `pt` lies inside the rotated footprint of `img`.
#[must_use]
pub fn point_in_image(pt: Point, img: &PlacedImage) -> bool {
    let center = img.center();
    let local = rotate_about(pt, center, -img.rotation);
    let half = img.size() / 2.0;
    (local.x - center.x).abs() <= half && (local.y - center.y).abs() <= half
}

/// Which handle of `img` (if any) is under `pt`. The rotate handle wins
/// over scale handles where they overlap.
#[must_use]
pub fn handle_at(pt: Point, img: &PlacedImage) -> Option<HitPart> {
    let rotate_radius = ROTATE_HANDLE_SIZE_PX / 2.0 + HANDLE_SLOP_PX;
    if distance(pt, rotate_handle_position(img)) <= rotate_radius {
        return Some(HitPart::RotateHandle);
    }

    // Square handles share the image's rotation, so test in its local frame.
    let reach = HANDLE_SIZE_PX / 2.0 + HANDLE_SLOP_PX;
    scale_handle_positions(img).into_iter().find_map(|(anchor, pos)| {
        let local = rotate_about(pt, pos, -img.rotation);
        let inside = (local.x - pos.x).abs() <= reach && (local.y - pos.y).abs() <= reach;
        inside.then_some(HitPart::ScaleHandle(anchor))
    })
}

/// Test which image (if any) is under `pt`, checking the selected image's
/// handles first, then image bodies from the top of the stack down.
#[must_use]
pub fn hit_test(pt: Point, doc: &DocStore, selected_id: Option<ImageId>) -> Option<Hit> {
    if let Some(sel) = selected_id.and_then(|id| doc.get(&id)) {
        if let Some(part) = handle_at(pt, sel) {
            return Some(Hit { image_id: sel.id, part });
        }
    }

    doc.sorted_images()
        .into_iter()
        .rev()
        .find(|img| point_in_image(pt, img))
        .map(|img| Hit { image_id: img.id, part: HitPart::Body })
}
