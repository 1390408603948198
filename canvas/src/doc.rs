//! Document model: placed images, sparse updates, and the in-memory store.
//!
//! This module defines what is on the album canvas (`PlacedImage`), a
//! sparse-update type for incremental edits (`PartialPlacedImage`), and the
//! store that owns every placed image (`DocStore`).
//!
//! The store is the single writer. Placement creates images through
//! [`DocStore::create`], gestures submit [`PartialPlacedImage`]s through
//! [`DocStore::apply_partial`], and the layer controls go through the four
//! reorder primitives. The renderer reads [`DocStore::sorted_images`] to
//! determine paint order.
//!
//! ## Stacking order
//!
//! Paint order is ascending `z_index`, ties broken by insertion order. Every
//! reorder primitive finishes with a renumbering pass, so afterwards the
//! z-indices are exactly `0..N-1` in paint order.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{BASE_IMAGE_SIZE, MAX_SCALE, MIN_SCALE};
use crate::geometry::{Point, normalize_degrees};

/// Unique identifier for a placed image.
pub type ImageId = Uuid;

/// An image instance positioned on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedImage {
    /// Unique identifier, assigned at creation and never reused.
    pub id: ImageId,
    /// Opaque reference (URL or path) to the underlying asset.
    pub src: String,
    /// Left edge of the unrotated footprint in canvas coordinates.
    pub x: f64,
    /// Top edge of the unrotated footprint in canvas coordinates.
    pub y: f64,
    /// Multiplier applied to the 300×300 base footprint.
    pub scale: f64,
    /// Clockwise rotation in degrees around the footprint center, in `[0, 360)`.
    pub rotation: f64,
    /// Stacking order; lower values are painted beneath higher values.
    pub z_index: i64,
}

impl PlacedImage {
    /// Top-left corner of the unrotated footprint.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Side length of the (square) footprint at the current scale.
    #[must_use]
    pub fn size(&self) -> f64 {
        BASE_IMAGE_SIZE * self.scale
    }

    /// Center of the footprint; the rotation pivot.
    #[must_use]
    pub fn center(&self) -> Point {
        let half = self.size() / 2.0;
        Point::new(self.x + half, self.y + half)
    }

    /// Copy with the scale multiplied by `factor`, clamped to the allowed range.
    #[must_use]
    pub fn scaled_by(&self, factor: f64) -> Self {
        Self { scale: clamp_scale(self.scale * factor), ..self.clone() }
    }

    /// Copy rotated by `angle_deg`, normalized into `[0, 360)`.
    #[must_use]
    pub fn rotated_by(&self, angle_deg: f64) -> Self {
        Self { rotation: normalize_degrees(self.rotation + angle_deg), ..self.clone() }
    }

    /// Copy translated by `(dx, dy)`.
    #[must_use]
    pub fn moved_by(&self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy, ..self.clone() }
    }
}

/// Clamp a scale value to `[MIN_SCALE, MAX_SCALE]`. NaN maps to the minimum.
#[must_use]
pub fn clamp_scale(scale: f64) -> f64 {
    if scale.is_nan() {
        return MIN_SCALE;
    }
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

/// Sparse update for a placed image. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialPlacedImage {
    /// New x position, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// New y position, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// New scale, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// New rotation in degrees, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// New z-index, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
}

impl PartialPlacedImage {
    /// Partial carrying every geometric field of `image` (not its z-index).
    #[must_use]
    pub fn geometry_of(image: &PlacedImage) -> Self {
        Self {
            x: Some(image.x),
            y: Some(image.y),
            scale: Some(image.scale),
            rotation: Some(image.rotation),
            z_index: None,
        }
    }
}

/// A layer-control command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reorder {
    /// Move above every other image.
    BringToFront,
    /// Move beneath every other image.
    SendToBack,
    /// Swap with the image immediately above.
    BringForward,
    /// Swap with the image immediately below.
    SendBackward,
}

impl Reorder {
    /// Parse the snake_case command name used by hosts (`"bring_to_front"`, ...).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bring_to_front" => Some(Self::BringToFront),
            "send_to_back" => Some(Self::SendToBack),
            "bring_forward" => Some(Self::BringForward),
            "send_backward" => Some(Self::SendBackward),
            _ => None,
        }
    }
}

/// In-memory store of placed images, kept in insertion order.
pub struct DocStore {
    images: Vec<PlacedImage>,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { images: Vec::new() }
    }

    /// Place a new image at `at` on top of the stack with identity transform.
    pub fn create(&mut self, src: impl Into<String>, at: Point) -> PlacedImage {
        let image = PlacedImage {
            id: Uuid::new_v4(),
            src: src.into(),
            x: at.x,
            y: at.y,
            scale: 1.0,
            rotation: 0.0,
            z_index: i64::try_from(self.images.len()).unwrap_or(i64::MAX),
        };
        self.images.push(image.clone());
        image
    }

    /// Return a reference to an image by id.
    #[must_use]
    pub fn get(&self, id: &ImageId) -> Option<&PlacedImage> {
        self.images.iter().find(|img| img.id == *id)
    }

    /// Apply a partial update to an existing image. Returns false if the image
    /// doesn't exist. Values are stored as given; callers clamp scale and
    /// normalize rotation.
    pub fn apply_partial(&mut self, id: &ImageId, partial: &PartialPlacedImage) -> bool {
        let Some(img) = self.images.iter_mut().find(|img| img.id == *id) else {
            return false;
        };
        if let Some(x) = partial.x {
            img.x = x;
        }
        if let Some(y) = partial.y {
            img.y = y;
        }
        if let Some(s) = partial.scale {
            img.scale = s;
        }
        if let Some(r) = partial.rotation {
            img.rotation = r;
        }
        if let Some(z) = partial.z_index {
            img.z_index = z;
        }
        true
    }

    /// Images in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PlacedImage> {
        self.images.iter()
    }

    /// Return all images in paint order: ascending `z_index`, ties by insertion.
    #[must_use]
    pub fn sorted_images(&self) -> Vec<&PlacedImage> {
        let mut imgs: Vec<&PlacedImage> = self.images.iter().collect();
        // `sort_by_key` is stable, which gives the insertion-order tie-break.
        imgs.sort_by_key(|img| img.z_index);
        imgs
    }

    /// Current `(id, z_index)` pairs in insertion order.
    #[must_use]
    pub fn z_indices(&self) -> Vec<(ImageId, i64)> {
        self.images.iter().map(|img| (img.id, img.z_index)).collect()
    }

    /// Apply a layer-control command. Returns false if the image doesn't exist.
    ///
    /// Forward/backward at the top/bottom of the stack leave the order alone
    /// but still renumber.
    pub fn reorder(&mut self, id: &ImageId, op: Reorder) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        match op {
            Reorder::BringToFront => {
                let top = self.images.iter().map(|img| img.z_index).max().unwrap_or(0);
                self.set_z(id, top.saturating_add(1));
                self.renumber();
            }
            Reorder::SendToBack => {
                let bottom = self.images.iter().map(|img| img.z_index).min().unwrap_or(0);
                self.set_z(id, bottom.saturating_sub(1));
                self.renumber();
            }
            Reorder::BringForward => self.swap_with_neighbor(id, 1),
            Reorder::SendBackward => self.swap_with_neighbor(id, -1),
        }
        true
    }

    /// Move `id` above every other image.
    pub fn bring_to_front(&mut self, id: &ImageId) -> bool {
        self.reorder(id, Reorder::BringToFront)
    }

    /// Move `id` beneath every other image.
    pub fn send_to_back(&mut self, id: &ImageId) -> bool {
        self.reorder(id, Reorder::SendToBack)
    }

    /// Swap `id` with the image immediately above it.
    pub fn bring_forward(&mut self, id: &ImageId) -> bool {
        self.reorder(id, Reorder::BringForward)
    }

    /// Swap `id` with the image immediately below it.
    pub fn send_backward(&mut self, id: &ImageId) -> bool {
        self.reorder(id, Reorder::SendBackward)
    }

    /// Number of images currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Returns `true` if the store contains no images.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    fn set_z(&mut self, id: &ImageId, z: i64) {
        if let Some(img) = self.images.iter_mut().find(|img| img.id == *id) {
            img.z_index = z;
        }
    }

    /// Paint order as insertion indices.
    fn paint_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.images.len()).collect();
        order.sort_by_key(|&i| self.images[i].z_index);
        order
    }

    /// Reassign z-indices `0..N-1` following `order`.
    fn assign_order(&mut self, order: &[usize]) {
        for (z, &i) in (0_i64..).zip(order) {
            self.images[i].z_index = z;
        }
    }

    fn renumber(&mut self) {
        let order = self.paint_order();
        self.assign_order(&order);
    }

    /// Swap positions with the paint-order neighbor in `direction` (+1 above,
    /// -1 below), then renumber. Works on positions rather than raw z values
    /// so transient ties cannot turn the swap into a no-op.
    fn swap_with_neighbor(&mut self, id: &ImageId, direction: isize) {
        let mut order = self.paint_order();
        if let Some(pos) = order.iter().position(|&i| self.images[i].id == *id) {
            if let Some(other) = pos.checked_add_signed(direction).filter(|&o| o < order.len()) {
                order.swap(pos, other);
            }
        }
        self.assign_order(&order);
    }
}

impl Default for DocStore {
    fn default() -> Self {
        Self::new()
    }
}
