use std::collections::HashMap;

use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::{NUDGE_LARGE_PX, NUDGE_PX};
use crate::doc::{DocStore, ImageId, PartialPlacedImage, PlacedImage, Reorder};
use crate::geometry::Point;
use crate::hit::{self, HitPart};
use crate::input::{Button, InputState, Key, Modifiers, SurfaceState, UiState};
use crate::placement::DragDrop;
use crate::render::{self, ImageCache};
use crate::transform::GestureSnapshot;
use crate::viewport::Viewport;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    ImageCreated(PlacedImage),
    ImageUpdated { id: ImageId, fields: PartialPlacedImage },
    SelectionChanged { id: Option<ImageId> },
    /// The selection overlay moved, changed, or (with `None`) disappeared.
    OverlayChanged { overlay: Option<SelectionOverlay> },
    SetCursor { cursor: String },
    RenderNeeded,
}

/// Screen-space geometry of the selection chrome, in client coordinates.
///
/// The overlay is positioned independently of the image it decorates, so
/// hosts that draw it as a separate layer re-read it whenever the viewport
/// scrolls or resizes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionOverlay {
    pub image_id: ImageId,
    /// Rotated footprint corners, clockwise from top-left.
    pub outline: [Point; 4],
    /// Center of each scale handle.
    pub handles: Vec<(String, Point)>,
    /// Center of the rotate handle.
    pub rotate_handle: Point,
    /// Rotation of the image (and the handle frame) in degrees.
    pub rotation: f64,
    /// The snap modifier is held; hosts highlight the rotate handle.
    pub snap_active: bool,
}

/// Engine state and logic that does not touch the canvas element.
///
/// Tested natively; [`Engine`] adds the browser canvas on top.
pub struct EngineCore {
    pub doc: DocStore,
    pub viewport: Viewport,
    pub ui: UiState,
    pub input: InputState,
    pub drag: DragDrop,
    pub dpr: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            doc: DocStore::new(),
            viewport: Viewport::default(),
            ui: UiState::default(),
            input: InputState::default(),
            drag: DragDrop::new(),
            dpr: 1.0,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Gallery drag-and-drop ---

    /// The gallery started dragging `src`.
    pub fn on_drag_start(&mut self, src: impl Into<String>) {
        self.drag.drag_start(src);
    }

    /// The gallery drag finished or was cancelled.
    pub fn on_drag_end(&mut self) {
        self.drag.drag_end();
    }

    /// Something was dropped on the canvas at `screen_pt`.
    pub fn on_drop(&mut self, screen_pt: Point) -> Vec<Action> {
        let at = self.viewport.screen_to_canvas(screen_pt);
        let created = self.drag.drop_at(&mut self.doc, at);
        self.drag.drag_end();
        match created {
            Some(image) => {
                log::debug!("placed {} at ({}, {}) z={}", image.id, at.x, at.y, image.z_index);
                vec![Action::ImageCreated(image), Action::RenderNeeded]
            }
            None => Vec::new(),
        }
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary || !self.input.is_idle() {
            return Vec::new();
        }
        let pt = self.viewport.screen_to_canvas(screen_pt);

        let Some(hit) = hit::hit_test(pt, &self.doc, self.ui.selected_id) else {
            return self.deselect();
        };
        let Some(image) = self.doc.get(&hit.image_id).cloned() else {
            return Vec::new();
        };

        match hit.part {
            HitPart::Body => {
                let mut actions = self.select(image.id);
                self.input = InputState::DraggingImage { id: image.id, start: pt, orig: image.position() };
                log::debug!("move gesture started on {}", image.id);
                if actions.is_empty() {
                    actions.push(Action::RenderNeeded);
                }
                actions
            }
            HitPart::ScaleHandle(anchor) => {
                let snapshot = GestureSnapshot::new(image.scale, pt, image.center());
                self.input = InputState::ScalingImage { id: image.id, mode: anchor.mode(), snapshot };
                log::debug!("scale gesture started on {} ({anchor:?})", image.id);
                vec![Action::SetCursor { cursor: anchor.cursor().to_owned() }]
            }
            HitPart::RotateHandle => {
                let snapshot = GestureSnapshot::new(image.rotation, pt, image.center());
                self.input = InputState::RotatingImage { id: image.id, snapshot };
                log::debug!("rotate gesture started on {}", image.id);
                vec![Action::SetCursor { cursor: HitPart::RotateHandle.cursor().to_owned() }]
            }
        }
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        let pt = self.viewport.screen_to_canvas(screen_pt);

        let (id, fields) = match self.input {
            InputState::Idle => return self.hover(pt),
            InputState::DraggingImage { id, start, orig } => {
                let moved = orig.offset(pt.x - start.x, pt.y - start.y);
                (id, PartialPlacedImage { x: Some(moved.x), y: Some(moved.y), ..Default::default() })
            }
            InputState::ScalingImage { id, mode, snapshot } => {
                (id, PartialPlacedImage { scale: Some(snapshot.scale_to(pt, mode)), ..Default::default() })
            }
            InputState::RotatingImage { id, snapshot } => {
                // Polled on every move so pressing or releasing Shift mid-gesture takes effect immediately.
                self.ui.snap_held = modifiers.shift;
                let rotation = snapshot.rotate_to(pt, modifiers.shift);
                (id, PartialPlacedImage { rotation: Some(rotation), ..Default::default() })
            }
        };

        if !self.doc.apply_partial(&id, &fields) {
            self.input = InputState::Idle;
            return Vec::new();
        }
        vec![Action::ImageUpdated { id, fields }, self.overlay_action(), Action::RenderNeeded]
    }

    pub fn on_pointer_up(&mut self, _screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let Some(id) = self.input.target() else {
            return Vec::new();
        };
        self.input = InputState::Idle;
        log::debug!("gesture ended on {id}");
        vec![Action::RenderNeeded]
    }

    // --- Keyboard ---

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if key.is_snap_modifier() {
            return self.set_snap_held(true);
        }
        let step = if modifiers.shift { NUDGE_LARGE_PX } else { NUDGE_PX };
        match key.0.as_str() {
            "Escape" if self.input.is_idle() => self.deselect(),
            "ArrowLeft" => self.nudge_selected(-step, 0.0),
            "ArrowRight" => self.nudge_selected(step, 0.0),
            "ArrowUp" => self.nudge_selected(0.0, -step),
            "ArrowDown" => self.nudge_selected(0.0, step),
            _ => Vec::new(),
        }
    }

    pub fn on_key_up(&mut self, key: &Key, _modifiers: Modifiers) -> Vec<Action> {
        if key.is_snap_modifier() {
            return self.set_snap_held(false);
        }
        Vec::new()
    }

    // --- Viewport ---

    /// The canvas element moved or resized within the window (scroll or
    /// resize). Returns a fresh overlay when something is selected.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Vec<Action> {
        if self.viewport == viewport {
            return Vec::new();
        }
        self.viewport = viewport;
        if self.ui.selected_id.is_some() {
            vec![self.overlay_action()]
        } else {
            Vec::new()
        }
    }

    // --- Selection ---

    /// Select `id`, deselecting anything else. Unknown ids are ignored, and
    /// the selection is frozen while a gesture is active.
    pub fn select(&mut self, id: ImageId) -> Vec<Action> {
        if !self.input.is_idle() || self.doc.get(&id).is_none() || self.ui.selected_id == Some(id) {
            return Vec::new();
        }
        self.ui.selected_id = Some(id);
        vec![Action::SelectionChanged { id: Some(id) }, self.overlay_action(), Action::RenderNeeded]
    }

    /// Clear the selection.
    pub fn deselect(&mut self) -> Vec<Action> {
        if self.ui.selected_id.take().is_none() {
            return Vec::new();
        }
        vec![
            Action::SelectionChanged { id: None },
            Action::OverlayChanged { overlay: None },
            Action::RenderNeeded,
        ]
    }

    // --- Layer controls ---

    /// Apply a layer command to `id`, reporting every image whose z changed.
    pub fn reorder(&mut self, id: &ImageId, op: Reorder) -> Vec<Action> {
        let before: HashMap<ImageId, i64> = self.doc.z_indices().into_iter().collect();
        if !self.doc.reorder(id, op) {
            return Vec::new();
        }
        log::debug!("{op:?} applied to {id}");

        let mut actions: Vec<Action> = self
            .doc
            .sorted_images()
            .into_iter()
            .filter(|img| before.get(&img.id) != Some(&img.z_index))
            .map(|img| Action::ImageUpdated {
                id: img.id,
                fields: PartialPlacedImage { z_index: Some(img.z_index), ..Default::default() },
            })
            .collect();
        if !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Apply a layer command to the selected image.
    pub fn reorder_selected(&mut self, op: Reorder) -> Vec<Action> {
        match self.ui.selected_id {
            Some(id) => self.reorder(&id, op),
            None => Vec::new(),
        }
    }

    pub fn bring_to_front(&mut self, id: &ImageId) -> Vec<Action> {
        self.reorder(id, Reorder::BringToFront)
    }

    pub fn send_to_back(&mut self, id: &ImageId) -> Vec<Action> {
        self.reorder(id, Reorder::SendToBack)
    }

    pub fn bring_forward(&mut self, id: &ImageId) -> Vec<Action> {
        self.reorder(id, Reorder::BringForward)
    }

    pub fn send_backward(&mut self, id: &ImageId) -> Vec<Action> {
        self.reorder(id, Reorder::SendBackward)
    }

    // --- Direct transforms ---

    /// Multiply the selected image's scale by `factor`, clamped.
    pub fn scale_selected(&mut self, factor: f64) -> Vec<Action> {
        self.transform_selected(|img| img.scaled_by(factor))
    }

    /// Rotate the selected image by `angle_deg`.
    pub fn rotate_selected(&mut self, angle_deg: f64) -> Vec<Action> {
        self.transform_selected(|img| img.rotated_by(angle_deg))
    }

    /// Move the selected image by `(dx, dy)` canvas pixels.
    pub fn nudge_selected(&mut self, dx: f64, dy: f64) -> Vec<Action> {
        self.transform_selected(|img| img.moved_by(dx, dy))
    }

    /// Submit a partial update for `id`. Returns false for unknown ids.
    pub fn apply_update(&mut self, id: &ImageId, fields: &PartialPlacedImage) -> bool {
        self.doc.apply_partial(id, fields)
    }

    // --- Queries ---

    /// The currently selected image, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ImageId> {
        self.ui.selected_id
    }

    /// Look up an image by ID.
    #[must_use]
    pub fn image(&self, id: &ImageId) -> Option<&PlacedImage> {
        self.doc.get(id)
    }

    /// Interaction state of image `id`.
    #[must_use]
    pub fn surface_state(&self, id: &ImageId) -> SurfaceState {
        SurfaceState::of(*id, &self.ui, &self.input)
    }

    /// Overlay geometry for the current selection, in client coordinates.
    #[must_use]
    pub fn selection_overlay(&self) -> Option<SelectionOverlay> {
        let image = self.ui.selected_id.and_then(|id| self.doc.get(&id))?;
        let vp = &self.viewport;
        Some(SelectionOverlay {
            image_id: image.id,
            outline: hit::corners(image).map(|p| vp.canvas_to_screen(p)),
            handles: hit::scale_handle_positions(image)
                .into_iter()
                .map(|(anchor, p)| (anchor.cursor().to_owned(), vp.canvas_to_screen(p)))
                .collect(),
            rotate_handle: vp.canvas_to_screen(hit::rotate_handle_position(image)),
            rotation: image.rotation,
            snap_active: self.ui.snap_held,
        })
    }

    // --- Internals ---

    fn overlay_action(&self) -> Action {
        Action::OverlayChanged { overlay: self.selection_overlay() }
    }

    fn hover(&self, pt: Point) -> Vec<Action> {
        let cursor = hit::hit_test(pt, &self.doc, self.ui.selected_id).map_or("default", |h| h.part.cursor());
        vec![Action::SetCursor { cursor: cursor.to_owned() }]
    }

    fn set_snap_held(&mut self, held: bool) -> Vec<Action> {
        if self.ui.snap_held == held {
            return Vec::new();
        }
        self.ui.snap_held = held;
        if self.ui.selected_id.is_some() {
            vec![self.overlay_action(), Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    /// Direct edits yield to an active gesture, which owns the image until pointer-up.
    fn transform_selected(&mut self, f: impl FnOnce(&PlacedImage) -> PlacedImage) -> Vec<Action> {
        if !self.input.is_idle() {
            return Vec::new();
        }
        let Some(image) = self.ui.selected_id.and_then(|id| self.doc.get(&id)) else {
            return Vec::new();
        };
        let id = image.id;
        let fields = PartialPlacedImage::geometry_of(&f(image));
        if !self.doc.apply_partial(&id, &fields) {
            return Vec::new();
        }
        vec![Action::ImageUpdated { id, fields }, self.overlay_action(), Action::RenderNeeded]
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    images: ImageCache,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, images: ImageCache::new(), core: EngineCore::new() }
    }

    // --- Delegated gallery drag-and-drop ---

    pub fn on_drag_start(&mut self, src: impl Into<String>) {
        self.core.on_drag_start(src);
    }

    pub fn on_drag_end(&mut self) {
        self.core.on_drag_end();
    }

    pub fn on_drop(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_drop(screen_pt)
    }

    // --- Viewport ---

    /// Update the canvas element's client-space origin, CSS size, and device
    /// pixel ratio. Call on mount, window resize, and scroll.
    pub fn set_viewport(&mut self, viewport: Viewport, dpr: f64) -> Vec<Action> {
        self.core.dpr = dpr;
        self.canvas.set_width(device_pixels(viewport.width, dpr));
        self.canvas.set_height(device_pixels(viewport.height, dpr));
        let mut actions = self.core.set_viewport(viewport);
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Delegated input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    pub fn on_key_up(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_up(key, modifiers)
    }

    // --- Delegated layer controls ---

    pub fn reorder_selected(&mut self, op: Reorder) -> Vec<Action> {
        self.core.reorder_selected(op)
    }

    pub fn scale_selected(&mut self, factor: f64) -> Vec<Action> {
        self.core.scale_selected(factor)
    }

    pub fn rotate_selected(&mut self, angle_deg: f64) -> Vec<Action> {
        self.core.rotate_selected(angle_deg)
    }

    // --- Render ---

    /// Draw the current state to the canvas. Failures are logged, not raised,
    /// so a bad frame never blocks input handling.
    pub fn render(&mut self) {
        if let Err(err) = self.try_render() {
            log::warn!("render failed: {err:?}");
        }
    }

    fn try_render(&mut self) -> Result<(), JsValue> {
        let Some(ctx) = self.canvas.get_context("2d")? else {
            return Err(JsValue::from_str("2d context unavailable"));
        };
        let ctx: CanvasRenderingContext2d = ctx.dyn_into()?;
        self.images.sync(&self.core.doc)?;
        let vp = self.core.viewport;
        render::draw(&ctx, &self.core.doc, &self.core.ui, &self.images, vp.width, vp.height, self.core.dpr)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<ImageId> {
        self.core.selection()
    }

    #[must_use]
    pub fn selection_overlay(&self) -> Option<SelectionOverlay> {
        self.core.selection_overlay()
    }

    #[must_use]
    pub fn image(&self, id: &ImageId) -> Option<&PlacedImage> {
        self.core.image(id)
    }
}

/// Backing-store size for a CSS length at the given device pixel ratio.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn device_pixels(css: f64, dpr: f64) -> u32 {
    (css * dpr).round().clamp(0.0, f64::from(u32::MAX)) as u32
}
