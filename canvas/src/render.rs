//! Rendering: draws the album canvas to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives read-only views of the document and UI state and produces
//! pixels; it does not mutate application state beyond its image cache.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::collections::HashMap;
use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::consts::{HANDLE_SIZE_PX, ROTATE_HANDLE_SIZE_PX};
use crate::doc::{DocStore, PlacedImage};
use crate::hit;
use crate::input::UiState;

/// Selection ring and handle accent.
const SELECTION_COLOR: &str = "#3B82F6";
/// Selection ring width in canvas pixels.
const SELECTION_LINE_PX: f64 = 2.0;
/// Placeholder fill while an image is still decoding.
const PLACEHOLDER_COLOR: &str = "#E5E7EB";

/// Decoded `<img>` elements keyed by source, shared by every placement of the
/// same asset.
#[derive(Default)]
pub struct ImageCache {
    elements: HashMap<String, HtmlImageElement>,
}

impl ImageCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start loading every source in `doc` that is not cached yet.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the browser refuses to create an image element.
    pub fn sync(&mut self, doc: &DocStore) -> Result<(), JsValue> {
        for image in doc.iter() {
            if self.elements.contains_key(&image.src) {
                continue;
            }
            let element = HtmlImageElement::new()?;
            element.set_src(&image.src);
            self.elements.insert(image.src.clone(), element);
        }
        Ok(())
    }

    /// The element for `src` once it has finished decoding.
    #[must_use]
    pub fn ready(&self, src: &str) -> Option<&HtmlImageElement> {
        self.elements.get(src).filter(|el| el.complete() && el.natural_width() > 0)
    }
}

/// Largest centered square inside a `width` x `height` bitmap, as
/// `(sx, sy, side)`. Mirrors CSS `object-fit: cover` onto a square frame.
#[must_use]
pub fn cover_crop(width: f64, height: f64) -> Option<(f64, f64, f64)> {
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    let side = width.min(height);
    Some(((width - side) / 2.0, (height - side) / 2.0, side))
}

/// Draw the full scene: images in paint order, then the selection chrome.
///
/// `viewport_w` and `viewport_h` are in CSS pixels. `dpr` is the device pixel ratio.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    doc: &DocStore,
    ui: &UiState,
    images: &ImageCache,
    viewport_w: f64,
    viewport_h: f64,
    dpr: f64,
) -> Result<(), JsValue> {
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, viewport_w, viewport_h);

    for image in doc.sorted_images() {
        draw_image(ctx, image, images)?;
    }

    if let Some(selected) = ui.selected_id.and_then(|id| doc.get(&id)) {
        draw_selection(ctx, selected, ui.snap_held)?;
    }

    Ok(())
}

fn draw_image(ctx: &CanvasRenderingContext2d, image: &PlacedImage, images: &ImageCache) -> Result<(), JsValue> {
    let size = image.size();
    let half = size / 2.0;

    ctx.save();
    translate_and_rotate(ctx, image)?;

    let crop = images
        .ready(&image.src)
        .and_then(|el| cover_crop(f64::from(el.natural_width()), f64::from(el.natural_height())).map(|c| (el, c)));
    match crop {
        Some((el, (sx, sy, side))) => {
            ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                el, sx, sy, side, side, -half, -half, size, size,
            )?;
        }
        None => {
            ctx.set_fill_style_str(PLACEHOLDER_COLOR);
            ctx.fill_rect(-half, -half, size, size);
        }
    }

    ctx.restore();
    Ok(())
}

fn draw_selection(ctx: &CanvasRenderingContext2d, image: &PlacedImage, snap_held: bool) -> Result<(), JsValue> {
    let size = image.size();
    let half = size / 2.0;

    // Ring, rotated with the image.
    ctx.save();
    translate_and_rotate(ctx, image)?;
    ctx.set_stroke_style_str(SELECTION_COLOR);
    ctx.set_line_width(SELECTION_LINE_PX);
    ctx.stroke_rect(-half, -half, size, size);
    ctx.restore();

    // Scale handles: squares sharing the image's rotation.
    let hs = HANDLE_SIZE_PX / 2.0;
    for (_, pos) in hit::scale_handle_positions(image) {
        ctx.save();
        ctx.translate(pos.x, pos.y)?;
        ctx.rotate(image.rotation.to_radians())?;
        ctx.set_fill_style_str("#fff");
        ctx.set_stroke_style_str(SELECTION_COLOR);
        ctx.set_line_width(SELECTION_LINE_PX);
        ctx.fill_rect(-hs, -hs, HANDLE_SIZE_PX, HANDLE_SIZE_PX);
        ctx.stroke_rect(-hs, -hs, HANDLE_SIZE_PX, HANDLE_SIZE_PX);
        ctx.restore();
    }

    // Rotate handle. Filled while the snap modifier is held.
    let rh = hit::rotate_handle_position(image);
    let (fill, stroke) = if snap_held { (SELECTION_COLOR, "#fff") } else { ("#fff", SELECTION_COLOR) };
    ctx.save();
    ctx.begin_path();
    ctx.arc(rh.x, rh.y, ROTATE_HANDLE_SIZE_PX / 2.0, 0.0, 2.0 * PI)?;
    ctx.set_fill_style_str(fill);
    ctx.set_stroke_style_str(stroke);
    ctx.set_line_width(SELECTION_LINE_PX);
    ctx.fill();
    ctx.stroke();
    ctx.restore();

    Ok(())
}

/// Translate to the image's center and rotate by its rotation angle.
fn translate_and_rotate(ctx: &CanvasRenderingContext2d, image: &PlacedImage) -> Result<(), JsValue> {
    let c = image.center();
    ctx.translate(c.x, c.y)?;
    ctx.rotate(image.rotation.to_radians())?;
    Ok(())
}
