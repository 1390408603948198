//! Browser bindings for the album canvas.
//!
//! The JS host owns the DOM listeners: it forwards each event here and applies
//! the returned actions (cursor, overlay, redraw). Actions cross the boundary
//! as a JSON array, the same shape [`Action`] serializes to natively.

#[cfg(test)]
#[path = "wasm_test.rs"]
mod wasm_test;

use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::doc::Reorder;
use crate::engine::{Action, Engine};
use crate::geometry::Point;
use crate::input::{Button, Key, Modifiers};
use crate::viewport::Viewport;

/// Album canvas controller exported to JavaScript.
#[wasm_bindgen]
pub struct AlbumCanvas {
    engine: Engine,
}

#[wasm_bindgen]
impl AlbumCanvas {
    /// Bind a controller to `canvas`.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { engine: Engine::new(canvas) }
    }

    // =========================================================================
    // Viewport
    // =========================================================================

    /// Report the canvas element's client rect and device pixel ratio. Call on
    /// mount, resize, and scroll.
    pub fn set_viewport(&mut self, origin_x: f64, origin_y: f64, width: f64, height: f64, dpr: f64) -> String {
        let viewport = Viewport { origin_x, origin_y, width, height };
        actions_json(&self.engine.set_viewport(viewport, dpr))
    }

    // =========================================================================
    // Gallery drag-and-drop
    // =========================================================================

    pub fn drag_start(&mut self, src: &str) {
        self.engine.on_drag_start(src);
    }

    pub fn drag_end(&mut self) {
        self.engine.on_drag_end();
    }

    pub fn drop_at(&mut self, client_x: f64, client_y: f64) -> String {
        actions_json(&self.engine.on_drop(Point::new(client_x, client_y)))
    }

    // =========================================================================
    // Pointer and keyboard
    // =========================================================================

    pub fn pointer_down(&mut self, client_x: f64, client_y: f64, button: i16, shift: bool) -> String {
        let Some(button) = Button::from_dom(button) else {
            return actions_json(&[]);
        };
        actions_json(&self.engine.on_pointer_down(Point::new(client_x, client_y), button, modifiers(shift)))
    }

    pub fn pointer_move(&mut self, client_x: f64, client_y: f64, shift: bool) -> String {
        actions_json(&self.engine.on_pointer_move(Point::new(client_x, client_y), modifiers(shift)))
    }

    pub fn pointer_up(&mut self, client_x: f64, client_y: f64, button: i16, shift: bool) -> String {
        let Some(button) = Button::from_dom(button) else {
            return actions_json(&[]);
        };
        actions_json(&self.engine.on_pointer_up(Point::new(client_x, client_y), button, modifiers(shift)))
    }

    pub fn key_down(&mut self, key: &str, shift: bool) -> String {
        actions_json(&self.engine.on_key_down(&Key(key.to_owned()), modifiers(shift)))
    }

    pub fn key_up(&mut self, key: &str, shift: bool) -> String {
        actions_json(&self.engine.on_key_up(&Key(key.to_owned()), modifiers(shift)))
    }

    // =========================================================================
    // Toolbar
    // =========================================================================

    /// Apply a layer command (`"bring_to_front"`, `"send_to_back"`,
    /// `"bring_forward"`, `"send_backward"`) to the selection.
    pub fn reorder(&mut self, op: &str) -> String {
        match Reorder::from_name(op) {
            Some(op) => actions_json(&self.engine.reorder_selected(op)),
            None => {
                log::warn!("unknown layer command: {op}");
                actions_json(&[])
            }
        }
    }

    pub fn scale_selected(&mut self, factor: f64) -> String {
        actions_json(&self.engine.scale_selected(factor))
    }

    pub fn rotate_selected(&mut self, degrees: f64) -> String {
        actions_json(&self.engine.rotate_selected(degrees))
    }

    // =========================================================================
    // Queries and drawing
    // =========================================================================

    /// Current selection overlay as JSON, or `null`.
    #[must_use]
    pub fn selection_overlay(&self) -> String {
        to_json(&self.engine.selection_overlay(), "null")
    }

    pub fn render(&mut self) {
        self.engine.render();
    }
}

fn modifiers(shift: bool) -> Modifiers {
    Modifiers { shift, ..Modifiers::default() }
}

/// Encode actions for the host. Encoding failures are logged and yield `[]`.
#[must_use]
pub fn actions_json(actions: &[Action]) -> String {
    to_json(actions, "[]")
}

fn to_json<T: Serialize + ?Sized>(value: &T, fallback: &str) -> String {
    match serde_json::to_string(value) {
        Ok(json) => json,
        Err(err) => {
            log::warn!("failed to encode for host: {err}");
            fallback.to_owned()
        }
    }
}
