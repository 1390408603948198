//! Album composer surface: placement, transforms, and stacking of photos.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! interactive album canvas: images dragged in from the gallery are placed
//! where they drop, then moved, scaled, rotated, and restacked through pointer
//! gestures and layer controls. The host JavaScript layer forwards DOM events
//! to the engine and applies the resulting [`engine::Action`]s (cursor changes,
//! overlay positions, redraw requests).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Placed images and the z-ordered image store |
//! | [`placement`] | Gallery drag-and-drop into the store |
//! | [`transform`] | Scale and rotation math for gestures |
//! | [`geometry`] | Points, angles, snapping |
//! | [`viewport`] | Client-to-canvas coordinate conversion |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing against images and their handles |
//! | [`render`] | Scene rendering |
//! | [`consts`] | Shared numeric constants (scale limits, handle sizes, etc.) |
//! | [`wasm`] | `#[wasm_bindgen]` controller exported to the host page |

pub mod consts;
pub mod doc;
pub mod engine;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod placement;
pub mod render;
pub mod transform;
pub mod viewport;
pub mod wasm;
