//! Input model: modifier keys, mouse buttons, and the gesture state machine.
//!
//! `Modifiers` captures the keyboard state at the time of a pointer event.
//! `InputState` is the active gesture being tracked between pointer-down and
//! pointer-up; each active variant carries the snapshot needed to compute the
//! next update from the gesture's starting point. `SurfaceState` is the
//! per-image view of the same machine that the host uses for styling.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::doc::ImageId;
use crate::geometry::Point;
use crate::transform::{GestureSnapshot, ScaleMode};

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Shift key is held. Doubles as the rotation snap modifier.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    #[default]
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code. Back/forward buttons have no role here.
    #[must_use]
    pub fn from_dom(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Shift"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key(pub String);

impl Key {
    /// Whether this is the rotation snap modifier.
    #[must_use]
    pub fn is_snap_modifier(&self) -> bool {
        self.0 == "Shift"
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The id of the currently selected image, if any.
    pub selected_id: Option<ImageId>,
    /// Whether the snap modifier key is currently held.
    pub snap_held: bool,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving an image across the canvas.
    DraggingImage {
        /// Id of the image being dragged.
        id: ImageId,
        /// Canvas-space pointer position at pointer-down.
        start: Point,
        /// Image top-left at pointer-down.
        orig: Point,
    },
    /// The user is scaling an image with one of its eight handles.
    ScalingImage {
        /// Id of the image being scaled.
        id: ImageId,
        /// Axis measured by the grabbed handle.
        mode: ScaleMode,
        /// Baseline scale, pointer-down position, and pivot.
        snapshot: GestureSnapshot,
    },
    /// The user is rotating an image with the rotate handle.
    RotatingImage {
        /// Id of the image being rotated.
        id: ImageId,
        /// Baseline rotation, pointer-down position, and pivot.
        snapshot: GestureSnapshot,
    },
}

impl InputState {
    /// Image targeted by the active gesture, if any.
    #[must_use]
    pub fn target(&self) -> Option<ImageId> {
        match self {
            Self::Idle => None,
            Self::DraggingImage { id, .. } | Self::ScalingImage { id, .. } | Self::RotatingImage { id, .. } => {
                Some(*id)
            }
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Interaction state of a single image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceState {
    Idle,
    Selected,
    Dragging,
    Scaling,
    Rotating,
}

impl SurfaceState {
    /// Derive the state of image `id` from the selection and active gesture.
    #[must_use]
    pub fn of(id: ImageId, ui: &UiState, input: &InputState) -> Self {
        if input.target() == Some(id) {
            return match input {
                InputState::DraggingImage { .. } => Self::Dragging,
                InputState::ScalingImage { .. } => Self::Scaling,
                InputState::RotatingImage { .. } => Self::Rotating,
                InputState::Idle => Self::Selected,
            };
        }
        if ui.selected_id == Some(id) { Self::Selected } else { Self::Idle }
    }
}
