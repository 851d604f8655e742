//! Pointer input types.

use serde::{Deserialize, Serialize};

/// Bounding rectangle of the display surface in client (CSS/window) units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClientRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ClientRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// True once the surface has been laid out with a non-zero area.
    pub fn is_laid_out(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Pointer input events in client coordinates.
///
/// `pressure` is optional; pen and touch devices report it in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerEvent {
    Down {
        x: f32,
        y: f32,
        #[serde(default)]
        pressure: Option<f32>,
    },
    Move {
        x: f32,
        y: f32,
        #[serde(default)]
        pressure: Option<f32>,
    },
    Up,
    /// Pointer left the surface; treated like a release.
    Leave,
}
