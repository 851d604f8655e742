//! Mask editor core - strokes, history and mask rasterization
//!
//! This crate provides the interactive object-removal editor without any
//! graphics API or UI framework:
//! - [`types`] - Points, strokes and surface sizes
//! - [`coords`] - Client/display/image coordinate mapping and letterbox fitting
//! - [`recorder`] - In-progress stroke capture
//! - [`raster`] - Drawing operations and the coverage rasterizer
//! - [`surface`] - RGBA preview surface
//! - [`mask`] - Full-resolution binary mask raster
//! - [`compositor`] - Renders stroke lists onto preview and mask surfaces
//! - [`history`] - Undo/redo over stroke-list snapshots
//! - [`source`] - Source image loading and encoding
//! - [`session`] - The editing session state machine

pub mod compositor;
pub mod constants;
pub mod coords;
pub mod history;
pub mod mask;
pub mod raster;
pub mod recorder;
pub mod session;
pub mod source;
pub mod surface;
pub mod types;

pub use compositor::*;
pub use constants::*;
pub use coords::*;
pub use history::*;
pub use mask::*;
pub use raster::*;
pub use recorder::*;
pub use session::*;
pub use source::*;
pub use surface::*;
pub use types::*;

pub use cleanup_ipc::{EditingTool, EditorCommand, EditorEvent, ProcessingState};

use thiserror::Error;

/// Errors raised while rendering to a preview or mask surface
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Drawing surface unavailable ({width}x{height})")]
    SurfaceUnavailable { width: u32, height: u32 },

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}
