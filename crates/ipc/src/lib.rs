//! IPC message protocol for the cleanup editor
//!
//! Defines the message types exchanged between a UI shell (browser canvas,
//! native window, or a scripted driver) and the editor session.

mod error;
mod input;
mod messages;
mod state;

pub use error::IpcError;
pub use input::{ClientRect, PointerEvent};
pub use messages::{parse_commands, EditorCommand, EditorEvent};
pub use state::{EditingTool, ProcessingState};
