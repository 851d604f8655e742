//! Message enums exchanged between a UI shell and the editor session.

use serde::{Deserialize, Serialize};

use crate::error::IpcError;
use crate::input::{ClientRect, PointerEvent};
use crate::state::{EditingTool, ProcessingState};

/// Commands from the UI shell to the editor session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum EditorCommand {
    /// Pointer input over the display surface
    Pointer {
        event: PointerEvent,
        /// Surface bounding rectangle at the time of the event
        rect: ClientRect,
    },

    /// Container resized; the display surface is refit
    Resize {
        container_width: f32,
        container_height: f32,
    },

    /// Switch editing tool
    SetTool { tool: EditingTool },

    /// Set brush diameter in display-space pixels
    SetBrushSize { size: f32 },

    /// Undo the last stroke edit
    Undo,

    /// Redo the last undone stroke edit
    Redo,

    /// Remove all strokes (undoable)
    Clear,

    /// Discard strokes, history and any result
    Reset,

    /// Send image + mask for inpainting
    Submit,
}

/// Notifications from the editor session to the UI shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum EditorEvent {
    /// Processing state changed
    StateChanged { state: ProcessingState },

    /// Preview surface was redrawn and should be presented
    PreviewUpdated,

    /// Undo/redo availability changed
    HistoryChanged { can_undo: bool, can_redo: bool },

    /// Display surface was refit into its container
    SurfaceResized { width: u32, height: u32 },

    /// A submission left the session
    SubmissionStarted { generation: u64 },

    /// The edited image is ready
    SubmissionCompleted {
        generation: u64,
        width: u32,
        height: u32,
    },

    /// The submission failed; strokes are kept for a retry
    SubmissionFailed { generation: u64, message: String },

    /// A command was rejected
    Error { code: String, message: String },
}

impl EditorEvent {
    pub fn to_json(&self) -> Result<String, IpcError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Parse a JSON array of commands (a recorded or scripted interaction).
pub fn parse_commands(text: &str) -> Result<Vec<EditorCommand>, IpcError> {
    let items = match serde_json::from_str(text)? {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(IpcError::NotACommandList {
                found: json_kind(&other),
            });
        }
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|source| IpcError::InvalidCommand { index, source })
        })
        .collect()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
