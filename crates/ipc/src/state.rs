//! Editor state enums shared between the core and a UI shell.

use serde::{Deserialize, Serialize};

/// Processing state of an editing session.
///
/// `Selecting` is held only while a stroke is being captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingState {
    #[default]
    Idle,
    Selecting,
    Processing,
    Completed,
}

/// Editing tools offered by the editor. Only `Cleanup` captures strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditingTool {
    Portrait,
    Live,
    Adjust,
    Filters,
    Crop,
    #[default]
    Cleanup,
}

impl EditingTool {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            EditingTool::Portrait => "Portrait",
            EditingTool::Live => "Live",
            EditingTool::Adjust => "Adjust",
            EditingTool::Filters => "Filters",
            EditingTool::Crop => "Crop",
            EditingTool::Cleanup => "Clean Up",
        }
    }

    pub fn captures_strokes(&self) -> bool {
        matches!(self, EditingTool::Cleanup)
    }
}
