//! Stroke capture for the editing session

use cleanup_ipc::ProcessingState;
use tracing::debug;

use crate::types::Point;

use super::EditorSession;

impl EditorSession {
    /// Start a stroke at a display-space point.
    ///
    /// Ignored unless the cleanup tool is active, the session is idle and
    /// an image is shown on a laid-out surface. Returns true if a stroke
    /// was started.
    pub fn begin(&mut self, point: Point) -> bool {
        if !self.tool.captures_strokes() {
            debug!("begin: tool {:?} does not capture strokes", self.tool);
            return false;
        }
        if self.state != ProcessingState::Idle {
            debug!("begin: ignored while {:?}", self.state);
            return false;
        }
        if self.source.is_none() || !self.viewport.is_ready() {
            debug!("begin: no image or surface not ready");
            return false;
        }
        if !self
            .recorder
            .begin(point, self.brush_size, self.viewport.display)
        {
            return false;
        }

        self.set_state(ProcessingState::Selecting);
        self.redraw();
        true
    }

    /// Append a point to the in-progress stroke and redraw the preview
    pub fn extend(&mut self, point: Point) -> bool {
        if self.state != ProcessingState::Selecting {
            return false;
        }
        if !self.recorder.extend(point) {
            return false;
        }
        self.redraw();
        true
    }

    /// Finalize the in-progress stroke as an undoable edit.
    ///
    /// The prior stroke list goes onto the undo stack and the redo stack
    /// is cleared.
    pub fn finish(&mut self) -> bool {
        let Some(stroke) = self.recorder.finish() else {
            return false;
        };
        debug!(
            "finish: stroke with {} points, brush {}",
            stroke.len(),
            stroke.brush_size()
        );

        self.history.record(self.strokes.clone());
        self.strokes.push(stroke);
        self.set_state(ProcessingState::Idle);
        self.notify_history();
        self.redraw();
        true
    }

    /// Drop the in-progress stroke without recording it
    pub fn cancel_stroke(&mut self) {
        if !self.recorder.is_recording() {
            return;
        }
        self.recorder.cancel();
        if self.state == ProcessingState::Selecting {
            self.set_state(ProcessingState::Idle);
        }
        self.redraw();
    }
}
