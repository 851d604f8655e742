//! Undo, redo, clear and reset

use cleanup_ipc::ProcessingState;
use tracing::{debug, info};

use super::EditorSession;

impl EditorSession {
    /// Restore the stroke list from before the last edit
    pub fn undo(&mut self) -> bool {
        if self.state != ProcessingState::Idle {
            debug!("undo: ignored while {:?}", self.state);
            return false;
        }
        if !self.history.undo(&mut self.strokes) {
            return false;
        }
        self.notify_history();
        self.redraw();
        true
    }

    /// Re-apply the last undone edit
    pub fn redo(&mut self) -> bool {
        if self.state != ProcessingState::Idle {
            debug!("redo: ignored while {:?}", self.state);
            return false;
        }
        if !self.history.redo(&mut self.strokes) {
            return false;
        }
        self.notify_history();
        self.redraw();
        true
    }

    /// Remove all strokes as a single undoable edit
    pub fn clear(&mut self) -> bool {
        if self.state != ProcessingState::Idle || self.strokes.is_empty() {
            return false;
        }
        let prior = std::mem::take(&mut self.strokes);
        self.history.record(prior);
        self.notify_history();
        self.redraw();
        true
    }

    /// Discard strokes, history, any result and any in-flight submission,
    /// returning to idle
    pub fn reset(&mut self) {
        self.recorder.cancel();
        self.strokes.clear();
        self.history.clear();
        self.result = None;
        self.last_mask = None;
        if let Some(generation) = self.in_flight.take() {
            info!("Reset discards in-flight submission {generation}");
        }
        self.generation += 1;

        self.set_state(ProcessingState::Idle);
        self.notify_history();
        self.redraw();
    }
}
