//! Undo/redo over stroke-list snapshots

use std::collections::VecDeque;

use tracing::debug;

use crate::types::StrokeList;

/// Two stacks of stroke-list snapshots.
///
/// `undo` holds older states with the most recent at the back; `redo` holds
/// undone states with the most recent at the front. Any new edit clears
/// `redo`.
#[derive(Debug, Clone)]
pub struct History {
    undo: VecDeque<StrokeList>,
    redo: VecDeque<StrokeList>,
    /// Maximum undo levels (oldest dropped first)
    max_levels: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(cleanup_config::DEFAULT_MAX_HISTORY)
    }
}

impl History {
    pub fn new(max_levels: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: VecDeque::new(),
            max_levels: max_levels.max(1),
        }
    }

    /// Record the state that existed before an edit
    pub fn record(&mut self, prior: StrokeList) {
        self.undo.push_back(prior);
        self.redo.clear();

        while self.undo.len() > self.max_levels {
            self.undo.pop_front();
        }
        debug!("History: recorded edit ({} undo levels)", self.undo.len());
    }

    /// Restore the most recent snapshot into `current`.
    ///
    /// Returns true if an undo was performed.
    pub fn undo(&mut self, current: &mut StrokeList) -> bool {
        let Some(previous) = self.undo.pop_back() else {
            debug!("Undo: no entries available");
            return false;
        };
        let undone = std::mem::replace(current, previous);
        self.redo.push_front(undone);
        true
    }

    /// Re-apply the most recently undone snapshot into `current`.
    ///
    /// Returns true if a redo was performed.
    pub fn redo(&mut self, current: &mut StrokeList) -> bool {
        let Some(next) = self.redo.pop_front() else {
            debug!("Redo: no entries available");
            return false;
        };
        let replaced = std::mem::replace(current, next);
        self.undo.push_back(replaced);
        true
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo.len()
    }
}
