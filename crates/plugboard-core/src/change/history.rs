//! Undo/redo bookkeeping over applied changes.

use crate::{
    change::Change,
    model::Board,
    obs::{emit, EditEvent, EditSink},
};

///
/// ChangeLog
///
/// Paired undo/redo stacks owning every change that has touched the
/// board. Changes arrive unapplied; the log applies them, reports the
/// outcome, and keeps them for replay. A conflicted change is reported
/// and dropped, and a fresh edit clears the redo stack.
///

#[derive(Default)]
pub struct ChangeLog {
    undo: Vec<Change>,
    redo: Vec<Change>,
    debug: bool,
    sink: Option<&'static dyn EditSink>,
}

impl ChangeLog {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            debug: false,
            sink: None,
        }
    }

    #[must_use]
    pub const fn debug(mut self) -> Self {
        self.debug = true;
        self
    }

    #[must_use]
    pub const fn edit_sink(mut self, sink: &'static dyn EditSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Apply `change` and keep it for undo. Returns whether the board
    /// changed.
    pub fn apply(&mut self, board: &mut Board, change: Change) -> bool {
        if !change.can_apply() {
            for conflict in change.conflicts() {
                self.debug_log(format!("rejected: {}", conflict.description()));
            }
            return false;
        }

        let mut change = change;
        change.apply(board);
        self.debug_log(format!("apply: {}", change.description()));
        emit(
            self.sink,
            EditEvent::ChangeApplied {
                description: change.description().to_string(),
            },
        );
        self.redo.clear();
        self.undo.push(change);

        true
    }

    /// Revert the most recent change. Returns `false` when there is
    /// nothing to undo.
    pub fn undo(&mut self, board: &mut Board) -> bool {
        let Some(mut change) = self.undo.pop() else {
            return false;
        };

        change.revert(board);
        self.debug_log(format!("undo: {}", change.description()));
        emit(
            self.sink,
            EditEvent::ChangeReverted {
                description: change.description().to_string(),
            },
        );
        self.redo.push(change);

        true
    }

    /// Re-apply the most recently undone change. Returns `false` when
    /// there is nothing to redo.
    pub fn redo(&mut self, board: &mut Board) -> bool {
        let Some(mut change) = self.redo.pop() else {
            return false;
        };

        change.apply(board);
        self.debug_log(format!("redo: {}", change.description()));
        emit(
            self.sink,
            EditEvent::ChangeApplied {
                description: change.description().to_string(),
            },
        );
        self.undo.push(change);

        true
    }

    /// Label of the change `undo` would revert, for menu display.
    #[must_use]
    pub fn next_undo(&self) -> Option<&str> {
        self.undo.last().map(Change::description)
    }

    /// Label of the change `redo` would re-apply, for menu display.
    #[must_use]
    pub fn next_redo(&self) -> Option<&str> {
        self.redo.last().map(Change::description)
    }

    /// Drop both stacks, e.g. after loading a fresh board.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    fn debug_log(&self, s: impl AsRef<str>) {
        if self.debug {
            println!("[debug] {}", s.as_ref());
        }
    }
}

///
/// TESTS
///
