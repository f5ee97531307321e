//! The command trait and undo/redo history

use gridmap_core::TileMap;
use std::fmt;
use tracing::debug;

use crate::observer::{ObserverId, Observers};

/// Default cap on the number of undoable commands kept per history
pub const DEFAULT_HISTORY_LIMIT: usize = 200;

/// A reversible edit to a map
///
/// `undo` after `execute` must restore exactly the state the command
/// touched, including empty cells. Commands own every piece of pre-state
/// they need and never reference other commands.
pub trait Command: Send + Sync {
    fn execute(&mut self, map: &mut TileMap);

    fn undo(&mut self, map: &mut TileMap);

    /// Short label for menus ("Undo Paint")
    fn description(&self) -> &str;

    /// True when executing would change nothing. Such commands are never
    /// recorded.
    fn is_noop(&self) -> bool {
        false
    }

    /// False when the map lacks what the command edits (a layer index, an
    /// entity id). Checked before executing; such commands are never recorded.
    fn applies_to(&self, _map: &TileMap) -> bool {
        true
    }
}

/// Snapshot handed to history observers after every operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryState {
    pub undo_depth: usize,
    pub redo_depth: usize,
}

impl HistoryState {
    pub fn can_undo(&self) -> bool {
        self.undo_depth > 0
    }

    pub fn can_redo(&self) -> bool {
        self.redo_depth > 0
    }
}

/// Applied and reverted command stacks for one map
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
#[derive(Default)]
pub struct CommandHistory {
    undo_stack: Vec<Box<dyn Command>>,
    redo_stack: Vec<Box<dyn Command>>,
    /// Maximum undo depth, 0 for unbounded
    limit: usize,
    observers: Observers<HistoryState>,
}

impl fmt::Debug for CommandHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandHistory")
            .field("undo_depth", &self.undo_stack.len())
            .field("redo_depth", &self.redo_stack.len())
            .field("limit", &self.limit)
            .finish()
    }
}

impl CommandHistory {
    /// An unbounded history
    pub fn new() -> Self {
        Self::default()
    }

    /// A history that forgets the oldest commands past `limit` (0 = unbounded)
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Change the limit, dropping the oldest commands that no longer fit
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
        if self.trim() {
            self.notify();
        }
    }

    /// Record a command that has already been applied to the map.
    ///
    /// Clears the redo stack. Returns false, recording nothing, when the
    /// command is a no-op.
    pub fn push(&mut self, command: Box<dyn Command>) -> bool {
        if command.is_noop() {
            debug!("Skipping empty command '{}'", command.description());
            return false;
        }
        self.redo_stack.clear();
        self.undo_stack.push(command);
        self.trim();
        self.notify();
        true
    }

    /// Apply a command to the map and record it
    pub fn execute(&mut self, mut command: Box<dyn Command>, map: &mut TileMap) -> bool {
        if command.is_noop() || !command.applies_to(map) {
            debug!("Skipping empty command '{}'", command.description());
            return false;
        }
        command.execute(map);
        self.push(command)
    }

    /// Revert the most recent command. Returns false when there is nothing to undo.
    pub fn undo(&mut self, map: &mut TileMap) -> bool {
        let Some(mut command) = self.undo_stack.pop() else {
            return false;
        };
        command.undo(map);
        debug!("Undo: {}", command.description());
        self.redo_stack.push(command);
        self.notify();
        true
    }

    /// Re-apply the most recently undone command
    pub fn redo(&mut self, map: &mut TileMap) -> bool {
        let Some(mut command) = self.redo_stack.pop() else {
            return false;
        };
        command.execute(map);
        debug!("Redo: {}", command.description());
        self.undo_stack.push(command);
        self.notify();
        true
    }

    /// Drop both stacks
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.notify();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Label of the command `undo` would revert
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().map(|c| c.description())
    }

    /// Label of the command `redo` would re-apply
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|c| c.description())
    }

    pub fn state(&self) -> HistoryState {
        HistoryState {
            undo_depth: self.undo_stack.len(),
            redo_depth: self.redo_stack.len(),
        }
    }

    /// Register a callback run once after every push, undo, redo or clear
    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&HistoryState) + Send + Sync + 'static,
    ) -> ObserverId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn trim(&mut self) -> bool {
        if self.limit == 0 || self.undo_stack.len() <= self.limit {
            return false;
        }
        let excess = self.undo_stack.len() - self.limit;
        self.undo_stack.drain(0..excess);
        true
    }

    fn notify(&mut self) {
        let state = self.state();
        self.observers.notify(&state);
    }
}
