//! Cell strokes: paint, erase and stamp gestures recorded as one command

use gridmap_core::{CellRef, TileMap};
use std::collections::HashMap;
use tracing::debug;

use super::{Command, TileClipboard};

/// One cell write: `old` is the value immediately before this write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellChange {
    pub layer: usize,
    pub x: i32,
    pub y: i32,
    pub old: CellRef,
    pub new: CellRef,
}

/// An ordered list of cell writes applied and reverted as a unit
///
/// Undo walks the list backwards so a cell written several times ends at
/// the value it had before the first write.
#[derive(Debug, Clone)]
pub struct CellStrokeCommand {
    changes: Vec<CellChange>,
    description: String,
}

impl CellStrokeCommand {
    pub fn new(changes: Vec<CellChange>, description: impl Into<String>) -> Self {
        Self {
            changes,
            description: description.into(),
        }
    }

    pub fn changes(&self) -> &[CellChange] {
        &self.changes
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

impl Command for CellStrokeCommand {
    fn execute(&mut self, map: &mut TileMap) {
        for change in &self.changes {
            map.set_cell(change.layer, change.x, change.y, change.new.clone());
        }
    }

    fn undo(&mut self, map: &mut TileMap) {
        for change in self.changes.iter().rev() {
            map.set_cell(change.layer, change.x, change.y, change.old.clone());
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Tracks cell writes during a press -> drag -> release gesture
///
/// Writes go to the map immediately so the user sees them; `finish` turns
/// the accumulated writes into a [`CellStrokeCommand`] for the history.
#[derive(Debug, Default)]
pub struct StrokeRecorder {
    active: bool,
    layer: usize,
    changes: Vec<CellChange>,
    description: String,
}

impl StrokeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a gesture on `layer`. An unfinished gesture is cancelled first,
    /// reverting its writes.
    pub fn begin(&mut self, map: &mut TileMap, layer: usize, description: impl Into<String>) {
        if self.active {
            if !self.changes.is_empty() {
                debug!(
                    "Reverting {} unfinished stroke changes",
                    self.changes.len()
                );
            }
            self.cancel(map);
        }
        self.active = true;
        self.layer = layer;
        self.changes.clear();
        self.description = description.into();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Changes recorded so far
    pub fn changes(&self) -> &[CellChange] {
        &self.changes
    }

    /// Write `value` at (x, y). Returns true if the cell changed.
    ///
    /// Out-of-bounds cells and writes of the value already present are
    /// skipped.
    pub fn paint(&mut self, map: &mut TileMap, x: i32, y: i32, value: CellRef) -> bool {
        if !self.active {
            return false;
        }
        if map.get_layer(self.layer).is_none() || !map.in_bounds(x, y) {
            return false;
        }
        if map.get_cell(self.layer, x, y) == value.as_deref() {
            return false;
        }
        let Some(old) = map.set_cell(self.layer, x, y, value.clone()) else {
            return false;
        };
        self.changes.push(CellChange {
            layer: self.layer,
            x,
            y,
            old,
            new: value,
        });
        true
    }

    pub fn erase(&mut self, map: &mut TileMap, x: i32, y: i32) -> bool {
        self.paint(map, x, y, None)
    }

    /// Paint a clipboard pattern with its top-left cell at (x, y).
    ///
    /// Empty clipboard cells leave the map untouched. Returns the number of
    /// cells changed.
    pub fn stamp(&mut self, map: &mut TileMap, clipboard: &TileClipboard, x: i32, y: i32) -> usize {
        let mut changed = 0;
        for (dx, dy, value) in clipboard.filled_cells() {
            let target = i32::try_from(dx)
                .ok()
                .and_then(|dx| x.checked_add(dx))
                .zip(i32::try_from(dy).ok().and_then(|dy| y.checked_add(dy)));
            let Some((tx, ty)) = target else {
                continue;
            };
            if self.paint(map, tx, ty, Some(value.to_string())) {
                changed += 1;
            }
        }
        changed
    }

    /// End the gesture. Returns `None` if the stroke left every cell as it
    /// found it.
    pub fn finish(&mut self) -> Option<CellStrokeCommand> {
        if !self.active {
            return None;
        }
        self.active = false;
        let changes = std::mem::take(&mut self.changes);
        let description = std::mem::take(&mut self.description);

        if !has_net_change(&changes) {
            return None;
        }
        Some(CellStrokeCommand::new(changes, description))
    }

    /// Abort the gesture, reverting everything it wrote
    pub fn cancel(&mut self, map: &mut TileMap) {
        for change in self.changes.drain(..).rev() {
            map.set_cell(change.layer, change.x, change.y, change.old);
        }
        self.active = false;
        self.description.clear();
    }
}

/// Whether any touched cell ends with a value different from where it started
fn has_net_change(changes: &[CellChange]) -> bool {
    let mut first_old: HashMap<(usize, i32, i32), &CellRef> = HashMap::new();
    let mut last_new: HashMap<(usize, i32, i32), &CellRef> = HashMap::new();
    for change in changes {
        let key = (change.layer, change.x, change.y);
        first_old.entry(key).or_insert(&change.old);
        last_new.insert(key, &change.new);
    }
    last_new
        .iter()
        .any(|(key, new)| first_old.get(key).is_some_and(|old| old != new))
}
