//! Layer ordering

use gridmap_core::TileMap;

use super::Command;

/// Moves a layer from one index to another
#[derive(Debug, Clone)]
pub struct ReorderLayerCommand {
    from: usize,
    to: usize,
}

impl ReorderLayerCommand {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// Move the layer at `index` one step toward index 0
    pub fn up(index: usize) -> Self {
        Self::new(index, index.saturating_sub(1))
    }

    /// Move the layer at `index` one step toward the end
    pub fn down(index: usize) -> Self {
        Self::new(index, index.saturating_add(1))
    }
}

impl Command for ReorderLayerCommand {
    fn execute(&mut self, map: &mut TileMap) {
        map.move_layer(self.from, self.to);
    }

    fn undo(&mut self, map: &mut TileMap) {
        map.move_layer(self.to, self.from);
    }

    fn description(&self) -> &str {
        "Reorder Layer"
    }

    fn is_noop(&self) -> bool {
        self.from == self.to
    }

    fn applies_to(&self, map: &TileMap) -> bool {
        self.from < map.layers.len() && self.to < map.layers.len()
    }
}
