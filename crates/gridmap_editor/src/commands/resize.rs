//! Map resize

use gridmap_core::{CellRef, EntityInstance, TileMap};

use super::Command;

/// Changes the map dimensions, keeping cells by coordinate
///
/// Holds a full copy of every layer taken at construction so undo restores
/// cells that the resize dropped.
#[derive(Debug, Clone)]
pub struct ResizeCommand {
    old_width: u32,
    old_height: u32,
    new_width: u32,
    new_height: u32,
    layer_snapshot: Vec<Vec<CellRef>>,
    /// Entities dropped by the last execute, re-added on undo
    removed_entities: Vec<EntityInstance>,
}

impl ResizeCommand {
    pub fn new(map: &TileMap, new_width: u32, new_height: u32) -> Self {
        Self {
            old_width: map.width,
            old_height: map.height,
            new_width,
            new_height,
            layer_snapshot: map.layers.iter().map(|l| l.cells.clone()).collect(),
            removed_entities: Vec::new(),
        }
    }

    /// Entities the resize removed from the map
    pub fn removed_entities(&self) -> &[EntityInstance] {
        &self.removed_entities
    }

    fn is_valid(&self) -> bool {
        self.new_width > 0 && self.new_height > 0
    }
}

impl Command for ResizeCommand {
    fn execute(&mut self, map: &mut TileMap) {
        if !self.is_valid() {
            return;
        }
        self.removed_entities = map.resize(self.new_width, self.new_height);
    }

    fn undo(&mut self, map: &mut TileMap) {
        if !self.is_valid() {
            return;
        }
        for (layer, cells) in map.layers.iter_mut().zip(&self.layer_snapshot) {
            layer.cells = cells.clone();
        }
        map.width = self.old_width;
        map.height = self.old_height;
        map.entities.append(&mut self.removed_entities);
    }

    fn description(&self) -> &str {
        "Resize Map"
    }

    fn is_noop(&self) -> bool {
        !self.is_valid() || (self.old_width == self.new_width && self.old_height == self.new_height)
    }
}
