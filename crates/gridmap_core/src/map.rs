//! Grid document containing layers and entities

use crate::{CellRef, EntityInstance, Layer};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A grid document: layers of cell references plus placed entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileMap {
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub layers: Vec<Layer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<EntityInstance>,
    /// Index of the layer entities are drawn after
    #[serde(default)]
    pub entity_render_order: usize,
}

impl TileMap {
    /// Create a new map with no layers
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            layers: Vec::new(),
            entities: Vec::new(),
            entity_render_order: 0,
        }
    }

    /// Number of cells every layer must hold
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether every layer's cell array matches the map dimensions
    pub fn is_consistent(&self) -> bool {
        let expected = self.cell_count();
        self.layers.iter().all(|layer| layer.cells.len() == expected)
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Row-major index of a cell, or `None` outside the map
    pub fn cell_index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    /// Append a new empty layer sized to the map and return its index
    pub fn add_layer(&mut self, name: impl Into<String>) -> usize {
        self.layers.push(Layer::new(name, self.width, self.height));
        self.layers.len() - 1
    }

    /// Remove a layer by index
    pub fn remove_layer(&mut self, index: usize) -> Option<Layer> {
        if index < self.layers.len() {
            Some(self.layers.remove(index))
        } else {
            None
        }
    }

    /// Move the layer at `from` so it ends up at index `to`
    pub fn move_layer(&mut self, from: usize, to: usize) -> bool {
        if from >= self.layers.len() || to >= self.layers.len() {
            return false;
        }
        let layer = self.layers.remove(from);
        self.layers.insert(to, layer);
        true
    }

    /// Toggle layer visibility
    pub fn toggle_layer_visibility(&mut self, index: usize) -> bool {
        if let Some(layer) = self.layers.get_mut(index) {
            layer.visible = !layer.visible;
            true
        } else {
            false
        }
    }

    /// Get layer by index
    pub fn get_layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// Get mutable layer by index
    pub fn get_layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    /// Find a layer's index by name
    pub fn layer_index(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.name == name)
    }

    /// Get the group name at a cell. Empty and out-of-bounds cells are `None`.
    pub fn get_cell(&self, layer_index: usize, x: i32, y: i32) -> Option<&str> {
        let index = self.cell_index(x, y)?;
        self.layers
            .get(layer_index)?
            .cells
            .get(index)?
            .as_deref()
    }

    /// Write a cell, returning the previous value.
    ///
    /// Returns `None` (and writes nothing) when the cell or layer does not exist.
    pub fn set_cell(
        &mut self,
        layer_index: usize,
        x: i32,
        y: i32,
        value: CellRef,
    ) -> Option<CellRef> {
        let index = self.cell_index(x, y)?;
        let cell = self.layers.get_mut(layer_index)?.cells.get_mut(index)?;
        Some(std::mem::replace(cell, value))
    }

    /// Add an entity to the map
    pub fn add_entity(&mut self, entity: EntityInstance) {
        self.entities.push(entity);
    }

    /// Remove an entity by ID
    pub fn remove_entity(&mut self, id: Uuid) -> Option<EntityInstance> {
        self.entities
            .iter()
            .position(|e| e.id == id)
            .map(|pos| self.entities.remove(pos))
    }

    /// Get entity by ID
    pub fn get_entity(&self, id: Uuid) -> Option<&EntityInstance> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Get mutable entity by ID
    pub fn get_entity_mut(&mut self, id: Uuid) -> Option<&mut EntityInstance> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Remove and return every entity belonging to `group_name`
    pub fn remove_entities_of_group(&mut self, group_name: &str) -> Vec<EntityInstance> {
        let (removed, kept) = std::mem::take(&mut self.entities)
            .into_iter()
            .partition(|e| e.group_name == group_name);
        self.entities = kept;
        removed
    }

    /// Resize every layer, keeping cells by coordinate.
    ///
    /// Entities outside the new bounds are removed and returned.
    pub fn resize(&mut self, new_width: u32, new_height: u32) -> Vec<EntityInstance> {
        for layer in self.layers.iter_mut() {
            layer.cells = layer.resized(self.width, new_width, new_height);
        }
        self.width = new_width;
        self.height = new_height;

        let (kept, removed) = std::mem::take(&mut self.entities)
            .into_iter()
            .partition(|e| self.in_bounds(e.x, e.y));
        self.entities = kept;
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_map() {
        let map = TileMap::new(10, 8);
        assert_eq!(map.width, 10);
        assert_eq!(map.height, 8);
        assert!(map.layers.is_empty());
        assert!(map.entities.is_empty());
        assert!(map.is_consistent());
    }

    #[test]
    fn test_cell_operations() {
        let mut map = TileMap::new(10, 10);
        map.add_layer("Ground");

        // Initially empty
        assert_eq!(map.get_cell(0, 5, 5), None);

        // Set a cell
        assert_eq!(map.set_cell(0, 5, 5, Some("grass".into())), Some(None));
        assert_eq!(map.get_cell(0, 5, 5), Some("grass"));

        // Clear a cell
        assert_eq!(map.set_cell(0, 5, 5, None), Some(Some("grass".into())));
        assert_eq!(map.get_cell(0, 5, 5), None);
    }

    #[test]
    fn test_out_of_bounds_writes_are_ignored() {
        let mut map = TileMap::new(4, 4);
        map.add_layer("Ground");

        assert_eq!(map.set_cell(0, -1, 0, Some("grass".into())), None);
        assert_eq!(map.set_cell(0, 4, 0, Some("grass".into())), None);
        assert_eq!(map.set_cell(1, 0, 0, Some("grass".into())), None);
        assert!(map.layers[0].cells.iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_entity_operations() {
        let mut map = TileMap::new(10, 10);
        let entity = EntityInstance::new("npc", 3, 3);
        let entity_id = entity.id;

        map.add_entity(entity);
        assert!(map.get_entity(entity_id).is_some());

        let removed = map.remove_entity(entity_id);
        assert!(removed.is_some());
        assert!(map.get_entity(entity_id).is_none());
    }

    #[test]
    fn test_resize_keeps_cells_by_coordinate() {
        let mut map = TileMap::new(3, 2);
        map.add_layer("Ground");
        map.add_layer("Detail");
        map.set_cell(0, 2, 1, Some("wall".into()));
        map.set_cell(0, 0, 1, Some("sand".into()));
        map.set_cell(1, 1, 0, Some("flower".into()));

        map.resize(2, 4);
        assert!(map.is_consistent());
        assert_eq!(map.layers[0].cells.len(), 8);
        assert_eq!(map.get_cell(0, 0, 1), Some("sand"));
        assert_eq!(map.get_cell(1, 1, 0), Some("flower"));
        assert_eq!(map.get_cell(0, 1, 3), None);

        map.resize(5, 1);
        assert!(map.is_consistent());
        assert_eq!(map.get_cell(1, 1, 0), Some("flower"));
        assert_eq!(map.get_cell(0, 0, 1), None);
    }

    #[test]
    fn test_resize_removes_out_of_bounds_entities() {
        let mut map = TileMap::new(5, 5);
        let inside = EntityInstance::new("npc", 1, 1);
        let outside = EntityInstance::new("npc", 4, 1);
        let outside_id = outside.id;
        map.add_entity(inside);
        map.add_entity(outside);

        let removed = map.resize(3, 5);
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].id, outside_id);
        assert_eq!(map.entities.len(), 1);
    }

    #[test]
    fn test_move_layer() {
        let mut map = TileMap::new(1, 1);
        map.add_layer("a");
        map.add_layer("b");
        map.add_layer("c");

        assert!(map.move_layer(0, 2));
        let names: Vec<_> = map.layers.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
        assert!(!map.move_layer(0, 3));
    }

    #[test]
    fn test_remove_entities_of_group() {
        let mut map = TileMap::new(4, 4);
        map.add_entity(EntityInstance::new("npc", 0, 0));
        map.add_entity(EntityInstance::new("chest", 1, 0));
        map.add_entity(EntityInstance::new("npc", 2, 0));

        let removed = map.remove_entities_of_group("npc");
        assert_eq!(removed.len(), 2);
        assert_eq!(map.entities.len(), 1);
        assert_eq!(map.entities[0].group_name, "chest");
    }
}
