//! Entity placement, movement and deletion

use gridmap_core::{EntityInstance, TileMap};
use tracing::debug;
use uuid::Uuid;

use super::Command;

/// Moves an entity between two grid positions
///
/// The move tool drags the entity live and records this command on release,
/// so `execute` is only called on redo.
#[derive(Debug, Clone)]
pub struct MoveEntityCommand {
    entity_id: Uuid,
    from: (i32, i32),
    to: (i32, i32),
}

impl MoveEntityCommand {
    pub fn new(entity_id: Uuid, from: (i32, i32), to: (i32, i32)) -> Self {
        Self { entity_id, from, to }
    }

    fn move_to(&self, map: &mut TileMap, (x, y): (i32, i32)) {
        match map.get_entity_mut(self.entity_id) {
            Some(entity) => entity.set_position(x, y),
            None => debug!("Entity {} no longer exists, move skipped", self.entity_id),
        }
    }
}

impl Command for MoveEntityCommand {
    fn execute(&mut self, map: &mut TileMap) {
        self.move_to(map, self.to);
    }

    fn undo(&mut self, map: &mut TileMap) {
        self.move_to(map, self.from);
    }

    fn description(&self) -> &str {
        "Move Entity"
    }

    fn is_noop(&self) -> bool {
        self.from == self.to
    }

    fn applies_to(&self, map: &TileMap) -> bool {
        map.get_entity(self.entity_id).is_some()
    }
}

/// Adds a new entity to the map
#[derive(Debug, Clone)]
pub struct PlaceEntityCommand {
    entity: EntityInstance,
}

impl PlaceEntityCommand {
    pub fn new(entity: EntityInstance) -> Self {
        Self { entity }
    }

    pub fn entity_id(&self) -> Uuid {
        self.entity.id
    }
}

impl Command for PlaceEntityCommand {
    fn execute(&mut self, map: &mut TileMap) {
        map.add_entity(self.entity.clone());
    }

    fn undo(&mut self, map: &mut TileMap) {
        map.remove_entity(self.entity.id);
    }

    fn description(&self) -> &str {
        "Place Entity"
    }

    fn applies_to(&self, map: &TileMap) -> bool {
        map.get_entity(self.entity.id).is_none()
    }
}

/// Removes an entity, restoring it at its original list position on undo
#[derive(Debug, Clone)]
pub struct DeleteEntityCommand {
    entity_id: Uuid,
    removed: Option<(usize, EntityInstance)>,
}

impl DeleteEntityCommand {
    pub fn new(entity_id: Uuid) -> Self {
        Self {
            entity_id,
            removed: None,
        }
    }
}

impl Command for DeleteEntityCommand {
    fn execute(&mut self, map: &mut TileMap) {
        if let Some(index) = map.entities.iter().position(|e| e.id == self.entity_id) {
            self.removed = Some((index, map.entities.remove(index)));
        }
    }

    fn undo(&mut self, map: &mut TileMap) {
        if let Some((index, entity)) = self.removed.take() {
            let index = index.min(map.entities.len());
            map.entities.insert(index, entity);
        }
    }

    fn description(&self) -> &str {
        "Delete Entity"
    }

    fn applies_to(&self, map: &TileMap) -> bool {
        map.get_entity(self.entity_id).is_some()
    }
}
