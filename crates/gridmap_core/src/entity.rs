//! Entities placed on a map

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// An entity placed on the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityInstance {
    /// Stable identity. Older files without ids get a fresh one on load.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Name of the entity group this instance belongs to
    pub group_name: String,
    pub x: i32,
    pub y: i32,
    /// Free-form gameplay data
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl EntityInstance {
    /// Create a new entity of `group_name` at a grid position
    pub fn new(group_name: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_name: group_name.into(),
            x,
            y,
            properties: BTreeMap::new(),
        }
    }

    /// Builder-style property setter
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }
}
