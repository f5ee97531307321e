//! Tile and entity group definitions

use serde::{Deserialize, Serialize};

/// Whether a group is painted into layer cells or placed as entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GroupType {
    #[default]
    Tile,
    Entity,
}

impl GroupType {
    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            GroupType::Tile => "Tile",
            GroupType::Entity => "Entity",
        }
    }
}

/// A cell in the sprite sheet. The core never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteRef {
    pub column: u32,
    pub row: u32,
}

/// A paintable tile or entity definition
///
/// `name` is the key cells and entities use to refer to the group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    #[serde(rename = "type", default)]
    pub group_type: GroupType,
    #[serde(default, skip_serializing_if = "is_false")]
    pub solid: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub passable: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub hazardous: bool,
    #[serde(default = "default_movement_cost")]
    pub movement_cost: f32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub damage: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sprites: Vec<SpriteRef>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_zero(value: &i32) -> bool {
    *value == 0
}

fn default_movement_cost() -> f32 {
    1.0
}

impl Group {
    /// Create a tile group with default gameplay attributes
    pub fn tile(name: impl Into<String>) -> Self {
        Self::new(name, GroupType::Tile)
    }

    /// Create an entity group with default gameplay attributes
    pub fn entity(name: impl Into<String>) -> Self {
        Self::new(name, GroupType::Entity)
    }

    pub fn new(name: impl Into<String>, group_type: GroupType) -> Self {
        Self {
            name: name.into(),
            group_type,
            solid: false,
            passable: false,
            hazardous: false,
            movement_cost: default_movement_cost(),
            damage: 0,
            sprites: Vec::new(),
        }
    }

    pub fn is_tile(&self) -> bool {
        self.group_type == GroupType::Tile
    }
}
