//! Core document types for the gridmap editor
//!
//! This crate provides the data the editor mutates and persists:
//! - `TileMap` - A grid document with layers and entities
//! - `Layer` - A named, independently visible grid of cell references
//! - `EntityInstance` - Placed entities with string properties
//! - `Group` - Tile and entity group definitions referenced by name
//! - `CellRect` - Rectangle clipping shared by every region operation

mod entity;
mod group;
mod layer;
mod map;
mod rect;

pub use entity::EntityInstance;
pub use group::{Group, GroupType, SpriteRef};
pub use layer::{CellRef, Layer};
pub use map::TileMap;
pub use rect::{CellRect, ClippedRect};
