//! # gridmap
//!
//! Document engine for a 2D tile-map editor.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gridmap::prelude::*;
//!
//! let mut project = Project::load(Path::new("world.json"))?;
//! let fill = flood_fill(project.map_mut("town").unwrap(), 0, 0, 0, Some("water".into()));
//! if let Some(command) = fill {
//!     project.record("town", Box::new(command));
//! }
//! project.save_current()?;
//! ```
//!
//! ## Features
//!
//! - `bevy` - Derives `Resource` on the editor state types
//!
//! ## Crate Structure
//!
//! - [`core`] - Grid documents, layers, entities and groups
//! - [`editor`] - Commands, history, group registry and project files

// =============================================================================
// Core module - document types
// =============================================================================

/// Document types.
///
/// - [`TileMap`] - A grid document with layers and entities
/// - [`Layer`] - One named grid of cell references
/// - [`Group`] - A tile or entity group definition
pub mod core {
    pub use gridmap_core::*;
}

pub use gridmap_core::{
    CellRect, CellRef, ClippedRect, EntityInstance, Group, GroupType, Layer, SpriteRef, TileMap,
};

// =============================================================================
// Editor module - commands and persistence
// =============================================================================

/// Undo/redo commands, the group registry and project files.
pub mod editor {
    pub use gridmap_editor::*;
}

pub use gridmap_editor::commands::{
    flood_fill, CellStrokeCommand, ClearRegionCommand, Command, CommandHistory,
    DeleteEntityCommand, MoveEntityCommand, PasteRegionCommand, PlaceEntityCommand,
    ReorderLayerCommand, ResizeCommand, StrokeRecorder, TileClipboard,
};
pub use gridmap_editor::groups::GroupRegistry;
pub use gridmap_editor::preferences::{EditorPreferences, PreferencesError};
pub use gridmap_editor::project::{
    load_envelope, restore_groups, restore_map_document, restore_single_map, save_envelope,
    Documents, EditorSidecar, NamedMap, Project, ProjectEnvelope, ProjectError,
};

// =============================================================================
// Prelude - import everything commonly needed
// =============================================================================

/// Commonly used types and traits.
///
/// Import with:
/// ```rust,ignore
/// use gridmap::prelude::*;
/// ```
pub mod prelude {
    // Documents
    pub use crate::{CellRect, EntityInstance, Group, Layer, TileMap};

    // Editing
    pub use crate::{flood_fill, Command, CommandHistory, GroupRegistry, StrokeRecorder};

    // Persistence
    pub use crate::{Project, ProjectError};
}
