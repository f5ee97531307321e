//! gridmap_editor - Document engine for a 2D tile-map editor
//!
//! This crate provides the editing core behind the map editor:
//! - Reversible commands with per-map undo/redo history
//! - Paint strokes, region clear/paste, resize, flood fill and entity edits
//! - A group registry whose renames and removals cascade into every map
//! - Versioned project files (single-map and named-map formats) with an
//!   optional editor-state sidecar
//! - User preferences stored in the platform config directory
//!
//! # Usage
//!
//! ```rust,ignore
//! use gridmap_editor::commands::StrokeRecorder;
//! use gridmap_editor::project::Project;
//! use gridmap_core::TileMap;
//!
//! let mut project = Project::new();
//! let mut map = TileMap::new(10, 8);
//! map.add_layer("Ground");
//! project.add_map("town", map);
//!
//! let mut stroke = StrokeRecorder::new();
//! let town = project.map_mut("town").unwrap();
//! stroke.begin(town, 0, "Paint");
//! stroke.paint(town, 3, 4, Some("grass".into()));
//! if let Some(command) = stroke.finish() {
//!     project.record("town", Box::new(command));
//! }
//! project.undo("town");
//! ```
//!
//! With the `bevy` feature, `CommandHistory`, `GroupRegistry`, `Project` and
//! `EditorPreferences` derive `Resource`.

pub mod commands;
pub mod groups;
pub mod observer;
pub mod preferences;
pub mod project;

// Re-export the document types
pub use gridmap_core;

pub use commands::{Command, CommandHistory};
pub use groups::GroupRegistry;
pub use preferences::EditorPreferences;
pub use project::{Project, ProjectError};
