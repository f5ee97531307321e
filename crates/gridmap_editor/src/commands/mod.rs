//! Undo/redo command system

pub mod clipboard;
mod command;
mod entity;
mod fill;
mod layer;
mod region;
mod resize;
mod stroke;

pub use clipboard::TileClipboard;
pub use command::{Command, CommandHistory, HistoryState, DEFAULT_HISTORY_LIMIT};
pub use entity::{DeleteEntityCommand, MoveEntityCommand, PlaceEntityCommand};
pub use fill::flood_fill;
pub use layer::ReorderLayerCommand;
pub use region::{ClearRegionCommand, PasteRegionCommand};
pub use resize::ResizeCommand;
pub use stroke::{CellChange, CellStrokeCommand, StrokeRecorder};
