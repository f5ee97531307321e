//! Editor preferences persisted in the user's config directory

mod file;

pub use file::*;

use crate::commands::DEFAULT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Number of entries kept in the recent projects list
pub const MAX_RECENT_PROJECTS: usize = 10;

/// A project opened recently
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentProject {
    pub path: PathBuf,
    pub name: String,
}

/// User preferences. Every field defaults so older files still load.
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorPreferences {
    /// Undo depth kept per map, 0 for unbounded
    pub history_limit: usize,
    /// Indent saved project files
    pub pretty_json: bool,
    pub default_map_width: u32,
    pub default_map_height: u32,
    /// Most recent first
    pub recent_projects: Vec<RecentProject>,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            pretty_json: true,
            default_map_width: 32,
            default_map_height: 32,
            recent_projects: Vec::new(),
        }
    }
}

impl EditorPreferences {
    /// Move `path` to the front of the recent list
    pub fn add_recent_project(&mut self, path: &Path) {
        self.recent_projects.retain(|p| p.path != path);
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Untitled")
            .to_string();
        self.recent_projects.insert(
            0,
            RecentProject {
                path: path.to_path_buf(),
                name,
            },
        );
        self.recent_projects.truncate(MAX_RECENT_PROJECTS);
    }

    /// Map size for newly created maps, never zero
    pub fn default_map_size(&self) -> (u32, u32) {
        (self.default_map_width.max(1), self.default_map_height.max(1))
    }
}
