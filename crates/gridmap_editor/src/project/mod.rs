//! Project management for the map editor
//!
//! A [`Project`] holds every open map together with its own undo history and
//! view state, plus the group registry shared by all maps. It converts to and
//! from a [`ProjectEnvelope`] for persistence.

mod envelope;
mod file;
mod sidecar;

pub use envelope::*;
pub use file::*;
pub use sidecar::*;

use crate::commands::{Command, CommandHistory, DEFAULT_HISTORY_LIMIT};
use crate::groups::{GroupRegistry, GroupRemoval, GroupRename};
use crate::preferences::EditorPreferences;
use gridmap_core::{Group, TileMap};
use std::path::PathBuf;
use tracing::{info, warn};
use uuid::Uuid;

/// Name given to the map of a single-map file
pub const LEGACY_MAP_NAME: &str = "main";

/// One open map: the document, its history and how it is being viewed
#[derive(Debug)]
pub struct MapSession {
    pub name: String,
    pub map: TileMap,
    pub history: CommandHistory,
    pub view: MapViewState,
}

impl MapSession {
    fn new(name: String, map: TileMap, history_limit: usize) -> Self {
        let view = MapViewState::new(name.clone());
        Self {
            name,
            map,
            history: CommandHistory::with_limit(history_limit),
            view,
        }
    }
}

/// The entire editor project
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
#[derive(Debug)]
pub struct Project {
    pub path: Option<PathBuf>,
    pub spritesheet: Option<SpritesheetConfig>,
    sessions: Vec<MapSession>,
    groups: GroupRegistry,
    active_map: Option<String>,
    dirty: bool,
    history_limit: usize,
    pretty_json: bool,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            path: None,
            spritesheet: None,
            sessions: Vec::new(),
            groups: GroupRegistry::new(),
            active_map: None,
            dirty: false,
            history_limit: DEFAULT_HISTORY_LIMIT,
            pretty_json: true,
        }
    }
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(preferences: &EditorPreferences) -> Self {
        let mut project = Self::default();
        project.apply_preferences(preferences);
        project
    }

    /// Adopt the history limit and output style from preferences
    pub fn apply_preferences(&mut self, preferences: &EditorPreferences) {
        self.history_limit = preferences.history_limit;
        self.pretty_json = preferences.pretty_json;
        for session in &mut self.sessions {
            session.history.set_limit(self.history_limit);
        }
    }

    /// Mark project as modified
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Check if project has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Get project name (from path)
    pub fn name(&self) -> String {
        self.path
            .as_ref()
            .and_then(|p| p.file_stem())
            .and_then(|s| s.to_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    // Maps

    pub fn map_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn map_names(&self) -> impl Iterator<Item = &str> {
        self.sessions.iter().map(|s| s.name.as_str())
    }

    pub fn sessions(&self) -> &[MapSession] {
        &self.sessions
    }

    pub fn session(&self, name: &str) -> Option<&MapSession> {
        self.sessions.iter().find(|s| s.name == name)
    }

    pub fn session_mut(&mut self, name: &str) -> Option<&mut MapSession> {
        self.sessions.iter_mut().find(|s| s.name == name)
    }

    pub fn map(&self, name: &str) -> Option<&TileMap> {
        self.session(name).map(|s| &s.map)
    }

    /// Mutable access bypasses the history; the project is marked dirty
    pub fn map_mut(&mut self, name: &str) -> Option<&mut TileMap> {
        let session = self.sessions.iter_mut().find(|s| s.name == name)?;
        self.dirty = true;
        Some(&mut session.map)
    }

    pub fn history(&self, name: &str) -> Option<&CommandHistory> {
        self.session(name).map(|s| &s.history)
    }

    pub fn history_mut(&mut self, name: &str) -> Option<&mut CommandHistory> {
        self.session_mut(name).map(|s| &mut s.history)
    }

    /// Add a map. Returns false, changing nothing, when the name is empty or taken.
    pub fn add_map(&mut self, name: impl Into<String>, map: TileMap) -> bool {
        let name = name.into();
        if name.is_empty() || self.session(&name).is_some() {
            return false;
        }
        if self.active_map.is_none() {
            self.active_map = Some(name.clone());
        }
        self.sessions
            .push(MapSession::new(name, map, self.history_limit));
        self.dirty = true;
        true
    }

    /// Remove a map with its history. If it was active, the first remaining
    /// map becomes active.
    pub fn remove_map(&mut self, name: &str) -> Option<TileMap> {
        let position = self.sessions.iter().position(|s| s.name == name)?;
        let session = self.sessions.remove(position);
        if self.active_map.as_deref() == Some(name) {
            self.active_map = self.sessions.first().map(|s| s.name.clone());
        }
        self.dirty = true;
        Some(session.map)
    }

    /// Rename a map. A missing map or a name already in use is a no-op.
    pub fn rename_map(&mut self, old: &str, new: &str) -> bool {
        if new.is_empty() || self.session(new).is_some() {
            return false;
        }
        let Some(session) = self.session_mut(old) else {
            return false;
        };
        session.name = new.to_string();
        session.view.map_name = new.to_string();
        if self.active_map.as_deref() == Some(old) {
            self.active_map = Some(new.to_string());
        }
        self.dirty = true;
        true
    }

    /// Copy a map under a fresh name. Entities in the copy get new ids.
    pub fn duplicate_map(&mut self, name: &str) -> Option<String> {
        let mut duplicate = self.map(name)?.clone();
        for entity in &mut duplicate.entities {
            entity.id = Uuid::new_v4();
        }

        let mut new_name = format!("{} (Copy)", name);
        let mut n = 2;
        while self.session(&new_name).is_some() {
            new_name = format!("{} (Copy {})", name, n);
            n += 1;
        }

        self.add_map(new_name.clone(), duplicate);
        Some(new_name)
    }

    pub fn active_map(&self) -> Option<&str> {
        self.active_map.as_deref()
    }

    pub fn set_active_map(&mut self, name: &str) -> bool {
        if self.session(name).is_none() {
            return false;
        }
        self.active_map = Some(name.to_string());
        true
    }

    // Commands

    /// Execute a command on a map and record it in that map's history
    pub fn apply(&mut self, map_name: &str, command: Box<dyn Command>) -> bool {
        let Some(session) = self.session_mut(map_name) else {
            return false;
        };
        let applied = session.history.execute(command, &mut session.map);
        self.dirty |= applied;
        applied
    }

    /// Record a command that was already applied to the map (strokes, fills)
    pub fn record(&mut self, map_name: &str, command: Box<dyn Command>) -> bool {
        let Some(session) = self.session_mut(map_name) else {
            return false;
        };
        let recorded = session.history.push(command);
        self.dirty |= recorded;
        recorded
    }

    pub fn undo(&mut self, map_name: &str) -> bool {
        let Some(session) = self.session_mut(map_name) else {
            return false;
        };
        let undone = session.history.undo(&mut session.map);
        self.dirty |= undone;
        undone
    }

    pub fn redo(&mut self, map_name: &str) -> bool {
        let Some(session) = self.session_mut(map_name) else {
            return false;
        };
        let redone = session.history.redo(&mut session.map);
        self.dirty |= redone;
        redone
    }

    // Groups

    pub fn groups(&self) -> &GroupRegistry {
        &self.groups
    }

    /// Direct registry access. Cascades started here only reach the maps
    /// passed in; prefer [`remove_group`](Self::remove_group) and
    /// [`rename_group`](Self::rename_group).
    pub fn groups_mut(&mut self) -> &mut GroupRegistry {
        &mut self.groups
    }

    pub fn add_group(&mut self, group: Group) {
        self.groups.add(group);
        self.dirty = true;
    }

    /// Remove a group from the registry and every map.
    ///
    /// All histories are cleared since recorded commands may still write the
    /// removed name.
    pub fn remove_group(&mut self, name: &str) -> Option<GroupRemoval> {
        let removal = self
            .groups
            .remove(name, self.sessions.iter_mut().map(|s| &mut s.map))?;
        self.clear_histories();
        self.dirty = true;
        Some(removal)
    }

    /// Rename a group in the registry and every map, clearing all histories.
    pub fn rename_group(&mut self, old: &str, new: &str) -> Option<GroupRename> {
        let rename = self
            .groups
            .rename(old, new, self.sessions.iter_mut().map(|s| &mut s.map))?;
        self.clear_histories();
        self.dirty = true;
        Some(rename)
    }

    fn clear_histories(&mut self) {
        for session in &mut self.sessions {
            session.history.clear();
        }
    }

    // Persistence

    /// Snapshot the project as a named-map envelope with editor state
    pub fn to_envelope(&self) -> ProjectEnvelope {
        let maps = self
            .sessions
            .iter()
            .map(|s| NamedMap::new(s.name.clone(), s.map.clone()))
            .collect();

        let sidecar = EditorSidecar {
            active_map_name: self.active_map.clone(),
            map_states: self
                .sessions
                .iter()
                .map(|s| MapViewState {
                    map_name: s.name.clone(),
                    ..s.view.clone()
                })
                .collect(),
        };

        let mut envelope = ProjectEnvelope::new(Documents::Maps(maps))
            .with_groups(self.groups.to_vec())
            .with_editor_state(sidecar);
        envelope.spritesheet = self.spritesheet;
        envelope
    }

    /// Build a project from a loaded envelope. A single-map file becomes one
    /// map named [`LEGACY_MAP_NAME`].
    pub fn from_envelope(envelope: ProjectEnvelope) -> Self {
        let mut project = Project {
            spritesheet: envelope.spritesheet,
            groups: GroupRegistry::from_groups(restore_groups(&envelope)),
            ..Default::default()
        };

        if let Some(map) = restore_single_map(&envelope) {
            project.add_map(LEGACY_MAP_NAME, map);
        }
        for entry in envelope.maps() {
            if !project.add_map(entry.name.clone(), restore_map_document(entry)) {
                warn!("Skipping map with duplicate or empty name '{}'", entry.name);
            }
        }

        if let Some(sidecar) = &envelope.editor_state {
            for session in &mut project.sessions {
                if let Some(state) = sidecar.state_for(&session.name) {
                    session.view = state.clone();
                }
            }
            if let Some(active) = &sidecar.active_map_name {
                if !project.set_active_map(active) {
                    info!("Saved active map '{}' no longer exists", active);
                }
            }
        }

        project.dirty = false;
        project
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{flood_fill, ClearRegionCommand};
    use gridmap_core::{CellRect, EntityInstance};

    fn painted(value: &str) -> TileMap {
        let mut map = TileMap::new(4, 4);
        map.add_layer("Ground");
        map.set_cell(0, 0, 0, Some(value.to_string()));
        map
    }

    fn project() -> Project {
        let mut project = Project::new();
        project.add_group(Group::tile("grass"));
        project.add_group(Group::tile("sand"));
        project.add_map("town", painted("grass"));
        project.add_map("cave", painted("sand"));
        project
    }

    #[test]
    fn test_add_and_remove_maps() {
        let mut project = project();
        assert_eq!(project.active_map(), Some("town"));
        assert!(!project.add_map("town", TileMap::new(1, 1)));
        assert!(!project.add_map("", TileMap::new(1, 1)));
        assert_eq!(project.map_count(), 2);

        let removed = project.remove_map("town").unwrap();
        assert_eq!(removed.get_cell(0, 0, 0), Some("grass"));
        assert_eq!(project.active_map(), Some("cave"));
        assert!(project.remove_map("town").is_none());
    }

    #[test]
    fn test_rename_map_collision_is_noop() {
        let mut project = project();
        assert!(!project.rename_map("town", "cave"));
        assert!(!project.rename_map("nowhere", "village"));
        assert_eq!(project.map_names().collect::<Vec<_>>(), ["town", "cave"]);

        assert!(project.rename_map("town", "village"));
        assert_eq!(project.active_map(), Some("village"));
        assert_eq!(project.session("village").unwrap().view.map_name, "village");
    }

    #[test]
    fn test_duplicate_map_gets_fresh_name_and_ids() {
        let mut project = project();
        project
            .map_mut("town")
            .unwrap()
            .add_entity(EntityInstance::new("npc", 1, 1));

        let first = project.duplicate_map("town").unwrap();
        let second = project.duplicate_map("town").unwrap();
        assert_eq!(first, "town (Copy)");
        assert_eq!(second, "town (Copy 2)");
        assert_ne!(
            project.map("town").unwrap().entities[0].id,
            project.map(&first).unwrap().entities[0].id
        );
    }

    #[test]
    fn test_histories_are_per_map() {
        let mut project = project();
        let clear = ClearRegionCommand::new(
            project.map("town").unwrap(),
            0,
            CellRect::new(0, 0, 4, 4),
        );
        assert!(project.apply("town", Box::new(clear)));

        let fill = flood_fill(project.map_mut("cave").unwrap(), 0, 3, 3, Some("sand".into()))
            .unwrap();
        assert!(project.record("cave", Box::new(fill)));

        assert!(project.undo("town"));
        assert_eq!(project.map("town").unwrap().get_cell(0, 0, 0), Some("grass"));
        assert_eq!(project.map("cave").unwrap().get_cell(0, 3, 3), Some("sand"));
        assert!(project.history("cave").unwrap().can_undo());
        assert!(!project.undo("nowhere"));
    }

    #[test]
    fn test_group_cascade_reaches_every_map_and_clears_histories() {
        let mut project = project();
        let clear = ClearRegionCommand::new(
            project.map("town").unwrap(),
            0,
            CellRect::new(0, 0, 1, 1),
        );
        project.apply("town", Box::new(clear));
        project.undo("town");
        assert!(project.history("town").unwrap().can_redo());

        let rename = project.rename_group("grass", "meadow").unwrap();
        assert_eq!(rename.cells_rewritten, 1);
        assert_eq!(project.map("town").unwrap().get_cell(0, 0, 0), Some("meadow"));
        assert!(!project.history("town").unwrap().can_redo());

        let removal = project.remove_group("sand").unwrap();
        assert_eq!(removal.cells_cleared, 1);
        assert_eq!(project.map("cave").unwrap().get_cell(0, 0, 0), None);
        assert!(project.rename_group("meadow", "meadow").is_none());
    }

    #[test]
    fn test_envelope_round_trip_keeps_view_state() {
        let mut project = project();
        project.set_active_map("cave");
        {
            let view = &mut project.session_mut("cave").unwrap().view;
            view.zoom_index = 3;
            view.active_layer = Some("Ground".to_string());
        }

        let envelope = project.to_envelope();
        assert_eq!(envelope.version(), FormatVersion::V2);

        let restored = Project::from_envelope(envelope);
        assert_eq!(restored.active_map(), Some("cave"));
        assert_eq!(restored.session("cave").unwrap().view.zoom_index, 3);
        assert_eq!(restored.groups().len(), 2);
        assert!(!restored.is_dirty());
    }

    #[test]
    fn test_legacy_envelope_becomes_main() {
        let envelope = ProjectEnvelope::new(Documents::Legacy(painted("grass")));
        let project = Project::from_envelope(envelope);
        assert_eq!(project.map_names().collect::<Vec<_>>(), [LEGACY_MAP_NAME]);
        assert_eq!(project.active_map(), Some(LEGACY_MAP_NAME));
    }

    #[test]
    fn test_preferences_set_history_limit() {
        let prefs = EditorPreferences {
            history_limit: 5,
            ..Default::default()
        };
        let mut project = Project::with_preferences(&prefs);
        project.add_map("town", painted("grass"));
        assert_eq!(project.history("town").unwrap().limit(), 5);
    }
}
