//! Versioned project file format
//!
//! Two shapes share one envelope:
//! - version 1 stores a single map under `map`
//! - version 2 stores named maps under `maps`
//!
//! Reading decides between them only by whether `maps` is populated, so the
//! loaded [`Documents`] is always exactly one of the two.

use gridmap_core::{Group, TileMap};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{EditorSidecar, ProjectError};

/// Format version of single-map files
pub const LEGACY_FORMAT_VERSION: u32 = 1;
/// Format version written by the editor
pub const FORMAT_VERSION: u32 = 2;

/// Which shape an envelope has. `Unknown` until the file has been parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatVersion {
    #[default]
    Unknown,
    V1,
    V2,
}

impl FormatVersion {
    /// The `version` number written for this shape
    pub fn number(&self) -> Option<u32> {
        match self {
            FormatVersion::Unknown => None,
            FormatVersion::V1 => Some(LEGACY_FORMAT_VERSION),
            FormatVersion::V2 => Some(FORMAT_VERSION),
        }
    }

    /// Decide the shape of a parsed envelope.
    ///
    /// Only `Unknown` can be classified; V1 and V2 are final.
    pub fn classify(
        self,
        version: u32,
        has_maps: bool,
        has_map: bool,
    ) -> Result<FormatVersion, ProjectError> {
        if self != FormatVersion::Unknown {
            return Ok(self);
        }
        if version != LEGACY_FORMAT_VERSION && version != FORMAT_VERSION {
            return Err(ProjectError::UnsupportedVersion(version));
        }
        if has_maps {
            if has_map {
                warn!("File has both 'map' and 'maps'; ignoring 'map'");
            }
            Ok(FormatVersion::V2)
        } else if has_map {
            Ok(FormatVersion::V1)
        } else if version == FORMAT_VERSION {
            // A version 2 file with no maps at all
            Ok(FormatVersion::V2)
        } else {
            Err(ProjectError::Format(
                "version 1 file contains no map".to_string(),
            ))
        }
    }
}

/// One map of a version 2 file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedMap {
    pub name: String,
    pub map: TileMap,
}

impl NamedMap {
    pub fn new(name: impl Into<String>, map: TileMap) -> Self {
        Self {
            name: name.into(),
            map,
        }
    }
}

/// The maps in a project file
#[derive(Debug, Clone, PartialEq)]
pub enum Documents {
    /// A single unnamed map (version 1)
    Legacy(TileMap),
    /// Any number of named maps (version 2)
    Maps(Vec<NamedMap>),
}

impl Documents {
    pub fn version(&self) -> FormatVersion {
        match self {
            Documents::Legacy(_) => FormatVersion::V1,
            Documents::Maps(_) => FormatVersion::V2,
        }
    }
}

/// Sprite sheet layout. Stored for the renderer; the editor core never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpritesheetConfig {
    pub tile_width: u32,
    pub tile_height: u32,
    #[serde(default)]
    pub padding: u32,
}

/// Everything stored in one project file
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectEnvelope {
    pub documents: Documents,
    pub groups: Vec<Group>,
    pub spritesheet: Option<SpritesheetConfig>,
    pub editor_state: Option<EditorSidecar>,
}

/// Written form. Empty and absent fields are left out.
#[derive(Serialize)]
struct EnvelopeOut<'a> {
    version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    map: Option<&'a TileMap>,
    #[serde(skip_serializing_if = "<[NamedMap]>::is_empty")]
    maps: &'a [NamedMap],
    #[serde(skip_serializing_if = "<[Group]>::is_empty")]
    groups: &'a [Group],
    #[serde(skip_serializing_if = "Option::is_none")]
    spritesheet: Option<&'a SpritesheetConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    editor_state: Option<&'a EditorSidecar>,
}

/// Read form. Missing fields default; the sidecar stays raw until the rest
/// has decoded.
#[derive(Deserialize)]
struct EnvelopeIn {
    version: u32,
    #[serde(default)]
    map: Option<TileMap>,
    #[serde(default)]
    maps: Vec<NamedMap>,
    #[serde(default)]
    groups: Vec<Group>,
    #[serde(default)]
    spritesheet: Option<SpritesheetConfig>,
    #[serde(default)]
    editor_state: Option<serde_json::Value>,
}

impl ProjectEnvelope {
    pub fn new(documents: Documents) -> Self {
        Self {
            documents,
            groups: Vec::new(),
            spritesheet: None,
            editor_state: None,
        }
    }

    pub fn with_groups(mut self, groups: Vec<Group>) -> Self {
        self.groups = groups;
        self
    }

    pub fn with_spritesheet(mut self, spritesheet: SpritesheetConfig) -> Self {
        self.spritesheet = Some(spritesheet);
        self
    }

    pub fn with_editor_state(mut self, editor_state: EditorSidecar) -> Self {
        self.editor_state = Some(editor_state);
        self
    }

    pub fn version(&self) -> FormatVersion {
        self.documents.version()
    }

    /// The map of a version 1 file
    pub fn single_map(&self) -> Option<&TileMap> {
        match &self.documents {
            Documents::Legacy(map) => Some(map),
            Documents::Maps(_) => None,
        }
    }

    /// The maps of a version 2 file (empty for version 1)
    pub fn maps(&self) -> &[NamedMap] {
        match &self.documents {
            Documents::Legacy(_) => &[],
            Documents::Maps(maps) => maps,
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self, pretty: bool) -> Result<String, ProjectError> {
        let out = EnvelopeOut {
            version: self.version().number().unwrap_or(FORMAT_VERSION),
            map: self.single_map(),
            maps: self.maps(),
            groups: &self.groups,
            spritesheet: self.spritesheet.as_ref(),
            editor_state: self.editor_state.as_ref().filter(|s| !s.is_empty()),
        };
        let result = if pretty {
            serde_json::to_string_pretty(&out)
        } else {
            serde_json::to_string(&out)
        };
        result.map_err(ProjectError::Serialize)
    }

    /// Parse and validate JSON
    pub fn from_json(text: &str) -> Result<Self, ProjectError> {
        let raw: EnvelopeIn = serde_json::from_str(text).map_err(ProjectError::Parse)?;

        let version = FormatVersion::Unknown.classify(
            raw.version,
            !raw.maps.is_empty(),
            raw.map.is_some(),
        )?;

        let documents = match (version, raw.map) {
            (FormatVersion::V1, Some(map)) => {
                validate_map("map", &map)?;
                Documents::Legacy(map)
            }
            _ => {
                for entry in &raw.maps {
                    validate_map(&entry.name, &entry.map)?;
                }
                Documents::Maps(raw.maps)
            }
        };

        let editor_state = raw.editor_state.and_then(decode_sidecar);

        Ok(Self {
            documents,
            groups: raw.groups,
            spritesheet: raw.spritesheet,
            editor_state,
        })
    }
}

fn validate_map(name: &str, map: &TileMap) -> Result<(), ProjectError> {
    if map.width == 0 || map.height == 0 {
        return Err(ProjectError::Format(format!(
            "map '{}' has zero size {}x{}",
            name, map.width, map.height
        )));
    }
    if let Some(layer) = map
        .layers
        .iter()
        .find(|l| l.cells.len() != map.cell_count())
    {
        return Err(ProjectError::Format(format!(
            "layer '{}' of map '{}' has {} cells, expected {}",
            layer.name,
            name,
            layer.cells.len(),
            map.cell_count()
        )));
    }
    Ok(())
}

fn decode_sidecar(value: serde_json::Value) -> Option<EditorSidecar> {
    match serde_json::from_value(value) {
        Ok(sidecar) => Some(sidecar),
        Err(e) => {
            warn!("Ignoring unreadable editor state: {}", e);
            None
        }
    }
}

/// Rebuild the map of a version 1 envelope. `None` for version 2.
pub fn restore_single_map(envelope: &ProjectEnvelope) -> Option<TileMap> {
    envelope.single_map().cloned()
}

/// Rebuild one named map of a version 2 envelope
pub fn restore_map_document(entry: &NamedMap) -> TileMap {
    entry.map.clone()
}

/// Rebuild the group list
pub fn restore_groups(envelope: &ProjectEnvelope) -> Vec<Group> {
    envelope.groups.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridmap_core::EntityInstance;

    fn sample_map(tag: &str) -> TileMap {
        let mut map = TileMap::new(3, 2);
        map.add_layer("Ground");
        map.set_cell(0, 1, 1, Some(format!("{tag}_tile")));
        map.add_entity(EntityInstance::new(format!("{tag}_npc"), 2, 0).with_property("tag", tag));
        map
    }

    #[test]
    fn test_classify_state_machine() {
        let unknown = FormatVersion::Unknown;
        assert_eq!(unknown.classify(2, true, false).unwrap(), FormatVersion::V2);
        assert_eq!(unknown.classify(1, false, true).unwrap(), FormatVersion::V1);
        assert_eq!(unknown.classify(1, true, true).unwrap(), FormatVersion::V2);
        assert_eq!(unknown.classify(2, false, false).unwrap(), FormatVersion::V2);
        assert!(matches!(
            unknown.classify(1, false, false),
            Err(ProjectError::Format(_))
        ));
        assert!(matches!(
            unknown.classify(3, true, false),
            Err(ProjectError::UnsupportedVersion(3))
        ));
        // Terminal states stay put
        assert_eq!(
            FormatVersion::V1.classify(2, true, false).unwrap(),
            FormatVersion::V1
        );
    }

    #[test]
    fn test_v2_round_trip() {
        let envelope = ProjectEnvelope::new(Documents::Maps(vec![
            NamedMap::new("town", sample_map("town")),
            NamedMap::new("cave", sample_map("cave")),
        ]))
        .with_groups(vec![Group::tile("town_tile"), Group::entity("town_npc")]);

        let json = envelope.to_json(false).unwrap();
        assert!(json.starts_with(r#"{"version":2,"maps":"#));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("map").is_none());
        assert!(value.get("editor_state").is_none());

        let loaded = ProjectEnvelope::from_json(&json).unwrap();
        assert_eq!(loaded.version(), FormatVersion::V2);
        assert!(loaded.single_map().is_none());
        assert_eq!(loaded, envelope);
    }

    #[test]
    fn test_v1_round_trip() {
        let envelope = ProjectEnvelope::new(Documents::Legacy(sample_map("old")));

        let json = envelope.to_json(true).unwrap();
        assert!(!json.contains("\"maps\""));

        let loaded = ProjectEnvelope::from_json(&json).unwrap();
        assert_eq!(loaded.version(), FormatVersion::V1);
        assert!(loaded.maps().is_empty());
        assert_eq!(restore_single_map(&loaded), envelope.single_map().cloned());
        assert_eq!(loaded, envelope);
    }

    #[test]
    fn test_hand_written_v1_file() {
        let json = r#"{
            "version": 1,
            "map": {
                "width": 2,
                "height": 1,
                "layers": [{ "name": "Ground", "cells": ["grass", null] }],
                "entities": [{ "group_name": "npc", "x": 1, "y": 0 }]
            },
            "groups": [{ "name": "grass" }, { "name": "npc", "type": "Entity" }],
            "spritesheet": { "tile_width": 16, "tile_height": 16 }
        }"#;

        let envelope = ProjectEnvelope::from_json(json).unwrap();
        assert_eq!(envelope.version(), FormatVersion::V1);
        let map = restore_single_map(&envelope).unwrap();
        assert_eq!(map.get_cell(0, 0, 0), Some("grass"));
        assert_eq!(map.entities.len(), 1);
        assert!(map.layers[0].visible);
        assert_eq!(restore_groups(&envelope).len(), 2);
        assert_eq!(envelope.spritesheet.unwrap().padding, 0);
        assert!(envelope.editor_state.is_none());
    }

    #[test]
    fn test_bad_sidecar_does_not_block_maps() {
        let json = r#"{
            "version": 2,
            "maps": [{ "name": "town", "map": { "width": 1, "height": 1 } }],
            "editor_state": { "map_states": "not a list" }
        }"#;

        let envelope = ProjectEnvelope::from_json(json).unwrap();
        assert_eq!(envelope.maps().len(), 1);
        assert!(envelope.editor_state.is_none());
    }

    #[test]
    fn test_malformed_files_are_errors() {
        assert!(matches!(
            ProjectEnvelope::from_json("{ not json"),
            Err(ProjectError::Parse(_))
        ));
        assert!(matches!(
            ProjectEnvelope::from_json(r#"{"maps": []}"#),
            Err(ProjectError::Parse(_))
        ));
        assert!(matches!(
            ProjectEnvelope::from_json(r#"{"version": 7, "maps": []}"#),
            Err(ProjectError::UnsupportedVersion(7))
        ));
        let bad_layer = r#"{
            "version": 2,
            "maps": [{ "name": "town", "map": {
                "width": 2, "height": 2,
                "layers": [{ "name": "Ground", "cells": [null] }]
            } }]
        }"#;
        assert!(matches!(
            ProjectEnvelope::from_json(bad_layer),
            Err(ProjectError::Format(_))
        ));
    }

    #[test]
    fn test_restore_is_independent_of_envelope() {
        let envelope = ProjectEnvelope::new(Documents::Maps(vec![NamedMap::new(
            "town",
            sample_map("town"),
        )]));

        let mut restored = restore_map_document(&envelope.maps()[0]);
        restored.set_cell(0, 0, 0, Some("changed".into()));
        assert_eq!(envelope.maps()[0].map.get_cell(0, 0, 0), None);
        assert!(restore_single_map(&envelope).is_none());
    }
}
