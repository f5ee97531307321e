//! Editor-only view state saved next to the maps

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Camera and panel state for one map
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapViewState {
    pub map_name: String,
    #[serde(default)]
    pub camera_x: f32,
    #[serde(default)]
    pub camera_y: f32,
    #[serde(default)]
    pub zoom_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_layer: Option<String>,
    /// Names of layers collapsed in the layer panel
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub collapsed_layers: BTreeSet<String>,
}

impl MapViewState {
    pub fn new(map_name: impl Into<String>) -> Self {
        Self {
            map_name: map_name.into(),
            ..Default::default()
        }
    }
}

/// Optional editor state stored under `editor_state`
///
/// Decoded after the maps and groups; a missing or unreadable sidecar only
/// loses view state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EditorSidecar {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_map_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub map_states: Vec<MapViewState>,
}

impl EditorSidecar {
    /// View state saved for a map, if any
    pub fn state_for(&self, map_name: &str) -> Option<&MapViewState> {
        self.map_states.iter().find(|s| s.map_name == map_name)
    }

    pub fn is_empty(&self) -> bool {
        self.active_map_name.is_none() && self.map_states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_encoding() {
        let sidecar = EditorSidecar {
            active_map_name: None,
            map_states: vec![MapViewState::new("town")],
        };
        let json = serde_json::to_string(&sidecar).unwrap();
        assert_eq!(
            json,
            r#"{"map_states":[{"map_name":"town","camera_x":0.0,"camera_y":0.0,"zoom_index":0}]}"#
        );
    }

    #[test]
    fn test_state_for() {
        let mut town = MapViewState::new("town");
        town.collapsed_layers.insert("Roofs".to_string());
        let sidecar = EditorSidecar {
            active_map_name: Some("town".to_string()),
            map_states: vec![town],
        };

        assert!(sidecar.state_for("town").unwrap().collapsed_layers.contains("Roofs"));
        assert!(sidecar.state_for("cave").is_none());
        assert!(!sidecar.is_empty());
        assert!(EditorSidecar::default().is_empty());
    }
}
