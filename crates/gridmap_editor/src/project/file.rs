//! Project file save/load operations

use super::{Project, ProjectEnvelope};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Project file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Invalid project file: {0}")]
    Format(String),

    #[error("Unsupported project file version {0}")]
    UnsupportedVersion(u32),

    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("No file path set")]
    NoPath,
}

/// Read and validate a project file
pub fn load_envelope(path: &Path) -> Result<ProjectEnvelope, ProjectError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ProjectError::NotFound(path.to_path_buf()),
        _ => ProjectError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    ProjectEnvelope::from_json(&content)
}

/// Write a project file
pub fn save_envelope(
    path: &Path,
    envelope: &ProjectEnvelope,
    pretty: bool,
) -> Result<(), ProjectError> {
    let content = envelope.to_json(pretty)?;
    std::fs::write(path, content).map_err(|e| ProjectError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

impl Project {
    /// Load project from file
    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        let envelope = load_envelope(path)?;
        let mut project = Project::from_envelope(envelope);
        project.path = Some(path.to_path_buf());

        info!(
            "Loaded project '{}' with {} map(s) and {} group(s)",
            project.name(),
            project.map_count(),
            project.groups.len()
        );

        Ok(project)
    }

    /// Save project to file. Always writes the named-map format.
    pub fn save(&mut self, path: &Path) -> Result<(), ProjectError> {
        save_envelope(path, &self.to_envelope(), self.pretty_json)?;

        self.path = Some(path.to_path_buf());
        self.dirty = false;

        info!("Saved project to {}", path.display());
        Ok(())
    }

    /// Save to current path if set
    pub fn save_current(&mut self) -> Result<(), ProjectError> {
        if let Some(path) = self.path.clone() {
            self.save(&path)
        } else {
            Err(ProjectError::NoPath)
        }
    }
}
