//! Project serialization with versioning and migration.
//!
//! JSON with a schema version field for forward-compatible persistence.
//! Legacy documents predate both the version wrapper and explicit clip
//! track assignment; the v0 migration adds the wrapper, while clips
//! without a `track_id` survive verbatim and resolve through the store's
//! kind-matching rule at read time.

use storyreel_core::{Result, StoryReelError};

use serde::{Deserialize, Serialize};

use crate::project::Project;

/// Current schema version.
pub const CURRENT_VERSION: u32 = 1;

/// Versioned project file wrapper.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectFile {
    /// Schema version for migration.
    pub version: u32,
    /// The project data.
    pub project: Project,
    /// Application version that wrote this file.
    pub app_version: String,
}

impl ProjectFile {
    /// Create a new project file from a project.
    pub fn new(project: Project) -> Self {
        Self {
            version: CURRENT_VERSION,
            project,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Serialize to JSON bytes.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(|e| {
            StoryReelError::Serialization(format!("Failed to serialize project: {}", e))
        })
    }

    /// Deserialize from JSON bytes, applying migrations if needed.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        // First, try to read just the version
        let raw: serde_json::Value = serde_json::from_slice(data)
            .map_err(|e| StoryReelError::Serialization(format!("Invalid JSON: {}", e)))?;

        let version = raw.get("version").and_then(|v| v.as_u64()).unwrap_or(0) as u32;

        if version > CURRENT_VERSION {
            return Err(StoryReelError::Serialization(format!(
                "Project file version {} is newer than supported version {}",
                version, CURRENT_VERSION
            )));
        }

        // Apply migrations
        let migrated = migrate(raw, version)?;

        serde_json::from_value(migrated)
            .map_err(|e| StoryReelError::Serialization(format!("Failed to parse project: {}", e)))
    }

    /// Save project to a file path.
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<()> {
        let data = self.to_json()?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Load project from a file path.
    pub fn load_from_file(path: &std::path::Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_json(&data)
    }
}

/// Apply sequential migrations from `from_version` to CURRENT_VERSION.
fn migrate(mut data: serde_json::Value, from_version: u32) -> Result<serde_json::Value> {
    let mut version = from_version;

    while version < CURRENT_VERSION {
        match version {
            0 => {
                // v0 → v1: Add version field, wrap project if needed
                if data.get("version").is_none() {
                    // The entire value IS the project (old format)
                    data = serde_json::json!({
                        "version": 1,
                        "project": data,
                        "app_version": "0.1.0",
                    });
                }
                version = 1;
            }
            _ => {
                return Err(StoryReelError::Serialization(format!(
                    "No migration path from version {}",
                    version
                )));
            }
        }
    }

    Ok(data)
}
