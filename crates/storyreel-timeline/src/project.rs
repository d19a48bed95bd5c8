//! The project document: the full serializable state of one edit.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::ClipStore;

/// A StoryReel project: tracks, clips, and the persisted playback state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project ID
    pub id: Uuid,
    /// Project name
    pub name: String,
    /// Tracks and clips
    pub store: ClipStore,
    /// Persisted playhead position, seconds
    #[serde(default)]
    pub playhead: f64,
    /// Persisted clip selection
    #[serde(default)]
    pub selected_clip: Option<Uuid>,
}

impl Project {
    /// Create a new project with the default track scaffold.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            store: ClipStore::with_default_tracks(),
            playhead: 0.0,
            selected_clip: None,
        }
    }

    /// Total timeline duration (derived from the primary visual track).
    pub fn total_duration(&self) -> f64 {
        self.store.total_duration()
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new("Untitled Story")
    }
}
