//! Track types for the timeline.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clip::ClipKind;

/// How a track participates in timeline-wide duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrackRole {
    /// The visual track that derives the timeline's total duration.
    Primary,
    /// Whole-timeline overlay (watermark, background music): kept as a
    /// single clip stretched over `[0, total_duration)` by the
    /// synchronizer.
    Spanning,
    /// Ordinary lane.
    #[default]
    Standard,
}

/// A named lane constraining which clip kinds may be placed on it and
/// their rendering order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track ID
    pub id: Uuid,
    /// Which clip kind this track hosts
    pub kind: ClipKind,
    /// Track name
    pub label: String,
    /// Display/z order; higher renders on top
    pub order: u32,
    /// Duration participation
    #[serde(default)]
    pub role: TrackRole,
}

impl Track {
    /// Create a new standard track.
    pub fn new(kind: ClipKind, label: impl Into<String>, order: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            label: label.into(),
            order,
            role: TrackRole::Standard,
        }
    }

    /// Set the track's duration role.
    pub fn with_role(mut self, role: TrackRole) -> Self {
        self.role = role;
        self
    }
}
