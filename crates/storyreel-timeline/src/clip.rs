//! Clip types for the timeline.

use serde::{Deserialize, Serialize};
use storyreel_core::{ContentRef, TimeRange};
use uuid::Uuid;

/// What a clip carries. Also constrains which tracks may host it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClipKind {
    Visual,
    Audio,
    Caption,
}

/// A timed placement of one piece of content on a track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    /// Unique clip ID
    pub id: Uuid,
    /// Content kind
    pub kind: ClipKind,
    /// Owning track. `None` only in legacy documents that predate explicit
    /// track assignment; the store resolves those against the first track
    /// of matching kind.
    #[serde(default)]
    pub track_id: Option<Uuid>,
    /// Start time on the timeline, seconds
    pub start_time: f64,
    /// Duration, seconds (always > 0 once stored)
    pub duration: f64,
    /// Reference to the image, audio, or text payload
    pub content: ContentRef,
    /// Optional display name
    #[serde(default)]
    pub label: Option<String>,
}

impl Clip {
    /// Create a new clip on a track.
    pub fn new(
        kind: ClipKind,
        track_id: Uuid,
        start_time: f64,
        duration: f64,
        content: ContentRef,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            track_id: Some(track_id),
            start_time,
            duration,
            content,
            label: None,
        }
    }

    /// Attach a display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// End time on the timeline (exclusive).
    #[inline]
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// The clip's timeline range.
    #[inline]
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.duration)
    }

    /// Check if the clip is active at the given time.
    #[inline]
    pub fn contains(&self, time: f64) -> bool {
        self.range().contains(time)
    }

    /// Visual midpoint on the timeline, used by drag-reorder targeting.
    #[inline]
    pub fn midpoint(&self) -> f64 {
        self.start_time + self.duration / 2.0
    }
}
