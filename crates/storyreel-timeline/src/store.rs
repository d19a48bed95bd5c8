//! The clip store: canonical, ordered collection of tracks and clips.
//!
//! Single source of truth for the active edit. Owned exclusively by one
//! editor session; mutations are synchronous and last-writer-wins. Illegal
//! values are rejected or clamped at this boundary and never stored.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::clip::{Clip, ClipKind};
use crate::track::{Track, TrackRole};

/// Canonical collection of tracks and clips.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClipStore {
    tracks: Vec<Track>,
    clips: Vec<Clip>,
}

impl ClipStore {
    /// Create an empty store with no tracks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with the default track scaffold: watermark overlay,
    /// captions, primary visual, narration, and background music.
    pub fn with_default_tracks() -> Self {
        let mut store = Self::new();
        store.push_track(Track::new(ClipKind::Visual, "Watermark", 4).with_role(TrackRole::Spanning));
        store.push_track(Track::new(ClipKind::Caption, "Captions", 3));
        store.push_track(Track::new(ClipKind::Visual, "Scenes", 2).with_role(TrackRole::Primary));
        store.push_track(Track::new(ClipKind::Audio, "Narration", 1));
        store.push_track(Track::new(ClipKind::Audio, "Music", 0).with_role(TrackRole::Spanning));
        store
    }

    // ── Tracks ──────────────────────────────────────────────────

    /// Add a standard track. Returns the new track's ID.
    pub fn add_track(&mut self, kind: ClipKind, label: impl Into<String>) -> Uuid {
        self.add_track_with_role(kind, label, TrackRole::Standard)
    }

    /// Add a track with an explicit duration role.
    pub fn add_track_with_role(
        &mut self,
        kind: ClipKind,
        label: impl Into<String>,
        role: TrackRole,
    ) -> Uuid {
        let order = self.tracks.iter().map(|t| t.order + 1).max().unwrap_or(0);
        let track = Track::new(kind, label, order).with_role(role);
        let id = track.id;
        self.push_track(track);
        id
    }

    fn push_track(&mut self, track: Track) {
        debug!(track = %track.label, ?track.kind, "track added");
        self.tracks.push(track);
    }

    /// All tracks, in creation order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Look up a track by ID.
    pub fn track(&self, id: Uuid) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// The primary visual track, if one exists.
    pub fn primary_track(&self) -> Option<&Track> {
        self.tracks.iter().find(|t| t.role == TrackRole::Primary)
    }

    /// Whole-timeline overlay tracks (watermark, background music).
    pub fn spanning_tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter().filter(|t| t.role == TrackRole::Spanning)
    }

    /// The first track of the given kind, in creation order. This is the
    /// target of the legacy placement rule (see [`ClipStore::resolved_track_id`]).
    pub fn first_track_of_kind(&self, kind: ClipKind) -> Option<&Track> {
        self.tracks.iter().find(|t| t.kind == kind)
    }

    /// Tracks of the given kind, highest display order first.
    pub fn tracks_of_kind(&self, kind: ClipKind) -> Vec<&Track> {
        let mut tracks: Vec<&Track> = self.tracks.iter().filter(|t| t.kind == kind).collect();
        tracks.sort_by(|a, b| b.order.cmp(&a.order));
        tracks
    }

    // ── Clips ───────────────────────────────────────────────────

    /// Insert or replace a clip. Rejects illegal durations at the boundary
    /// and clamps a negative start time to zero; returns whether the clip
    /// was stored.
    pub fn upsert(&mut self, mut clip: Clip) -> bool {
        if !clip.duration.is_finite() || clip.duration <= 0.0 {
            warn!(clip = %clip.id, duration = clip.duration, "rejected clip with illegal duration");
            return false;
        }
        if !clip.start_time.is_finite() {
            warn!(clip = %clip.id, start = clip.start_time, "rejected clip with illegal start time");
            return false;
        }
        if clip.start_time < 0.0 {
            clip.start_time = 0.0;
        }
        match self.clips.iter_mut().find(|c| c.id == clip.id) {
            Some(existing) => *existing = clip,
            None => self.clips.push(clip),
        }
        true
    }

    /// Remove a clip by ID. Returns the removed clip.
    pub fn remove(&mut self, clip_id: Uuid) -> Option<Clip> {
        let index = self.clips.iter().position(|c| c.id == clip_id)?;
        Some(self.clips.remove(index))
    }

    /// Look up a clip by ID.
    pub fn clip(&self, id: Uuid) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == id)
    }

    /// Look up a clip mutably by ID.
    pub fn clip_mut(&mut self, id: Uuid) -> Option<&mut Clip> {
        self.clips.iter_mut().find(|c| c.id == id)
    }

    /// All clips, ordered by start time.
    pub fn all_clips(&self) -> Vec<&Clip> {
        let mut clips: Vec<&Clip> = self.clips.iter().collect();
        clips.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        clips
    }

    /// Clips on a track, ordered by start time.
    ///
    /// Includes legacy clips without an explicit `track_id` when this track
    /// is the first of the clip's kind — see [`ClipStore::resolved_track_id`].
    pub fn clips_on(&self, track_id: Uuid) -> Vec<&Clip> {
        let mut clips: Vec<&Clip> = self
            .clips
            .iter()
            .filter(|c| self.resolved_track_id(c) == Some(track_id))
            .collect();
        clips.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        clips
    }

    /// Number of clips on a track.
    pub fn clip_count_on(&self, track_id: Uuid) -> usize {
        self.clips
            .iter()
            .filter(|c| self.resolved_track_id(c) == Some(track_id))
            .count()
    }

    /// The track a clip belongs to.
    ///
    /// Compatibility rule: clips from legacy documents carry no explicit
    /// track assignment. Those resolve against the first track whose kind
    /// matches the clip's kind. This is the one place the rule lives;
    /// callers must not re-derive it.
    pub fn resolved_track_id(&self, clip: &Clip) -> Option<Uuid> {
        match clip.track_id {
            Some(id) => Some(id),
            None => self.first_track_of_kind(clip.kind).map(|t| t.id),
        }
    }

    // ── Derived timing ──────────────────────────────────────────

    /// Total timeline duration: the maximum clip end on the primary visual
    /// track. Overlay tracks are stretched to match this value, never the
    /// reverse.
    pub fn total_duration(&self) -> f64 {
        let Some(primary) = self.primary_track() else {
            return 0.0;
        };
        self.clips_on(primary.id)
            .iter()
            .map(|c| c.end_time())
            .fold(0.0, f64::max)
    }
}
