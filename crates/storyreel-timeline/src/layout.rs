//! Placement algorithms for drag, resize, and drop-insert operations.
//!
//! All placement math is pure (it plans against an ordered clip slice);
//! the `*_with_ripple` / `resize_*` entry points apply a plan back to the
//! store. Tracks are laid out independently, which keeps overlap checks
//! O(clips-per-track) and lets visual, audio, and caption edits proceed
//! without interfering.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::clip::{Clip, ClipKind};
use crate::store::ClipStore;
use crate::track::TrackRole;
use storyreel_core::ContentRef;

/// Floor for trailing-edge resize, seconds.
pub const MIN_CLIP_DURATION: f64 = 1.0;
/// Floor for leading-edge resize and for a co-adjusted predecessor, seconds.
pub const MIN_TRIMMED_DURATION: f64 = 0.5;
/// Two clips closer than this are treated as edge-connected.
pub const EDGE_SNAP_TOLERANCE: f64 = 0.05;
/// Duration for dropped media that arrives without a usable hint, seconds.
pub const DEFAULT_DROP_DURATION: f64 = 3.0;

/// Payload accepted at the drop/import boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaDrop {
    pub kind: ClipKind,
    pub content: ContentRef,
    #[serde(default)]
    pub label: Option<String>,
    /// Duration hint from the asset provider, seconds.
    #[serde(default)]
    pub duration_hint: Option<f64>,
}

impl MediaDrop {
    /// Create a drop payload.
    pub fn new(kind: ClipKind, content: ContentRef) -> Self {
        Self {
            kind,
            content,
            label: None,
            duration_hint: None,
        }
    }

    /// Attach a duration hint.
    pub fn with_duration_hint(mut self, seconds: f64) -> Self {
        self.duration_hint = Some(seconds);
        self
    }

    /// Attach a display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The duration the dropped clip will take, falling back to the
    /// default when the hint is absent or unusable.
    pub fn resolved_duration(&self) -> f64 {
        match self.duration_hint {
            Some(hint) if hint.is_finite() && hint > 0.0 => hint,
            _ => DEFAULT_DROP_DURATION,
        }
    }
}

// ── Insertion with ripple ───────────────────────────────────────

/// A resolved insertion: where the new clip lands and which existing
/// clips ripple later to make room.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertionPlan {
    /// Resolved start time of the inserted clip.
    pub start: f64,
    /// Clips whose `start_time >= start`, to be shifted by the inserted
    /// duration in their existing order.
    pub shifted: Vec<Uuid>,
}

/// Plan an insertion at `drop_time` into a track's ordered clips.
///
/// If a clip's interval contains the drop position, the insertion snaps to
/// that blocking clip's start (insert-before). Otherwise the drop position
/// is used unchanged, or 0 on an empty track.
pub fn plan_insertion(existing: &[&Clip], drop_time: f64) -> InsertionPlan {
    if existing.is_empty() {
        return InsertionPlan {
            start: 0.0,
            shifted: Vec::new(),
        };
    }
    let start = existing
        .iter()
        .find(|c| c.contains(drop_time))
        .map(|blocking| blocking.start_time)
        .unwrap_or(drop_time);
    let shifted = existing
        .iter()
        .filter(|c| c.start_time >= start)
        .map(|c| c.id)
        .collect();
    InsertionPlan { start, shifted }
}

/// Insert dropped media into a track at `drop_time`, rippling later clips
/// by the new clip's duration. Returns the new clip's ID, or `None` when
/// the drop is incompatible with the track.
pub fn insert_with_ripple(
    store: &mut ClipStore,
    track_id: Uuid,
    drop: MediaDrop,
    drop_time: f64,
) -> Option<Uuid> {
    let Some(track) = store.track(track_id) else {
        warn!(%track_id, "drop onto unknown track ignored");
        return None;
    };
    if track.kind != drop.kind {
        warn!(
            track = %track.label,
            ?drop.kind,
            "drop kind does not match track kind, ignored"
        );
        return None;
    }
    let drop_time = if drop_time.is_finite() {
        drop_time.max(0.0)
    } else {
        0.0
    };

    let duration = drop.resolved_duration();
    let plan = plan_insertion(&store.clips_on(track_id), drop_time);
    apply_ripple(store, &plan.shifted, duration);

    let mut clip = Clip::new(drop.kind, track_id, plan.start, duration, drop.content);
    clip.label = drop.label;
    let id = clip.id;
    debug!(clip = %id, start = plan.start, duration, "ripple insert");
    store.upsert(clip);
    Some(id)
}

/// Move an existing clip to `drop_time` on a destination track (possibly
/// its own), using the same ripple-insert semantics. Returns false when
/// the move is incompatible and leaves the store unchanged.
pub fn move_with_ripple(
    store: &mut ClipStore,
    clip_id: Uuid,
    dest_track_id: Uuid,
    drop_time: f64,
) -> bool {
    let Some(clip) = store.clip(clip_id) else {
        return false;
    };
    let compatible = store
        .track(dest_track_id)
        .is_some_and(|t| t.kind == clip.kind);
    if !compatible {
        warn!(clip = %clip_id, "move to incompatible track ignored");
        return false;
    }

    // Take the clip out so it does not block its own insertion.
    let mut clip = store.remove(clip_id).expect("clip exists");
    let plan = plan_insertion(&store.clips_on(dest_track_id), drop_time.max(0.0));
    apply_ripple(store, &plan.shifted, clip.duration);

    clip.start_time = plan.start;
    clip.track_id = Some(dest_track_id);
    store.upsert(clip);
    true
}

fn apply_ripple(store: &mut ClipStore, shifted: &[Uuid], delta: f64) {
    for id in shifted {
        if let Some(clip) = store.clip_mut(*id) {
            clip.start_time += delta;
        }
    }
}

// ── Edge resize ─────────────────────────────────────────────────

/// Resize a clip by its trailing edge: duration changes, start does not.
///
/// The duration is clamped to `[MIN_CLIP_DURATION, next_clip_start - start]`.
/// With no following clip the upper bound is the timeline's total duration;
/// on the primary track that bound is the clip's own end, so the trailing
/// edge of the last primary clip is unbounded above.
pub fn resize_right(store: &mut ClipStore, clip_id: Uuid, requested_duration: f64) {
    if !requested_duration.is_finite() {
        return;
    }
    let Some(clip) = store.clip(clip_id) else {
        return;
    };
    let Some(track_id) = store.resolved_track_id(clip) else {
        return;
    };
    let start = clip.start_time;
    let on_primary = store
        .track(track_id)
        .is_some_and(|t| t.role == TrackRole::Primary);

    let next_start = store
        .clips_on(track_id)
        .iter()
        .find(|c| c.start_time > start && c.id != clip_id)
        .map(|c| c.start_time);

    let max_duration = match next_start {
        Some(next) => next - start,
        None if on_primary => f64::INFINITY,
        None => store.total_duration() - start,
    }
    .max(MIN_CLIP_DURATION);

    let duration = requested_duration.clamp(MIN_CLIP_DURATION, max_duration);
    if let Some(clip) = store.clip_mut(clip_id) {
        clip.duration = duration;
    }
}

/// Resize a clip by its leading edge, holding its end time fixed.
///
/// When the clip is edge-connected to a predecessor (gap below
/// [`EDGE_SNAP_TOLERANCE`]), the predecessor is co-adjusted — grown or
/// shrunk — so the pair stays contiguous, as long as the predecessor keeps
/// [`MIN_TRIMMED_DURATION`]. Otherwise the start is clamped to the latest
/// preceding clip end and the duration recomputed from the fixed end.
pub fn resize_left(store: &mut ClipStore, clip_id: Uuid, requested_start: f64) {
    if !requested_start.is_finite() {
        return;
    }
    let Some(clip) = store.clip(clip_id) else {
        return;
    };
    let Some(track_id) = store.resolved_track_id(clip) else {
        return;
    };
    let old_start = clip.start_time;
    let end = clip.end_time();
    let max_start = end - MIN_TRIMMED_DURATION;

    let clips = store.clips_on(track_id);
    let predecessor = clips
        .iter()
        .filter(|c| c.id != clip_id && c.start_time < old_start)
        .last()
        .map(|c| (c.id, c.start_time, c.end_time()));
    // Latest end among clips wholly before this one; the leading edge may
    // not cross it.
    let floor_start = clips
        .iter()
        .filter(|c| c.id != clip_id && c.end_time() <= old_start + EDGE_SNAP_TOLERANCE)
        .map(|c| c.end_time())
        .fold(0.0, f64::max);
    drop(clips);

    if let Some((pred_id, pred_start, pred_end)) = predecessor {
        let connected = (old_start - pred_end).abs() < EDGE_SNAP_TOLERANCE;
        if connected {
            let start = requested_start.min(max_start).max(0.0);
            let pred_duration = start - pred_start;
            if pred_duration >= MIN_TRIMMED_DURATION {
                if let Some(pred) = store.clip_mut(pred_id) {
                    pred.duration = pred_duration;
                }
                if let Some(clip) = store.clip_mut(clip_id) {
                    clip.start_time = start;
                    clip.duration = end - start;
                }
                return;
            }
            // Predecessor would drop below its minimum: fall back to the
            // unconnected clamp path.
        }
    }

    let lo = floor_start.min(max_start);
    let start = requested_start.clamp(lo, max_start);
    if let Some(clip) = store.clip_mut(clip_id) {
        clip.start_time = start;
        clip.duration = end - start;
    }
}

// ── Reorder via horizontal drag ─────────────────────────────────

/// Target insertion index for a dragged clip: the number of remaining
/// clips whose visual midpoint lies before the drag position.
pub fn reorder_index(others: &[&Clip], drag_time: f64) -> usize {
    others.iter().filter(|c| c.midpoint() < drag_time).count()
}

/// Commit a horizontal drag-reorder: recompute the dragged clip's index by
/// the midpoint test, then rewrite the whole track contiguously
/// (`start[i] = Σ duration[0..i-1]`). Drag-reorder produces a fully packed,
/// gapless track — unlike free insertion, which preserves gaps elsewhere.
pub fn reorder_within_track(store: &mut ClipStore, clip_id: Uuid, drag_time: f64) {
    let Some(clip) = store.clip(clip_id) else {
        return;
    };
    let Some(track_id) = store.resolved_track_id(clip) else {
        return;
    };

    let others: Vec<&Clip> = store
        .clips_on(track_id)
        .into_iter()
        .filter(|c| c.id != clip_id)
        .collect();
    let index = reorder_index(&others, drag_time);
    let mut order: Vec<Uuid> = others.iter().map(|c| c.id).collect();
    drop(others);
    order.insert(index, clip_id);

    let mut cursor = 0.0;
    for id in order {
        let clip = store.clip_mut(id).expect("clip exists");
        clip.start_time = cursor;
        cursor += clip.duration;
    }
}
