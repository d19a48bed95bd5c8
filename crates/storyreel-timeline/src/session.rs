//! The editing session: selection plus the single in-flight gesture.
//!
//! Input arrives through a device-agnostic capability interface —
//! `gesture_start` / `gesture_move` / `gesture_end` keyed by logical
//! coordinates (time, track) — so the same session drives pointer, touch,
//! or scripted edits. Gestures are exclusive: starting a second while one
//! is in flight is refused at this boundary.

use tracing::warn;
use uuid::Uuid;

use crate::layout;
use crate::store::ClipStore;

/// A gesture position in logical timeline coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GesturePoint {
    /// Timeline time under the input device, seconds.
    pub time: f64,
    /// Track under the input device.
    pub track_id: Uuid,
}

impl GesturePoint {
    pub fn new(time: f64, track_id: Uuid) -> Self {
        Self { time, track_id }
    }
}

/// What a gesture manipulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Drag the clip body to reposition it.
    Move,
    /// Drag the leading edge; end time held fixed.
    ResizeLeft,
    /// Drag the trailing edge; start time held fixed.
    ResizeRight,
}

#[derive(Debug, Clone, Copy)]
struct ActiveGesture {
    kind: GestureKind,
    clip_id: Uuid,
    origin_track: Uuid,
    /// Time offset between the grab point and the clip's start.
    grab_offset: f64,
}

/// Editing state owned by one editor session.
///
/// Replaces ambient globals: the one in-flight gesture and the current
/// selection live here and are threaded through the update loop.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    active: Option<ActiveGesture>,
    /// Currently selected clip, if any.
    pub selected_clip: Option<Uuid>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a gesture is currently in flight.
    pub fn gesture_active(&self) -> bool {
        self.active.is_some()
    }

    /// Begin a gesture on a clip. Returns false — and changes nothing —
    /// when a gesture is already in flight or the clip does not exist.
    pub fn gesture_start(
        &mut self,
        store: &ClipStore,
        kind: GestureKind,
        clip_id: Uuid,
        at: GesturePoint,
    ) -> bool {
        if self.active.is_some() {
            warn!(clip = %clip_id, "gesture refused: another gesture is in flight");
            return false;
        }
        let Some(clip) = store.clip(clip_id) else {
            warn!(clip = %clip_id, "gesture refused: unknown clip");
            return false;
        };
        let Some(origin_track) = store.resolved_track_id(clip) else {
            return false;
        };
        self.active = Some(ActiveGesture {
            kind,
            clip_id,
            origin_track,
            grab_offset: at.time - clip.start_time,
        });
        self.selected_clip = Some(clip_id);
        true
    }

    /// Continue the in-flight gesture at a new position.
    ///
    /// Resizes apply immediately (the clamps keep the track valid at every
    /// step). A move is transient while in flight and commits on
    /// [`EditSession::gesture_end`].
    pub fn gesture_move(&mut self, store: &mut ClipStore, at: GesturePoint) {
        let Some(active) = self.active else {
            return;
        };
        match active.kind {
            GestureKind::Move => {}
            GestureKind::ResizeLeft => layout::resize_left(store, active.clip_id, at.time),
            GestureKind::ResizeRight => {
                if let Some(clip) = store.clip(active.clip_id) {
                    let requested = at.time - clip.start_time;
                    layout::resize_right(store, active.clip_id, requested);
                }
            }
        }
    }

    /// Finish the in-flight gesture, committing its result.
    ///
    /// A move released over its own track commits as a drag-reorder
    /// (repacking the track); released over another track of the same
    /// kind it re-enters the ripple-insert path at the drop position.
    pub fn gesture_end(&mut self, store: &mut ClipStore, at: GesturePoint) {
        let Some(active) = self.active.take() else {
            return;
        };
        match active.kind {
            GestureKind::Move => {
                if at.track_id == active.origin_track {
                    layout::reorder_within_track(store, active.clip_id, at.time);
                } else {
                    let drop_time = at.time - active.grab_offset;
                    layout::move_with_ripple(store, active.clip_id, at.track_id, drop_time);
                }
            }
            GestureKind::ResizeLeft => layout::resize_left(store, active.clip_id, at.time),
            GestureKind::ResizeRight => {
                if let Some(clip) = store.clip(active.clip_id) {
                    let requested = at.time - clip.start_time;
                    layout::resize_right(store, active.clip_id, requested);
                }
            }
        }
    }

    /// Abandon the in-flight gesture without committing a move.
    pub fn gesture_cancel(&mut self) {
        self.active = None;
    }
}
