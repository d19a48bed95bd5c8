//! Whole-timeline overlay reconciliation.
//!
//! Overlay tracks (watermark, background music) are expected to span the
//! entire timeline. Whenever the primary visual track's total duration
//! changes, each spanning track is collapsed to a single clip over
//! `[0, visual_duration)`. Rather than tiling finite-length copies to
//! approximate looping, one stretched clip is emitted and the playback
//! layer loops or holds the underlying source — no source-duration
//! metadata is needed at layout time.

use tracing::debug;
use uuid::Uuid;

use crate::clip::{Clip, ClipKind};
use crate::store::ClipStore;
use storyreel_core::ContentRef;

/// Post-mutation reconciliation pass for spanning tracks.
///
/// Tracks the last primary duration it reconciled against, so callers can
/// invoke [`GlobalTrackSynchronizer::resync`] after every mutation and the
/// pass stays cheap when nothing changed.
#[derive(Debug, Clone, Default)]
pub struct GlobalTrackSynchronizer {
    last_visual_duration: Option<f64>,
}

impl GlobalTrackSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile spanning tracks against the current primary duration.
    /// Returns whether any overlay clip changed.
    pub fn resync(&mut self, store: &mut ClipStore) -> bool {
        let visual_duration = store.total_duration();
        if self.last_visual_duration == Some(visual_duration) {
            return false;
        }
        self.last_visual_duration = Some(visual_duration);
        resync_spanning_tracks(store, visual_duration)
    }
}

/// Stretch each spanning track to a single clip over `[0, visual_duration)`,
/// preserving the content reference of its (first) existing clip. A track
/// with no clips has nothing to stretch and stays empty; when the primary
/// track itself is empty, spanning tracks are emptied too.
pub fn resync_spanning_tracks(store: &mut ClipStore, visual_duration: f64) -> bool {
    let spanning: Vec<Uuid> = store.spanning_tracks().map(|t| t.id).collect();
    let mut changed = false;

    for track_id in spanning {
        let clips: Vec<Uuid> = store.clips_on(track_id).iter().map(|c| c.id).collect();
        let Some((&keep, rest)) = clips.split_first() else {
            continue;
        };

        for id in rest {
            store.remove(*id);
            changed = true;
        }

        if visual_duration <= 0.0 {
            store.remove(keep);
            changed = true;
            continue;
        }

        let clip = store.clip_mut(keep).expect("clip exists");
        if clip.start_time != 0.0 || clip.duration != visual_duration {
            clip.start_time = 0.0;
            clip.duration = visual_duration;
            changed = true;
        }
    }

    if changed {
        debug!(visual_duration, "spanning tracks restretched");
    }
    changed
}

/// First-use defaults: seed each *empty* spanning track with the provided
/// content of its kind (logo image, theme music), spanning the current
/// timeline. Tracks that already hold a clip are left alone; the next
/// resync keeps the seeded clip stretched. A no-op on an empty timeline.
pub fn seed_spanning_defaults(store: &mut ClipStore, defaults: &[(ClipKind, ContentRef)]) -> bool {
    let visual_duration = store.total_duration();
    if visual_duration <= 0.0 {
        return false;
    }
    let empty_spanning: Vec<(Uuid, ClipKind)> = store
        .spanning_tracks()
        .filter(|t| store.clip_count_on(t.id) == 0)
        .map(|t| (t.id, t.kind))
        .collect();

    let mut seeded = false;
    for (track_id, kind) in empty_spanning {
        let Some((_, content)) = defaults.iter().find(|(k, _)| *k == kind) else {
            continue;
        };
        store.upsert(Clip::new(
            kind,
            track_id,
            0.0,
            visual_duration,
            content.clone(),
        ));
        seeded = true;
    }
    seeded
}
