//! Frame resolution: what is active at time `t`.
//!
//! The compositor answers two questions. `resolve_frame` is the pure
//! export-boundary query — total over `[0, total_duration]`, it returns a
//! defined (possibly empty) sample and never fails. `compose` additionally
//! consults the asset cache and prepares the caption overlay for a render
//! surface; an unplayable reference degrades to an empty slot for that
//! frame and never blocks the clock.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::warn;

use storyreel_core::ContentRef;
use storyreel_timeline::{Clip, ClipKind, ClipStore, TrackRole};

use crate::cache::{AssetCache, AssetFetch};

/// The audio content active at an instant and where within it we are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioCue {
    /// Source to play.
    pub source: ContentRef,
    /// Offset into the source, seconds (`t - clip.start_time`).
    pub offset: f64,
}

/// What is active at one instant of the timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameSample {
    /// Visual content, or `None` for a blank frame.
    pub visual: Option<ContentRef>,
    /// Caption text, when a caption is active and captions are enabled.
    pub caption: Option<String>,
    /// Audio source and offset, or `None` for silence.
    pub audio: Option<AudioCue>,
}

/// A frame prepared for rendering: cache-checked visual plus the caption
/// wrapped to the render surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComposedFrame {
    /// Visual content that is ready to draw.
    pub visual: Option<ContentRef>,
    /// Caption overlay, word-wrapped to the surface width.
    pub caption_lines: Vec<String>,
    /// Audio source and offset, or `None` for silence.
    pub audio: Option<AudioCue>,
}

/// Resolves the active clip per track and assembles frames.
#[derive(Debug, Clone)]
pub struct Compositor {
    /// Caption overlay visibility toggle.
    pub captions_enabled: bool,
    /// Render surface width in characters, for caption wrapping.
    pub caption_columns: usize,
}

impl Default for Compositor {
    fn default() -> Self {
        Self {
            captions_enabled: true,
            caption_columns: 42,
        }
    }
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve what is active at time `t`. Total: every `t` yields a
    /// defined (possibly empty) sample.
    pub fn resolve_frame(&self, store: &ClipStore, t: f64) -> FrameSample {
        FrameSample {
            visual: self.active_visual(store, t).map(|c| c.content.clone()),
            caption: self
                .active_caption(store, t)
                .map(|c| c.content.as_str().to_owned()),
            audio: self.active_audio(store, t).map(|clip| AudioCue {
                source: clip.content.clone(),
                offset: t - clip.start_time,
            }),
        }
    }

    /// Resolve a frame and prepare it for rendering against the cache.
    /// Content that is unavailable or not yet populated renders empty.
    pub fn compose(&self, store: &ClipStore, cache: &AssetCache, t: f64) -> ComposedFrame {
        let sample = self.resolve_frame(store, t);

        let visual = sample.visual.filter(|content| match cache.fetch(content) {
            AssetFetch::Ready(_) => true,
            AssetFetch::NotReady => false,
            AssetFetch::Unavailable => {
                warn!(%content, "visual content unavailable, rendering blank");
                false
            }
        });

        let caption_lines = sample
            .caption
            .map(|text| wrap_caption(&text, self.caption_columns))
            .unwrap_or_default();

        ComposedFrame {
            visual,
            caption_lines,
            audio: sample.audio,
        }
    }

    fn active_visual<'a>(&self, store: &'a ClipStore, t: f64) -> Option<&'a Clip> {
        let primary = store.primary_track()?;
        store
            .clips_on(primary.id)
            .into_iter()
            .find(|c| c.contains(t))
    }

    fn active_caption<'a>(&self, store: &'a ClipStore, t: f64) -> Option<&'a Clip> {
        if !self.captions_enabled {
            return None;
        }
        store
            .tracks_of_kind(ClipKind::Caption)
            .into_iter()
            .flat_map(|track| store.clips_on(track.id))
            .find(|c| c.contains(t))
    }

    /// Narration first: active clips on standard audio lanes win, highest
    /// display order first; a spanning music clip is the fallback when no
    /// narration is active.
    fn active_audio<'a>(&self, store: &'a ClipStore, t: f64) -> Option<&'a Clip> {
        let mut active: SmallVec<[(TrackRole, &Clip); 4]> = SmallVec::new();
        for track in store.tracks_of_kind(ClipKind::Audio) {
            if let Some(clip) = store.clips_on(track.id).into_iter().find(|c| c.contains(t)) {
                active.push((track.role, clip));
            }
        }
        active
            .iter()
            .find(|(role, _)| *role != TrackRole::Spanning)
            .or_else(|| active.first())
            .map(|(_, clip)| *clip)
    }
}

/// Greedy word wrap for the caption overlay. Words longer than the
/// surface width get a line of their own.
pub fn wrap_caption(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
        } else if line.chars().count() + 1 + word.chars().count() <= columns {
            line.push(' ');
            line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
