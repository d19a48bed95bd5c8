//! Audio output binding.
//!
//! Keeps one audio output phase-aligned with the visually advancing clock.
//! The output itself is behind the [`AudioSink`] capability so the engine
//! stays independent of the host's audio stack; the binding only decides
//! *when* to switch sources, seek, play, or pause.

use tracing::{debug, warn};

use storyreel_core::ContentRef;

use crate::compositor::AudioCue;

/// How far the output may drift from the clock before a hard re-seek,
/// seconds. Within the tolerance the source plays unassisted.
pub const DRIFT_TOLERANCE: f64 = 0.25;

/// The host's audio output.
///
/// Implementations own the actual decoding and device plumbing. A source
/// shorter than a requested offset is expected to loop or hold — spanning
/// music clips are stretched over the whole timeline without source-length
/// metadata, so offsets past the source's end are normal.
pub trait AudioSink {
    /// Bind a new source. Playback position is undefined until `seek`.
    fn set_source(&mut self, source: &ContentRef);
    /// Jump to an offset within the bound source, seconds.
    fn seek(&mut self, offset: f64);
    fn play(&mut self);
    fn pause(&mut self);
    /// Current offset within the bound source, seconds.
    fn position(&self) -> f64;
    fn is_playing(&self) -> bool;
}

/// Decides per frame how to drive the sink toward the active audio cue.
#[derive(Debug, Clone, Default)]
pub struct AudioBinding {
    bound: Option<ContentRef>,
}

impl AudioBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// The source currently bound to the output, if any.
    pub fn bound_source(&self) -> Option<&ContentRef> {
        self.bound.as_ref()
    }

    /// Align the sink with the active cue for this frame.
    ///
    /// A changed source switches and seeks; an unchanged source plays
    /// unassisted and is only hard-corrected when drift exceeds
    /// [`DRIFT_TOLERANCE`]; no cue pauses the output.
    pub fn sync(&mut self, sink: &mut dyn AudioSink, cue: Option<&AudioCue>) {
        let Some(cue) = cue else {
            sink.pause();
            return;
        };
        if self.bound.as_ref() != Some(&cue.source) {
            debug!(source = %cue.source, offset = cue.offset, "switching audio source");
            sink.set_source(&cue.source);
            sink.seek(cue.offset);
            sink.play();
            self.bound = Some(cue.source.clone());
            return;
        }
        let drift = (sink.position() - cue.offset).abs();
        if drift > DRIFT_TOLERANCE {
            warn!(drift, "audio drift beyond tolerance, re-seeking");
            sink.seek(cue.offset);
        }
        if !sink.is_playing() {
            sink.play();
        }
    }

    /// Immediately silence the output and forget the binding, e.g. when
    /// the user stops playback.
    pub fn silence(&mut self, sink: &mut dyn AudioSink) {
        sink.pause();
        self.bound = None;
    }
}
