//! The preview player: one cooperative tick loop over clock, compositor,
//! and audio binding.
//!
//! The host calls [`Player::tick`] once per display refresh with the
//! elapsed wall-clock delta; everything else (frame resolution, audio
//! alignment) follows from the clock inside that call. There are no
//! worker threads for layout or compositing.

use storyreel_timeline::ClipStore;

use crate::audio::{AudioBinding, AudioSink};
use crate::cache::AssetCache;
use crate::clock::PlaybackClock;
use crate::compositor::{ComposedFrame, Compositor};

/// Playback state for one editor session.
#[derive(Debug, Clone, Default)]
pub struct Player {
    pub clock: PlaybackClock,
    pub compositor: Compositor,
    binding: AudioBinding,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start playback. A no-op when the timeline is empty.
    pub fn play(&mut self, store: &ClipStore) {
        self.clock.set_total_duration(store.total_duration());
        self.clock.play();
    }

    /// Stop playback: freeze the clock and silence the output immediately.
    pub fn stop(&mut self, sink: &mut dyn AudioSink) {
        self.clock.pause();
        self.binding.silence(sink);
    }

    /// Scrub to a time. The next tick realigns the audio output.
    pub fn seek(&mut self, store: &ClipStore, time: f64) {
        self.clock.set_total_duration(store.total_duration());
        self.clock.seek(time);
    }

    /// Advance one cooperative tick: move the clock by the wall-clock
    /// delta, resolve the frame, and align the audio output with it.
    pub fn tick(
        &mut self,
        store: &ClipStore,
        cache: &AssetCache,
        sink: &mut dyn AudioSink,
        delta: f64,
    ) -> ComposedFrame {
        // Edits may have changed the derived duration since the last tick.
        self.clock.set_total_duration(store.total_duration());
        let now = self.clock.advance(delta);

        let frame = self.compositor.compose(store, cache, now);
        if self.clock.is_playing() {
            self.binding.sync(sink, frame.audio.as_ref());
        } else {
            self.binding.silence(sink);
        }
        frame
    }
}
