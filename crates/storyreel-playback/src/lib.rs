//! StoryReel Playback - Synchronized preview engine
//!
//! Resolves what is active at any point of the timeline and keeps an
//! audio output phase-aligned with the advancing clock:
//! - `PlaybackClock`: the single shared "now"
//! - `Compositor`: per-instant frame resolution (`resolve_frame`)
//! - `AudioBinding`: source switching and drift correction over an
//!   abstract `AudioSink`
//! - `AssetCache`: populate-once cache of decoded content
//! - `Player`: the cooperative tick loop tying them together
//! - `build_render_plan`: fixed-rate sampling for the export boundary

pub mod audio;
pub mod cache;
pub mod clock;
pub mod compositor;
pub mod plan;
pub mod player;

pub use audio::{AudioBinding, AudioSink, DRIFT_TOLERANCE};
pub use cache::{AssetCache, AssetFetch};
pub use clock::{ClockState, PlaybackClock};
pub use compositor::{AudioCue, ComposedFrame, Compositor, FrameSample};
pub use plan::{build_render_plan, RenderPlan};
pub use player::Player;
