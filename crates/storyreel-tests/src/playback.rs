//! Integration tests for the playback subsystem.
//!
//! Exercises the full path from an edited timeline through frame
//! resolution, audio alignment, and render-plan sampling.

use std::sync::Arc;

use storyreel_core::ContentRef;
use storyreel_playback::{
    build_render_plan, AssetCache, AudioSink, Compositor, Player,
};
use storyreel_timeline::{layout, Clip, ClipKind, ClipStore, GlobalTrackSynchronizer, MediaDrop};
use uuid::Uuid;

// ── Helpers ────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct RecordingSink {
    source: Option<ContentRef>,
    position: f64,
    playing: bool,
    switches: usize,
}

impl AudioSink for RecordingSink {
    fn set_source(&mut self, source: &ContentRef) {
        self.source = Some(source.clone());
        self.switches += 1;
    }
    fn seek(&mut self, offset: f64) {
        self.position = offset;
    }
    fn play(&mut self) {
        self.playing = true;
    }
    fn pause(&mut self) {
        self.playing = false;
    }
    fn position(&self) -> f64 {
        self.position
    }
    fn is_playing(&self) -> bool {
        self.playing
    }
}

/// A story with narration and synchronized background music.
fn build_story() -> (ClipStore, Uuid) {
    let mut store = ClipStore::with_default_tracks();
    let primary = store.primary_track().unwrap().id;
    let narration = store.first_track_of_kind(ClipKind::Audio).unwrap().id;
    let music = store
        .spanning_tracks()
        .find(|t| t.kind == ClipKind::Audio)
        .unwrap()
        .id;

    for (n, duration) in [4.0, 6.0, 5.0].into_iter().enumerate() {
        let at = store.total_duration();
        let drop = MediaDrop::new(ClipKind::Visual, ContentRef::new(format!("scene-{n}.png")))
            .with_duration_hint(duration);
        layout::insert_with_ripple(&mut store, primary, drop, at).unwrap();
    }
    layout::insert_with_ripple(
        &mut store,
        narration,
        MediaDrop::new(ClipKind::Audio, ContentRef::new("narration-0.mp3"))
            .with_duration_hint(4.0),
        0.0,
    )
    .unwrap();
    layout::insert_with_ripple(
        &mut store,
        narration,
        MediaDrop::new(ClipKind::Audio, ContentRef::new("narration-1.mp3"))
            .with_duration_hint(5.0),
        4.0,
    )
    .unwrap();
    layout::insert_with_ripple(
        &mut store,
        music,
        MediaDrop::new(ClipKind::Audio, ContentRef::new("theme.mp3")).with_duration_hint(8.0),
        0.0,
    )
    .unwrap();
    GlobalTrackSynchronizer::new().resync(&mut store);

    (store, primary)
}

// ── Frame resolution ───────────────────────────────────────────

#[test]
fn frame_resolution_is_total_over_the_timeline() {
    let (store, _) = build_story();
    let compositor = Compositor::new();
    let total = store.total_duration();
    assert_eq!(total, 15.0);

    // Every instant, boundaries and the exact end included, resolves to a
    // defined sample.
    let steps = 600;
    for i in 0..=steps {
        let t = total * i as f64 / steps as f64;
        let _ = compositor.resolve_frame(&store, t);
    }
    let end = compositor.resolve_frame(&store, total);
    assert_eq!(end.visual, None);
    // The stretched music clip covers [0, 15); the end instant is silent.
    assert_eq!(end.audio, None);
}

#[test]
fn scene_boundaries_switch_visuals_exactly() {
    let (store, _) = build_story();
    let compositor = Compositor::new();

    let at = |t: f64| compositor.resolve_frame(&store, t).visual.unwrap();
    assert_eq!(at(0.0), ContentRef::new("scene-0.png"));
    assert_eq!(at(3.999), ContentRef::new("scene-0.png"));
    assert_eq!(at(4.0), ContentRef::new("scene-1.png"));
    assert_eq!(at(10.0), ContentRef::new("scene-2.png"));
}

#[test]
fn narration_offsets_are_clip_relative() {
    let (store, _) = build_story();
    let compositor = Compositor::new();

    // Inside the second narration clip, which starts at 4.0.
    let cue = compositor.resolve_frame(&store, 6.5).audio.unwrap();
    assert_eq!(cue.source, ContentRef::new("narration-1.mp3"));
    assert!((cue.offset - 2.5).abs() < 1e-9);

    // Past all narration, the stretched music takes over with a
    // timeline-origin offset.
    let cue = compositor.resolve_frame(&store, 12.0).audio.unwrap();
    assert_eq!(cue.source, ContentRef::new("theme.mp3"));
    assert!((cue.offset - 12.0).abs() < 1e-9);
}

// ── Player loop ────────────────────────────────────────────────

#[test]
fn ticking_through_a_story_switches_audio_sources_once_each() {
    let (store, _) = build_story();
    let cache = AssetCache::new();
    let mut sink = RecordingSink::default();
    let mut player = Player::new();

    player.play(&store);
    let mut ticks = 0;
    while player.clock.is_playing() && ticks < 1000 {
        player.tick(&store, &cache, &mut sink, 0.1);
        ticks += 1;
    }

    // narration-0 → narration-1 → theme: three switches, no churn.
    assert_eq!(sink.switches, 3);
    assert_eq!(player.clock.current_time(), 15.0);
    assert!(!sink.playing);
}

#[test]
fn scrubbing_a_gap_pauses_audio_without_error() {
    let mut store = ClipStore::with_default_tracks();
    let primary = store.primary_track().unwrap().id;
    let narration = store.first_track_of_kind(ClipKind::Audio).unwrap().id;
    layout::insert_with_ripple(
        &mut store,
        primary,
        MediaDrop::new(ClipKind::Visual, ContentRef::new("scene.png")).with_duration_hint(10.0),
        0.0,
    )
    .unwrap();
    // Narration deliberately starts late, leaving a leading gap.
    store.upsert(Clip::new(
        ClipKind::Audio,
        narration,
        6.0,
        3.0,
        ContentRef::new("speech.mp3"),
    ));

    let cache = AssetCache::new();
    let mut sink = RecordingSink::default();
    let mut player = Player::new();

    player.play(&store);
    player.tick(&store, &cache, &mut sink, 1.0);
    assert!(!sink.playing); // inside the leading gap: silence, no crash

    player.seek(&store, 7.0);
    player.tick(&store, &cache, &mut sink, 0.0);
    assert!(sink.playing);
    assert_eq!(sink.source, Some(ContentRef::new("speech.mp3")));
    assert!((sink.position - 1.0).abs() < 1e-9);
}

#[test]
fn cache_population_is_visible_to_later_frames() {
    let (store, _) = build_story();
    let cache = Arc::new(AssetCache::new());
    let compositor = Compositor::new();

    // Pre-fetch runs concurrently across items while frames resolve.
    let frame = compositor.compose(&store, &cache, 1.0);
    assert_eq!(frame.visual, None); // not ready yet

    let workers: Vec<_> = (0..3)
        .map(|n| {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || {
                cache.populate(ContentRef::new(format!("scene-{n}.png")), vec![n as u8]);
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let frame = compositor.compose(&store, &cache, 1.0);
    assert_eq!(frame.visual, Some(ContentRef::new("scene-0.png")));
}

// ── Export boundary ────────────────────────────────────────────

#[test]
fn render_plan_samples_the_whole_story() {
    let (store, _) = build_story();
    let plan = build_render_plan(&Compositor::new(), &store, 24.0);

    assert_eq!(plan.frames.len(), 360); // 15s × 24fps
    assert!(plan.frames.iter().all(|f| f.visual.is_some()));
    assert!(plan.frames.iter().all(|f| f.audio.is_some()));

    // The plan is a plain document: it serializes for an external encoder.
    let json = serde_json::to_string(&plan).unwrap();
    assert!(json.contains("scene-1.png"));
    assert!(json.contains("theme.mp3"));
}

#[test]
fn render_plan_reflects_edits_after_resync() {
    let (mut store, primary) = build_story();
    let last_id = store.clips_on(primary).last().unwrap().id;
    store.remove(last_id);
    GlobalTrackSynchronizer::new().resync(&mut store);

    // The last scene (5s) is gone; the music overlay shrank with it.
    let plan = build_render_plan(&Compositor::new(), &store, 10.0);
    assert_eq!(plan.total_duration, 10.0);
    assert_eq!(plan.frames.len(), 100);
}
