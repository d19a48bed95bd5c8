//! Integration tests for the timeline subsystem.
//!
//! Exercises cross-crate interactions between storyreel-core and
//! storyreel-timeline: editing sequences end-to-end, overlay
//! reconciliation, history, and persistence.

use storyreel_core::ContentRef;
use storyreel_timeline::{
    layout, Clip, ClipKind, ClipStore, EditHistory, EditSession, GestureKind, GesturePoint,
    GlobalTrackSynchronizer, MediaDrop, Project, ProjectFile,
};
use uuid::Uuid;

// ── Helpers ────────────────────────────────────────────────────

fn scene(n: usize, duration: f64) -> MediaDrop {
    MediaDrop::new(ClipKind::Visual, ContentRef::new(format!("scene-{n}.png")))
        .with_duration_hint(duration)
        .with_label(format!("Scene {n}"))
}

/// Scene-to-clip expansion: append each scene at the end of the primary
/// track, the way a storyboard enters the editor.
fn build_story(durations: &[f64]) -> (ClipStore, Uuid) {
    let mut store = ClipStore::with_default_tracks();
    let primary = store.primary_track().unwrap().id;
    for (n, &duration) in durations.iter().enumerate() {
        let at = store.total_duration();
        layout::insert_with_ripple(&mut store, primary, scene(n, duration), at).unwrap();
    }
    (store, primary)
}

fn assert_no_overlap(store: &ClipStore, track_id: Uuid) {
    let clips = store.clips_on(track_id);
    for pair in clips.windows(2) {
        assert!(
            pair[0].end_time() <= pair[1].start_time + 1e-9,
            "{:?} overlaps {:?}",
            pair[0].range(),
            pair[1].range()
        );
    }
}

// ── Story assembly & timing ────────────────────────────────────

#[test]
fn story_duration_is_sum_of_scenes() {
    let (store, primary) = build_story(&[5.0, 30.0, 10.0]);
    assert_eq!(store.total_duration(), 45.0);
    assert_eq!(store.clip_count_on(primary), 3);
    assert_no_overlap(&store, primary);
}

#[test]
fn no_overlap_survives_an_editing_session() {
    let (mut store, primary) = build_story(&[4.0, 6.0, 3.0, 5.0]);
    let ids: Vec<Uuid> = store.clips_on(primary).iter().map(|c| c.id).collect();

    // A mixed sequence of inserts, resizes, reorders, and deletes.
    layout::insert_with_ripple(&mut store, primary, scene(9, 2.0), 5.0).unwrap();
    layout::resize_right(&mut store, ids[0], 9.0);
    layout::resize_left(&mut store, ids[2], 1.0);
    layout::reorder_within_track(&mut store, ids[3], 0.0);
    store.remove(ids[1]);
    layout::insert_with_ripple(&mut store, primary, scene(10, 7.5), 2.0).unwrap();

    assert_eq!(store.clip_count_on(primary), 5);
    assert_no_overlap(&store, primary);
}

#[test]
fn ripple_insert_preserves_count_and_shifts_followers() {
    let (mut store, primary) = build_story(&[5.0, 4.0]);
    let before: Vec<(Uuid, f64)> = store
        .clips_on(primary)
        .iter()
        .map(|c| (c.id, c.start_time))
        .collect();

    layout::insert_with_ripple(&mut store, primary, scene(9, 3.0), 6.0).unwrap();

    let clips = store.clips_on(primary);
    assert_eq!(clips.len(), before.len() + 1);
    // Scenario: [0,5) and [5,9), 3 units dropped at t=6 → new clip at
    // [5,8), original second clip shifted to [8,12).
    assert_eq!(clips[1].start_time, 5.0);
    assert_eq!(clips[1].duration, 3.0);
    assert_eq!(clips[2].id, before[1].0);
    assert_eq!(clips[2].start_time, 8.0);
    assert_eq!(clips[2].end_time(), 12.0);
}

// ── Overlay synchronization ────────────────────────────────────

#[test]
fn music_overlay_follows_story_length() {
    let (mut store, _primary) = build_story(&[20.0, 22.0]);
    let music = store
        .spanning_tracks()
        .find(|t| t.kind == ClipKind::Audio)
        .unwrap()
        .id;
    layout::insert_with_ripple(
        &mut store,
        music,
        MediaDrop::new(ClipKind::Audio, ContentRef::new("theme.mp3")).with_duration_hint(10.0),
        0.0,
    )
    .unwrap();

    let mut sync = GlobalTrackSynchronizer::new();
    sync.resync(&mut store);

    let clips = store.clips_on(music);
    assert_eq!(clips.len(), 1);
    assert_eq!((clips[0].start_time, clips[0].end_time()), (0.0, 42.0));

    // Idempotent with no intervening primary change.
    let snapshot = store.clone();
    assert!(!sync.resync(&mut store));
    assert_eq!(store, snapshot);
}

#[test]
fn deleting_sole_primary_clip_zeroes_duration_and_overlays() {
    let (mut store, primary) = build_story(&[15.0]);
    let music = store
        .spanning_tracks()
        .find(|t| t.kind == ClipKind::Audio)
        .unwrap()
        .id;
    layout::insert_with_ripple(
        &mut store,
        music,
        MediaDrop::new(ClipKind::Audio, ContentRef::new("theme.mp3")),
        0.0,
    )
    .unwrap();

    let mut sync = GlobalTrackSynchronizer::new();
    sync.resync(&mut store);
    assert_eq!(store.clips_on(music)[0].duration, 15.0);

    let sole = store.clips_on(primary)[0].id;
    store.remove(sole);
    sync.resync(&mut store);

    assert_eq!(store.total_duration(), 0.0);
    assert!(store.clips_on(music).is_empty());
}

// ── Gesture session over the store ─────────────────────────────

#[test]
fn gesture_session_drives_layout_engine() {
    let (mut store, primary) = build_story(&[5.0, 4.0, 6.0]);
    let ids: Vec<Uuid> = store.clips_on(primary).iter().map(|c| c.id).collect();
    let mut session = EditSession::new();

    // Drag the first scene to the back of the track.
    assert!(session.gesture_start(
        &store,
        GestureKind::Move,
        ids[0],
        GesturePoint::new(2.0, primary),
    ));
    session.gesture_move(&mut store, GesturePoint::new(10.0, primary));
    session.gesture_end(&mut store, GesturePoint::new(14.0, primary));

    let order: Vec<Uuid> = store.clips_on(primary).iter().map(|c| c.id).collect();
    assert_eq!(order, vec![ids[1], ids[2], ids[0]]);
    // Drag-reorder repacks the track gaplessly.
    assert_eq!(store.clips_on(primary)[0].start_time, 0.0);
    assert_eq!(store.total_duration(), 15.0);
    assert_no_overlap(&store, primary);
}

#[test]
fn resize_gesture_respects_neighbor_clamp() {
    let (mut store, primary) = build_story(&[5.0, 4.0]);
    let first = store.clips_on(primary)[0].id;
    let mut session = EditSession::new();

    session.gesture_start(
        &store,
        GestureKind::ResizeRight,
        first,
        GesturePoint::new(5.0, primary),
    );
    session.gesture_end(&mut store, GesturePoint::new(30.0, primary));

    // Resize floor and neighbor clamp both hold.
    assert_eq!(store.clip(first).unwrap().duration, 5.0);
    assert_no_overlap(&store, primary);
}

// ── History ────────────────────────────────────────────────────

#[test]
fn undo_restores_state_before_ripple_insert() {
    let (mut store, primary) = build_story(&[5.0, 4.0]);
    let mut history = EditHistory::default();

    history.record(&store);
    layout::insert_with_ripple(&mut store, primary, scene(9, 3.0), 6.0).unwrap();
    assert_eq!(store.clip_count_on(primary), 3);

    assert!(history.undo(&mut store));
    assert_eq!(store.clip_count_on(primary), 2);
    assert_eq!(store.total_duration(), 9.0);

    assert!(history.redo(&mut store));
    assert_eq!(store.clip_count_on(primary), 3);
    assert_eq!(store.total_duration(), 12.0);
}

// ── Persistence ────────────────────────────────────────────────

#[test]
fn edited_project_survives_serialization_roundtrip() {
    let mut project = Project::new("Roundtrip Story");
    let primary = project.store.primary_track().unwrap().id;
    layout::insert_with_ripple(&mut project.store, primary, scene(0, 8.0), 0.0).unwrap();
    layout::insert_with_ripple(&mut project.store, primary, scene(1, 6.0), 8.0).unwrap();
    project.playhead = 3.25;
    project.selected_clip = project.store.clips_on(primary).first().map(|c| c.id);

    let json = ProjectFile::new(project.clone()).to_json().unwrap();
    let loaded = ProjectFile::from_json(&json).unwrap();

    assert_eq!(loaded.project, project);
    assert_eq!(loaded.project.total_duration(), 14.0);
}

#[test]
fn legacy_document_clips_resolve_by_kind() {
    // A v0 document: no version wrapper, clips without track assignment.
    let mut project = Project::new("Legacy Story");
    let primary = project.store.primary_track().unwrap().id;
    let mut clip = Clip::new(
        ClipKind::Visual,
        primary,
        0.0,
        5.0,
        ContentRef::new("scene-0.png"),
    );
    clip.track_id = None;
    project.store.upsert(clip);
    let raw = serde_json::to_vec(&project).unwrap();

    let loaded = ProjectFile::from_json(&raw).unwrap();

    // The legacy clip lands on the first visual track in creation order —
    // the rule is first-of-kind, not role-aware, matching the original
    // data's implicit placement.
    let first_visual = loaded
        .project
        .store
        .first_track_of_kind(ClipKind::Visual)
        .unwrap()
        .id;
    assert_eq!(loaded.project.store.clip_count_on(first_visual), 1);
}
