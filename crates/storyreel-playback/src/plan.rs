//! Render-plan sampling for the export boundary.
//!
//! An external encoder never touches the timeline model: it receives a
//! plan of per-frame samples taken at a fixed rate and encodes from that.

use serde::{Deserialize, Serialize};
use tracing::info;

use storyreel_timeline::ClipStore;

use crate::compositor::{Compositor, FrameSample};

/// A sampled timeline, ready for an external encoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPlan {
    /// Samples per second.
    pub frame_rate: f64,
    /// Timeline duration the plan covers, seconds.
    pub total_duration: f64,
    /// One sample per output frame, in order.
    pub frames: Vec<FrameSample>,
}

/// Sample `resolve_frame` at a fixed frame rate across the timeline.
pub fn build_render_plan(compositor: &Compositor, store: &ClipStore, frame_rate: f64) -> RenderPlan {
    let frame_rate = if frame_rate.is_finite() && frame_rate > 0.0 {
        frame_rate
    } else {
        24.0
    };
    let total_duration = store.total_duration();
    let frame_count = (total_duration * frame_rate).round() as usize;

    let frames = (0..frame_count)
        .map(|i| compositor.resolve_frame(store, i as f64 / frame_rate))
        .collect();

    info!(frame_count, frame_rate, "render plan sampled");
    RenderPlan {
        frame_rate,
        total_duration,
        frames,
    }
}
