//! StoryReel - headless project sampler
//!
//! Loads a project file and samples its timeline into a render plan that
//! an external encoder can consume: `storyreel <project.json> [fps]`.
//! Stands in for the interactive shell, which lives outside this
//! repository.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use storyreel_playback::{build_render_plan, Compositor};
use storyreel_timeline::ProjectFile;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next().map(PathBuf::from) else {
        bail!("usage: storyreel <project.json> [fps]");
    };
    let frame_rate: f64 = match args.next() {
        Some(fps) => fps.parse().context("invalid frame rate")?,
        None => 24.0,
    };

    let file = ProjectFile::load_from_file(&path)
        .with_context(|| format!("failed to load project {}", path.display()))?;
    let project = file.project;
    info!(
        name = %project.name,
        tracks = project.store.tracks().len(),
        duration = project.total_duration(),
        "project loaded"
    );

    let plan = build_render_plan(&Compositor::new(), &project.store, frame_rate);
    serde_json::to_writer_pretty(std::io::stdout().lock(), &plan)
        .context("failed to write render plan")?;
    println!();

    Ok(())
}
