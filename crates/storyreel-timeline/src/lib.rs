//! StoryReel Timeline - Timeline data model and layout engine
//!
//! Implements the editing structure for story videos:
//! - Tracks and clips with a single canonical store
//! - Placement algorithms (ripple insert, edge resize, drag-reorder)
//! - Whole-timeline overlay synchronization
//! - The exclusive edit-gesture session
//! - Snapshot undo/redo and versioned project serialization

pub mod clip;
pub mod history;
pub mod layout;
pub mod project;
pub mod serialization;
pub mod session;
pub mod store;
pub mod sync;
pub mod track;

pub use clip::{Clip, ClipKind};
pub use history::EditHistory;
pub use layout::{InsertionPlan, MediaDrop};
pub use project::Project;
pub use serialization::ProjectFile;
pub use session::{EditSession, GestureKind, GesturePoint};
pub use store::ClipStore;
pub use sync::GlobalTrackSynchronizer;
pub use track::{Track, TrackRole};
