//! StoryReel Core - Foundation types for the editing engine
//!
//! This crate provides the fundamental types used throughout StoryReel:
//! - Continuous time ranges (seconds)
//! - Opaque content references
//! - The shared error type

pub mod content;
pub mod error;
pub mod time;

pub use content::ContentRef;
pub use error::{Result, StoryReelError};
pub use time::TimeRange;
