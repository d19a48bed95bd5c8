//! Error types for StoryReel.
//!
//! Degraded playback conditions (missing assets, scrubbing a gap, an empty
//! timeline) are not errors — they are handled locally where they occur and
//! degrade to a blank or silent frame. This type covers the genuinely
//! exceptional cases: I/O and corrupt project documents.

use thiserror::Error;

/// Main error type for StoryReel operations.
#[derive(Error, Debug)]
pub enum StoryReelError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for StoryReel operations.
pub type Result<T> = std::result::Result<T, StoryReelError>;
