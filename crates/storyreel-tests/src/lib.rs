//! Integration test crate for StoryReel.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on multiple storyreel crates to verify they work together.

#[cfg(test)]
mod timeline;

#[cfg(test)]
mod playback;
