//! Continuous time for timeline placement.
//!
//! The editing model works in seconds as `f64`. Placement rules use
//! sub-second tolerances (edge snapping, minimum durations), so continuous
//! time is the working representation rather than frame counts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A time range with inclusive start and exclusive end, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Start time (inclusive)
    pub start: f64,
    /// Duration of the range
    pub duration: f64,
}

impl TimeRange {
    /// Create a new time range from start and duration.
    #[inline]
    pub fn new(start: f64, duration: f64) -> Self {
        Self { start, duration }
    }

    /// Create a time range from start and end times.
    #[inline]
    pub fn from_start_end(start: f64, end: f64) -> Self {
        Self {
            start,
            duration: end - start,
        }
    }

    /// End time (exclusive).
    #[inline]
    pub fn end(self) -> f64 {
        self.start + self.duration
    }

    /// Check if a time is within this range.
    #[inline]
    pub fn contains(self, time: f64) -> bool {
        time >= self.start && time < self.end()
    }

    /// Check if two ranges overlap.
    pub fn overlaps(self, other: Self) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    /// Empty range starting at zero.
    pub const EMPTY: Self = Self {
        start: 0.0,
        duration: 0.0,
    };
}

impl Default for TimeRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.3}s, {:.3}s)", self.start, self.end())
    }
}
