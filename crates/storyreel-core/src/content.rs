//! Opaque content references.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a piece of externally-owned content: a scene image, a
/// speech or music source, or caption text.
///
/// The engine never interprets the reference's origin — it may be a URL, a
/// cache key, or (for captions) the text payload itself. References are
/// compared for identity only, e.g. when the audio binding decides whether
/// the output is already playing the right source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentRef(String);

impl ContentRef {
    /// Create a content reference.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// The raw reference string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentRef {
    fn from(reference: &str) -> Self {
        Self(reference.to_owned())
    }
}

impl From<String> for ContentRef {
    fn from(reference: String) -> Self {
        Self(reference)
    }
}
