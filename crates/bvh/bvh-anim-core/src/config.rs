//! Parser configuration for bvh-anim-core.

use serde::{Deserialize, Serialize};

/// Limits applied while parsing BVH text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Deepest joint nesting accepted (root is depth 0).
    pub max_depth: usize,
    /// Largest `Frames:` count accepted. Applies even when the hierarchy has no
    /// channels, where every frame is empty but still gets iterated and written.
    pub max_frames: usize,
    /// Upper bound on the motion buffer capacity reserved from the `Frames:` header
    /// before any value has been read. Larger documents still load; the buffer
    /// grows as values arrive.
    pub max_preallocated_values: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: 256,
            max_frames: 16 * 1024 * 1024,
            max_preallocated_values: 16 * 1024 * 1024,
        }
    }
}
