//! Offset: a 3D float triple used for rest offsets and end sites.

use serde::{Deserialize, Serialize};

/// Positional offset relative to the parent joint.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Offset {
    pub const ZERO: Offset = Offset::new(0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Offset {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Offset> for [f32; 3] {
    fn from(offset: Offset) -> Self {
        offset.to_array()
    }
}
