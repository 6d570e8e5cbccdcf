//! Vector math used by transforms and colliders.
//!
//! The simulation is effectively 2-D (x to the right, y downward), but
//! transforms carry a full 3-vector so z can be used for layering.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 3D Vector - position, rotation, scale, velocity
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    #[serde(default)]
    pub z: f32,
}

impl Vec3 {
    /// Creates a new Vec3
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Creates a Vec3 on the z = 0 plane.
    #[must_use]
    pub const fn xy(x: f32, y: f32) -> Self {
        Self::new(x, y, 0.0)
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// All ones (identity scale)
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Converts to array, as carried by events.
    #[inline]
    #[must_use]
    pub fn to_array(self) -> [f32; 3] {
        bytemuck::cast(self)
    }
}
