//! Position, rotation, scale and velocity.

use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// Spatial state of an entity.
///
/// Rotation is stored as Euler angles in radians. The physics pass only reads
/// and writes `position`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    /// Top-left corner of the entity's bounds, in world units.
    pub position: Vec3,
    /// Euler rotation in radians.
    pub rotation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
    /// Velocity in world units per tick.
    pub velocity: Vec3,
}

impl Transform {
    /// Identity transform at the origin.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
        velocity: Vec3::ZERO,
    };

    /// Creates a transform at `position`.
    #[must_use]
    pub const fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Creates a transform at a 2-D position (z = 0).
    #[must_use]
    pub const fn from_xy(x: f32, y: f32) -> Self {
        Self::new(Vec3::xy(x, y))
    }

    /// Returns a copy with the given velocity.
    #[must_use]
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Returns a copy with the given scale.
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Restores the identity transform.
    pub fn reset(&mut self) {
        *self = Self::IDENTITY;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
