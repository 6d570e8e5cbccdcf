//! Collision shapes and layer filtering.

use serde::{Deserialize, Serialize};

/// Shape of a collider, anchored at the transform's position (top-left).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ColliderShape {
    /// Axis-aligned rectangle.
    Box {
        /// Extent along x.
        width: f32,
        /// Extent along y.
        height: f32,
    },
    /// Circle inscribed in a `2r × 2r` square.
    Circle {
        /// Radius.
        radius: f32,
    },
    /// Convex polygon with points relative to the position.
    ///
    /// Reserved: polygons take part in boundary clamping but never report
    /// overlaps.
    Polygon {
        /// Vertices as `[x, y]` offsets.
        points: Vec<[f32; 2]>,
    },
}

impl ColliderShape {
    /// Width and height of the shape's bounding box.
    ///
    /// Polygons use their furthest vertex on each axis.
    #[must_use]
    pub fn extents(&self) -> (f32, f32) {
        match self {
            Self::Box { width, height } => (*width, *height),
            Self::Circle { radius } => (radius * 2.0, radius * 2.0),
            Self::Polygon { points } => points
                .iter()
                .fold((0.0_f32, 0.0_f32), |(w, h), [x, y]| (w.max(*x), h.max(*y))),
        }
    }

    /// Returns the box dimensions, or None for other shapes.
    #[must_use]
    pub fn as_box(&self) -> Option<(f32, f32)> {
        match self {
            Self::Box { width, height } => Some((*width, *height)),
            _ => None,
        }
    }
}

impl Default for ColliderShape {
    fn default() -> Self {
        Self::Box {
            width: 32.0,
            height: 32.0,
        }
    }
}

/// Collision volume of an entity.
///
/// Two colliders are tested against each other only when each one's layer
/// intersects the other's mask.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Collider {
    /// Bounding shape.
    #[serde(flatten)]
    pub shape: ColliderShape,
    /// Trigger colliders report overlaps but are not meant to block.
    pub is_trigger: bool,
    /// Layers this collider belongs to.
    pub layer: u32,
    /// Layers this collider is tested against.
    pub mask: u32,
    /// Disabled colliders skip gravity, clamping and overlap tests.
    pub enabled: bool,
}

impl Collider {
    /// Creates an enabled collider on layer 1 that collides with every layer.
    #[must_use]
    pub fn new(shape: ColliderShape) -> Self {
        Self {
            shape,
            is_trigger: false,
            layer: 1,
            mask: u32::MAX,
            enabled: true,
        }
    }

    /// Creates a box collider.
    #[must_use]
    pub fn new_box(width: f32, height: f32) -> Self {
        Self::new(ColliderShape::Box { width, height })
    }

    /// Creates a circle collider.
    #[must_use]
    pub fn circle(radius: f32) -> Self {
        Self::new(ColliderShape::Circle { radius })
    }

    /// Returns a copy on the given layer and mask.
    #[must_use]
    pub fn with_layers(mut self, layer: u32, mask: u32) -> Self {
        self.layer = layer;
        self.mask = mask;
        self
    }

    /// Returns a copy flagged as a trigger.
    #[must_use]
    pub fn as_trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// Checks the mutual layer/mask filter.
    #[inline]
    #[must_use]
    pub const fn interacts_with(&self, other: &Self) -> bool {
        (self.layer & other.mask) != 0 && (other.layer & self.mask) != 0
    }

    /// Re-enables the collider.
    pub fn reset(&mut self) {
        self.enabled = true;
    }
}

impl Default for Collider {
    fn default() -> Self {
        Self::new(ColliderShape::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extents() {
        assert_eq!(Collider::new_box(10.0, 20.0).shape.extents(), (10.0, 20.0));
        assert_eq!(Collider::circle(5.0).shape.extents(), (10.0, 10.0));
        let triangle = ColliderShape::Polygon {
            points: vec![[0.0, 0.0], [30.0, 0.0], [15.0, 12.0]],
        };
        assert_eq!(triangle.extents(), (30.0, 12.0));
    }

    #[test]
    fn test_layer_filter_is_mutual() {
        let player = Collider::default().with_layers(0b01, 0b10);
        let enemy = Collider::default().with_layers(0b10, 0b01);
        let ghost = Collider::default().with_layers(0b10, 0b00);

        assert!(player.interacts_with(&enemy));
        assert!(enemy.interacts_with(&player));
        assert!(!player.interacts_with(&ghost));
        assert!(!ghost.interacts_with(&player));
    }

    #[test]
    fn test_deserialize_from_toml() {
        let collider: Collider = toml::from_str(
            r#"
            shape = "circle"
            radius = 8.0
            layer = 2
            "#,
        )
        .unwrap();
        assert_eq!(collider.shape, ColliderShape::Circle { radius: 8.0 });
        assert_eq!(collider.layer, 2);
        assert_eq!(collider.mask, u32::MAX);
        assert!(collider.enabled);
    }
}
