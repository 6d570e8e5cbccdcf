//! # NIMBUS Physics System
//!
//! Per-tick gravity, playfield clamping and pairwise overlap detection for
//! every entity holding a [`Transform`] and an enabled [`Collider`].
//!
//! Features:
//! - Gravity applied directly to `position.y`, then capped at `max_fall`
//! - Playfield clamping using the collider's bounding extents
//! - O(n²) box/box overlap test with mutual layer/mask filtering
//!
//! Overlaps are reported, never resolved.

use nimbus_core::{
    Collider, ColliderShape, ComponentKind, ComponentStorages, EntityId, System, Vec3, World,
};

use crate::config::PhysicsConfig;
use crate::events::{EventSender, GameEvent};

/// Registered name of [`PhysicsSystem`].
pub const PHYSICS_SYSTEM: &str = "physics";

// ============================================================================
// AABB (Axis-Aligned Bounding Box)
// ============================================================================

/// Axis-aligned rectangle in playfield coordinates (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Top-left corner.
    pub min: [f32; 2],
    /// Bottom-right corner.
    pub max: [f32; 2],
}

impl Aabb {
    /// Creates a box from its top-left corner and size.
    #[must_use]
    pub fn from_position(position: Vec3, width: f32, height: f32) -> Self {
        Self {
            min: [position.x, position.y],
            max: [position.x + width, position.y + height],
        }
    }

    /// Strict overlap; touching edges don't count.
    #[inline]
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min[0] < other.max[0]
            && self.max[0] > other.min[0]
            && self.min[1] < other.max[1]
            && self.max[1] > other.min[1]
    }
}

/// Overlap test between two placed shapes.
///
/// Only box/box pairs are tested; anything involving a circle or polygon
/// reports no overlap.
#[must_use]
pub fn shapes_overlap(
    a_position: Vec3,
    a_shape: &ColliderShape,
    b_position: Vec3,
    b_shape: &ColliderShape,
) -> bool {
    match (a_shape.as_box(), b_shape.as_box()) {
        (Some((aw, ah)), Some((bw, bh))) => Aabb::from_position(a_position, aw, ah)
            .intersects(&Aabb::from_position(b_position, bw, bh)),
        _ => false,
    }
}

/// Applies gravity, the fall cap and playfield clamping to one position.
pub fn integrate(position: &mut Vec3, shape: &ColliderShape, config: &PhysicsConfig) {
    position.y += config.gravity;
    if position.y > config.max_fall {
        position.y = config.max_fall;
    }

    let (width, height) = shape.extents();
    if position.y + height > config.world_height {
        position.y = config.world_height - height;
    }
    if position.y < 0.0 {
        position.y = 0.0;
    }
    if position.x < 0.0 {
        position.x = 0.0;
    }
    if position.x + width > config.world_width {
        position.x = config.world_width - width;
    }
}

/// One overlapping pair found by [`detect_contacts`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contact {
    /// Earlier entity in query order.
    pub a: EntityId,
    /// Later entity in query order.
    pub b: EntityId,
    /// Either collider is a trigger.
    pub trigger: bool,
}

/// Finds every overlapping unordered pair among `ids`.
///
/// Ids lacking a transform or an enabled collider are skipped.
#[must_use]
pub fn detect_contacts(storages: &ComponentStorages, ids: &[EntityId]) -> Vec<Contact> {
    let bodies: Vec<(EntityId, Vec3, &Collider)> = ids
        .iter()
        .filter_map(|&id| {
            let transform = storages.transforms.get(id)?;
            let collider = storages.colliders.get(id).filter(|c| c.enabled)?;
            Some((id, transform.position, collider))
        })
        .collect();

    let mut contacts = Vec::new();
    for (i, &(a, a_position, a_collider)) in bodies.iter().enumerate() {
        for &(b, b_position, b_collider) in &bodies[i + 1..] {
            if !a_collider.interacts_with(b_collider) {
                continue;
            }
            if shapes_overlap(a_position, &a_collider.shape, b_position, &b_collider.shape) {
                contacts.push(Contact {
                    a,
                    b,
                    trigger: a_collider.is_trigger || b_collider.is_trigger,
                });
            }
        }
    }
    contacts
}

// ============================================================================
// SYSTEM
// ============================================================================

/// Gravity, clamping and overlap reporting.
pub struct PhysicsSystem {
    config: PhysicsConfig,
    events: EventSender,
}

impl PhysicsSystem {
    /// Creates the system, reporting collisions on `events`.
    #[must_use]
    pub fn new(config: PhysicsConfig, events: EventSender) -> Self {
        Self { config, events }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }
}

impl System for PhysicsSystem {
    fn name(&self) -> &str {
        PHYSICS_SYSTEM
    }

    fn update(&mut self, world: &mut World, _dt: f32) {
        let ids = world.entities_with(&[ComponentKind::Transform, ComponentKind::Collider]);

        let ComponentStorages {
            transforms,
            colliders,
            ..
        } = world.storages_mut();
        for &id in &ids {
            let (Some(transform), Some(collider)) = (transforms.get_mut(id), colliders.get(id))
            else {
                continue;
            };
            if collider.enabled {
                integrate(&mut transform.position, &collider.shape, &self.config);
            }
        }

        for contact in detect_contacts(world.storages(), &ids) {
            tracing::debug!(
                "collision between {} and {}{}",
                contact.a,
                contact.b,
                if contact.trigger { " (trigger)" } else { "" }
            );
            self.events.send(GameEvent::Collision {
                a: contact.a,
                b: contact.b,
                trigger: contact.trigger,
            });
        }
    }
}
