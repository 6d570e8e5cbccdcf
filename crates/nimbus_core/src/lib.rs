//! # NIMBUS Core
//!
//! The entity-component kernel of the NIMBUS brawler simulation:
//! - Generational entity handles
//! - A closed set of component kinds with one dense column per kind
//! - A `World` that keeps entity masks and per-kind columns consistent
//! - An ordered, single-threaded system list
//!
//! ## Example
//!
//! ```rust,ignore
//! use nimbus_core::{Entity, World, Transform, Collider, ComponentKind};
//!
//! let mut world = World::new();
//! let id = world.add_entity(
//!     Entity::named("platform")
//!         .with(Transform::from_xy(200.0, 450.0))
//!         .with(Collider::new_box(120.0, 20.0)),
//! );
//! let solids = world.entities_with(&[ComponentKind::Transform, ComponentKind::Collider]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod components;
pub mod ecs;
pub mod math;

pub use components::{
    Action, Animation, Collider, ColliderShape, Controller, ControllerKind, DamageOutcome,
    DrawBackend, Drawable, Health, InputState, Sprite, Transform,
};
pub use ecs::{
    AnyComponent, Component, ComponentKind, ComponentStorage, ComponentStorages, EcsError,
    EcsResult, Entity, EntityId, EntityRecord, FnSystem, KindMask, System, World,
};
pub use math::Vec3;
