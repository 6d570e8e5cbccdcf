//! # Entity Component System
//!
//! A small ECS for a side-scrolling simulation.
//!
//! ## Design Philosophy
//!
//! - Entity IDs are slot indices with generation counters
//! - Components are a closed set of kinds, each stored in its own dense column
//! - The per-kind columns double as the "which entities have kind K" index
//! - Systems run in registration order and receive the world on every call

mod component;
mod entity;
mod error;
mod storage;
mod system;
mod world;

pub use component::{AnyComponent, Component, ComponentKind, ComponentStorages, KindMask};
pub use entity::{Entity, EntityId, EntityRecord};
pub use error::{EcsError, EcsResult};
pub use storage::ComponentStorage;
pub use system::{FnSystem, System};
pub use world::World;
