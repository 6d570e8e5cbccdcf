//! # Components
//!
//! Plain data records attached to entities. Behavior that only touches one
//! component (damage, clip playback) lives on the component; anything that
//! reads several components lives in a system.

mod animation;
mod collider;
mod controller;
mod health;
mod presentation;
mod transform;

pub use animation::Animation;
pub use collider::{Collider, ColliderShape};
pub use controller::{Action, Controller, ControllerKind, InputState};
pub use health::{DamageOutcome, Health};
pub use presentation::{DrawBackend, Drawable, Sprite};
pub use transform::Transform;
