//! # Systems
//!
//! A system is a named unit of per-tick logic. The world owns an ordered
//! list of boxed systems and runs them in registration order; there is no
//! dependency graph, so registration order is part of the contract.
//!
//! The world is passed into every call instead of being captured at
//! construction.

use super::world::World;

/// Per-tick logic operating on a [`World`].
pub trait System {
    /// Unique name, used for removal and logs.
    fn name(&self) -> &str;

    /// Called once when the system is registered.
    fn init(&mut self, _world: &mut World) {}

    /// Called once per tick with the elapsed time in seconds.
    fn update(&mut self, world: &mut World, dt: f32);

    /// Called once when the system is removed or the world is cleared.
    fn destroy(&mut self, _world: &mut World) {}
}

/// A system built from a closure.
///
/// ```rust,ignore
/// world.add_system(FnSystem::new("spin", |world: &mut World, dt| {
///     for (_, transform) in world.storages_mut().transforms.iter_mut() {
///         transform.rotation.z += dt;
///     }
/// }))?;
/// ```
pub struct FnSystem<F> {
    name: String,
    run: F,
}

impl<F> FnSystem<F>
where
    F: FnMut(&mut World, f32),
{
    /// Wraps `run` under the given name.
    pub fn new(name: impl Into<String>, run: F) -> Self {
        Self {
            name: name.into(),
            run,
        }
    }
}

impl<F> System for FnSystem<F>
where
    F: FnMut(&mut World, f32),
{
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&mut self, world: &mut World, dt: f32) {
        (self.run)(world, dt);
    }
}
