//! # Stages
//!
//! A stage places entities, scripts progress each tick and reports when it
//! is done. The game loop runs at most one stage at a time.
//!
//! Stages spawn through a [`StageRoster`] so that tearing a stage down
//! removes exactly the entities it created.

use nimbus_core::{Entity, EntityId, Transform, World};

use crate::events::{EventSender, GameEvent};

/// Entities spawned by one stage.
#[derive(Clone, Default)]
pub struct StageRoster {
    entities: Vec<EntityId>,
    events: Option<EventSender>,
}

impl StageRoster {
    /// Creates an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports spawns and despawns on `events` from now on.
    pub fn attach(&mut self, events: EventSender) {
        self.events = Some(events);
    }

    /// Registers `entity` and remembers its handle.
    pub fn spawn(&mut self, world: &mut World, entity: Entity) -> EntityId {
        let id = world.add_entity(entity);
        self.entities.push(id);

        if let Some(events) = &self.events {
            let position = world
                .get::<Transform>(id)
                .map_or([0.0; 3], |transform| transform.position.to_array());
            events.send(GameEvent::EntitySpawned {
                entity: id,
                position,
            });
        }
        id
    }

    /// Handles of every entity spawned so far, in spawn order.
    #[must_use]
    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    /// First live spawned entity with `name`.
    #[must_use]
    pub fn find(&self, world: &World, name: &str) -> Option<EntityId> {
        self.entities.iter().copied().find(|&id| {
            world
                .entity(id)
                .is_some_and(|record| record.name.as_deref() == Some(name))
        })
    }

    /// Removes every spawned entity still alive and forgets them all.
    pub fn despawn_all(&mut self, world: &mut World) {
        for id in self.entities.drain(..) {
            if world.remove_entity(id) {
                if let Some(events) = &self.events {
                    events.send(GameEvent::EntityDespawned { entity: id });
                }
            }
        }
    }
}

/// A level script.
pub trait Stage {
    /// Short identifier, used in logs.
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str {
        ""
    }

    /// The stage's spawn roster.
    fn roster(&mut self) -> &mut StageRoster;

    /// Places the stage's entities.
    fn init(&mut self, world: &mut World);

    /// Advances the script by one tick, after the world's systems ran.
    fn update(&mut self, world: &mut World, dt: f32);

    /// Whether the stage's goal has been reached.
    fn is_complete(&self, world: &World) -> bool;

    /// Removes everything the stage spawned.
    fn destroy(&mut self, world: &mut World) {
        self.roster().despawn_all(world);
    }
}
