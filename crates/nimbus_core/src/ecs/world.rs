//! # ECS World
//!
//! The central container for entities, their components, and the ordered
//! system list.
//!
//! The world owns two views of the same data:
//! - the slot table, where each [`EntityRecord`] carries a mask of its kinds
//! - [`ComponentStorages`], the per-kind index of entity → component
//!
//! Every mutation goes through the world and updates both, so a kind index
//! never holds an entity that lacks that kind (or the reverse).

use super::component::{AnyComponent, Component, ComponentKind, ComponentStorages, KindMask};
use super::entity::{Entity, EntityId, EntityRecord};
use super::error::{EcsError, EcsResult};
use super::storage::ComponentStorage;
use super::system::System;

struct Slot {
    generation: u32,
    record: Option<EntityRecord>,
}

/// System-list changes requested while `update` holds the running list.
#[derive(Default)]
struct InFlight {
    /// Names of the systems taken out for this tick.
    names: Vec<String>,
    /// Running systems to remove once the tick ends.
    removed: Vec<String>,
    /// Clear the world once the tick ends.
    clear: bool,
}

impl InFlight {
    fn running(&self) -> impl Iterator<Item = &str> {
        self.names
            .iter()
            .filter(|name| !self.removed.contains(name))
            .map(String::as_str)
    }

    fn is_running(&self, name: &str) -> bool {
        self.running().any(|running| running == name)
    }
}

/// The ECS World - container for all simulation state.
///
/// # Example
///
/// ```rust,ignore
/// let mut world = World::new();
///
/// let id = world.add_entity(Entity::named("stone").with(Transform::from_xy(300.0, 500.0)));
/// world.add_system(PhysicsSystem::new(PhysicsConfig::default(), events.sender()))?;
/// world.update(1.0 / 60.0);
/// ```
pub struct World {
    /// Entity slots; freed slots are reused with a bumped generation.
    slots: Vec<Slot>,
    /// Free list of slot indices for reuse.
    free_indices: Vec<u32>,
    /// Number of currently registered entities.
    alive_count: usize,
    /// Per-kind component columns.
    storages: ComponentStorages,
    /// Systems in registration order.
    systems: Vec<Box<dyn System>>,
    /// Set while `update` runs the system list.
    in_flight: Option<InFlight>,
    /// Completed `update` calls.
    tick: u64,
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty world with room for `capacity` entities.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_indices: Vec::new(),
            alive_count: 0,
            storages: ComponentStorages::default(),
            systems: Vec::new(),
            in_flight: None,
            tick: 0,
        }
    }

    // =========================================================================
    // Entities
    // =========================================================================

    /// Returns the number of registered entities.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.alive_count
    }

    /// Returns `true` if no entities are registered.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.alive_count == 0
    }

    /// Registers a detached entity and indexes every component it holds.
    pub fn add_entity(&mut self, entity: Entity) -> EntityId {
        let (name, components) = entity.into_parts();
        let id = self.allocate();

        let mut record = EntityRecord::new(id, name);
        for component in components {
            record.component_mask = record.component_mask.with(component.kind());
            self.storages.insert_any(id, component);
        }

        tracing::trace!("entity {} ({}) registered", id, record.display_name());
        self.slots[id.index() as usize].record = Some(record);
        self.alive_count += 1;
        id
    }

    fn allocate(&mut self) -> EntityId {
        if let Some(index) = self.free_indices.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generation = slot.generation.wrapping_add(1);
            return EntityId::new(index, slot.generation);
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            record: None,
        });
        EntityId::new(index, 0)
    }

    /// Removes an entity, purging every component from the index first.
    ///
    /// Returns `false` (and does nothing) if the entity is absent or stale.
    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        let Some(mask) = self.entity(id).map(|record| record.component_mask) else {
            return false;
        };

        for kind in mask.iter() {
            self.storages.remove_any(id, kind);
        }

        self.slots[id.index() as usize].record = None;
        self.free_indices.push(id.index());
        self.alive_count -= 1;
        tracing::trace!("entity {} removed", id);
        true
    }

    /// Checks if an entity is registered.
    #[inline]
    #[must_use]
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.entity(id).is_some()
    }

    /// Gets an entity record by ID, or None if absent or stale.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&EntityRecord> {
        if id.is_null() {
            return None;
        }
        self.slots
            .get(id.index() as usize)?
            .record
            .as_ref()
            .filter(|record| record.id == id)
    }

    fn entity_mut(&mut self, id: EntityId) -> Option<&mut EntityRecord> {
        if id.is_null() {
            return None;
        }
        self.slots
            .get_mut(id.index() as usize)?
            .record
            .as_mut()
            .filter(|record| record.id == id)
    }

    /// Iterates over all registered entities (slot order, no ordering contract).
    pub fn entities(&self) -> impl Iterator<Item = &EntityRecord> {
        self.slots.iter().filter_map(|slot| slot.record.as_ref())
    }

    /// Returns the ids of all registered entities.
    #[must_use]
    pub fn entity_ids(&self) -> Vec<EntityId> {
        self.entities().map(|record| record.id).collect()
    }

    /// Finds the first entity with the given name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<EntityId> {
        self.entities()
            .find(|record| record.name.as_deref() == Some(name))
            .map(|record| record.id)
    }

    // =========================================================================
    // Components
    // =========================================================================

    /// Attaches a component to a registered entity, returning the one it
    /// replaced.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::NoSuchEntity`] if `id` is absent or stale.
    pub fn insert<C: Component>(&mut self, id: EntityId, component: C) -> EcsResult<Option<C>> {
        self.insert_any(id, component.into_any())
            .map(|previous| previous.and_then(C::from_any))
    }

    /// Untyped form of [`World::insert`].
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::NoSuchEntity`] if `id` is absent or stale.
    pub fn insert_any(
        &mut self,
        id: EntityId,
        component: AnyComponent,
    ) -> EcsResult<Option<AnyComponent>> {
        let kind = component.kind();
        let record = self.entity_mut(id).ok_or(EcsError::NoSuchEntity(id))?;
        record.component_mask = record.component_mask.with(kind);
        Ok(self.storages.insert_any(id, component))
    }

    /// Detaches a component from an entity.
    pub fn remove<C: Component>(&mut self, id: EntityId) -> Option<C> {
        self.remove_kind(id, C::KIND).and_then(C::from_any)
    }

    /// Detaches the component of `kind` from an entity.
    pub fn remove_kind(&mut self, id: EntityId, kind: ComponentKind) -> Option<AnyComponent> {
        let record = self.entity_mut(id)?;
        if !record.has_component(kind) {
            return None;
        }
        record.component_mask = record.component_mask.without(kind);
        self.storages.remove_any(id, kind)
    }

    /// Gets a typed component.
    #[inline]
    #[must_use]
    pub fn get<C: Component>(&self, id: EntityId) -> Option<&C> {
        C::storage(&self.storages).get(id)
    }

    /// Gets a typed component mutably.
    #[inline]
    pub fn get_mut<C: Component>(&mut self, id: EntityId) -> Option<&mut C> {
        C::storage_mut(&mut self.storages).get_mut(id)
    }

    /// Checks if an entity has a component of `kind`.
    #[must_use]
    pub fn has(&self, id: EntityId, kind: ComponentKind) -> bool {
        self.entity(id).is_some_and(|record| record.has_component(kind))
    }

    /// Clones every component attached to an entity, in kind order.
    #[must_use]
    pub fn all_components(&self, id: EntityId) -> Vec<AnyComponent> {
        let Some(record) = self.entity(id) else {
            return Vec::new();
        };
        record
            .component_kinds()
            .filter_map(|kind| self.storages.get_any(id, kind))
            .collect()
    }

    /// The index column for one component type.
    #[inline]
    #[must_use]
    pub fn components<C: Component>(&self) -> &ComponentStorage<C> {
        C::storage(&self.storages)
    }

    /// The index column for one component type, mutably.
    #[inline]
    pub fn components_mut<C: Component>(&mut self) -> &mut ComponentStorage<C> {
        C::storage_mut(&mut self.storages)
    }

    /// Untyped form of [`World::components`]: clones of every component of
    /// `kind`, paired with its owner, in column order.
    #[must_use]
    pub fn components_of(&self, kind: ComponentKind) -> Vec<(EntityId, AnyComponent)> {
        self.storages
            .ids(kind)
            .iter()
            .filter_map(|&id| self.storages.get_any(id, kind).map(|component| (id, component)))
            .collect()
    }

    /// Ids indexed under `kind` (empty if none).
    #[must_use]
    pub fn ids_with_kind(&self, kind: ComponentKind) -> &[EntityId] {
        self.storages.ids(kind)
    }

    /// All columns, for borrowing several at once.
    #[inline]
    #[must_use]
    pub fn storages(&self) -> &ComponentStorages {
        &self.storages
    }

    /// All columns mutably, for borrowing several at once.
    ///
    /// Components can be mutated in place; attaching and detaching still goes
    /// through the world.
    #[inline]
    pub fn storages_mut(&mut self) -> &mut ComponentStorages {
        &mut self.storages
    }

    /// Entities holding every kind in `kinds`.
    ///
    /// An empty list returns every entity. Otherwise the candidates are the
    /// ids indexed under `kinds[0]`, filtered by a mask test on the rest.
    #[must_use]
    pub fn entities_with(&self, kinds: &[ComponentKind]) -> Vec<EntityId> {
        let Some((&first, rest)) = kinds.split_first() else {
            return self.entity_ids();
        };

        let required = KindMask::from_kinds(rest);
        self.storages
            .ids(first)
            .iter()
            .copied()
            .filter(|&id| {
                self.entity(id)
                    .is_some_and(|record| record.component_mask.contains_all(required))
            })
            .collect()
    }

    // =========================================================================
    // Systems
    // =========================================================================

    /// Registers a system at the end of the list and calls its `init`.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::DuplicateSystem`] if the name is taken.
    pub fn add_system<S: System + 'static>(&mut self, system: S) -> EcsResult<()> {
        self.add_boxed_system(Box::new(system))
    }

    /// Boxed form of [`World::add_system`].
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::DuplicateSystem`] if the name is taken.
    pub fn add_boxed_system(&mut self, mut system: Box<dyn System>) -> EcsResult<()> {
        if self.contains_system(system.name()) {
            tracing::warn!("rejected duplicate system `{}`", system.name());
            return Err(EcsError::DuplicateSystem(system.name().to_string()));
        }

        system.init(self);
        tracing::debug!(
            "system `{}` registered at position {}",
            system.name(),
            self.systems.len()
        );
        self.systems.push(system);
        Ok(())
    }

    /// Removes a system by name, calling its `destroy`.
    ///
    /// Called from inside a tick, a running system keeps running until the
    /// tick ends and is destroyed then. Returns `false` if no system has
    /// that name.
    pub fn remove_system(&mut self, name: &str) -> bool {
        if let Some(in_flight) = self.in_flight.as_mut() {
            if in_flight.is_running(name) {
                in_flight.removed.push(name.to_string());
                tracing::debug!("system `{}` removal deferred to end of tick", name);
                return true;
            }
        }

        let Some(index) = self.systems.iter().position(|s| s.name() == name) else {
            return false;
        };

        let mut system = self.systems.remove(index);
        system.destroy(self);
        tracing::debug!("system `{}` removed", name);
        true
    }

    /// Checks if a system with this name is registered.
    #[must_use]
    pub fn contains_system(&self, name: &str) -> bool {
        self.systems.iter().any(|s| s.name() == name)
            || self
                .in_flight
                .as_ref()
                .is_some_and(|in_flight| in_flight.is_running(name))
    }

    /// Names of the registered systems, in run order.
    #[must_use]
    pub fn system_names(&self) -> Vec<&str> {
        self.in_flight
            .iter()
            .flat_map(|in_flight| in_flight.running())
            .chain(self.systems.iter().map(|s| s.name()))
            .collect()
    }

    /// Runs every system once, in registration order.
    ///
    /// Changes a system makes to the list take effect from the next tick:
    /// systems added while the list is running are appended after it, and
    /// removals and [`World::clear`] are applied once the last system ran.
    pub fn update(&mut self, dt: f32) {
        if self.in_flight.is_some() {
            tracing::warn!("nested World::update ignored");
            return;
        }

        let mut systems = std::mem::take(&mut self.systems);
        self.in_flight = Some(InFlight {
            names: systems.iter().map(|s| s.name().to_string()).collect(),
            ..InFlight::default()
        });
        for system in &mut systems {
            system.update(self, dt);
        }

        let in_flight = self.in_flight.take().unwrap_or_default();
        let added = std::mem::replace(&mut self.systems, systems);
        for name in &in_flight.removed {
            self.remove_system(name);
        }
        self.systems.extend(added);
        self.tick += 1;

        if in_flight.clear {
            self.clear();
        }
    }

    /// Number of completed `update` calls.
    #[inline]
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Destroys every system in list order, then drops all entities and
    /// empties the index.
    ///
    /// Slots are kept so handles issued before the clear stay stale.
    /// Called from inside a tick, the clear happens once the tick ends.
    pub fn clear(&mut self) {
        if let Some(in_flight) = self.in_flight.as_mut() {
            in_flight.clear = true;
            tracing::debug!("world clear deferred to end of tick");
            return;
        }

        let systems = std::mem::take(&mut self.systems);
        for mut system in systems {
            system.destroy(self);
        }
        // Systems registered by a `destroy` are torn down too.
        for mut system in std::mem::take(&mut self.systems) {
            system.destroy(self);
        }

        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.record.take().is_some() {
                self.free_indices.push(index as u32);
            }
        }
        self.alive_count = 0;
        self.storages.clear();
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::components::{Collider, Controller, Health, Transform};
    use crate::ecs::FnSystem;
    use crate::math::Vec3;

    fn mover() -> Entity {
        Entity::named("mover")
            .with(Transform::from_xy(0.0, 0.0))
            .with(Collider::new_box(10.0, 10.0))
    }

    #[test]
    fn test_add_entity_indexes_components() {
        let mut world = World::new();
        let id = world.add_entity(mover());

        assert_eq!(world.len(), 1);
        assert!(world.components::<Transform>().contains(id));
        assert!(world.components::<Collider>().contains(id));
        assert!(world.components::<Health>().is_empty());
        assert_eq!(world.all_components(id).len(), 2);
        assert_eq!(world.find_by_name("mover"), Some(id));
    }

    #[test]
    fn test_remove_entity_purges_index() {
        let mut world = World::new();
        let id = world.add_entity(mover().with(Health::new(10.0)));
        let other = world.add_entity(mover());

        assert!(world.remove_entity(id));
        assert!(!world.is_alive(id));
        for kind in ComponentKind::ALL {
            assert!(!world.ids_with_kind(kind).contains(&id), "{kind} still holds {id}");
        }
        assert!(world.is_alive(other));
        assert!(!world.remove_entity(id), "second removal is a no-op");
    }

    #[test]
    fn test_slot_reuse_bumps_generation() {
        let mut world = World::new();
        let first = world.add_entity(mover());
        world.remove_entity(first);
        let second = world.add_entity(mover());

        assert_eq!(first.index(), second.index());
        assert_ne!(first.generation(), second.generation());
        assert!(world.get::<Transform>(first).is_none());
        assert!(world.get::<Transform>(second).is_some());
    }

    #[test]
    fn test_late_insert_and_remove_keep_index_current() {
        let mut world = World::new();
        let id = world.add_entity(Entity::named("late"));

        assert!(world.entities_with(&[ComponentKind::Health]).is_empty());
        assert_eq!(world.insert(id, Health::new(5.0)), Ok(None));
        assert_eq!(world.entities_with(&[ComponentKind::Health]), vec![id]);

        let replaced = world.insert(id, Health::new(7.0)).unwrap();
        assert_eq!(replaced.map(|h| h.max), Some(5.0));
        assert_eq!(world.components::<Health>().len(), 1);

        assert_eq!(world.remove::<Health>(id).map(|h| h.max), Some(7.0));
        assert!(!world.has(id, ComponentKind::Health));
        assert!(world.entities_with(&[ComponentKind::Health]).is_empty());
    }

    #[test]
    fn test_insert_on_missing_entity_fails() {
        let mut world = World::new();
        let id = world.add_entity(Entity::new());
        world.remove_entity(id);

        assert_eq!(
            world.insert(id, Health::new(1.0)),
            Err(EcsError::NoSuchEntity(id))
        );
        assert!(world.components::<Health>().is_empty());
    }

    #[test]
    fn test_entities_with_filters_by_every_kind() {
        let mut world = World::new();
        let both = world.add_entity(mover());
        let only_transform = world.add_entity(Entity::new().with(Transform::default()));
        let only_collider = world.add_entity(Entity::new().with(Collider::default()));

        let mut found = world.entities_with(&[ComponentKind::Transform, ComponentKind::Collider]);
        found.sort();
        assert_eq!(found, vec![both]);

        let mut all = world.entities_with(&[]);
        all.sort();
        assert_eq!(all, vec![both, only_transform, only_collider]);
        assert!(world.entities_with(&[ComponentKind::Animation]).is_empty());
    }

    #[test]
    fn test_get_mut_mutates_in_place() {
        let mut world = World::new();
        let id = world.add_entity(mover());

        if let Some(transform) = world.get_mut::<Transform>(id) {
            transform.position.x = 42.0;
        }
        assert_eq!(world.get::<Transform>(id).map(|t| t.position), Some(Vec3::xy(42.0, 0.0)));
    }

    #[test]
    fn test_systems_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut world = World::new();

        for name in ["input", "ai", "physics"] {
            let log = Rc::clone(&log);
            world
                .add_system(FnSystem::new(name, move |_: &mut World, _| {
                    log.borrow_mut().push(name);
                }))
                .unwrap();
        }

        world.update(0.016);
        world.update(0.016);

        assert_eq!(
            *log.borrow(),
            vec!["input", "ai", "physics", "input", "ai", "physics"]
        );
        assert_eq!(world.tick(), 2);
    }

    struct Lifecycle {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl System for Lifecycle {
        fn name(&self) -> &str {
            self.name
        }

        fn init(&mut self, _world: &mut World) {
            self.log.borrow_mut().push(format!("init {}", self.name));
        }

        fn update(&mut self, _world: &mut World, _dt: f32) {
            self.log.borrow_mut().push(format!("update {}", self.name));
        }

        fn destroy(&mut self, _world: &mut World) {
            self.log.borrow_mut().push(format!("destroy {}", self.name));
        }
    }

    #[test]
    fn test_system_lifecycle() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut world = World::new();
        for name in ["a", "b", "c"] {
            world
                .add_system(Lifecycle {
                    name,
                    log: Rc::clone(&log),
                })
                .unwrap();
        }
        world.add_entity(mover());

        assert!(world.remove_system("b"));
        assert!(!world.remove_system("b"));
        assert_eq!(world.system_names(), vec!["a", "c"]);

        world.clear();
        assert!(world.is_empty());
        assert!(world.system_names().is_empty());
        assert!(world.components::<Transform>().is_empty());

        assert_eq!(
            *log.borrow(),
            vec!["init a", "init b", "init c", "destroy b", "destroy a", "destroy c"]
        );
    }

    #[test]
    fn test_duplicate_system_name_rejected() {
        let mut world = World::new();
        world.add_system(FnSystem::new("ai", |_: &mut World, _| {})).unwrap();
        let err = world
            .add_system(FnSystem::new("ai", |_: &mut World, _| {}))
            .unwrap_err();
        assert_eq!(err, EcsError::DuplicateSystem("ai".into()));
        assert_eq!(world.system_names(), vec!["ai"]);
    }

    #[test]
    fn test_remove_system_mid_tick_applies_after_tick() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let removed = Rc::new(RefCell::new(Vec::new()));
        let mut world = World::new();
        world
            .add_system(Lifecycle {
                name: "counter",
                log: Rc::clone(&log),
            })
            .unwrap();
        let results = Rc::clone(&removed);
        world
            .add_system(FnSystem::new("killer", move |world: &mut World, _| {
                results.borrow_mut().push(world.remove_system("counter"));
            }))
            .unwrap();

        for _ in 0..3 {
            world.update(0.016);
        }

        assert_eq!(*removed.borrow(), vec![true, false, false]);
        assert_eq!(
            *log.borrow(),
            vec!["init counter", "update counter", "destroy counter"]
        );
        assert_eq!(world.system_names(), vec!["killer"]);
    }

    #[test]
    fn test_running_system_hidden_from_list_after_mid_tick_removal() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut world = World::new();
        world.add_system(FnSystem::new("a", |_: &mut World, _| {})).unwrap();
        let names = Rc::clone(&seen);
        world
            .add_system(FnSystem::new("b", move |world: &mut World, _| {
                world.remove_system("a");
                names.borrow_mut().extend(
                    world.system_names().into_iter().map(str::to_string),
                );
                names.borrow_mut().push(world.contains_system("b").to_string());
            }))
            .unwrap();

        world.update(0.016);
        assert_eq!(*seen.borrow(), vec!["b", "true"]);
    }

    #[test]
    fn test_duplicate_name_rejected_mid_tick() {
        let outcomes = Rc::new(RefCell::new(Vec::new()));
        let mut world = World::new();
        let record = Rc::clone(&outcomes);
        world
            .add_system(FnSystem::new("spawner", move |world: &mut World, _| {
                let twin = world.add_system(FnSystem::new("spawner", |_: &mut World, _| {}));
                record.borrow_mut().push(twin);
            }))
            .unwrap();

        world.update(0.016);
        world.update(0.016);

        assert_eq!(
            *outcomes.borrow(),
            vec![
                Err(EcsError::DuplicateSystem("spawner".into())),
                Err(EcsError::DuplicateSystem("spawner".into())),
            ]
        );
        assert_eq!(world.system_names(), vec!["spawner"]);
    }

    #[test]
    fn test_clear_mid_tick_applies_after_tick() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut world = World::new();
        world
            .add_system(Lifecycle {
                name: "a",
                log: Rc::clone(&log),
            })
            .unwrap();
        world
            .add_system(FnSystem::new("wiper", |world: &mut World, _| world.clear()))
            .unwrap();
        world
            .add_system(Lifecycle {
                name: "b",
                log: Rc::clone(&log),
            })
            .unwrap();
        world.add_entity(mover());

        world.update(0.016);

        assert!(world.is_empty());
        assert!(world.system_names().is_empty());
        assert_eq!(
            *log.borrow(),
            vec!["init a", "init b", "update a", "update b", "destroy a", "destroy b"]
        );

        world.update(0.016);
        assert_eq!(world.tick(), 2);
    }

    #[test]
    fn test_system_mutates_components() {
        let mut world = World::new();
        let id = world.add_entity(Entity::new().with(Controller::player()));

        world
            .add_system(FnSystem::new("press-jump", |world: &mut World, _| {
                for (_, controller) in world.storages_mut().controllers.iter_mut() {
                    controller.inputs.jump = true;
                }
            }))
            .unwrap();
        world.update(0.016);

        assert_eq!(world.get::<Controller>(id).map(|c| c.inputs.jump), Some(true));
    }

    #[test]
    fn test_clear_invalidates_old_handles() {
        let mut world = World::new();
        let old = world.add_entity(mover());
        world.clear();
        let new = world.add_entity(mover());

        assert!(!world.is_alive(old));
        assert!(world.is_alive(new));
        assert_eq!(world.len(), 1);
    }
}
