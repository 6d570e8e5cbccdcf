//! # Component Storage
//!
//! Dense component storage keyed by entity, one column per component type.
//!
//! The storage is a sparse set:
//! - `dense` holds the components contiguously (cache-friendly iteration)
//! - `owners` holds the owning entity of each dense slot
//! - `sparse` maps an entity's slot index to its dense slot
//!
//! Lookups are O(1) and check the generation stored in `owners`, so a stale
//! [`EntityId`] never resolves to a reused slot's component.

use super::entity::EntityId;

/// Storage for a single component type.
///
/// # Example
///
/// ```rust,ignore
/// let transforms = world.components::<Transform>();
/// for (id, transform) in transforms.iter() {
///     println!("{id}: {:?}", transform.position);
/// }
/// ```
#[derive(Clone, Debug)]
pub struct ComponentStorage<C> {
    /// The dense array of components.
    dense: Vec<C>,
    /// Owner of each dense slot, parallel to `dense`.
    owners: Vec<EntityId>,
    /// Entity slot index -> dense slot.
    sparse: Vec<Option<u32>>,
}

impl<C> ComponentStorage<C> {
    /// Creates empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates empty storage with room for `capacity` components.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            dense: Vec::with_capacity(capacity),
            owners: Vec::with_capacity(capacity),
            sparse: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of stored components.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// Returns `true` if no components are stored.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    #[inline]
    fn dense_index(&self, id: EntityId) -> Option<usize> {
        let slot = (*self.sparse.get(id.index() as usize)?)? as usize;
        (self.owners[slot] == id).then_some(slot)
    }

    /// Checks if `id` owns a component here.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.dense_index(id).is_some()
    }

    /// Gets the component owned by `id`.
    #[inline]
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&C> {
        self.dense_index(id).map(|slot| &self.dense[slot])
    }

    /// Gets the component owned by `id` mutably.
    #[inline]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut C> {
        self.dense_index(id).map(|slot| &mut self.dense[slot])
    }

    /// Returns the owning ids, parallel to [`ComponentStorage::values`].
    #[inline]
    #[must_use]
    pub fn ids(&self) -> &[EntityId] {
        &self.owners
    }

    /// Returns the components as a dense slice.
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[C] {
        &self.dense
    }

    /// Iterates over all components with their owners.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &C)> {
        self.owners.iter().copied().zip(self.dense.iter())
    }

    /// Iterates mutably over all components with their owners.
    #[inline]
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut C)> {
        self.owners.iter().copied().zip(self.dense.iter_mut())
    }

    /// Stores `component` for `id`, returning the component it replaced.
    pub(crate) fn insert(&mut self, id: EntityId, component: C) -> Option<C> {
        let index = id.index() as usize;
        if index >= self.sparse.len() {
            self.sparse.resize(index + 1, None);
        }

        match self.sparse[index] {
            Some(slot) => {
                let slot = slot as usize;
                let previous_owner = std::mem::replace(&mut self.owners[slot], id);
                let previous = std::mem::replace(&mut self.dense[slot], component);
                (previous_owner == id).then_some(previous)
            }
            None => {
                self.sparse[index] = Some(self.dense.len() as u32);
                self.dense.push(component);
                self.owners.push(id);
                None
            }
        }
    }

    /// Removes the component owned by `id`.
    ///
    /// The last dense slot is moved into the hole, so column order is not
    /// stable across removals.
    pub(crate) fn remove(&mut self, id: EntityId) -> Option<C> {
        let slot = self.dense_index(id)?;
        self.sparse[id.index() as usize] = None;

        let component = self.dense.swap_remove(slot);
        self.owners.swap_remove(slot);

        if let Some(moved) = self.owners.get(slot) {
            self.sparse[moved.index() as usize] = Some(slot as u32);
        }

        Some(component)
    }

    /// Removes every component.
    pub(crate) fn clear(&mut self) {
        self.dense.clear();
        self.owners.clear();
        self.sparse.clear();
    }
}

impl<C> Default for ComponentStorage<C> {
    fn default() -> Self {
        Self::new()
    }
}
