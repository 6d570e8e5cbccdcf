//! # Entity Management
//!
//! Entities are lightweight identifiers consisting of:
//! - An index into the world's slot table and component sparse sets
//! - A generation counter for safe reuse
//!
//! Before registration an entity is a detached [`Entity`]: a name plus an
//! enum-indexed table holding at most one component per kind. Registering it
//! moves the components into the world's columnar storage and leaves behind an
//! [`EntityRecord`].

use std::fmt;

use super::component::{AnyComponent, Component, ComponentKind, KindMask};

/// Unique identifier for an entity.
///
/// The ID is split into two parts:
/// - Lower 32 bits: Index into the slot table
/// - Upper 32 bits: Generation counter for detecting stale references
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates a new entity ID from index and generation.
    #[inline]
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | (index as u64))
    }

    /// Returns the index portion of the entity ID.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    /// Returns the generation portion of the entity ID.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Returns the packed 64-bit representation.
    #[inline]
    #[must_use]
    pub const fn to_bits(self) -> u64 {
        self.0
    }

    /// Null/invalid entity ID.
    pub const NULL: Self = Self(u64::MAX);

    /// Checks if this entity ID is null/invalid.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == u64::MAX
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::NULL
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            f.write_str("null")
        } else {
            write!(f, "{}v{}", self.index(), self.generation())
        }
    }
}

/// A registered entity as seen through the world's slot table.
///
/// Component data lives in the world's storages; the record only tracks
/// which kinds are attached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityRecord {
    /// The unique identifier for this entity.
    pub id: EntityId,
    /// Optional human-readable name, used for lookups and logs.
    pub name: Option<String>,
    /// Kinds of the components currently attached.
    pub(crate) component_mask: KindMask,
}

impl EntityRecord {
    pub(crate) fn new(id: EntityId, name: Option<String>) -> Self {
        Self {
            id,
            name,
            component_mask: KindMask::EMPTY,
        }
    }

    /// Checks if this entity has a component of the given kind.
    #[inline]
    #[must_use]
    pub const fn has_component(&self, kind: ComponentKind) -> bool {
        self.component_mask.contains(kind)
    }

    /// Checks if this entity has every one of the given kinds.
    #[must_use]
    pub fn has_all(&self, kinds: &[ComponentKind]) -> bool {
        kinds.iter().all(|&kind| self.has_component(kind))
    }

    /// Returns the attached component kinds, in kind order.
    pub fn component_kinds(&self) -> impl Iterator<Item = ComponentKind> + '_ {
        self.component_mask.iter()
    }

    /// Returns the name, or `"entity"` if unnamed.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("entity")
    }
}

/// A detached entity being assembled before registration.
///
/// Components are kept in a table indexed by [`ComponentKind`], so adding a
/// second component of a kind replaces the first.
///
/// # Example
///
/// ```rust,ignore
/// let player = Entity::named("goku")
///     .with(Transform::from_xy(100.0, 400.0))
///     .with(Collider::new_box(64.0, 96.0))
///     .with(Controller::player());
/// let id = world.add_entity(player);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Entity {
    name: Option<String>,
    components: [Option<AnyComponent>; ComponentKind::COUNT],
}

impl Entity {
    /// Creates an unnamed entity with no components.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a named entity with no components.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Builder form of [`Entity::add_component`].
    #[must_use]
    pub fn with(mut self, component: impl Into<AnyComponent>) -> Self {
        self.add_component(component);
        self
    }

    /// Attaches a component, returning the one it replaced.
    pub fn add_component(&mut self, component: impl Into<AnyComponent>) -> Option<AnyComponent> {
        let component = component.into();
        let slot = &mut self.components[component.kind().index()];
        slot.replace(component)
    }

    /// Detaches the component of the given kind.
    pub fn remove_component(&mut self, kind: ComponentKind) -> Option<AnyComponent> {
        self.components[kind.index()].take()
    }

    /// Returns the typed component, if attached.
    #[must_use]
    pub fn get<C: Component>(&self) -> Option<&C> {
        self.components[C::KIND.index()]
            .as_ref()
            .and_then(C::from_any_ref)
    }

    /// Returns the typed component mutably, if attached.
    pub fn get_mut<C: Component>(&mut self) -> Option<&mut C> {
        self.components[C::KIND.index()]
            .as_mut()
            .and_then(C::from_any_mut)
    }

    /// Checks if a component of the given kind is attached.
    #[must_use]
    pub fn has_component(&self, kind: ComponentKind) -> bool {
        self.components[kind.index()].is_some()
    }

    /// Returns every attached component, in kind order.
    pub fn all_components(&self) -> impl Iterator<Item = &AnyComponent> {
        self.components.iter().flatten()
    }

    /// Returns the kinds of every attached component.
    pub fn component_kinds(&self) -> impl Iterator<Item = ComponentKind> + '_ {
        self.all_components().map(AnyComponent::kind)
    }

    /// Returns the entity's name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn into_parts(self) -> (Option<String>, impl Iterator<Item = AnyComponent>) {
        (self.name, self.components.into_iter().flatten())
    }
}
