//! # Component Kinds
//!
//! The set of component kinds is closed: every component is one variant of
//! [`AnyComponent`], discriminated by [`ComponentKind`]. Each kind has its own
//! typed column in [`ComponentStorages`], which makes "at most one component
//! per kind per entity" a property of the storage shape.

use std::fmt;

use super::entity::EntityId;
use super::storage::ComponentStorage;
use crate::components::{Animation, Collider, Controller, Drawable, Health, Sprite, Transform};

/// Discriminant for every component kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ComponentKind {
    /// Position, rotation, scale and velocity.
    Transform = 0,
    /// Collision shape and layer filtering.
    Collider = 1,
    /// Player/AI input snapshot.
    Controller = 2,
    /// Hit points and invulnerability.
    Health = 3,
    /// Clip state machine.
    Animation = 4,
    /// Sprite presentation metadata.
    Sprite = 5,
    /// Draw ordering and visibility.
    Drawable = 6,
}

impl ComponentKind {
    /// Number of component kinds.
    pub const COUNT: usize = 7;

    /// Every kind, in discriminant order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Transform,
        Self::Collider,
        Self::Controller,
        Self::Health,
        Self::Animation,
        Self::Sprite,
        Self::Drawable,
    ];

    /// Index into per-kind tables.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Bit for this kind in a [`KindMask`].
    #[inline]
    #[must_use]
    pub const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Lowercase name of the kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Transform => "transform",
            Self::Collider => "collider",
            Self::Controller => "controller",
            Self::Health => "health",
            Self::Animation => "animation",
            Self::Sprite => "sprite",
            Self::Drawable => "drawable",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bitmask of attached component kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct KindMask(u8);

impl KindMask {
    /// No kinds.
    pub const EMPTY: Self = Self(0);

    /// Builds a mask from a list of kinds.
    #[must_use]
    pub fn from_kinds(kinds: &[ComponentKind]) -> Self {
        kinds.iter().fold(Self::EMPTY, |mask, &kind| mask.with(kind))
    }

    /// Returns a copy with `kind` set.
    #[inline]
    #[must_use]
    pub const fn with(self, kind: ComponentKind) -> Self {
        Self(self.0 | kind.bit())
    }

    /// Returns a copy with `kind` cleared.
    #[inline]
    #[must_use]
    pub const fn without(self, kind: ComponentKind) -> Self {
        Self(self.0 & !kind.bit())
    }

    /// Checks if `kind` is set.
    #[inline]
    #[must_use]
    pub const fn contains(self, kind: ComponentKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Checks if every kind in `other` is set.
    #[inline]
    #[must_use]
    pub const fn contains_all(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Checks if no kind is set.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the set kinds in discriminant order.
    pub fn iter(self) -> impl Iterator<Item = ComponentKind> {
        ComponentKind::ALL
            .into_iter()
            .filter(move |&kind| self.contains(kind))
    }
}

/// A typed component that lives in one column of [`ComponentStorages`].
pub trait Component: Clone + fmt::Debug + 'static {
    /// The kind discriminant for this component type.
    const KIND: ComponentKind;

    /// The column holding this component type.
    fn storage(storages: &ComponentStorages) -> &ComponentStorage<Self>;

    /// The column holding this component type, mutably.
    fn storage_mut(storages: &mut ComponentStorages) -> &mut ComponentStorage<Self>;

    /// Wraps the component into the closed sum type.
    fn into_any(self) -> AnyComponent;

    /// Unwraps the sum type if it holds this component type.
    fn from_any(any: AnyComponent) -> Option<Self>;

    /// Borrows the component out of the sum type.
    fn from_any_ref(any: &AnyComponent) -> Option<&Self>;

    /// Mutably borrows the component out of the sum type.
    fn from_any_mut(any: &mut AnyComponent) -> Option<&mut Self>;
}

/// Any component, tagged with its kind.
#[derive(Clone, Debug, PartialEq)]
pub enum AnyComponent {
    /// A [`Transform`].
    Transform(Transform),
    /// A [`Collider`].
    Collider(Collider),
    /// A [`Controller`].
    Controller(Controller),
    /// A [`Health`].
    Health(Health),
    /// An [`Animation`].
    Animation(Animation),
    /// A [`Sprite`].
    Sprite(Sprite),
    /// A [`Drawable`].
    Drawable(Drawable),
}

impl AnyComponent {
    /// Returns the kind discriminant.
    #[must_use]
    pub const fn kind(&self) -> ComponentKind {
        match self {
            Self::Transform(_) => ComponentKind::Transform,
            Self::Collider(_) => ComponentKind::Collider,
            Self::Controller(_) => ComponentKind::Controller,
            Self::Health(_) => ComponentKind::Health,
            Self::Animation(_) => ComponentKind::Animation,
            Self::Sprite(_) => ComponentKind::Sprite,
            Self::Drawable(_) => ComponentKind::Drawable,
        }
    }
}

macro_rules! impl_component {
    ($ty:ident, $field:ident) => {
        impl Component for $ty {
            const KIND: ComponentKind = ComponentKind::$ty;

            #[inline]
            fn storage(storages: &ComponentStorages) -> &ComponentStorage<Self> {
                &storages.$field
            }

            #[inline]
            fn storage_mut(storages: &mut ComponentStorages) -> &mut ComponentStorage<Self> {
                &mut storages.$field
            }

            fn into_any(self) -> AnyComponent {
                AnyComponent::$ty(self)
            }

            fn from_any(any: AnyComponent) -> Option<Self> {
                match any {
                    AnyComponent::$ty(component) => Some(component),
                    _ => None,
                }
            }

            fn from_any_ref(any: &AnyComponent) -> Option<&Self> {
                match any {
                    AnyComponent::$ty(component) => Some(component),
                    _ => None,
                }
            }

            fn from_any_mut(any: &mut AnyComponent) -> Option<&mut Self> {
                match any {
                    AnyComponent::$ty(component) => Some(component),
                    _ => None,
                }
            }
        }

        impl From<$ty> for AnyComponent {
            fn from(component: $ty) -> Self {
                AnyComponent::$ty(component)
            }
        }
    };
}

impl_component!(Transform, transforms);
impl_component!(Collider, colliders);
impl_component!(Controller, controllers);
impl_component!(Health, healths);
impl_component!(Animation, animations);
impl_component!(Sprite, sprites);
impl_component!(Drawable, drawables);

/// One column per component kind, keyed by entity.
///
/// This is the world's secondary index: kind → (entity → component).
/// Fields are public so systems can borrow several columns at once; inserting
/// and removing goes through [`World`](super::World) so entity masks stay in
/// step with the columns.
#[derive(Debug, Default)]
pub struct ComponentStorages {
    /// Transform column.
    pub transforms: ComponentStorage<Transform>,
    /// Collider column.
    pub colliders: ComponentStorage<Collider>,
    /// Controller column.
    pub controllers: ComponentStorage<Controller>,
    /// Health column.
    pub healths: ComponentStorage<Health>,
    /// Animation column.
    pub animations: ComponentStorage<Animation>,
    /// Sprite column.
    pub sprites: ComponentStorage<Sprite>,
    /// Drawable column.
    pub drawables: ComponentStorage<Drawable>,
}

impl ComponentStorages {
    /// Returns the ids indexed under `kind`, in column order.
    #[must_use]
    pub fn ids(&self, kind: ComponentKind) -> &[EntityId] {
        match kind {
            ComponentKind::Transform => self.transforms.ids(),
            ComponentKind::Collider => self.colliders.ids(),
            ComponentKind::Controller => self.controllers.ids(),
            ComponentKind::Health => self.healths.ids(),
            ComponentKind::Animation => self.animations.ids(),
            ComponentKind::Sprite => self.sprites.ids(),
            ComponentKind::Drawable => self.drawables.ids(),
        }
    }

    /// Checks if `id` is indexed under `kind`.
    #[must_use]
    pub fn contains(&self, id: EntityId, kind: ComponentKind) -> bool {
        match kind {
            ComponentKind::Transform => self.transforms.contains(id),
            ComponentKind::Collider => self.colliders.contains(id),
            ComponentKind::Controller => self.controllers.contains(id),
            ComponentKind::Health => self.healths.contains(id),
            ComponentKind::Animation => self.animations.contains(id),
            ComponentKind::Sprite => self.sprites.contains(id),
            ComponentKind::Drawable => self.drawables.contains(id),
        }
    }

    /// Clones the component of `kind` owned by `id`.
    #[must_use]
    pub fn get_any(&self, id: EntityId, kind: ComponentKind) -> Option<AnyComponent> {
        match kind {
            ComponentKind::Transform => self.transforms.get(id).cloned().map(AnyComponent::from),
            ComponentKind::Collider => self.colliders.get(id).cloned().map(AnyComponent::from),
            ComponentKind::Controller => self.controllers.get(id).cloned().map(AnyComponent::from),
            ComponentKind::Health => self.healths.get(id).cloned().map(AnyComponent::from),
            ComponentKind::Animation => self.animations.get(id).cloned().map(AnyComponent::from),
            ComponentKind::Sprite => self.sprites.get(id).cloned().map(AnyComponent::from),
            ComponentKind::Drawable => self.drawables.get(id).cloned().map(AnyComponent::from),
        }
    }

    pub(crate) fn insert_any(&mut self, id: EntityId, component: AnyComponent) -> Option<AnyComponent> {
        match component {
            AnyComponent::Transform(c) => self.transforms.insert(id, c).map(AnyComponent::from),
            AnyComponent::Collider(c) => self.colliders.insert(id, c).map(AnyComponent::from),
            AnyComponent::Controller(c) => self.controllers.insert(id, c).map(AnyComponent::from),
            AnyComponent::Health(c) => self.healths.insert(id, c).map(AnyComponent::from),
            AnyComponent::Animation(c) => self.animations.insert(id, c).map(AnyComponent::from),
            AnyComponent::Sprite(c) => self.sprites.insert(id, c).map(AnyComponent::from),
            AnyComponent::Drawable(c) => self.drawables.insert(id, c).map(AnyComponent::from),
        }
    }

    pub(crate) fn remove_any(&mut self, id: EntityId, kind: ComponentKind) -> Option<AnyComponent> {
        match kind {
            ComponentKind::Transform => self.transforms.remove(id).map(AnyComponent::from),
            ComponentKind::Collider => self.colliders.remove(id).map(AnyComponent::from),
            ComponentKind::Controller => self.controllers.remove(id).map(AnyComponent::from),
            ComponentKind::Health => self.healths.remove(id).map(AnyComponent::from),
            ComponentKind::Animation => self.animations.remove(id).map(AnyComponent::from),
            ComponentKind::Sprite => self.sprites.remove(id).map(AnyComponent::from),
            ComponentKind::Drawable => self.drawables.remove(id).map(AnyComponent::from),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.transforms.clear();
        self.colliders.clear();
        self.controllers.clear();
        self.healths.clear();
        self.animations.clear();
        self.sprites.clear();
        self.drawables.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_bits_are_distinct() {
        let mut seen = 0u8;
        for kind in ComponentKind::ALL {
            assert_eq!(seen & kind.bit(), 0, "{kind} overlaps");
            seen |= kind.bit();
            assert_eq!(ComponentKind::ALL[kind.index()], kind);
        }
    }

    #[test]
    fn test_kind_mask() {
        let mask = KindMask::from_kinds(&[ComponentKind::Transform, ComponentKind::Health]);
        assert!(mask.contains(ComponentKind::Transform));
        assert!(!mask.contains(ComponentKind::Collider));
        assert!(mask.contains_all(KindMask::EMPTY.with(ComponentKind::Health)));
        assert_eq!(
            mask.iter().collect::<Vec<_>>(),
            vec![ComponentKind::Transform, ComponentKind::Health]
        );
        assert!(mask.without(ComponentKind::Transform).without(ComponentKind::Health).is_empty());
    }

    #[test]
    fn test_any_component_roundtrip_kind() {
        let any: AnyComponent = Health::new(10.0).into();
        assert_eq!(any.kind(), ComponentKind::Health);
        assert!(Health::from_any_ref(&any).is_some());
        assert!(Transform::from_any_ref(&any).is_none());
    }
}
