//! # World Index Tests
//!
//! Randomized populations checked against a brute-force model of which
//! kinds each entity holds.
//!
//! Run with: cargo test -p nimbus_core --test world_index_test

use std::collections::BTreeSet;

use nimbus_core::{
    Animation, Collider, ComponentKind, Controller, Drawable, Entity, EntityId, Health, Sprite,
    Transform, World,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_entity(rng: &mut impl Rng) -> Entity {
    let mut entity = Entity::new();
    if rng.gen_bool(0.7) {
        entity = entity.with(Transform::from_xy(rng.gen_range(0.0..800.0), 0.0));
    }
    if rng.gen_bool(0.5) {
        entity = entity.with(Collider::new_box(8.0, 8.0));
    }
    if rng.gen_bool(0.4) {
        entity = entity.with(Controller::ai(rng.gen_range(1..=3)));
    }
    if rng.gen_bool(0.4) {
        entity = entity.with(Health::new(50.0));
    }
    if rng.gen_bool(0.3) {
        entity = entity.with(Animation::new("idle", 4));
    }
    if rng.gen_bool(0.3) {
        entity = entity.with(Sprite::new("s", 16.0, 16.0));
    }
    if rng.gen_bool(0.3) {
        entity = entity.with(Drawable::new(rng.gen_range(-5..5)));
    }
    entity
}

fn brute_force(world: &World, kinds: &[ComponentKind]) -> BTreeSet<EntityId> {
    world
        .entities()
        .filter(|record| kinds.iter().all(|&kind| record.has_component(kind)))
        .map(|record| record.id)
        .collect()
}

fn assert_index_matches_masks(world: &World) {
    for kind in ComponentKind::ALL {
        let indexed: BTreeSet<EntityId> = world.ids_with_kind(kind).iter().copied().collect();
        assert_eq!(indexed, brute_force(world, &[kind]), "index for {kind} drifted");
    }
}

#[test]
fn entities_with_matches_brute_force() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for _ in 0..20 {
        let mut world = World::new();
        for _ in 0..rng.gen_range(0..200) {
            world.add_entity(random_entity(&mut rng));
        }

        for _ in 0..10 {
            let count = rng.gen_range(1..=3);
            let kinds: Vec<ComponentKind> = (0..count)
                .map(|_| ComponentKind::ALL[rng.gen_range(0..ComponentKind::COUNT)])
                .collect();

            let found: BTreeSet<EntityId> = world.entities_with(&kinds).into_iter().collect();
            assert_eq!(found, brute_force(&world, &kinds), "query {kinds:?}");
        }
    }
}

#[test]
fn empty_query_returns_every_entity() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut world = World::new();
    for _ in 0..50 {
        world.add_entity(random_entity(&mut rng));
    }

    let all: Vec<EntityId> = world.entities().map(|record| record.id).collect();
    assert_eq!(world.entities_with(&[]), all);
}

#[test]
fn index_survives_random_mutation() {
    let mut rng = ChaCha8Rng::seed_from_u64(23);
    let mut world = World::new();
    let mut live: Vec<EntityId> = Vec::new();

    for _ in 0..2_000 {
        match rng.gen_range(0..4) {
            0 => live.push(world.add_entity(random_entity(&mut rng))),
            1 if !live.is_empty() => {
                let id = live.swap_remove(rng.gen_range(0..live.len()));
                assert!(world.remove_entity(id));
                for kind in ComponentKind::ALL {
                    assert!(!world.ids_with_kind(kind).contains(&id));
                }
            }
            2 if !live.is_empty() => {
                let id = live[rng.gen_range(0..live.len())];
                world.insert(id, Health::new(10.0)).unwrap();
            }
            3 if !live.is_empty() => {
                let id = live[rng.gen_range(0..live.len())];
                let kind = ComponentKind::ALL[rng.gen_range(0..ComponentKind::COUNT)];
                world.remove_kind(id, kind);
            }
            _ => {}
        }
    }

    assert_eq!(world.len(), live.len());
    assert_index_matches_masks(&world);
}

#[test]
fn one_component_per_kind() {
    let mut world = World::new();
    let id = world.add_entity(
        Entity::new()
            .with(Health::new(10.0))
            .with(Health::new(20.0)),
    );

    assert_eq!(world.components::<Health>().len(), 1);
    assert_eq!(world.get::<Health>(id).map(|h| h.max), Some(20.0));

    world.insert(id, Health::new(30.0)).unwrap();
    assert_eq!(world.components::<Health>().len(), 1);
    assert_eq!(world.components_of(ComponentKind::Health).len(), 1);
}
