//! # World Benchmark
//!
//! Measures the operations every tick leans on: multi-kind queries,
//! column iteration and the spawn/despawn cycle.
//!
//! Run with: `cargo bench --package nimbus_core`

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nimbus_core::{
    Collider, ComponentKind, Controller, Entity, Health, Transform, World,
};

fn populate(count: usize) -> World {
    let mut world = World::with_capacity(count);
    for i in 0..count {
        let f = i as f32;
        let mut entity = Entity::new().with(Transform::from_xy(f % 800.0, f % 600.0));
        if i % 2 == 0 {
            entity = entity.with(Collider::new_box(16.0, 16.0));
        }
        if i % 3 == 0 {
            entity = entity.with(Controller::ai(2)).with(Health::new(100.0));
        }
        world.add_entity(entity);
    }
    world
}

fn bench_entities_with(c: &mut Criterion) {
    let mut group = c.benchmark_group("entities_with");

    for count in [1_000, 10_000, 100_000] {
        let world = populate(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &world, |b, world| {
            b.iter(|| {
                black_box(world.entities_with(&[
                    ComponentKind::Controller,
                    ComponentKind::Transform,
                    ComponentKind::Health,
                ]))
            });
        });
    }

    group.finish();
}

fn bench_column_update(c: &mut Criterion) {
    let mut world = populate(100_000);

    c.bench_function("transform_column_update_100K", |b| {
        b.iter(|| {
            for (_, transform) in world.storages_mut().transforms.iter_mut() {
                transform.position.y += 0.5;
            }
        });
    });
}

fn bench_spawn_despawn_cycle(c: &mut Criterion) {
    let mut world = populate(20_000);
    let mut ids = world.entity_ids();

    c.bench_function("spawn_despawn_cycle_10K", |b| {
        b.iter(|| {
            for id in ids.iter().take(10_000) {
                world.remove_entity(*id);
            }
            for id in ids.iter_mut().take(10_000) {
                *id = world.add_entity(
                    Entity::new()
                        .with(Transform::default())
                        .with(Collider::default()),
                );
            }
            black_box(world.len())
        });
    });
}

criterion_group!(
    benches,
    bench_entities_with,
    bench_column_update,
    bench_spawn_despawn_cycle,
);

criterion_main!(benches);
