//! # Tick Benchmark
//!
//! A full default-system tick over brawler-sized and stress-sized worlds.
//!
//! Run with: `cargo bench --package nimbus`

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nimbus::core::{Animation, Collider, Controller, Entity, Health, InputState, Transform};
use nimbus::{GameLoop, SimulationConfig};

fn populated_loop(enemies: usize) -> GameLoop {
    let config = SimulationConfig::default();
    let mut game_loop = GameLoop::with_default_systems(&config, InputState::default())
        .unwrap_or_else(|err| panic!("default systems: {err}"));

    let world = game_loop.world_mut();
    world.add_entity(
        Entity::named("player")
            .with(Transform::from_xy(100.0, 400.0))
            .with(Collider::new_box(64.0, 96.0))
            .with(Controller::player())
            .with(Animation::new("idle", 4)),
    );
    for i in 0..enemies {
        let difficulty = (i % 3) as u8 + 1;
        world.add_entity(
            Entity::new()
                .with(Transform::from_xy((i * 7 % 800) as f32, 400.0))
                .with(Collider::new_box(32.0, 32.0).with_layers(0b10, 0b01))
                .with(Controller::ai(difficulty))
                .with(Health::new(50.0))
                .with(Animation::new("idle", 4)),
        );
    }
    game_loop
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("default_tick");

    for enemies in [10, 100, 1_000] {
        let mut game_loop = populated_loop(enemies);
        group.bench_function(BenchmarkId::from_parameter(enemies), |b| {
            b.iter(|| black_box(game_loop.tick(1.0 / 60.0)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
