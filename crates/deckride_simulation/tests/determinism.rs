//! Детерминизм демо-сцены (headless, без Rapier)
//!
//! Амплитуда route платформы берётся из seeded RNG: одинаковый seed →
//! идентичные Transform'ы после N tick'ов.

use bevy::prelude::*;
use deckride_simulation::scene::{spawn_demo_scene, DemoScene};
use deckride_simulation::*;

/// Запускает демо-сцену и возвращает snapshot Transform'ов
fn run_simulation(seed: u64, tick_count: usize) -> Vec<u8> {
    let mut app = create_headless_app(seed);
    app.add_systems(Startup, spawn_demo_scene);
    app.world_mut().run_schedule(Startup);

    for _ in 0..tick_count {
        step_fixed(app.world_mut());
    }

    world_snapshot::<Transform>(app.world_mut())
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;
    const TICK_COUNT: usize = 600;

    let snapshot1 = run_simulation(SEED, TICK_COUNT);
    let snapshot2 = run_simulation(SEED, TICK_COUNT);

    assert!(!snapshot1.is_empty());
    assert_eq!(
        snapshot1, snapshot2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_demo_scene_platform_moves() {
    let mut app = create_headless_app(42);
    app.add_systems(Startup, spawn_demo_scene);
    app.world_mut().run_schedule(Startup);

    let scene = *app.world().resource::<DemoScene>();
    let start = app.world().get::<Transform>(scene.platform).unwrap().translation;

    for _ in 0..30 {
        step_fixed(app.world_mut());
    }

    let after = app.world().get::<Transform>(scene.platform).unwrap().translation;
    let velocity = app.world().get::<PhysicsBody>(scene.platform).unwrap().velocity;

    assert!(after.z > start.z, "platform did not move: {:?} → {:?}", start, after);
    assert!(velocity.z > 0.0);
    assert_eq!(after.x, start.x);
    assert_eq!(after.y, start.y);
}
