//! Platform riding на настоящем Rapier solver'е
//!
//! `create_physics_app` + демо-сцена: ground ray идёт через `ReadRapierContext`,
//! персонаж — Dynamic тело, платформа — KinematicPositionBased.
//!
//! Первые tick'и collider'ы ещё не созданы в Rapier → персонаж не grounded,
//! поэтому проверки начинаются после warm-up.

use approx::assert_relative_eq;
use bevy::prelude::*;
use bevy_rapier3d::prelude::{CollisionGroups, RigidBody};
use deckride_simulation::scene::{spawn_demo_scene, DemoScene};
use deckride_simulation::*;

const WARM_UP_TICKS: usize = 5;

fn create_rapier_scene(seed: u64) -> (App, DemoScene) {
    create_rapier_scene_with_config(seed, MotionConfig::default())
}

fn create_rapier_scene_with_config(seed: u64, config: MotionConfig) -> (App, DemoScene) {
    let mut app = create_physics_app_with_config(seed, config).unwrap();
    app.add_systems(Startup, spawn_demo_scene);
    app.finish();
    app.cleanup();

    // Startup + первый tick
    app.update();
    let scene = *app.world().resource::<DemoScene>();
    (app, scene)
}

fn velocity(app: &App, entity: Entity) -> Vec3 {
    app.world().get::<PhysicsBody>(entity).unwrap().velocity
}

fn translation(app: &App, entity: Entity) -> Vec3 {
    app.world().get::<Transform>(entity).unwrap().translation
}

fn controller(app: &App, entity: Entity) -> CharacterController {
    *app.world().get::<CharacterController>(entity).unwrap()
}

/// Test: демо-сцена собрана из нужных Rapier тел
#[test]
fn test_demo_scene_body_types() {
    let (app, scene) = create_rapier_scene(42);
    let world = app.world();

    assert!(matches!(
        world.get::<RigidBody>(scene.platform),
        Some(RigidBody::KinematicPositionBased)
    ));
    assert!(matches!(world.get::<RigidBody>(scene.rider), Some(RigidBody::Dynamic)));
    assert!(matches!(world.get::<RigidBody>(scene.ground), Some(RigidBody::Fixed)));
}

/// Test: idle персонаж стоит на платформе и едет с ней (300 tick'ов)
#[test]
fn test_idle_rider_rides_platform_with_solver() {
    let (mut app, scene) = create_rapier_scene(42);

    for _ in 0..WARM_UP_TICKS {
        app.update();
    }

    let mut moving_ticks = 0;
    for tick in 0..300 {
        app.update();

        let state = controller(&app, scene.rider);
        assert!(state.grounded, "tick {}: rider lost the platform", tick);
        assert_eq!(state.floor, Some(scene.platform), "tick {}: wrong floor", tick);

        let platform_velocity = velocity(&app, scene.platform);
        assert_eq!(
            velocity(&app, scene.rider),
            platform_velocity,
            "tick {}: rider velocity differs from platform",
            tick
        );
        if platform_velocity.z != 0.0 {
            moving_ticks += 1;
        }

        assert_relative_eq!(
            translation(&app, scene.rider).z,
            translation(&app, scene.platform).z,
            epsilon = 1e-3
        );
    }

    // Платформа реально ездила, а не стояла
    assert!(moving_ticks > 200, "platform moved only {} ticks", moving_ticks);
}

/// Test: персонаж с input'ом идёт сам, velocity платформы не наследует
#[test]
fn test_steered_rider_ignores_platform_with_solver() {
    let (mut app, scene) = create_rapier_scene(42);

    for _ in 0..30 {
        app.update();
    }
    assert!(controller(&app, scene.rider).grounded);

    *app.world_mut().get_mut::<MovementInput>(scene.rider).unwrap() = MovementInput::new(Vec3::X, 1.0);
    app.update();

    assert_eq!(velocity(&app, scene.rider), Vec3::new(1.0, 0.0, 0.0));
    assert_ne!(velocity(&app, scene.platform).z, 0.0);
    assert_eq!(app.world().get::<MovementInput>(scene.rider).unwrap().speed, 0.0);

    // Без input'а → снова едет с платформой
    app.update();
    assert_eq!(velocity(&app, scene.rider), velocity(&app, scene.platform));
}

/// Test: environment слой из config'а доходит до collider'ов, ground ray его видит
#[test]
fn test_custom_environment_layer_still_grounds_rider() {
    const LAYER: u32 = 0b1_0000;
    let config = MotionConfig {
        environment_layer: LAYER,
        ground_ray_mask: LAYER,
        ..Default::default()
    };
    let (mut app, scene) = create_rapier_scene_with_config(7, config);

    for entity in [scene.platform, scene.ground] {
        let groups = app.world().get::<CollisionGroups>(entity).unwrap();
        assert_eq!(groups.memberships.bits(), LAYER);
    }

    for _ in 0..WARM_UP_TICKS {
        app.update();
    }

    let state = controller(&app, scene.rider);
    assert!(state.grounded);
    assert_eq!(state.floor, Some(scene.platform));
}
