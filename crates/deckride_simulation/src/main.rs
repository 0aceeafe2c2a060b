//! Headless симуляция DECKRIDE
//!
//! Платформа ездит по ping-pong route, idle персонаж стоит на ней.
//! Аргументы: `[seed] [ticks] [config.ron|config.toml]`

use bevy::prelude::*;
use deckride_simulation::logger::{self, log_error, log_info};
use deckride_simulation::scene::{spawn_demo_scene, DemoScene};
use deckride_simulation::{create_physics_app_with_config, CharacterController, MotionConfig, PhysicsBody};

fn main() {
    logger::init_logger();

    let args: Vec<String> = std::env::args().collect();
    let seed = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(42u64);
    let ticks = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(600usize);

    let config = match args.get(3) {
        Some(path) => match MotionConfig::load_from_file(path) {
            Ok(config) => config,
            Err(err) => {
                log_error(&format!("Failed to load config {}: {}", path, err));
                std::process::exit(1);
            }
        },
        None => MotionConfig::default(),
    };

    log_info(&format!(
        "Starting DECKRIDE headless simulation (seed: {}, ticks: {}, {:.0} Hz)",
        seed, ticks, config.tick_hz
    ));

    let mut app = match create_physics_app_with_config(seed, config) {
        Ok(app) => app,
        Err(err) => {
            log_error(&format!("Invalid motion config: {}", err));
            std::process::exit(1);
        }
    };
    app.add_systems(Startup, spawn_demo_scene);
    app.finish();
    app.cleanup();

    for tick in 0..ticks {
        app.update();

        if tick % 60 == 0 {
            report(&app, tick);
        }
    }

    log_info("Simulation complete!");
}

fn report(app: &App, tick: usize) {
    let Some(scene) = app.world().get_resource::<DemoScene>().copied() else {
        return;
    };

    let world = app.world();
    let platform = world.get::<Transform>(scene.platform).map(|t| t.translation);
    let rider = world.get::<Transform>(scene.rider).map(|t| t.translation);
    let rider_velocity = world.get::<PhysicsBody>(scene.rider).map(|b| b.velocity);
    let grounded = world.get::<CharacterController>(scene.rider).map(|c| c.grounded);

    log_info(&format!(
        "Tick {}: platform {:?}, rider {:?} v={:?} grounded={:?}",
        tick, platform, rider, rider_velocity, grounded
    ));
}
