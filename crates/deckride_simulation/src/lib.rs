//! DECKRIDE Simulation Core
//!
//! Moving platforms + ground-relative character movement на Bevy 0.16 + Rapier.
//!
//! Архитектура:
//! - ECS = pre-solver mutators (platform mover, character controller)
//! - Rapier = внешний solver (контакты, интеграция, ray cast)
//! - Порядок tick'а задан `MotionPhase` sets (см. `physics::phases`)

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod components;
pub mod config;
pub mod error;
pub mod logger;
pub mod physics;
pub mod scene;

// Re-export базовых типов для удобства
pub use components::*;
pub use config::MotionConfig;
pub use error::{ConfigError, MotionError};
pub use physics::{MotionPhase, MotionPlugin, RapierMotionPlugin};

/// Главный plugin симуляции (fixed tick + motion системы)
///
/// Частота tick'а берётся из `MotionConfig` (если вставлен до plugin'а).
/// Невалидный config заменяется на `Default` с error логом.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<MotionConfig>()
            .cloned()
            .unwrap_or_default();

        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                logger::log_error(&format!("SimulationPlugin: {}, using default MotionConfig", err));
                MotionConfig::default()
            }
        };

        app.insert_resource(Time::<Fixed>::from_hz(config.tick_hz))
            .insert_resource(config);

        if !app.is_plugin_added::<MotionPlugin>() {
            app.add_plugins(MotionPlugin);
        }
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции (без solver'а)
pub fn create_headless_app(seed: u64) -> App {
    build_headless_app(seed, MotionConfig::default())
}

/// То же, с конкретным `MotionConfig` (tick rate, ground ray)
///
/// Config проверяется до создания App: `tick_hz <= 0` иначе уронит `Time::<Fixed>::from_hz`.
pub fn create_headless_app_with_config(seed: u64, config: MotionConfig) -> Result<App, ConfigError> {
    config.validate()?;
    Ok(build_headless_app(seed, config))
}

fn build_headless_app(seed: u64, config: MotionConfig) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(config)
        .add_plugins(SimulationPlugin);

    app
}

/// Headless App с Rapier solver'ом
///
/// Каждый `app.update()` продвигает время ровно на один fixed tick
/// (`TimeUpdateStrategy::ManualDuration`) — прогон не зависит от wall clock.
pub fn create_physics_app(seed: u64) -> App {
    build_physics_app(seed, MotionConfig::default())
}

pub fn create_physics_app_with_config(seed: u64, config: MotionConfig) -> Result<App, ConfigError> {
    config.validate()?;
    Ok(build_physics_app(seed, config))
}

fn build_physics_app(seed: u64, config: MotionConfig) -> App {
    let mut app = build_headless_app(seed, config);

    let tick = app.world().resource::<Time<Fixed>>().timestep();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(tick))
        .add_plugins((bevy::transform::TransformPlugin, RapierMotionPlugin));

    app
}

/// Прогнать ровно один FixedUpdate tick (без wall clock)
///
/// `Time<Fixed>` продвигается на свой timestep, затем запускается FixedUpdate.
/// Для headless тестов motion-слоя без Rapier.
pub fn step_fixed(world: &mut World) {
    let mut time = world.resource_mut::<Time<Fixed>>();
    let timestep = time.timestep();
    time.advance_by(timestep);

    world.run_schedule(FixedUpdate);
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
