//! Фазы pre-solver обновления
//!
//! Порядок "кто пишет последним перед solver'ом — тот и прав" задан структурно:
//! все mutators живут в `MotionPhase` sets, sets выстроены `.chain()` и стоят
//! `.before(PhysicsSet::SyncBackend)`. Rapier запускается в fixed schedule
//! (`FixedPostUpdate`), т.е. строго после всех фаз текущего tick'а.

use bevy::prelude::*;
use bevy_rapier3d::plugin::PhysicsSet;
use bevy_rapier3d::prelude::{NoUserData, RapierPhysicsPlugin};

use crate::components::{CharacterController, KinematicPlatform, MovementInput, PhysicsBody, PlatformRoute};
use crate::config::MotionConfig;
use crate::physics::{character, ground, platform};

/// Фазы одного simulation tick (в порядке выполнения)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionPhase {
    /// Velocity solver'а → PhysicsBody
    ReadBack,
    /// Routes → targets → move_to_position
    Platforms,
    /// Input → velocity snap
    Steer,
    /// Ground ray cast
    SenseGround,
    /// Idle персонажи наследуют velocity пола
    Ride,
    /// PhysicsBody → Velocity solver'а
    Commit,
}

/// Motion plugin (engine-agnostic часть)
///
/// Регистрирует platform + character системы в FixedUpdate.
/// Ground detection и sync с solver'ом добавляет `RapierMotionPlugin`;
/// headless тесты могут положить свою систему в `MotionPhase::SenseGround`.
pub struct MotionPlugin;

impl Plugin for MotionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MotionConfig>()
            .register_type::<PhysicsBody>()
            .register_type::<KinematicPlatform>()
            .register_type::<PlatformRoute>()
            .register_type::<CharacterController>()
            .register_type::<MovementInput>();

        app.configure_sets(
            FixedUpdate,
            (
                MotionPhase::ReadBack,
                MotionPhase::Platforms,
                MotionPhase::Steer,
                MotionPhase::SenseGround,
                MotionPhase::Ride,
                MotionPhase::Commit,
            )
                .chain()
                .before(PhysicsSet::SyncBackend),
        );

        app.add_systems(
            FixedUpdate,
            (
                (platform::advance_platform_routes, platform::drive_kinematic_platforms)
                    .chain()
                    .in_set(MotionPhase::Platforms),
                character::apply_movement_input.in_set(MotionPhase::Steer),
                character::ride_floor_bodies.in_set(MotionPhase::Ride),
            ),
        );
    }
}

/// Rapier backend для motion-слоя
///
/// Добавляет Rapier (в fixed schedule), ground ray через `RapierContext` и
/// синхронизацию velocity PhysicsBody ↔ Rapier `Velocity`.
pub struct RapierMotionPlugin;

impl Plugin for RapierMotionPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<MotionPlugin>() {
            app.add_plugins(MotionPlugin);
        }

        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule());

        app.add_systems(
            FixedUpdate,
            (
                character::read_back_solver_velocity.in_set(MotionPhase::ReadBack),
                ground::detect_ground_rapier.in_set(MotionPhase::SenseGround),
                character::commit_velocity_to_solver.in_set(MotionPhase::Commit),
            ),
        );
    }
}
