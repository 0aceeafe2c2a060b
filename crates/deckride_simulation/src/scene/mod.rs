//! Spawn helpers + demo scene (platform + rider)
//!
//! Создаёт entity с полным набором компонентов:
//! - Transform
//! - наши компоненты (PhysicsBody, KinematicPlatform / CharacterController)
//! - Rapier: RigidBody + Collider + Velocity + CollisionGroups

use bevy::prelude::*;
use bevy_rapier3d::prelude::{Collider, ColliderMassProperties, LockedAxes, RigidBody, Velocity};
use rand::Rng;

use crate::components::{CharacterController, KinematicPlatform, MovementInput, PhysicsBody, PlatformRoute, RouteMode};
use crate::error::MotionError;
use crate::logger;
use crate::physics::collision;
use crate::{DeterministicRng, MotionConfig};

/// Параметры kinematic платформы
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformSpec {
    /// Позиция тела
    pub position: Vec3,
    /// Half extents cuboid shape
    pub half_extents: Vec3,
    /// Смещение shape относительно тела
    pub shape_offset: Vec3,
    /// Density collider'а
    pub density: f32,
}

impl Default for PlatformSpec {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            half_extents: Vec3::new(2.0, 0.25, 2.0),
            shape_offset: Vec3::ZERO,
            density: 1.0,
        }
    }
}

/// Параметры персонажа (ball collider)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterSpec {
    pub position: Vec3,
    /// Радиус ball collider'а
    pub radius: f32,
    /// Запас к bounding sphere для ground detection (penetration solver'а)
    pub skin: f32,
    pub density: f32,
}

impl Default for CharacterSpec {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            radius: 0.5,
            skin: 0.05,
            density: 1.0,
        }
    }
}

impl CharacterSpec {
    pub fn bounding_radius(&self) -> f32 {
        self.radius + self.skin
    }
}

/// Spawn kinematic платформы (Rapier `KinematicPositionBased`)
///
/// Shape смещён на `shape_offset` через compound collider: hit ray'я
/// возвращает entity самого тела, а не child'а.
pub fn spawn_kinematic_platform(commands: &mut Commands, config: &MotionConfig, spec: PlatformSpec) -> Entity {
    let shape = Collider::cuboid(spec.half_extents.x, spec.half_extents.y, spec.half_extents.z);

    commands
        .spawn((
            Transform::from_translation(spec.position),
            PhysicsBody::default(),
            KinematicPlatform::default(),
            RigidBody::KinematicPositionBased,
            Collider::compound(vec![(spec.shape_offset, Quat::IDENTITY, shape)]),
            ColliderMassProperties::Density(spec.density),
            Velocity::default(),
            collision::environment_groups(config),
        ))
        .id()
}

/// Spawn платформы, которая ездит по route
pub fn spawn_routed_platform(
    commands: &mut Commands,
    config: &MotionConfig,
    spec: PlatformSpec,
    route: PlatformRoute,
) -> Entity {
    let entity = spawn_kinematic_platform(commands, config, spec);
    commands.entity(entity).insert(route);
    entity
}

/// Spawn неподвижного terrain (Rapier `Fixed`, без PhysicsBody → velocity пола = 0)
pub fn spawn_ground(commands: &mut Commands, config: &MotionConfig, position: Vec3, half_extents: Vec3) -> Entity {
    commands
        .spawn((
            Transform::from_translation(position),
            RigidBody::Fixed,
            Collider::cuboid(half_extents.x, half_extents.y, half_extents.z),
            collision::environment_groups(config),
        ))
        .id()
}

/// Spawn персонажа (Rapier `Dynamic`, вращение заблокировано)
pub fn spawn_character(commands: &mut Commands, config: &MotionConfig, spec: CharacterSpec) -> Entity {
    commands
        .spawn((
            Transform::from_translation(spec.position),
            PhysicsBody::default(),
            CharacterController::with_radius(spec.bounding_radius()),
            MovementInput::default(),
            RigidBody::Dynamic,
            Collider::ball(spec.radius),
            ColliderMassProperties::Density(spec.density),
            LockedAxes::ROTATION_LOCKED,
            Velocity::default(),
            collision::actor_groups(config),
        ))
        .id()
}

/// Entity демо-сцены (для логов headless binary)
#[derive(Resource, Debug, Clone, Copy)]
pub struct DemoScene {
    pub platform: Entity,
    pub rider: Entity,
    pub ground: Entity,
}

/// Route демо-платформы: ping-pong вдоль Z на `amplitude`
pub fn demo_route(start: Vec3, amplitude: f32, speed: f32) -> Result<PlatformRoute, MotionError> {
    PlatformRoute::new(
        vec![start, start + Vec3::new(0.0, 0.0, amplitude)],
        speed,
        RouteMode::PingPong,
    )
}

/// Startup система: terrain + платформа + персонаж на ней
///
/// Амплитуда route берётся из `DeterministicRng`: одинаковый seed → одинаковая сцена.
pub fn spawn_demo_scene(
    mut commands: Commands,
    mut rng: ResMut<DeterministicRng>,
    config: Res<MotionConfig>,
) {
    let amplitude: f32 = rng.rng.gen_range(4.0..8.0);
    let platform_start = Vec3::new(0.0, 1.0, 0.0);

    let route = match demo_route(platform_start, amplitude, 2.0) {
        Ok(route) => route,
        Err(err) => {
            logger::log_error(&format!("Demo scene: invalid platform route: {}", err));
            return;
        }
    };

    let ground = spawn_ground(
        &mut commands,
        &config,
        Vec3::new(0.0, -0.5, 0.0),
        Vec3::new(20.0, 0.5, 20.0),
    );

    let platform_spec = PlatformSpec {
        position: platform_start,
        ..default()
    };
    let platform = spawn_routed_platform(&mut commands, &config, platform_spec, route);

    let rider_spec = CharacterSpec::default();
    let rider_spec = CharacterSpec {
        position: platform_start + Vec3::Y * (platform_spec.half_extents.y + rider_spec.radius),
        ..rider_spec
    };
    let rider = spawn_character(&mut commands, &config, rider_spec);

    logger::log_info(&format!(
        "Demo scene: platform {:?} (amplitude {:.2}), rider {:?}, ground {:?}",
        platform, amplitude, rider, ground
    ));

    commands.insert_resource(DemoScene { platform, rider, ground });
}
