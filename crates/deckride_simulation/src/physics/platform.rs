//! Kinematic platform mover
//!
//! Архитектура:
//! - Платформа = Rapier `KinematicPositionBased` тело (solver её не толкает)
//! - Каждый tick: velocity = (target - position) / dt, position ← target
//! - Запись в Transform помечает его changed → bevy_rapier в `SyncBackend`
//!   обновляет позы collider'ов (аналог "refresh shape transforms")
//!
//! Velocity платформы валидна только для tick'а, в котором посчитана:
//! без target на этом tick'е платформа стоит и velocity = 0.

use bevy::prelude::*;

use crate::components::{KinematicPlatform, PhysicsBody, PlatformRoute};
use crate::error::MotionError;
use crate::logger;

/// Velocity, которая за `dt` переносит тело из `current` в `target`
pub fn implied_velocity(current: Vec3, target: Vec3, dt: f32) -> Result<Vec3, MotionError> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(MotionError::InvalidTimestep(dt));
    }
    if !target.is_finite() {
        return Err(MotionError::NonFiniteTarget(target));
    }

    Ok((target - current) / dt)
}

/// Переместить kinematic тело в `target` за один tick
///
/// Пишет velocity на тело и сдвигает position на `velocity * dt`.
/// Position присваивается равной `target` (то же самое в точной арифметике,
/// но без накопления ошибки округления). При ошибке тело не трогаем.
///
/// Возвращает записанную velocity.
pub fn move_to_position(
    transform: &mut Transform,
    body: &mut PhysicsBody,
    target: Vec3,
    dt: f32,
) -> Result<Vec3, MotionError> {
    let velocity = implied_velocity(transform.translation, target, dt)?;

    body.velocity = velocity;
    transform.translation = target;

    Ok(velocity)
}

/// Система: route → target платформы на этот tick
///
/// Работает в `MotionPhase::Platforms` перед `drive_kinematic_platforms`.
/// Явный target (выставленный кем-то раньше в этом tick'е) route не перетирает.
pub fn advance_platform_routes(
    mut query: Query<(Entity, &Transform, &mut PlatformRoute, &mut KinematicPlatform)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, transform, mut route, mut platform) in query.iter_mut() {
        if platform.target.is_some() {
            continue;
        }

        match route.next_target(transform.translation, delta) {
            Ok(target) => platform.request_move(target),
            Err(err) => {
                logger::log_warning(&format!("Platform {:?}: route skipped this tick: {}", entity, err));
            }
        }
    }
}

/// Система: применяет pending target каждой платформы
///
/// Target забирается (`take`) — на следующий tick его нужно выставить заново.
/// Ошибка → платформа стоит, velocity = 0 (райдеры не получат stale motion).
pub fn drive_kinematic_platforms(
    mut query: Query<(Entity, &mut KinematicPlatform, &mut Transform, &mut PhysicsBody)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, mut platform, mut transform, mut body) in query.iter_mut() {
        let target = platform.target.take().unwrap_or(transform.translation);

        if let Err(err) = move_to_position(&mut transform, &mut body, target, delta) {
            logger::log_warning(&format!("Platform {:?}: move_to_position rejected: {}", entity, err));
            body.velocity = Vec3::ZERO;
        }
    }
}
