//! PhysicsBody — linear velocity тела на стороне ECS

use bevy::prelude::*;

/// Velocity + mass тела
///
/// Архитектура:
/// - motion-системы пишут сюда (platform mover, character step)
/// - `MotionPhase::Commit` копирует velocity в Rapier `Velocity`
/// - `MotionPhase::ReadBack` забирает velocity solver'а обратно (dynamic тела)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PhysicsBody {
    /// Linear velocity (m/s)
    pub velocity: Vec3,
    /// Масса (kg), информативно — solver считает свою из density
    pub mass: f32,
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            mass: 70.0,
        }
    }
}
