//! Character компоненты: ground state + commanded movement

use bevy::prelude::*;

/// Character controller state
///
/// `grounded` и `floor` пересчитываются каждый tick из свежего ground ray,
/// между tick'ами не кэшируются.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CharacterController {
    /// Радиус bounding sphere (допуск для ground detection)
    pub bounding_radius: f32,
    /// Стоит ли персонаж на чём-то
    pub grounded: bool,
    /// Тело под ногами (handle, не ссылка; None когда не grounded)
    pub floor: Option<Entity>,
}

impl Default for CharacterController {
    fn default() -> Self {
        Self {
            bounding_radius: 1.0,
            grounded: false,
            floor: None,
        }
    }
}

impl CharacterController {
    pub fn with_radius(bounding_radius: f32) -> Self {
        Self {
            bounding_radius,
            ..default()
        }
    }
}

/// Входные данные для движения
///
/// Для headless тестов — mock input через этот компонент.
/// `speed` сбрасывается в 0 после каждого character step:
/// input должен заполняться заново каждый tick.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MovementInput {
    /// Направление движения (нормализуется при применении)
    pub direction: Vec3,
    /// Скорость (m/s); 0 → idle, персонаж едет вместе с полом
    pub speed: f32,
}

impl MovementInput {
    pub fn new(direction: Vec3, speed: f32) -> Self {
        Self { direction, speed }
    }

    pub fn is_idle(&self) -> bool {
        self.speed == 0.0
    }
}
