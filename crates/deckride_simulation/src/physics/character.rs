//! Character controller: velocity snap + платформенный ride
//!
//! Порядок на tick (см. `MotionPhase`):
//! 1. `apply_movement_input` — velocity мгновенно = direction * speed
//! 2. ground detection (`physics::ground`)
//! 3. `ride_floor_bodies` — idle + grounded → velocity пола; speed ← 0
//!
//! Всё это обязано пройти ДО solver step, иначе персонаж отстаёт от платформы на tick.

use bevy::prelude::*;
use bevy_rapier3d::prelude::Velocity;

use crate::components::{CharacterController, MovementInput, PhysicsBody};

/// Target velocity из input (direction нормализуется; нулевое direction → 0)
pub fn commanded_velocity(input: &MovementInput) -> Vec3 {
    input.direction.normalize_or_zero() * input.speed
}

/// Мгновенный snap velocity к commanded (без damping)
///
/// Возвращает применённую дельту.
pub fn snap_to_commanded(body: &mut PhysicsBody, input: &MovementInput) -> Vec3 {
    let target = commanded_velocity(input);
    let delta = target - body.velocity;
    body.velocity += delta;
    delta
}

/// Idle персонаж на полу наследует velocity пола
///
/// `floor_velocity` — velocity тела `controller.floor` (None, если у пола нет
/// `PhysicsBody`: fixed terrain → считаем неподвижным).
/// Возвращает true, если velocity перезаписана.
pub fn inherit_floor_velocity(
    controller: &CharacterController,
    input: &MovementInput,
    body: &mut PhysicsBody,
    floor_velocity: Option<Vec3>,
) -> bool {
    if !controller.grounded || !input.is_idle() || controller.floor.is_none() {
        return false;
    }

    body.velocity = floor_velocity.unwrap_or(Vec3::ZERO);
    true
}

/// Система: input → velocity (snap)
pub fn apply_movement_input(
    mut query: Query<(&MovementInput, &mut PhysicsBody), With<CharacterController>>,
) {
    for (input, mut body) in query.iter_mut() {
        snap_to_commanded(&mut body, input);
    }
}

/// Система: ride moving platforms + сброс commanded speed
///
/// Пол ищется среди тел без `CharacterController` (персонаж на персонаже
/// velocity не наследует).
pub fn ride_floor_bodies(
    mut characters: Query<(&CharacterController, &mut MovementInput, &mut PhysicsBody)>,
    floors: Query<&PhysicsBody, Without<CharacterController>>,
) {
    for (controller, mut input, mut body) in characters.iter_mut() {
        let floor_velocity = controller
            .floor
            .and_then(|floor| floors.get(floor).ok())
            .map(|floor_body| floor_body.velocity);

        inherit_floor_velocity(controller, &input, &mut body, floor_velocity);

        // Input должен заполняться заново каждый tick
        input.speed = 0.0;
    }
}

/// Система: velocity solver'а → PhysicsBody (dynamic персонажи)
///
/// Solver за прошлый step мог изменить velocity (gravity, контакты):
/// snap считает дельту от актуального значения.
pub fn read_back_solver_velocity(
    mut query: Query<(&Velocity, &mut PhysicsBody), With<CharacterController>>,
) {
    for (rapier_velocity, mut body) in query.iter_mut() {
        body.velocity = rapier_velocity.linvel;
    }
}

/// Система: PhysicsBody → Rapier `Velocity` перед solver step
pub fn commit_velocity_to_solver(
    mut query: Query<(&PhysicsBody, &mut Velocity), With<CharacterController>>,
) {
    for (body, mut rapier_velocity) in query.iter_mut() {
        rapier_velocity.linvel = body.velocity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commanded_velocity_normalizes_direction() {
        let input = MovementInput::new(Vec3::new(0.0, 0.0, 2.0), 5.0);
        assert_eq!(commanded_velocity(&input), Vec3::new(0.0, 0.0, 5.0));

        let idle = MovementInput::new(Vec3::ZERO, 5.0);
        assert_eq!(commanded_velocity(&idle), Vec3::ZERO);
    }

    #[test]
    fn test_snap_is_instant() {
        let mut body = PhysicsBody {
            velocity: Vec3::new(1.0, -3.0, 0.0),
            mass: 70.0,
        };
        let input = MovementInput::new(Vec3::X, 4.0);

        let delta = snap_to_commanded(&mut body, &input);

        assert_eq!(delta, Vec3::new(3.0, 3.0, 0.0));
        assert_eq!(body.velocity, Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_moving_character_keeps_own_velocity() {
        let controller = CharacterController {
            bounding_radius: 1.0,
            grounded: true,
            floor: Some(Entity::from_raw(3)),
        };
        let input = MovementInput::new(Vec3::X, 2.0);
        let mut body = PhysicsBody {
            velocity: Vec3::new(2.0, 0.0, 0.0),
            mass: 70.0,
        };

        let inherited = inherit_floor_velocity(&controller, &input, &mut body, Some(Vec3::Z * 5.0));

        assert!(!inherited);
        assert_eq!(body.velocity, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_airborne_idle_not_inherited() {
        let controller = CharacterController::default();
        let input = MovementInput::default();
        let mut body = PhysicsBody::default();

        assert!(!inherit_floor_velocity(&controller, &input, &mut body, Some(Vec3::Z)));
        assert_eq!(body.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_static_floor_stops_idle_character() {
        let controller = CharacterController {
            bounding_radius: 1.0,
            grounded: true,
            floor: Some(Entity::from_raw(3)),
        };
        let mut body = PhysicsBody {
            velocity: Vec3::new(0.0, -1.0, 0.0),
            mass: 70.0,
        };

        assert!(inherit_floor_velocity(&controller, &MovementInput::default(), &mut body, None));
        assert_eq!(body.velocity, Vec3::ZERO);
    }
}
