//! Ground detection через downward ray
//!
//! `GroundProbe` — узкий seam к ray cast'у физического движка:
//! в игре это Rapier (`detect_ground_rapier`), в тестах — scripted probe.
//!
//! Никакого кэша / hysteresis: grounded пересчитывается каждый tick.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{QueryFilter, ReadRapierContext};

use crate::components::CharacterController;
use crate::config::MotionConfig;
use crate::logger;
use crate::physics::collision::ground_ray_groups;

/// Результат ray cast'а (transient, живёт один tick)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundHit {
    /// Тело, в которое попал ray
    pub entity: Entity,
    /// Точка попадания (world)
    pub point: Vec3,
    /// Дистанция вдоль ray
    pub distance: f32,
}

/// Ray cast вниз (-Y) от `origin`, первый hit
///
/// `exclude` — собственное тело персонажа (ray стартует внутри его collider'а).
/// При нескольких hit'ах на одной дистанции побеждает тот, что вернул движок первым.
pub trait GroundProbe {
    fn cast_down(&self, origin: Vec3, max_distance: f32, exclude: Entity) -> Option<GroundHit>;
}

impl<F> GroundProbe for F
where
    F: Fn(Vec3, f32, Entity) -> Option<GroundHit>,
{
    fn cast_down(&self, origin: Vec3, max_distance: f32, exclude: Entity) -> Option<GroundHit> {
        self(origin, max_distance, exclude)
    }
}

/// Итог ground detection на этот tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroundContact {
    pub grounded: bool,
    pub floor: Option<Entity>,
}

impl GroundContact {
    pub const AIRBORNE: Self = Self {
        grounded: false,
        floor: None,
    };
}

/// Классифицировать hit: grounded если точка попадания в пределах bounding sphere
pub fn classify_ground(hit: Option<GroundHit>, origin: Vec3, bounding_radius: f32) -> GroundContact {
    match hit {
        Some(hit) if hit.point.distance(origin) <= bounding_radius => GroundContact {
            grounded: true,
            floor: Some(hit.entity),
        },
        _ => GroundContact::AIRBORNE,
    }
}

/// Ray cast + классификация
pub fn sense_ground<P: GroundProbe + ?Sized>(
    probe: &P,
    origin: Vec3,
    bounding_radius: f32,
    max_distance: f32,
    exclude: Entity,
) -> GroundContact {
    let hit = probe.cast_down(origin, max_distance, exclude);
    classify_ground(hit, origin, bounding_radius)
}

/// Обновить ground state персонажа свежим ray cast'ом
pub fn refresh_ground<P: GroundProbe + ?Sized>(
    controller: &mut CharacterController,
    probe: &P,
    entity: Entity,
    origin: Vec3,
    max_distance: f32,
) -> GroundContact {
    let contact = sense_ground(probe, origin, controller.bounding_radius, max_distance, entity);

    controller.grounded = contact.grounded;
    controller.floor = contact.floor;

    contact
}

/// Система: ground detection через Rapier ray cast
///
/// Работает в `MotionPhase::SenseGround`. Ray фильтруется collision groups из
/// `MotionConfig` и исключает собственное тело персонажа.
pub fn detect_ground_rapier(
    rapier_context: ReadRapierContext,
    config: Res<MotionConfig>,
    mut characters: Query<(Entity, &Transform, &mut CharacterController)>,
) {
    let Ok(context) = rapier_context.single() else {
        // Нет physics context → ни на чём не стоим
        logger::log_warning("detect_ground_rapier: no Rapier context, ground state cleared");
        for (_, _, mut controller) in characters.iter_mut() {
            controller.grounded = false;
            controller.floor = None;
        }
        return;
    };

    let groups = ground_ray_groups(&config);
    let probe = |origin: Vec3, max_distance: f32, exclude: Entity| -> Option<GroundHit> {
        let filter = QueryFilter::default().groups(groups).exclude_rigid_body(exclude);

        context
            .cast_ray(origin, Vec3::NEG_Y, max_distance, true, filter)
            .map(|(entity, distance)| GroundHit {
                entity,
                point: origin + Vec3::NEG_Y * distance,
                distance,
            })
    };

    for (entity, transform, mut controller) in characters.iter_mut() {
        refresh_ground(
            &mut controller,
            &probe,
            entity,
            transform.translation,
            config.ground_ray_distance,
        );
    }
}
