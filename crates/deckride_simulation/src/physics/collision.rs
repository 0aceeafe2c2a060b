//! Collision layers (битовые маски) + Rapier `CollisionGroups` helpers
//!
//! ## Layers:
//! - Layer 1 (0b1): Reserved
//! - Layer 2 (0b10): Actors (characters)
//! - Layer 3 (0b100): Environment (platforms, fixed terrain)
//!
//! Ground ray по умолчанию видит только Environment: персонаж не «стоит» на соседе.

use bevy_rapier3d::prelude::{CollisionGroups, Group};

use crate::config::MotionConfig;

/// Layer 2: Actors (characters)
pub const COLLISION_LAYER_ACTORS: u32 = 0b10;

/// Layer 3: Environment (platforms, terrain)
pub const COLLISION_LAYER_ENVIRONMENT: u32 = 0b100;

/// Mask: Actors collide with Actors + Environment (default environment layer)
pub const COLLISION_MASK_ACTORS: u32 = COLLISION_LAYER_ACTORS | COLLISION_LAYER_ENVIRONMENT;

/// Mask: Environment collides with Actors (environment-environment контакты не нужны)
pub const COLLISION_MASK_ENVIRONMENT: u32 = COLLISION_LAYER_ACTORS;

/// Mask: ground ray (только Environment)
pub const COLLISION_MASK_GROUND_RAY: u32 = COLLISION_LAYER_ENVIRONMENT;

/// Groups для персонажей: actors + environment слой из config'а
pub fn actor_groups(config: &MotionConfig) -> CollisionGroups {
    groups(COLLISION_LAYER_ACTORS, COLLISION_LAYER_ACTORS | config.environment_layer)
}

/// Groups для platforms/terrain: слой из `MotionConfig::environment_layer`
pub fn environment_groups(config: &MotionConfig) -> CollisionGroups {
    groups(config.environment_layer, COLLISION_MASK_ENVIRONMENT)
}

/// Фильтр для ground ray из конфига
///
/// Membership = все слои, filter = `ground_ray_mask`: ray пересекается с collider,
/// если его membership попадает в mask (и наоборот).
pub fn ground_ray_groups(config: &MotionConfig) -> CollisionGroups {
    groups(u32::MAX, config.ground_ray_mask)
}

fn groups(memberships: u32, filters: u32) -> CollisionGroups {
    CollisionGroups::new(
        Group::from_bits_truncate(memberships),
        Group::from_bits_truncate(filters),
    )
}
