//! Physics motion module
//!
//! Moving platforms + ground-relative character movement поверх Rapier.
//! Сам solver (контакты, интеграция, ray cast) — внешний, здесь только
//! pre-solver mutators и их порядок.

pub mod character;
pub mod collision;
pub mod ground;
pub mod phases;
pub mod platform;


// Re-export основных типов
pub use character::{commanded_velocity, inherit_floor_velocity, snap_to_commanded};
pub use ground::{classify_ground, refresh_ground, sense_ground, GroundContact, GroundHit, GroundProbe};
pub use phases::{MotionPhase, MotionPlugin, RapierMotionPlugin};
pub use platform::{implied_velocity, move_to_position};
