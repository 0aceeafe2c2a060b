//! ECS Components для motion-слоя
//!
//! Организация по доменам:
//! - body: velocity нашей стороны (PhysicsBody)
//! - platform: kinematic platforms (KinematicPlatform, PlatformRoute)
//! - character: character controller (CharacterController, MovementInput)

pub mod body;
pub mod character;
pub mod platform;

// Re-exports для удобного импорта
pub use body::*;
pub use character::*;
pub use platform::*;
