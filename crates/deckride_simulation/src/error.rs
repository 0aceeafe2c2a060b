//! Ошибки motion-слоя и конфигурации

use bevy::prelude::Vec3;

/// Ошибки kinematic движения (platform mover, routes)
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    /// dt <= 0 или не конечный — implied velocity не определена
    #[error("invalid timestep: {0} (expected finite dt > 0)")]
    InvalidTimestep(f32),

    /// Target содержит NaN/inf
    #[error("non-finite target position: {0:?}")]
    NonFiniteTarget(Vec3),

    /// Route без waypoints
    #[error("platform route has no waypoints")]
    EmptyRoute,

    /// Route speed <= 0 или не конечная
    #[error("invalid route speed: {0} (expected finite speed > 0)")]
    InvalidRouteSpeed(f32),
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Значение вне допустимого диапазона
    #[error("Invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}
