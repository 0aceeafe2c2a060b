//! Motion configuration (ray distance, tick rate, ground filter)
//!
//! Resource загружается из `.ron` / `.toml` или берётся `Default` (значения из туториала).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::physics::collision::{COLLISION_LAYER_ACTORS, COLLISION_LAYER_ENVIRONMENT, COLLISION_MASK_GROUND_RAY};

/// Максимальная длина ground ray (units)
pub const DEFAULT_GROUND_RAY_DISTANCE: f32 = 10.0;

/// Частота simulation tick (Hz)
pub const DEFAULT_TICK_HZ: f64 = 60.0;

/// Параметры motion-слоя
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Максимальная дистанция ground ray
    pub ground_ray_distance: f32,
    /// FixedUpdate частота
    pub tick_hz: f64,
    /// Слои, в которых ground ray ищет пол (битовая маска)
    pub ground_ray_mask: u32,
    /// Слой platforms/terrain
    pub environment_layer: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            ground_ray_distance: DEFAULT_GROUND_RAY_DISTANCE,
            tick_hz: DEFAULT_TICK_HZ,
            ground_ray_mask: COLLISION_MASK_GROUND_RAY,
            environment_layer: COLLISION_LAYER_ENVIRONMENT,
        }
    }
}

impl MotionConfig {
    /// Проверка диапазонов (вызывается после загрузки)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.ground_ray_distance.is_finite() || self.ground_ray_distance <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "ground_ray_distance",
                reason: format!("expected finite value > 0, got {}", self.ground_ray_distance),
            });
        }
        if !self.tick_hz.is_finite() || self.tick_hz <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "tick_hz",
                reason: format!("expected finite value > 0, got {}", self.tick_hz),
            });
        }
        if self.ground_ray_mask == 0 {
            return Err(ConfigError::Invalid {
                field: "ground_ray_mask",
                reason: "ground ray would never hit anything".to_string(),
            });
        }
        if self.environment_layer == 0 {
            return Err(ConfigError::Invalid {
                field: "environment_layer",
                reason: "platforms and terrain would be on no layer".to_string(),
            });
        }
        if self.environment_layer & COLLISION_LAYER_ACTORS != 0 {
            return Err(ConfigError::Invalid {
                field: "environment_layer",
                reason: format!("layer {:#b} overlaps the actors layer", self.environment_layer),
            });
        }
        if self.ground_ray_mask & self.environment_layer == 0 {
            return Err(ConfigError::Invalid {
                field: "ground_ray_mask",
                reason: format!(
                    "mask {:#b} misses environment layer {:#b}: ground ray would never see platforms",
                    self.ground_ray_mask, self.environment_layer
                ),
            });
        }
        Ok(())
    }

    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file (format по расширению)
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;

        if path.ends_with(".toml") {
            Self::from_toml_str(&contents)
        } else if path.ends_with(".ron") {
            Self::from_ron_str(&contents)
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents)?;
        Ok(())
    }
}
