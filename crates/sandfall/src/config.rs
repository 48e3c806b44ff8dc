//! Simulation parameters and their validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default cell side in pixels.
pub const DEFAULT_PARTICLE_SIZE: u32 = 4;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("particle_size must be non-zero")]
    ZeroParticleSize,
    #[error("screen {width}x{height} is smaller than one {size}px cell")]
    ScreenTooSmall { width: u32, height: u32, size: u32 },
    #[error("gravity {0} must be finite and non-negative")]
    InvalidGravity(f32),
    #[error("spawn speeds must be finite")]
    InvalidSpawnSpeed,
    #[error("max_fall_speed {0} must be finite and positive")]
    InvalidMaxFallSpeed(f32),
    #[error("color_period must be non-zero")]
    ZeroColorPeriod,
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Everything tunable about a simulation. Speeds are in pixels per tick,
/// positive y pointing down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    pub particle_size: u32,
    pub gravity: f32,
    pub spawn_speed_x: f32,
    pub spawn_speeds_y: [f32; 2],
    /// Downward speed given to a particle whose target cell was blocked,
    /// so it keeps probing below on the next tick.
    pub settle_bias: f32,
    /// Terminal velocity. `None` lets `vy` grow without bound.
    pub max_fall_speed: Option<f32>,
    /// Number of ids per full hue rotation.
    pub color_period: u32,
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::with_particle_size(DEFAULT_PARTICLE_SIZE)
    }
}

impl SimConfig {
    /// Defaults with every speed scaled to the given cell size.
    #[must_use]
    pub fn with_particle_size(size: u32) -> Self {
        let s = size as f32;
        Self {
            screen_width: 1000,
            screen_height: 2000,
            particle_size: size,
            gravity: 0.8 * s,
            spawn_speed_x: s,
            spawn_speeds_y: [-5.0 * s, -10.5 * s],
            settle_bias: s,
            max_fall_speed: None,
            color_period: 3000,
            seed: 0x5eed,
        }
    }

    /// Defaults on a screen of the given pixel size.
    #[must_use]
    pub fn with_screen(width: u32, height: u32) -> Self {
        Self {
            screen_width: width,
            screen_height: height,
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON object; missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.particle_size;
        if size == 0 {
            return Err(ConfigError::ZeroParticleSize);
        }
        if self.screen_width < size || self.screen_height < size {
            return Err(ConfigError::ScreenTooSmall {
                width: self.screen_width,
                height: self.screen_height,
                size,
            });
        }
        if !self.gravity.is_finite() || self.gravity < 0.0 {
            return Err(ConfigError::InvalidGravity(self.gravity));
        }
        let speeds = [
            self.spawn_speed_x,
            self.spawn_speeds_y[0],
            self.spawn_speeds_y[1],
            self.settle_bias,
        ];
        if speeds.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::InvalidSpawnSpeed);
        }
        if let Some(cap) = self.max_fall_speed {
            if !cap.is_finite() || cap <= 0.0 {
                return Err(ConfigError::InvalidMaxFallSpeed(cap));
            }
        }
        if self.color_period == 0 {
            return Err(ConfigError::ZeroColorPeriod);
        }
        Ok(())
    }

    /// Grid width in cells.
    #[must_use]
    pub fn grid_width(&self) -> i32 {
        (self.screen_width / self.particle_size) as i32
    }

    /// Grid height in cells.
    #[must_use]
    pub fn grid_height(&self) -> i32 {
        (self.screen_height / self.particle_size) as i32
    }

    #[must_use]
    pub fn cell_size(&self) -> f32 {
        self.particle_size as f32
    }
}
