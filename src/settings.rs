//! Gameplay configuration
//!
//! Speeds are per frame, the spawn interval is wall-clock milliseconds. A
//! config is checked once, up front; the simulation never runs on values
//! that fail [`GameConfig::validate`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Reasons a configuration is rejected
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be a positive finite number (got {value})")]
    NotPositive { name: &'static str, value: f64 },

    #[error("spawn_interval_ms must be at least {min} (got {value})")]
    SpawnIntervalTooShort { value: f64, min: f64 },

    #[error("friction must be in (0, 1] (got {0})")]
    FrictionOutOfRange(f32),

    #[error("asteroid radius range is empty: min {min} >= max {max}")]
    EmptyRadiusRange { min: f32, max: f32 },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tunable gameplay parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Play-area width (canvas pixels)
    pub width: f32,
    /// Play-area height (canvas pixels)
    pub height: f32,
    /// Ship speed while thrusting
    pub thrust_speed: f32,
    /// Radians turned per frame
    pub rotational_speed: f32,
    /// Velocity multiplier per frame while coasting
    pub friction: f32,
    pub projectile_speed: f32,
    pub spawn_interval_ms: f64,
    /// Asteroid radius is drawn from [min, max)
    pub asteroid_radius_min: f32,
    pub asteroid_radius_max: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            thrust_speed: THRUST_SPEED,
            rotational_speed: ROTATIONAL_SPEED,
            friction: FRICTION,
            projectile_speed: PROJECTILE_SPEED,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            asteroid_radius_min: ASTEROID_RADIUS_MIN,
            asteroid_radius_max: ASTEROID_RADIUS_MAX,
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

impl GameConfig {
    /// Default tuning on a play area of the given size
    pub fn with_size(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Check every numeric field
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("width", self.width as f64)?;
        positive("height", self.height as f64)?;
        positive("thrust_speed", self.thrust_speed as f64)?;
        positive("rotational_speed", self.rotational_speed as f64)?;
        positive("projectile_speed", self.projectile_speed as f64)?;
        positive("spawn_interval_ms", self.spawn_interval_ms)?;
        positive("asteroid_radius_min", self.asteroid_radius_min as f64)?;
        positive("asteroid_radius_max", self.asteroid_radius_max as f64)?;

        if self.spawn_interval_ms < MIN_SPAWN_INTERVAL_MS {
            return Err(ConfigError::SpawnIntervalTooShort {
                value: self.spawn_interval_ms,
                min: MIN_SPAWN_INTERVAL_MS,
            });
        }
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(ConfigError::FrictionOutOfRange(self.friction));
        }
        if self.asteroid_radius_min >= self.asteroid_radius_max {
            return Err(ConfigError::EmptyRadiusRange {
                min: self.asteroid_radius_min,
                max: self.asteroid_radius_max,
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON config for a canvas of the given size
    ///
    /// The play area always matches the canvas; stored `width`/`height` are
    /// ignored.
    pub fn from_json_sized(json: &str, width: f32, height: f32) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        config.width = width;
        config.height = height;
        config.validate()?;
        Ok(config)
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "astro_drift_config";

    /// Load config overrides from LocalStorage, sized to the canvas (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(width: f32, height: f32) -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json_sized(&json, width, height) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::with_size(width, height)
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(width: f32, height: f32) -> Self {
        Self::with_size(width, height)
    }
}
