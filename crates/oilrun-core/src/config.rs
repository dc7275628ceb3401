//! Configuration structs with sensible defaults and RON persistence.
//!
//! Every section is `#[serde(default)]`, so a partial file only overrides
//! the fields it names.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{EasingCurve, FuelSchedule};
use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Simulation tuning.
    pub sim: SimConfig,
    /// Host loop settings.
    pub app: RunConfig,
    /// Reported device capabilities.
    pub device: DeviceConfig,
    /// Model bounds handed out by the asset loader.
    pub assets: AssetConfig,
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for spawn placement. Same seed = same drum positions.
    pub seed: u64,
    pub motion: MotionConfig,
    pub spawn: SpawnConfig,
    pub fuel: FuelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotionConfig {
    /// Units advanced along local +Z per forward press.
    pub move_distance: f32,
    pub move_duration_ms: u64,
    pub move_easing: EasingCurve,
    /// Yaw magnitude per turn press (degrees).
    pub turn_degrees: f32,
    pub turn_duration_ms: u64,
    pub turn_easing: EasingCurve,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    /// Maximum offset on X and Z from the reference position.
    pub max_offset: f32,
    /// Minimum horizontal offset length. 0 disables rejection.
    pub min_separation: f32,
    /// Redraws allowed when `min_separation` rejects a draw.
    pub max_attempts: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FuelConfig {
    /// Level set by placement and by every consumption.
    pub full_level: i32,
    /// Background timer period (milliseconds).
    pub tick_interval_ms: u64,
    pub schedule: FuelSchedule,
}

/// Host loop settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    /// Render frames per second.
    pub frame_rate: u32,
    /// Log filter (e.g. "info", "oilrun_sim=debug"). `RUST_LOG` wins.
    pub log_level: String,
    /// Delay before the simulated asset loader delivers renderables.
    pub asset_load_delay_ms: u64,
    /// Length of the scripted demo session.
    pub demo_duration_ms: u64,
}

/// Device capabilities reported by the platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DeviceConfig {
    pub sdk_level: u32,
    pub gles_version: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    pub tank_half_extents: Vec3,
    pub drum_half_extents: Vec3,
}

// --- Default implementations ---

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            motion: MotionConfig::default(),
            spawn: SpawnConfig::default(),
            fuel: FuelConfig::default(),
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            move_distance: MOVE_DISTANCE,
            move_duration_ms: MOVE_DURATION_MS,
            move_easing: EasingCurve::Linear,
            turn_degrees: TURN_DEGREES,
            turn_duration_ms: TURN_DURATION_MS,
            turn_easing: EasingCurve::AccelerateDecelerate,
        }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            max_offset: SPAWN_MAX_OFFSET,
            min_separation: 0.0,
            max_attempts: SPAWN_MAX_ATTEMPTS,
        }
    }
}

impl Default for FuelConfig {
    fn default() -> Self {
        Self {
            full_level: FUEL_FULL,
            tick_interval_ms: FUEL_TICK_INTERVAL_MS,
            schedule: FuelSchedule::Background,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frame_rate: FRAME_RATE,
            log_level: "info".to_string(),
            asset_load_delay_ms: 250,
            demo_duration_ms: 20_000,
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            sdk_level: MIN_SDK_LEVEL,
            gles_version: MIN_GLES_VERSION,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            tank_half_extents: Vec3::from_array(TANK_HALF_EXTENTS),
            drum_half_extents: Vec3::from_array(DRUM_HALF_EXTENTS),
        }
    }
}

// --- Load / Save ---

impl AppConfig {
    /// Parse a RON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: AppConfig = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Write the config as pretty RON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(ConfigError::WriteError)?;
        }

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}
