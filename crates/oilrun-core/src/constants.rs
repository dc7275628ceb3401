//! Simulation constants and tuning parameters.
//!
//! These are the defaults the configuration falls back to.

/// Default render frame rate of the host loop (Hz).
pub const FRAME_RATE: u32 = 60;

// --- Motion ---

/// Distance advanced along the local forward axis per forward press.
pub const MOVE_DISTANCE: f32 = 1.0;

/// Duration of one forward interpolation (milliseconds).
pub const MOVE_DURATION_MS: u64 = 7000;

/// Yaw applied per turn press (degrees). Left is positive, right negative.
pub const TURN_DEGREES: f32 = 180.0;

/// Duration of one turn interpolation (milliseconds).
pub const TURN_DURATION_MS: u64 = 2000;

// --- Spawning ---

/// Maximum offset of a spawn point from its reference on X and Z.
pub const SPAWN_MAX_OFFSET: f32 = 0.4;

/// Redraw limit when a minimum separation is configured.
pub const SPAWN_MAX_ATTEMPTS: u32 = 16;

// --- Fuel ---

/// Fuel level after placement and after every consumption.
pub const FUEL_FULL: i32 = 100;

/// Background fuel timer period (milliseconds).
pub const FUEL_TICK_INTERVAL_MS: u64 = 150;

// --- Assets ---

/// Collision half-extents of the tank model (meters).
pub const TANK_HALF_EXTENTS: [f32; 3] = [0.1, 0.06, 0.15];

/// Collision half-extents of the oil drum model (meters).
pub const DRUM_HALF_EXTENTS: [f32; 3] = [0.04, 0.06, 0.04];

// --- Device requirements ---

/// Minimum platform SDK level (Android N).
pub const MIN_SDK_LEVEL: u32 = 24;

/// Minimum OpenGL ES version.
pub const MIN_GLES_VERSION: f64 = 3.0;
