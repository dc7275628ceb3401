//! Simulation snapshot: the visible state handed to the renderer each frame.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::{MotionChannel, SessionPhase, TaskState};
use crate::events::SimEvent;
use crate::types::{SimTime, Transform};

/// Complete state produced after each frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub time: SimTime,
    pub phase: SessionPhase,
    pub tank: Option<TankView>,
    pub spawn_point: Option<SpawnPointView>,
    pub fuel: FuelView,
    pub motions: Vec<MotionView>,
    pub events: Vec<SimEvent>,
}

/// The moving entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TankView {
    pub entity: u64,
    /// World pose.
    pub transform: Transform,
    /// Position relative to the anchor the tank is parented to.
    pub local_position: Vec3,
}

/// The active collectible.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpawnPointView {
    pub entity: u64,
    pub position: Vec3,
    /// False while the drum has no renderable (and so cannot be consumed).
    pub collidable: bool,
}

/// Fuel gauge reading.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FuelView {
    /// Raw counter. Runs negative once empty.
    pub level: i32,
    /// Level as a progress bar shows it, clamped to `[0, FUEL_FULL]`.
    pub display_level: i32,
    /// Whether the gauge has been started by a placement.
    pub started: bool,
}

/// An interpolation task currently held by the animator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MotionView {
    pub channel: MotionChannel,
    pub state: TaskState,
    /// Elapsed-time fraction in `[0, 1]`, before easing.
    pub progress: f32,
}
