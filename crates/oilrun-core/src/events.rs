//! Events emitted by the simulation for UI feedback.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::enums::MotionChannel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// Tank placed on a tapped plane.
    TankPlaced { position: Vec3 },
    /// A new spawn point (oil drum) was placed.
    SpawnPointPlaced { entity: u64, position: Vec3 },
    /// The tank overlapped a drum and consumed it.
    SpawnPointConsumed { entity: u64, position: Vec3 },
    /// Fuel refilled.
    FuelReset { level: i32 },
    MotionStarted {
        channel: MotionChannel,
        target_position: Option<Vec3>,
        target_rotation: Option<Quat>,
    },
    MotionCancelled { channel: MotionChannel },
    MotionCompleted { channel: MotionChannel },
    SessionEnded,
}
