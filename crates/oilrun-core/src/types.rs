//! Fundamental geometric and simulation types.

use std::time::Duration;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Rigid body pose in a 3D frame: position plus unit orientation.
///
/// The scene has no scaling, so a pose maps local points to its frame
/// by rotation followed by translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    /// Always unit-norm. Every constructor and setter normalizes.
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation: rotation.normalize(),
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation.normalize();
    }

    /// Map a point expressed in this pose's local frame into the parent frame.
    pub fn local_to_world_point(&self, point: Vec3) -> Vec3 {
        self.position + self.rotation * point
    }

    /// Inverse of [`Transform::local_to_world_point`].
    pub fn world_to_local_point(&self, point: Vec3) -> Vec3 {
        self.rotation.inverse() * (point - self.position)
    }

    /// Local +Z expressed in the parent frame.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Yaw about +Y in radians (0 = facing +Z, positive turns toward +X).
    pub fn yaw(&self) -> f32 {
        let f = self.forward();
        f.x.atan2(f.z)
    }
}

/// Simulation time tracking. Frames have variable length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of frames processed.
    pub frame: u64,
    /// Elapsed simulation time in milliseconds, derived from `elapsed_nanos`.
    pub elapsed_ms: u64,
    /// Exact elapsed simulation time. Sub-millisecond frame remainders
    /// accumulate here.
    pub elapsed_nanos: u64,
}

impl SimTime {
    /// Advance by one frame of the given length.
    pub fn advance(&mut self, delta: Duration) {
        self.frame += 1;
        let nanos = u64::try_from(delta.as_nanos()).unwrap_or(u64::MAX);
        self.elapsed_nanos = self.elapsed_nanos.saturating_add(nanos);
        self.elapsed_ms = self.elapsed_nanos / 1_000_000;
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_nanos)
    }
}
