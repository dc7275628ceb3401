//! Motion controller: turns a pose and a command into an animatable interval.
//!
//! Nothing here mutates a transform. The animator samples the returned
//! intervals frame by frame and writes the samples back.

use std::time::Duration;

use glam::{Quat, Vec3};

use oilrun_core::config::MotionConfig;
use oilrun_core::enums::EasingCurve;
use oilrun_core::types::Transform;

use crate::interpolation::Interval;

/// Straight-line move between two world positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveInterval {
    pub start: Vec3,
    pub end: Vec3,
    pub duration: Duration,
    pub easing: EasingCurve,
}

/// Yaw turn about +Y from a starting orientation.
///
/// Sampled by angle rather than by shortest-arc slerp, so a half turn keeps
/// the direction given by the sign of `degrees`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnInterval {
    pub start: Quat,
    pub end: Quat,
    pub degrees: f32,
    pub duration: Duration,
    pub easing: EasingCurve,
}

impl Interval for MoveInterval {
    type Value = Vec3;

    fn sample(&self, fraction: f32) -> Vec3 {
        self.start.lerp(self.end, fraction)
    }

    fn duration(&self) -> Duration {
        self.duration
    }

    fn easing(&self) -> EasingCurve {
        self.easing
    }
}

impl Interval for TurnInterval {
    type Value = Quat;

    fn sample(&self, fraction: f32) -> Quat {
        if fraction >= 1.0 {
            return self.end;
        }
        yaw_compose(self.start, self.degrees * fraction)
    }

    fn duration(&self) -> Duration {
        self.duration
    }

    fn easing(&self) -> EasingCurve {
        self.easing
    }
}

/// Right-multiply `orientation` by a rotation of `degrees` about +Y.
pub fn yaw_compose(orientation: Quat, degrees: f32) -> Quat {
    (orientation * Quat::from_axis_angle(Vec3::Y, degrees.to_radians())).normalize()
}

/// Computes target poses for forward movement and yaw rotation.
#[derive(Debug, Clone)]
pub struct MotionController {
    config: MotionConfig,
}

impl Default for MotionController {
    fn default() -> Self {
        Self::new(MotionConfig::default())
    }
}

impl MotionController {
    pub fn new(config: MotionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Advance `move_distance` along the pose's local +Z, expressed in world space.
    pub fn move_forward(&self, current: &Transform) -> MoveInterval {
        let end = current.local_to_world_point(Vec3::Z * self.config.move_distance);
        MoveInterval {
            start: current.position,
            end,
            duration: Duration::from_millis(self.config.move_duration_ms),
            easing: self.config.move_easing,
        }
    }

    /// Compose the current orientation with a yaw of `degrees` (positive = left).
    pub fn turn(&self, current: &Transform, degrees: f32) -> TurnInterval {
        TurnInterval {
            start: current.rotation,
            end: yaw_compose(current.rotation, degrees),
            degrees,
            duration: Duration::from_millis(self.config.turn_duration_ms),
            easing: self.config.turn_easing,
        }
    }
}
