//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::TURN_DEGREES;

/// On-screen control that produces press events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    TurnLeft,
    TurnRight,
    Forward,
}

/// Discrete touch action on a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressAction {
    Down,
    Up,
    Cancel,
}

/// Interpolated property of a moving entity. Tasks on different
/// channels run concurrently; a new task replaces the old one on the
/// same channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MotionChannel {
    /// World position.
    Translation,
    /// World rotation.
    Rotation,
}

/// A motion request derived from a single input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveCommand {
    Forward,
    TurnLeft,
    TurnRight,
    /// Cancel whatever is running on the channel, in place.
    Stop(MotionChannel),
}

impl MoveCommand {
    /// Translate a press event on a control into a motion request.
    pub fn from_press(control: Control, action: PressAction) -> Self {
        match (control, action) {
            (Control::Forward, PressAction::Down) => MoveCommand::Forward,
            (Control::TurnLeft, PressAction::Down) => MoveCommand::TurnLeft,
            (Control::TurnRight, PressAction::Down) => MoveCommand::TurnRight,
            (Control::Forward, PressAction::Up | PressAction::Cancel) => {
                MoveCommand::Stop(MotionChannel::Translation)
            }
            (Control::TurnLeft | Control::TurnRight, PressAction::Up | PressAction::Cancel) => {
                MoveCommand::Stop(MotionChannel::Rotation)
            }
        }
    }

    /// Channel this command drives or stops.
    pub fn channel(&self) -> MotionChannel {
        match self {
            MoveCommand::Forward => MotionChannel::Translation,
            MoveCommand::TurnLeft | MoveCommand::TurnRight => MotionChannel::Rotation,
            MoveCommand::Stop(channel) => *channel,
        }
    }

    /// Signed yaw for turn commands (degrees), using the given magnitude.
    pub fn turn_degrees(&self, magnitude: f32) -> Option<f32> {
        match self {
            MoveCommand::TurnLeft => Some(magnitude.abs()),
            MoveCommand::TurnRight => Some(-magnitude.abs()),
            _ => None,
        }
    }

    /// Signed yaw with the default half-turn magnitude.
    pub fn default_turn_degrees(&self) -> Option<f32> {
        self.turn_degrees(TURN_DEGREES)
    }
}

/// Mapping from elapsed-time fraction to progress fraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EasingCurve {
    #[default]
    Linear,
    /// Slow start and end, fastest in the middle: `cos((t + 1)π) / 2 + 0.5`.
    AccelerateDecelerate,
}

impl EasingCurve {
    /// Apply the curve to `t`, clamped to `[0, 1]`.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingCurve::Linear => t,
            EasingCurve::AccelerateDecelerate => {
                ((t + 1.0) * std::f32::consts::PI).cos() / 2.0 + 0.5
            }
        }
    }
}

/// Lifecycle of an interpolation task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskState {
    #[default]
    Idle,
    Running,
    Cancelled,
    Completed,
}

impl TaskState {
    /// Whether the task will never write another sample.
    pub fn is_finished(&self) -> bool {
        matches!(self, TaskState::Cancelled | TaskState::Completed)
    }
}

/// Model identifiers resolved by the asset loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    Tank,
    OilDrum,
}

/// Session lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No tank placed yet; inputs other than a plane tap are skipped.
    #[default]
    AwaitingPlacement,
    Active,
    /// Session state destroyed; every input is skipped.
    Ended,
}

/// How the fuel gauge is driven.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelSchedule {
    /// A background timer thread ticks the gauge after placement.
    #[default]
    Background,
    /// Nothing ticks automatically; callers use `tick_fuel`.
    Manual,
}
