//! Interpolation tasks and the animator that owns them.
//!
//! A task is a small state machine (`Idle -> Running -> Completed | Cancelled`)
//! over an [`Interval`]. The animator keys tasks by (entity, channel): starting
//! a task on a key cancels and replaces the previous one, while the translation
//! and rotation channels of one entity run side by side.

use std::collections::HashMap;
use std::time::Duration;

use glam::{Quat, Vec3};
use hecs::Entity;

use oilrun_core::enums::{EasingCurve, MotionChannel, TaskState};
use oilrun_core::state::MotionView;

use crate::motion::{MoveInterval, TurnInterval};

/// A start/end pair that can be sampled at a progress fraction.
pub trait Interval {
    type Value: Copy;

    /// Value at eased progress `fraction` in `[0, 1]`.
    fn sample(&self, fraction: f32) -> Self::Value;
    fn duration(&self) -> Duration;
    fn easing(&self) -> EasingCurve;
}

#[derive(Debug, Clone)]
pub struct InterpolationTask<I: Interval> {
    interval: I,
    elapsed: Duration,
    state: TaskState,
}

impl<I: Interval> InterpolationTask<I> {
    pub fn new(interval: I) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
            state: TaskState::Idle,
        }
    }

    /// Create a task that is already running.
    pub fn running(interval: I) -> Self {
        let mut task = Self::new(interval);
        task.start();
        task
    }

    pub fn start(&mut self) {
        if self.state == TaskState::Idle {
            self.state = TaskState::Running;
        }
    }

    /// Advance by `delta` and return the sample to write, if any.
    /// The sample at full progress is returned once, together with the
    /// transition to `Completed`.
    pub fn advance(&mut self, delta: Duration) -> Option<I::Value> {
        if self.state != TaskState::Running {
            return None;
        }

        self.elapsed = self.elapsed.saturating_add(delta);
        let t = self.progress();
        let value = self.interval.sample(self.interval.easing().apply(t));
        if t >= 1.0 {
            self.state = TaskState::Completed;
        }
        Some(value)
    }

    /// Stop in place. The last written sample stays; a finished task is untouched.
    /// Returns whether the task was live.
    pub fn cancel(&mut self) -> bool {
        match self.state {
            TaskState::Idle | TaskState::Running => {
                self.state = TaskState::Cancelled;
                true
            }
            TaskState::Cancelled | TaskState::Completed => false,
        }
    }

    /// Elapsed-time fraction in `[0, 1]`, before easing.
    pub fn progress(&self) -> f32 {
        let duration = self.interval.duration();
        if duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn interval(&self) -> &I {
        &self.interval
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// Value produced by one task in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampledValue {
    Position(Vec3),
    Rotation(Quat),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    pub entity: Entity,
    pub channel: MotionChannel,
    pub value: SampledValue,
    /// This sample finished the task.
    pub completed: bool,
}

/// Owns every interpolation task, keyed by (entity, channel).
#[derive(Debug, Default)]
pub struct Animator {
    moves: HashMap<Entity, InterpolationTask<MoveInterval>>,
    turns: HashMap<Entity, InterpolationTask<TurnInterval>>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a translation task, replacing any previous one for `entity`.
    /// Returns true if a live task was cancelled by the replacement.
    pub fn start_move(&mut self, entity: Entity, interval: MoveInterval) -> bool {
        self.moves
            .insert(entity, InterpolationTask::running(interval))
            .is_some_and(|mut prev| prev.cancel())
    }

    /// Start a rotation task, replacing any previous one for `entity`.
    /// Returns true if a live task was cancelled by the replacement.
    pub fn start_turn(&mut self, entity: Entity, interval: TurnInterval) -> bool {
        self.turns
            .insert(entity, InterpolationTask::running(interval))
            .is_some_and(|mut prev| prev.cancel())
    }

    /// Cancel the task on one channel. Returns true if it was live.
    pub fn cancel(&mut self, entity: Entity, channel: MotionChannel) -> bool {
        match channel {
            MotionChannel::Translation => self.moves.get_mut(&entity).is_some_and(|t| t.cancel()),
            MotionChannel::Rotation => self.turns.get_mut(&entity).is_some_and(|t| t.cancel()),
        }
    }

    pub fn state(&self, entity: Entity, channel: MotionChannel) -> Option<TaskState> {
        match channel {
            MotionChannel::Translation => self.moves.get(&entity).map(|t| t.state()),
            MotionChannel::Rotation => self.turns.get(&entity).map(|t| t.state()),
        }
    }

    pub fn move_task(&self, entity: Entity) -> Option<&InterpolationTask<MoveInterval>> {
        self.moves.get(&entity)
    }

    pub fn turn_task(&self, entity: Entity) -> Option<&InterpolationTask<TurnInterval>> {
        self.turns.get(&entity)
    }

    /// Advance every running task. Translation samples come first.
    pub fn advance(&mut self, delta: Duration) -> Vec<MotionSample> {
        let mut samples = Vec::new();

        for (&entity, task) in self.moves.iter_mut() {
            if let Some(position) = task.advance(delta) {
                samples.push(MotionSample {
                    entity,
                    channel: MotionChannel::Translation,
                    value: SampledValue::Position(position),
                    completed: task.state() == TaskState::Completed,
                });
            }
        }

        for (&entity, task) in self.turns.iter_mut() {
            if let Some(rotation) = task.advance(delta) {
                samples.push(MotionSample {
                    entity,
                    channel: MotionChannel::Rotation,
                    value: SampledValue::Rotation(rotation),
                    completed: task.state() == TaskState::Completed,
                });
            }
        }

        samples
    }

    /// Task summaries for one entity, translation first.
    pub fn views(&self, entity: Entity) -> Vec<MotionView> {
        let mut views = Vec::with_capacity(2);
        if let Some(task) = self.moves.get(&entity) {
            views.push(MotionView {
                channel: MotionChannel::Translation,
                state: task.state(),
                progress: task.progress(),
            });
        }
        if let Some(task) = self.turns.get(&entity) {
            views.push(MotionView {
                channel: MotionChannel::Rotation,
                state: task.state(),
                progress: task.progress(),
            });
        }
        views
    }

    /// Drop every task for `entity` without writing anything.
    pub fn remove_entity(&mut self, entity: Entity) {
        self.moves.remove(&entity);
        self.turns.remove(&entity);
    }

    pub fn clear(&mut self) {
        self.moves.clear();
        self.turns.clear();
    }
}
