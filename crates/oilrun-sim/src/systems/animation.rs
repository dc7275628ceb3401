//! Interpolation driver: writes animator samples into scene transforms.

use std::time::Duration;

use hecs::World;

use oilrun_core::events::SimEvent;
use oilrun_core::types::Transform;

use crate::interpolation::{Animator, SampledValue};

/// Advance every running task by `delta` and write the samples back.
pub fn run(world: &mut World, animator: &mut Animator, delta: Duration, events: &mut Vec<SimEvent>) {
    for sample in animator.advance(delta) {
        let Ok(mut transform) = world.get::<&mut Transform>(sample.entity) else {
            // Node gone; nothing to write.
            continue;
        };

        match sample.value {
            SampledValue::Position(position) => transform.position = position,
            SampledValue::Rotation(rotation) => transform.set_rotation(rotation),
        }

        if sample.completed {
            tracing::debug!(channel = ?sample.channel, "motion completed");
            events.push(SimEvent::MotionCompleted {
                channel: sample.channel,
            });
        }
    }
}
