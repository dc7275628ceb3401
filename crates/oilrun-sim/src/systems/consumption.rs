//! Drum consumption: overlap test, then despawn + respawn + refuel.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use oilrun_core::components::RenderableHandle;
use oilrun_core::events::SimEvent;

use crate::engine::{SimulationState, SpawnPoint};
use crate::fuel::{FuelGauge, SharedFuelGauge};
use crate::overlap::OverlapDetector;
use crate::spawn::SpawnPlacer;
use crate::world_setup;

/// Run the overlap test for the tank and consume the hit drum, if any.
///
/// The three effects happen under the fuel lock, so no reader or timer
/// tick observes a consumed drum without the refill, or the reverse.
/// Returns the gauge as read under that lock if a drum was consumed.
pub fn run(
    world: &mut World,
    state: &mut SimulationState,
    placer: &SpawnPlacer,
    rng: &mut ChaCha8Rng,
    fuel: &SharedFuelGauge,
    drum_renderable: Option<RenderableHandle>,
    events: &mut Vec<SimEvent>,
) -> Option<FuelGauge> {
    let drum = OverlapDetector::test_overlap(world, state.tank)?;
    let (Some(drum_pose), Some(tank_pose)) = (
        world_setup::world_transform(world, drum),
        world_setup::world_transform(world, state.tank),
    ) else {
        return None;
    };

    let mut gauge = fuel.lock();

    if world.despawn(drum).is_err() {
        return None;
    }
    let position = placer.place(tank_pose.position, rng);
    let entity = world_setup::spawn_drum(world, position, drum_renderable);
    state.spawn_point = Some(SpawnPoint { entity, position });
    let level = gauge.reset();
    let refilled = *gauge;
    drop(gauge);

    tracing::info!(
        consumed = ?drum_pose.position,
        respawned = ?position,
        "oil drum consumed"
    );
    events.push(SimEvent::SpawnPointConsumed {
        entity: drum.to_bits().get(),
        position: drum_pose.position,
    });
    events.push(SimEvent::SpawnPointPlaced {
        entity: entity.to_bits().get(),
        position,
    });
    events.push(SimEvent::FuelReset { level });
    Some(refilled)
}
