//! Snapshot builder: reads the world and engine state into a `SimulationSnapshot`.

use hecs::World;

use oilrun_core::components::Renderable;
use oilrun_core::enums::SessionPhase;
use oilrun_core::events::SimEvent;
use oilrun_core::state::*;
use oilrun_core::types::SimTime;

use crate::engine::SimulationState;
use crate::fuel::FuelGauge;
use crate::interpolation::Animator;
use crate::world_setup;

/// Build the complete snapshot for one frame. `gauge` is read by the caller
/// so a frame that refilled reports the level set under its own lock.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: SessionPhase,
    state: Option<&SimulationState>,
    gauge: FuelGauge,
    animator: &Animator,
    events: Vec<SimEvent>,
) -> SimulationSnapshot {
    let tank = state.and_then(|s| {
        let transform = world_setup::world_transform(world, s.tank)?;
        Some(TankView {
            entity: s.tank.to_bits().get(),
            transform,
            local_position: world_setup::local_position(world, s.tank)
                .unwrap_or(transform.position),
        })
    });

    let spawn_point = state.and_then(|s| s.spawn_point).map(|sp| SpawnPointView {
        entity: sp.entity.to_bits().get(),
        position: sp.position,
        collidable: world.get::<&Renderable>(sp.entity).is_ok(),
    });

    let motions = state.map(|s| animator.views(s.tank)).unwrap_or_default();

    SimulationSnapshot {
        time: *time,
        phase,
        tank,
        spawn_point,
        fuel: FuelView {
            level: gauge.level(),
            display_level: gauge.display_level(),
            started: state.is_some(),
        },
        motions,
        events,
    }
}
