//! Tests for the simulation engine: placement, motion, consumption and fuel.

use std::time::Duration;

use glam::Vec3;

use oilrun_core::commands::{PlaneRef, SceneInput};
use oilrun_core::components::RenderableHandle;
use oilrun_core::enums::*;
use oilrun_core::events::SimEvent;
use oilrun_core::state::SimulationSnapshot;

use crate::engine::{SimConfig, SimulationEngine};

const FRAME: Duration = Duration::from_millis(16);

fn manual_config(seed: u64) -> SimConfig {
    let mut config = SimConfig {
        seed,
        ..Default::default()
    };
    config.fuel.schedule = FuelSchedule::Manual;
    config
}

fn loaded(model: ModelKind) -> SceneInput {
    let half_extents = match model {
        ModelKind::Tank => Vec3::new(0.1, 0.06, 0.15),
        ModelKind::OilDrum => Vec3::new(0.04, 0.06, 0.04),
    };
    SceneInput::RenderableLoaded {
        model,
        renderable: RenderableHandle {
            id: model as u32 + 1,
            half_extents,
        },
    }
}

fn tap(at: Vec3) -> SceneInput {
    SceneInput::PlaneTap {
        hit_position: at,
        plane: PlaneRef(1),
    }
}

fn press(control: Control, action: PressAction) -> SceneInput {
    SceneInput::Control { control, action }
}

/// Engine with both models loaded and the tank placed at `at`.
fn placed_engine(seed: u64, at: Vec3) -> (SimulationEngine, SimulationSnapshot) {
    let mut engine = SimulationEngine::new(manual_config(seed));
    engine.queue_inputs([loaded(ModelKind::Tank), loaded(ModelKind::OilDrum), tap(at)]);
    let snap = engine.tick(Duration::ZERO);
    (engine, snap)
}

fn run_for(engine: &mut SimulationEngine, total: Duration) -> SimulationSnapshot {
    let mut elapsed = Duration::ZERO;
    let mut snap = engine.tick(Duration::ZERO);
    while elapsed < total {
        snap = engine.tick(FRAME);
        elapsed += FRAME;
    }
    snap
}

fn count<F: Fn(&SimEvent) -> bool>(events: &[SimEvent], pred: F) -> usize {
    events.iter().filter(|e| pred(e)).count()
}

// ---- Placement ----

#[test]
fn test_placement_at_origin() {
    for seed in 0..20 {
        let (engine, snap) = placed_engine(seed, Vec3::ZERO);

        assert_eq!(snap.phase, SessionPhase::Active);
        let tank = snap.tank.expect("tank placed");
        assert_eq!(tank.transform.position, Vec3::ZERO);
        assert_eq!(tank.local_position, Vec3::ZERO);

        let spawn = snap.spawn_point.expect("initial spawn point");
        assert!(spawn.position.x.abs() <= 0.4 + 1e-5);
        assert!(spawn.position.z.abs() <= 0.4 + 1e-5);
        assert_eq!(spawn.position.y, 0.0);

        assert_eq!(snap.fuel.level, 100);
        assert!(snap.fuel.started);
        assert_eq!(engine.fuel_gauge().level(), 100);
    }
}

#[test]
fn test_tap_before_model_loaded_is_ignored() {
    let mut engine = SimulationEngine::new(manual_config(1));
    engine.queue_input(tap(Vec3::ZERO));
    let snap = engine.tick(FRAME);

    assert_eq!(snap.phase, SessionPhase::AwaitingPlacement);
    assert!(snap.tank.is_none());
    assert!(snap.spawn_point.is_none());
    assert!(!snap.fuel.started);
    assert!(snap.events.is_empty());

    // Model arrives later; the next tap places.
    engine.queue_inputs([loaded(ModelKind::Tank), tap(Vec3::ZERO)]);
    let snap = engine.tick(FRAME);
    assert_eq!(snap.phase, SessionPhase::Active);
}

#[test]
fn test_second_tap_is_ignored() {
    let (mut engine, first) = placed_engine(2, Vec3::new(0.5, 0.0, 0.5));
    engine.queue_input(tap(Vec3::new(3.0, 0.0, 3.0)));
    let snap = engine.tick(FRAME);

    assert_eq!(
        snap.tank.unwrap().transform.position,
        first.tank.unwrap().transform.position
    );
    assert_eq!(count(&snap.events, |e| matches!(e, SimEvent::TankPlaced { .. })), 0);
}

#[test]
fn test_placement_events() {
    let (_engine, snap) = placed_engine(3, Vec3::ZERO);
    assert_eq!(count(&snap.events, |e| matches!(e, SimEvent::TankPlaced { .. })), 1);
    assert!(count(&snap.events, |e| matches!(e, SimEvent::SpawnPointPlaced { .. })) >= 1);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::FuelReset { level: 100 })));
}

#[test]
fn test_controls_before_placement_are_skipped() {
    let mut engine = SimulationEngine::new(manual_config(4));
    engine.queue_inputs([
        loaded(ModelKind::Tank),
        press(Control::Forward, PressAction::Down),
        press(Control::Forward, PressAction::Up),
        press(Control::TurnLeft, PressAction::Cancel),
    ]);
    let snap = engine.tick(FRAME);
    assert!(snap.motions.is_empty());
    assert!(snap.events.is_empty());
}

// ---- Motion ----

#[test]
fn test_forward_full_interpolation() {
    let (mut engine, start) = placed_engine(5, Vec3::new(0.2, 0.0, -0.3));
    let start_pos = start.tank.unwrap().transform.position;

    engine.queue_input(press(Control::Forward, PressAction::Down));
    let snap = run_for(&mut engine, Duration::from_millis(7100));
    let end_pos = snap.tank.unwrap().transform.position;

    assert!((end_pos - start_pos).abs_diff_eq(Vec3::new(0.0, 0.0, 1.0), 1e-4));
    assert_eq!(
        engine.animator().state(engine.state().unwrap().tank, MotionChannel::Translation),
        Some(TaskState::Completed)
    );

    // Releasing a finished move changes nothing.
    engine.queue_input(press(Control::Forward, PressAction::Up));
    let snap = engine.tick(FRAME);
    assert_eq!(snap.tank.unwrap().transform.position, end_pos);
    assert_eq!(
        count(&snap.events, |e| matches!(e, SimEvent::MotionCancelled { .. })),
        0
    );
    assert_eq!(snap.motions[0].state, TaskState::Completed);
}

#[test]
fn test_forward_is_linear() {
    let (mut engine, _) = placed_engine(6, Vec3::ZERO);
    engine.queue_input(press(Control::Forward, PressAction::Down));
    engine.tick(Duration::from_millis(1750));
    let snap = engine.tick(Duration::from_millis(1750));

    // Half the duration, half the distance.
    let z = snap.tank.unwrap().transform.position.z;
    assert!((z - 0.5).abs() < 1e-4, "z = {z}");
}

#[test]
fn test_forward_completion_event() {
    let (mut engine, _) = placed_engine(7, Vec3::ZERO);
    engine.queue_input(press(Control::Forward, PressAction::Down));
    let started = engine.tick(Duration::from_millis(10));
    assert_eq!(
        count(&started.events, |e| matches!(
            e,
            SimEvent::MotionStarted {
                channel: MotionChannel::Translation,
                ..
            }
        )),
        1
    );

    let done = engine.tick(Duration::from_millis(7000));
    assert_eq!(
        count(&done.events, |e| matches!(
            e,
            SimEvent::MotionCompleted {
                channel: MotionChannel::Translation
            }
        )),
        1
    );
}

#[test]
fn test_release_stops_in_place() {
    let (mut engine, _) = placed_engine(8, Vec3::ZERO);
    engine.queue_input(press(Control::Forward, PressAction::Down));
    engine.tick(Duration::from_millis(1400));

    engine.queue_input(press(Control::Forward, PressAction::Cancel));
    let released = engine.tick(FRAME);
    let z = released.tank.unwrap().transform.position.z;
    assert!((z - 0.2).abs() < 1e-4, "z = {z}");
    assert_eq!(
        count(&released.events, |e| matches!(e, SimEvent::MotionCancelled { .. })),
        1
    );

    // No snap-back, no further progress.
    let later = run_for(&mut engine, Duration::from_millis(3000));
    assert_eq!(later.tank.unwrap().transform.position.z, z);
}

#[test]
fn test_turn_left_partial_is_eased() {
    let (mut engine, _) = placed_engine(9, Vec3::ZERO);
    engine.queue_input(press(Control::TurnLeft, PressAction::Down));
    for _ in 0..5 {
        engine.tick(Duration::from_millis(100));
    }
    engine.queue_input(press(Control::TurnLeft, PressAction::Up));
    let snap = engine.tick(FRAME);

    let tank = snap.tank.unwrap();
    let yaw = tank.transform.yaw().to_degrees();
    // 500 of 2000 ms: accelerate-decelerate gives ~14.6% of 180°, linear would give 45°.
    assert!((yaw - 26.36).abs() < 0.1, "yaw = {yaw}");
    assert!(tank.transform.rotation.is_normalized());
    assert_eq!(snap.motions[0].channel, MotionChannel::Rotation);
    assert_eq!(snap.motions[0].state, TaskState::Cancelled);
}

#[test]
fn test_turn_right_goes_the_other_way() {
    let (mut engine, _) = placed_engine(10, Vec3::ZERO);
    engine.queue_input(press(Control::TurnRight, PressAction::Down));
    let snap = engine.tick(Duration::from_millis(1000));
    let yaw = snap.tank.unwrap().transform.yaw().to_degrees();
    assert!((yaw + 90.0).abs() < 0.1, "yaw = {yaw}");
}

#[test]
fn test_full_turn_is_half_revolution() {
    let (mut engine, _) = placed_engine(11, Vec3::ZERO);
    engine.queue_input(press(Control::TurnLeft, PressAction::Down));
    let snap = run_for(&mut engine, Duration::from_millis(2100));
    let forward = snap.tank.unwrap().transform.forward();
    assert!(forward.abs_diff_eq(Vec3::NEG_Z, 1e-4), "forward = {forward:?}");
}

#[test]
fn test_move_and_turn_run_together() {
    let (mut engine, _) = placed_engine(12, Vec3::ZERO);
    engine.queue_inputs([
        press(Control::Forward, PressAction::Down),
        press(Control::TurnLeft, PressAction::Down),
    ]);
    let snap = engine.tick(Duration::from_millis(1000));
    assert_eq!(snap.motions.len(), 2);
    assert!(snap.motions.iter().all(|m| m.state == TaskState::Running));

    // Releasing the turn leaves the move running.
    engine.queue_input(press(Control::TurnLeft, PressAction::Up));
    let before = snap.tank.unwrap().transform;
    let snap = engine.tick(Duration::from_millis(1000));
    let after = snap.tank.unwrap().transform;
    assert_eq!(after.rotation, before.rotation);
    assert!(after.position.z > before.position.z);
}

#[test]
fn test_repress_replaces_move() {
    let (mut engine, _) = placed_engine(13, Vec3::ZERO);
    engine.queue_input(press(Control::Forward, PressAction::Down));
    engine.tick(Duration::from_millis(3500));

    engine.queue_input(press(Control::Forward, PressAction::Down));
    let snap = engine.tick(Duration::ZERO);
    assert_eq!(
        count(&snap.events, |e| matches!(e, SimEvent::MotionCancelled { .. })),
        1
    );
    let target = snap.events.iter().find_map(|e| match e {
        SimEvent::MotionStarted {
            target_position, ..
        } => *target_position,
        _ => None,
    });
    // New target is one unit past the point reached so far.
    assert!(target.unwrap().abs_diff_eq(Vec3::new(0.0, 0.0, 1.5), 1e-4));
}

#[test]
fn test_forward_after_turn_uses_new_heading() {
    let (mut engine, _) = placed_engine(14, Vec3::ZERO);
    engine.queue_input(press(Control::TurnRight, PressAction::Down));
    run_for(&mut engine, Duration::from_millis(2100));

    engine.queue_input(press(Control::Forward, PressAction::Down));
    let snap = run_for(&mut engine, Duration::from_millis(7100));
    let pos = snap.tank.unwrap().transform.position;
    assert!(pos.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-3), "pos = {pos:?}");
    // Local position is relative to the anchor at the origin.
    assert!(snap
        .tank
        .unwrap()
        .local_position
        .abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-3));
}

// ---- Consumption ----

#[test]
fn test_consumption_is_atomic() {
    let (mut engine, _) = placed_engine(15, Vec3::ZERO);
    for _ in 0..30 {
        engine.tick_fuel();
    }
    assert_eq!(engine.fuel_gauge().level(), 70);

    engine.place_spawn_point_at(Vec3::new(0.05, 0.0, 0.05));
    let old = engine.state().unwrap().spawn_point.unwrap().entity;

    let snap = engine.tick(FRAME);

    assert_eq!(
        count(&snap.events, |e| matches!(e, SimEvent::SpawnPointConsumed { .. })),
        1
    );
    assert_eq!(
        count(&snap.events, |e| matches!(e, SimEvent::SpawnPointPlaced { .. })),
        1
    );
    assert_eq!(
        count(&snap.events, |e| matches!(e, SimEvent::FuelReset { .. })),
        1
    );
    assert_eq!(snap.fuel.level, 100);
    assert_eq!(engine.fuel_gauge().level(), 100);

    assert!(!engine.world().contains(old));
    let spawn = snap.spawn_point.unwrap();
    assert_ne!(spawn.entity, old.to_bits().get());
    assert!(spawn.position.x.abs() <= 0.4 + 1e-5 && spawn.position.z.abs() <= 0.4 + 1e-5);

    let drums = engine
        .world()
        .query::<&oilrun_core::components::OilDrum>()
        .iter()
        .count();
    assert_eq!(drums, 1, "exactly one drum after a respawn");
}

#[test]
fn test_respawn_uses_tank_position() {
    let (mut engine, _) = placed_engine(16, Vec3::ZERO);
    engine.queue_input(press(Control::Forward, PressAction::Down));
    run_for(&mut engine, Duration::from_millis(7100));

    let tank_pos = Vec3::new(0.0, 0.0, 1.0);
    engine.place_spawn_point_at(tank_pos);
    let snap = engine.tick(FRAME);

    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::SpawnPointConsumed { .. })));
    let spawn = snap.spawn_point.unwrap().position;
    assert!((spawn.x - tank_pos.x).abs() <= 0.4 + 1e-5);
    assert!((spawn.z - tank_pos.z).abs() <= 0.4 + 1e-5);
}

#[test]
fn test_drum_without_model_is_never_consumed() {
    let mut engine = SimulationEngine::new(manual_config(17));
    engine.queue_inputs([loaded(ModelKind::Tank), tap(Vec3::ZERO)]);
    engine.tick(FRAME);

    engine.place_spawn_point_at(Vec3::ZERO);
    engine.tick_fuel();
    let snap = engine.tick(FRAME);

    assert!(!snap.spawn_point.unwrap().collidable);
    assert_eq!(snap.fuel.level, 99);
    assert_eq!(
        count(&snap.events, |e| matches!(e, SimEvent::SpawnPointConsumed { .. })),
        0
    );
}

#[test]
fn test_consumption_refill_survives_timer() {
    let mut config = SimConfig {
        seed: 23,
        ..Default::default()
    };
    config.fuel.tick_interval_ms = 1;
    let mut engine = SimulationEngine::new(config);
    engine.queue_inputs([loaded(ModelKind::Tank), loaded(ModelKind::OilDrum), tap(Vec3::ZERO)]);
    engine.tick(FRAME);
    assert!(engine.fuel_timer_running());

    let mut consumed = 0;
    for _ in 0..100 {
        std::thread::sleep(Duration::from_millis(2));
        engine.place_spawn_point_at(Vec3::ZERO);
        let snap = engine.tick(FRAME);
        if snap
            .events
            .iter()
            .any(|e| matches!(e, SimEvent::SpawnPointConsumed { .. }))
        {
            consumed += 1;
            // The frame that refilled reports the refilled level.
            assert_eq!(snap.fuel.level, 100);
            assert!(snap.events.contains(&SimEvent::FuelReset { level: 100 }));
        }
        assert!(snap.fuel.level <= 100);
    }
    assert_eq!(consumed, 100);

    engine.queue_input(SceneInput::EndSession);
    engine.tick(FRAME);
    assert!(!engine.fuel_timer_running());
}

// ---- Fuel ----

#[test]
fn test_fuel_ticks_without_floor() {
    let (engine, _) = placed_engine(18, Vec3::ZERO);
    let n = 137;
    for _ in 0..n {
        engine.tick_fuel();
    }
    assert_eq!(engine.fuel_gauge().level(), 100 - n);
    assert_eq!(engine.fuel_gauge().display_level(), 0);
}

#[test]
fn test_fuel_inactive_before_placement() {
    let engine = SimulationEngine::new(manual_config(19));
    assert_eq!(engine.tick_fuel(), None);
    assert_eq!(engine.fuel_gauge().level(), 100);
}

#[test]
fn test_manual_schedule_has_no_timer() {
    let (engine, _) = placed_engine(20, Vec3::ZERO);
    assert!(!engine.fuel_timer_running());
    std::thread::sleep(Duration::from_millis(50));
    assert_eq!(engine.fuel_gauge().level(), 100);
}

#[test]
fn test_background_timer_starts_on_placement() {
    let mut config = SimConfig::default();
    config.fuel.tick_interval_ms = 5;
    let mut engine = SimulationEngine::new(config);
    engine.queue_input(loaded(ModelKind::Tank));
    engine.tick(FRAME);
    assert!(!engine.fuel_timer_running());

    engine.queue_input(tap(Vec3::ZERO));
    engine.tick(FRAME);
    assert!(engine.fuel_timer_running());

    std::thread::sleep(Duration::from_millis(150));
    assert!(engine.fuel_gauge().level() < 100);

    engine.queue_input(SceneInput::EndSession);
    engine.tick(FRAME);
    assert!(!engine.fuel_timer_running());
}

// ---- Session end ----

#[test]
fn test_end_session_clears_state() {
    let (mut engine, _) = placed_engine(21, Vec3::ZERO);
    engine.queue_input(SceneInput::EndSession);
    let snap = engine.tick(FRAME);

    assert_eq!(snap.phase, SessionPhase::Ended);
    assert!(snap.tank.is_none());
    assert!(snap.spawn_point.is_none());
    assert!(snap.events.contains(&SimEvent::SessionEnded));
    assert_eq!(engine.world().len(), 0);
    assert_eq!(engine.tick_fuel(), None);

    engine.queue_inputs([tap(Vec3::ZERO), press(Control::Forward, PressAction::Down)]);
    let snap = engine.tick(FRAME);
    assert_eq!(snap.phase, SessionPhase::Ended);
    assert!(snap.events.is_empty());
}

// ---- Determinism ----

fn scripted_session(seed: u64) -> Vec<String> {
    let (mut engine, first) = placed_engine(seed, Vec3::ZERO);
    let mut out = vec![serde_json::to_string(&first).unwrap()];

    let script = [
        (0, press(Control::Forward, PressAction::Down)),
        (60, press(Control::TurnLeft, PressAction::Down)),
        (90, press(Control::TurnLeft, PressAction::Up)),
        (200, press(Control::Forward, PressAction::Up)),
        (210, press(Control::TurnRight, PressAction::Down)),
    ];
    for frame in 0..400 {
        for (at, input) in &script {
            if *at == frame {
                engine.queue_input(input.clone());
            }
        }
        out.push(serde_json::to_string(&engine.tick(FRAME)).unwrap());
    }
    out
}

#[test]
fn test_determinism_same_seed() {
    assert_eq!(scripted_session(1234), scripted_session(1234));
}

#[test]
fn test_different_seeds_place_differently() {
    let (_, a) = placed_engine(111, Vec3::ZERO);
    let (_, b) = placed_engine(222, Vec3::ZERO);
    assert_ne!(
        a.spawn_point.unwrap().position,
        b.spawn_point.unwrap().position
    );
}
