//! Simulation engine: the frame loop of a session.
//!
//! `SimulationEngine` owns the scene world, applies inputs, drives the
//! animator, consumes drums and produces `SimulationSnapshot`s. It is
//! headless and, with a manual fuel schedule, fully deterministic.

use std::collections::VecDeque;
use std::time::Duration;

use glam::Vec3;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use oilrun_core::commands::{PlaneRef, SceneInput};
use oilrun_core::components::RenderableHandle;
use oilrun_core::enums::{Control, FuelSchedule, ModelKind, MoveCommand, PressAction, SessionPhase};
use oilrun_core::events::SimEvent;
use oilrun_core::state::SimulationSnapshot;
use oilrun_core::types::SimTime;

pub use oilrun_core::config::SimConfig;

use crate::fuel::{FuelGauge, FuelTimer, SharedFuelGauge};
use crate::interpolation::Animator;
use crate::motion::MotionController;
use crate::spawn::SpawnPlacer;
use crate::systems;
use crate::world_setup;

/// The active collectible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub entity: Entity,
    pub position: Vec3,
}

/// Per-session entities. Exists from the first successful placement until
/// the session ends.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub anchor: Entity,
    pub tank: Entity,
    pub spawn_point: Option<SpawnPoint>,
}

/// The simulation engine. Owns the scene world and all session state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: SessionPhase,
    config: SimConfig,
    rng: ChaCha8Rng,
    motion: MotionController,
    placer: SpawnPlacer,
    animator: Animator,
    fuel: SharedFuelGauge,
    fuel_timer: Option<FuelTimer>,
    state: Option<SimulationState>,
    tank_renderable: Option<RenderableHandle>,
    drum_renderable: Option<RenderableHandle>,
    input_queue: VecDeque<SceneInput>,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: SessionPhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            motion: MotionController::new(config.motion.clone()),
            placer: SpawnPlacer::new(&config.spawn),
            animator: Animator::new(),
            fuel: SharedFuelGauge::new(config.fuel.full_level),
            fuel_timer: None,
            state: None,
            tank_renderable: None,
            drum_renderable: None,
            input_queue: VecDeque::new(),
            events: Vec::new(),
            config,
        }
    }

    /// Queue an input for processing at the next frame boundary.
    pub fn queue_input(&mut self, input: SceneInput) {
        self.input_queue.push_back(input);
    }

    pub fn queue_inputs(&mut self, inputs: impl IntoIterator<Item = SceneInput>) {
        self.input_queue.extend(inputs);
    }

    /// Run one render frame of length `delta` and return the resulting snapshot.
    pub fn tick(&mut self, delta: Duration) -> SimulationSnapshot {
        self.process_inputs();

        let mut refilled = None;
        if self.phase == SessionPhase::Active {
            refilled = self.run_systems(delta);
            self.time.advance(delta);
        }

        let gauge = refilled.unwrap_or_else(|| *self.fuel.lock());
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.state.as_ref(),
            gauge,
            &self.animator,
            events,
        )
    }

    /// Burn one unit of fuel. `None` while the gauge is inactive (before
    /// placement or after the session ended).
    pub fn tick_fuel(&self) -> Option<i32> {
        self.state.as_ref().map(|_| self.fuel.tick())
    }

    /// Handle to the shared gauge, for readers on other threads.
    pub fn fuel_gauge(&self) -> SharedFuelGauge {
        self.fuel.clone()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn state(&self) -> Option<&SimulationState> {
        self.state.as_ref()
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn fuel_timer_running(&self) -> bool {
        self.fuel_timer.as_ref().is_some_and(FuelTimer::is_running)
    }

    /// Move the active drum to `position` (for tests that need a hit).
    #[cfg(test)]
    pub fn place_spawn_point_at(&mut self, position: Vec3) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if let Some(old) = state.spawn_point.take() {
            let _ = self.world.despawn(old.entity);
        }
        let entity = world_setup::spawn_drum(&mut self.world, position, self.drum_renderable);
        state.spawn_point = Some(SpawnPoint { entity, position });
    }

    /// Process all queued inputs.
    fn process_inputs(&mut self) {
        while let Some(input) = self.input_queue.pop_front() {
            self.handle_input(input);
        }
    }

    /// Handle a single input.
    fn handle_input(&mut self, input: SceneInput) {
        match input {
            SceneInput::RenderableLoaded { model, renderable } => {
                tracing::debug!(?model, id = renderable.id, "renderable loaded");
                match model {
                    ModelKind::Tank => self.tank_renderable = Some(renderable),
                    ModelKind::OilDrum => self.drum_renderable = Some(renderable),
                }
            }
            SceneInput::PlaneTap {
                hit_position,
                plane,
            } => self.place_tank(hit_position, plane),
            SceneInput::Control { control, action } => self.handle_control(control, action),
            SceneInput::EndSession => self.end_session(),
        }
    }

    /// First tap with a loaded tank model places the tank, the first drum
    /// and starts the fuel gauge. Every other tap is ignored.
    fn place_tank(&mut self, hit_position: Vec3, plane: PlaneRef) {
        if self.phase != SessionPhase::AwaitingPlacement {
            tracing::trace!(phase = ?self.phase, "plane tap ignored");
            return;
        }
        let Some(tank_renderable) = self.tank_renderable else {
            tracing::debug!("plane tap before tank model loaded, ignoring");
            return;
        };

        let anchor = world_setup::spawn_anchor(&mut self.world, hit_position, plane);
        let tank = world_setup::spawn_tank(&mut self.world, anchor, tank_renderable);
        let tank_position = world_setup::world_transform(&self.world, tank)
            .map(|t| t.position)
            .unwrap_or(hit_position);

        let drum_position = self.placer.place(tank_position, &mut self.rng);
        let drum = world_setup::spawn_drum(&mut self.world, drum_position, self.drum_renderable);
        if self.drum_renderable.is_none() {
            tracing::debug!("oil drum placed before its model loaded; it cannot be collected");
        }

        self.state = Some(SimulationState {
            anchor,
            tank,
            spawn_point: Some(SpawnPoint {
                entity: drum,
                position: drum_position,
            }),
        });
        let level = self.fuel.reset();
        self.phase = SessionPhase::Active;

        tracing::info!(?tank_position, ?drum_position, plane = plane.0, "tank placed");
        self.events.push(SimEvent::TankPlaced {
            position: tank_position,
        });
        self.events.push(SimEvent::SpawnPointPlaced {
            entity: drum.to_bits().get(),
            position: drum_position,
        });
        self.events.push(SimEvent::FuelReset { level });

        self.start_fuel_timer();
    }

    fn start_fuel_timer(&mut self) {
        if self.config.fuel.schedule != FuelSchedule::Background {
            return;
        }
        let period = Duration::from_millis(self.config.fuel.tick_interval_ms);
        match FuelTimer::start(self.fuel.clone(), period) {
            Ok(timer) => self.fuel_timer = Some(timer),
            Err(e) => tracing::warn!("fuel timer not started: {e}"),
        }
    }

    fn handle_control(&mut self, control: Control, action: PressAction) {
        let command = MoveCommand::from_press(control, action);
        tracing::debug!(?control, ?action, ?command, "control input");

        if self.phase != SessionPhase::Active {
            return;
        }
        let Some(tank) = self.state.as_ref().map(|s| s.tank) else {
            return;
        };
        self.apply_move_command(tank, command);
    }

    /// Start or cancel the interpolation a command asks for.
    fn apply_move_command(&mut self, tank: Entity, command: MoveCommand) {
        let Some(current) = world_setup::world_transform(&self.world, tank) else {
            return;
        };

        match command {
            MoveCommand::Forward => {
                let interval = self.motion.move_forward(&current);
                if self.animator.start_move(tank, interval) {
                    self.events.push(SimEvent::MotionCancelled {
                        channel: command.channel(),
                    });
                }
                self.events.push(SimEvent::MotionStarted {
                    channel: command.channel(),
                    target_position: Some(interval.end),
                    target_rotation: None,
                });
            }
            MoveCommand::TurnLeft | MoveCommand::TurnRight => {
                let Some(degrees) = command.turn_degrees(self.motion.config().turn_degrees) else {
                    return;
                };
                let interval = self.motion.turn(&current, degrees);
                if self.animator.start_turn(tank, interval) {
                    self.events.push(SimEvent::MotionCancelled {
                        channel: command.channel(),
                    });
                }
                self.events.push(SimEvent::MotionStarted {
                    channel: command.channel(),
                    target_position: None,
                    target_rotation: Some(interval.end),
                });
            }
            MoveCommand::Stop(channel) => {
                if self.animator.cancel(tank, channel) {
                    self.events.push(SimEvent::MotionCancelled { channel });
                }
            }
        }
    }

    /// Drop the session state, stop the fuel timer and refuse further input.
    fn end_session(&mut self) {
        if self.phase == SessionPhase::Ended {
            return;
        }
        if let Some(mut timer) = self.fuel_timer.take() {
            timer.stop();
        }
        self.animator.clear();
        self.world.clear();
        self.state = None;
        self.phase = SessionPhase::Ended;

        tracing::info!(frames = self.time.frame, "session ended");
        self.events.push(SimEvent::SessionEnded);
    }

    /// Run all frame systems in order. Returns the refilled gauge if a
    /// drum was consumed this frame.
    fn run_systems(&mut self, delta: Duration) -> Option<FuelGauge> {
        // 1. Interpolation driver writes transforms
        systems::animation::run(&mut self.world, &mut self.animator, delta, &mut self.events);
        // 2. Overlap test + atomic consumption
        let state = self.state.as_mut()?;
        systems::consumption::run(
            &mut self.world,
            state,
            &self.placer,
            &mut self.rng,
            &self.fuel,
            self.drum_renderable,
            &mut self.events,
        )
    }
}
