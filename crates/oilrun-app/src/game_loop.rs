//! Render loop thread: runs the simulation engine at the configured frame
//! rate and publishes snapshots.
//!
//! The engine is created inside the thread. Inputs arrive via an `mpsc`
//! channel; the latest snapshot is kept in shared state for polling.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use oilrun_core::config::AppConfig;
use oilrun_core::commands::SceneInput;
use oilrun_core::state::SimulationSnapshot;
use oilrun_sim::engine::SimulationEngine;

use crate::error::SessionError;
use crate::state::{LoopCommand, SharedSnapshot};

/// Duration of one render frame at `frame_rate` Hz.
pub fn frame_duration(frame_rate: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(frame_rate.max(1)))
}

/// Spawns the render loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_render_loop(
    config: &AppConfig,
    latest_snapshot: SharedSnapshot,
) -> Result<(mpsc::Sender<LoopCommand>, JoinHandle<()>), SessionError> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();
    let sim_config = config.sim.clone();
    let frame = frame_duration(config.app.frame_rate);

    let handle = std::thread::Builder::new()
        .name("oilrun-render-loop".into())
        .spawn(move || {
            let engine = SimulationEngine::new(sim_config);
            run_render_loop(engine, frame, cmd_rx, &latest_snapshot);
        })
        .map_err(|source| SessionError::LoopSpawn {
            name: "render loop",
            source,
        })?;

    Ok((cmd_tx, handle))
}

/// The render loop. Runs until Shutdown or channel disconnect, then ends
/// the session and publishes one final snapshot.
fn run_render_loop(
    mut engine: SimulationEngine,
    frame: Duration,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    latest_snapshot: &SharedSnapshot,
) {
    tracing::info!(frame_ms = frame.as_secs_f64() * 1000.0, "render loop started");
    let mut next_frame_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        let mut shutdown = false;
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::Input(input)) => engine.queue_input(input),
                Ok(LoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    shutdown = true;
                    break;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        if shutdown {
            engine.queue_input(SceneInput::EndSession);
            publish(latest_snapshot, engine.tick(Duration::ZERO));
            tracing::info!(frames = engine.time().frame, "render loop stopped");
            return;
        }

        // 2. Advance one frame
        let snapshot = engine.tick(frame);
        for event in &snapshot.events {
            tracing::trace!(?event, "sim event");
        }

        // 3. Store latest snapshot for polling
        publish(latest_snapshot, snapshot);

        // 4. Sleep until the next frame
        next_frame_time += frame;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > frame * 2 {
            // Too far behind; reset to avoid a catch-up spiral
            tracing::trace!("render loop behind schedule, resetting");
            next_frame_time = now;
        }
    }
}

fn publish(latest_snapshot: &SharedSnapshot, snapshot: SimulationSnapshot) {
    if let Ok(mut lock) = latest_snapshot.lock() {
        *lock = Some(snapshot);
    }
}
