//! Scripted demo session: a tap on the floor plane, then a sequence of
//! button holds replayed against the render loop in wall-clock time.

use std::time::{Duration, Instant};

use glam::Vec3;

use oilrun_core::commands::{PlaneRef, SceneInput};
use oilrun_core::config::AppConfig;
use oilrun_core::enums::{Control, PressAction};
use oilrun_core::state::SimulationSnapshot;

use crate::assets::spawn_asset_loader;
use crate::error::SessionError;
use crate::game_loop::spawn_render_loop;
use crate::state::{latest, new_shared_snapshot, LoopCommand};

/// One scripted input, sent `at` after the session starts.
#[derive(Debug, Clone)]
pub struct DemoStep {
    pub at: Duration,
    pub input: SceneInput,
}

/// Where the scripted tap hits the detected floor plane.
const TAP_POSITION: Vec3 = Vec3::new(0.0, -0.5, -1.0);

fn press(control: Control, action: PressAction) -> SceneInput {
    SceneInput::Control { control, action }
}

/// Build the demo script. The tap lands shortly after the models load;
/// steps past `duration` are dropped.
pub fn demo_script(asset_load_delay: Duration, duration: Duration) -> Vec<DemoStep> {
    let base = asset_load_delay + Duration::from_millis(200);
    let at = |ms: u64| base + Duration::from_millis(ms);

    let step = |ms: u64, input: SceneInput| DemoStep { at: at(ms), input };

    let steps = vec![
        step(
            0,
            SceneInput::PlaneTap {
                hit_position: TAP_POSITION,
                plane: PlaneRef(1),
            },
        ),
        step(200, press(Control::Forward, PressAction::Down)),
        step(2200, press(Control::TurnLeft, PressAction::Down)),
        step(3200, press(Control::TurnLeft, PressAction::Up)),
        step(5200, press(Control::Forward, PressAction::Up)),
        step(5800, press(Control::TurnRight, PressAction::Down)),
        step(7800, press(Control::TurnRight, PressAction::Cancel)),
        step(8000, press(Control::Forward, PressAction::Down)),
    ];

    steps.into_iter().filter(|s| s.at < duration).collect()
}

/// Run the scripted session to completion and return the final snapshot.
pub fn run_demo(config: &AppConfig) -> Result<Option<SimulationSnapshot>, SessionError> {
    let duration = Duration::from_millis(config.app.demo_duration_ms);
    let load_delay = Duration::from_millis(config.app.asset_load_delay_ms);
    let script = demo_script(load_delay, duration);
    tracing::info!(steps = script.len(), ?duration, "starting demo session");

    let shared = new_shared_snapshot();
    let (tx, render_loop) = spawn_render_loop(config, shared.clone())?;
    let loader = spawn_asset_loader(&config.assets, load_delay, tx.clone())?;

    let start = Instant::now();
    for step in script {
        sleep_until(start + step.at);
        tracing::debug!(input = ?step.input, "demo input");
        if tx.send(LoopCommand::Input(step.input)).is_err() {
            tracing::warn!("render loop stopped early");
            break;
        }
    }
    sleep_until(start + duration);

    if let Some(snapshot) = latest(&shared) {
        tracing::info!(
            fuel = snapshot.fuel.level,
            frames = snapshot.time.frame,
            "demo finished, ending session"
        );
    }
    let _ = tx.send(LoopCommand::Shutdown);
    if render_loop.join().is_err() {
        tracing::error!("render loop thread panicked");
    }
    if loader.join().is_err() {
        tracing::error!("asset loader thread panicked");
    }

    Ok(latest(&shared))
}

fn sleep_until(deadline: Instant) {
    let now = Instant::now();
    if deadline > now {
        std::thread::sleep(deadline - now);
    }
}
