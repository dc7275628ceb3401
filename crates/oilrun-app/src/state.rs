//! State shared between the host thread and the render loop.

use std::sync::{Arc, Mutex};

use oilrun_core::commands::SceneInput;
use oilrun_core::state::SimulationSnapshot;

/// Commands sent to the render loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// A scene input to forward to the simulation engine.
    Input(SceneInput),
    /// End the session and stop the loop.
    Shutdown,
}

/// Latest snapshot, written by the render loop after every frame.
pub type SharedSnapshot = Arc<Mutex<Option<SimulationSnapshot>>>;

pub fn new_shared_snapshot() -> SharedSnapshot {
    Arc::new(Mutex::new(None))
}

/// Copy of the latest snapshot, if a frame has run.
pub fn latest(shared: &SharedSnapshot) -> Option<SimulationSnapshot> {
    shared.lock().ok().and_then(|lock| lock.clone())
}
