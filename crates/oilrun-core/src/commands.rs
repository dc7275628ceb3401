//! External inputs delivered to the simulation.
//!
//! Inputs are queued and applied at the next frame boundary.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::components::RenderableHandle;
use crate::enums::{Control, ModelKind, PressAction};

/// Reference to a detected plane, as supplied by the AR engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaneRef(pub u64);

/// Everything the renderer, asset loader and UI can tell the simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SceneInput {
    /// The asset loader finished resolving a model.
    RenderableLoaded {
        model: ModelKind,
        renderable: RenderableHandle,
    },
    /// The user tapped a detected plane.
    PlaneTap { hit_position: Vec3, plane: PlaneRef },
    /// Press, release or cancel on an on-screen control.
    Control {
        control: Control,
        action: PressAction,
    },
    /// The host is going away; drop all session state.
    EndSession,
}
