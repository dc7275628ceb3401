//! Scene-graph components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in the
//! simulation crate's systems, not here.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::ModelKind;

/// Handle to a resolved renderable plus the collision box of its mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderableHandle {
    /// Loader-assigned id.
    pub id: u32,
    /// Half-extents of the mesh bounds in model space.
    pub half_extents: Vec3,
}

/// Attached renderable. A node without one has no collision shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Renderable {
    pub model: ModelKind,
    pub handle: RenderableHandle,
}

/// Marks the node created at a plane-tap hit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Anchor {
    /// Plane the hit landed on.
    pub plane: u64,
}

/// Marks the player-driven tank.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tank;

/// Marks a collectible oil drum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OilDrum;
