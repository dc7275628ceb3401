//! Overlap detection between the moving tank and static drums.

use glam::{Mat3, Vec3};
use hecs::{Entity, World};

use oilrun_core::components::{OilDrum, Renderable};
use oilrun_core::types::Transform;

/// World-space axis-aligned box enclosing a node's oriented mesh bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBox {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl WorldBox {
    /// Enclose a box of `half_local` extents posed by `transform`.
    pub fn from_oriented(transform: &Transform, half_local: Vec3) -> Self {
        let m = Mat3::from_quat(transform.rotation);
        let half_extents = Vec3::new(
            m.row(0).abs().dot(half_local),
            m.row(1).abs().dot(half_local),
            m.row(2).abs().dot(half_local),
        );
        Self {
            center: transform.position,
            half_extents,
        }
    }

    /// True if the boxes overlap, touching faces included.
    pub fn intersects(&self, other: &WorldBox) -> bool {
        (self.center - other.center)
            .abs()
            .cmple(self.half_extents + other.half_extents)
            .all()
    }
}

/// Finds which drum, if any, the moving entity currently intersects.
pub struct OverlapDetector;

impl OverlapDetector {
    /// Collision box of a node. `None` if it has no renderable.
    pub fn collision_box(world: &World, entity: Entity) -> Option<WorldBox> {
        let mut query = world.query_one::<(&Transform, &Renderable)>(entity).ok()?;
        let (transform, renderable) = query.get()?;
        Some(WorldBox::from_oriented(
            transform,
            renderable.handle.half_extents.abs(),
        ))
    }

    /// First drum (lowest entity id) whose box intersects `moving`'s box.
    /// Drums without a renderable are not part of the query.
    pub fn test_overlap(world: &World, moving: Entity) -> Option<Entity> {
        let moving_box = Self::collision_box(world, moving)?;

        let mut query = world.query::<(&Transform, &Renderable, &OilDrum)>();
        query
            .iter()
            .filter(|(entity, _)| *entity != moving)
            .filter(|(_, (transform, renderable, _))| {
                WorldBox::from_oriented(transform, renderable.handle.half_extents.abs())
                    .intersects(&moving_box)
            })
            .map(|(entity, _)| entity)
            .min_by_key(|entity| entity.id())
    }
}
