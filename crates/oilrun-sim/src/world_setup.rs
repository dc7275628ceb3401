//! Entity spawn factories for the scene world.
//!
//! Creates the anchor, tank and drum nodes with the component bundles the
//! systems expect.

use glam::Vec3;
use hecs::{Entity, EntityBuilder, World};

use oilrun_core::commands::PlaneRef;
use oilrun_core::components::{Anchor, OilDrum, Renderable, RenderableHandle, Tank};
use oilrun_core::enums::ModelKind;
use oilrun_core::types::Transform;

/// Scene-graph parent link. The child's `Transform` stays in world space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parent(pub Entity);

/// Spawn the anchor node at a plane-tap hit.
pub fn spawn_anchor(world: &mut World, hit_position: Vec3, plane: PlaneRef) -> Entity {
    world.spawn((Anchor { plane: plane.0 }, Transform::from_position(hit_position)))
}

/// Spawn the tank as a child of `anchor`, at the anchor's pose.
pub fn spawn_tank(world: &mut World, anchor: Entity, renderable: RenderableHandle) -> Entity {
    let pose = world_transform(world, anchor).unwrap_or_default();
    world.spawn((
        Tank,
        pose,
        Parent(anchor),
        Renderable {
            model: ModelKind::Tank,
            handle: renderable,
        },
    ))
}

/// Spawn a drum at `position`. A drum spawned before its model resolved
/// gets no renderable and stays invisible to overlap tests.
pub fn spawn_drum(
    world: &mut World,
    position: Vec3,
    renderable: Option<RenderableHandle>,
) -> Entity {
    let mut builder = EntityBuilder::new();
    builder.add(OilDrum).add(Transform::from_position(position));
    if let Some(handle) = renderable {
        builder.add(Renderable {
            model: ModelKind::OilDrum,
            handle,
        });
    }
    world.spawn(builder.build())
}

pub fn world_transform(world: &World, entity: Entity) -> Option<Transform> {
    world.get::<&Transform>(entity).ok().map(|t| *t)
}

/// Position relative to the parent node, or the world position for roots.
pub fn local_position(world: &World, entity: Entity) -> Option<Vec3> {
    let transform = world_transform(world, entity)?;
    let parent = world.get::<&Parent>(entity).ok().map(|p| p.0);
    match parent.and_then(|p| world_transform(world, p)) {
        Some(parent_pose) => Some(parent_pose.world_to_local_point(transform.position)),
        None => Some(transform.position),
    }
}
