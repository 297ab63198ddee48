//! Teleporter ray collision query.
//!
//! Steps a probe along the line from `origin` through `target` and beyond it,
//! stopping at the first entity bounding box or occupied collision tile. The
//! probe is `origin.lerp(target, alpha)` with alpha starting at
//! [`RAY_ALPHA_START`] and growing by [`RAY_ALPHA_STEP`] while below
//! [`RAY_ALPHA_LIMIT`], so a cast never takes more than 200 steps even when
//! the ray escapes the map.

use glam::Vec2;
use hecs::{Entity, World};

use auber_core::constants::{RAY_ALPHA_LIMIT, RAY_ALPHA_START, RAY_ALPHA_STEP};
use auber_core::types::EntityId;
use auber_map::CollisionMap;

use crate::world_setup::{bounds_in_spawn_order, EntityBounds};

/// Outcome of a cast. A miss is a value, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayCast {
    /// Last probe: the impact point, or where the ray gave up.
    pub point: Vec2,
    pub entity: Option<RayHit>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub id: EntityId,
    pub entity: Entity,
}

impl RayCast {
    pub fn hit_id(&self) -> Option<EntityId> {
        self.entity.map(|h| h.id)
    }
}

/// Probes per cast: alpha values from the start below the limit.
fn probe_count() -> u32 {
    ((RAY_ALPHA_LIMIT - RAY_ALPHA_START) / RAY_ALPHA_STEP).round() as u32
}

/// Cast against every live entity in `world` except `caster`.
pub fn cast_ray(
    world: &World,
    map: &impl CollisionMap,
    origin: Vec2,
    target: Vec2,
    caster: Option<EntityId>,
) -> RayCast {
    let bounds = bounds_in_spawn_order(world);
    cast_ray_against(&bounds, map, origin, target, caster)
}

/// Cast against precomputed bounds, which must be in spawn order.
pub fn cast_ray_against(
    bounds: &[EntityBounds],
    map: &impl CollisionMap,
    origin: Vec2,
    target: Vec2,
    caster: Option<EntityId>,
) -> RayCast {
    if origin == target {
        return RayCast {
            point: origin,
            entity: None,
        };
    }

    let mut point = origin;
    for step in 0..probe_count() {
        point = origin.lerp(target, RAY_ALPHA_START + step as f32 * RAY_ALPHA_STEP);

        let hit = bounds
            .iter()
            .filter(|b| Some(b.id) != caster)
            .find(|b| b.rect.contains(point))
            .map(|b| RayHit {
                id: b.id,
                entity: b.entity,
            });
        if hit.is_some() {
            return RayCast { point, entity: hit };
        }
        if map.blocks(point) {
            break;
        }
    }

    RayCast {
        point,
        entity: None,
    }
}
