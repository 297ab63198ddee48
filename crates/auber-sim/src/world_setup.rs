//! Entity spawn factories for setting up the station.
//!
//! Every entity gets an [`EntityId`] in spawn order together with its
//! [`EntityKind`] tag, a position, velocity, rotation and bounding box. The
//! variant components (`Player`, `Npc`, `Projectile`) carry the rest.

use glam::Vec2;
use hecs::{Entity, World};
use log::debug;

use auber_core::components::*;
use auber_core::constants::*;
use auber_core::enums::{DebuffKind, EntityKind, NpcKind};
use auber_core::types::{EntityId, Rect};
use auber_map::StationLayout;

/// Allocate the next id. Ids are never reused.
pub fn next_entity_id(next_id: &mut u32) -> EntityId {
    let id = EntityId(*next_id);
    *next_id += 1;
    id
}

/// Populate an empty world from a station layout. Returns the player entity.
pub fn setup_station(world: &mut World, layout: &StationLayout, next_id: &mut u32) -> Entity {
    let player = spawn_player(world, layout.player_spawn, next_id);
    for &(kind, position) in &layout.npcs {
        spawn_npc(world, kind, position, next_id);
    }
    debug!(
        "station populated: {} npcs, {} flee points",
        layout.npcs.len(),
        layout.flee_points.len()
    );
    player
}

/// Spawn the security officer.
pub fn spawn_player(world: &mut World, position: Vec2, next_id: &mut u32) -> Entity {
    world.spawn((
        next_entity_id(next_id),
        EntityKind::Player,
        Position(position),
        Velocity::default(),
        Rotation::default(),
        Hitbox {
            size: Vec2::from(PLAYER_SIZE),
        },
        Movement {
            speed: PLAYER_SPEED,
            max_speed: PLAYER_MAX_SPEED,
        },
        Player::default(),
        Debuffs::default(),
    ))
}

/// Spawn a civilian or infiltrator at its designed speed.
pub fn spawn_npc(world: &mut World, kind: NpcKind, position: Vec2, next_id: &mut u32) -> Entity {
    world.spawn((
        next_entity_id(next_id),
        EntityKind::Npc(kind),
        Position(position),
        Velocity::default(),
        Rotation::default(),
        Hitbox {
            size: Vec2::from(NPC_SIZE),
        },
        Movement::npc_baseline(),
        Npc::new(kind),
    ))
}

/// Spawn a projectile centred on `center`, flying at `velocity` per tick.
pub fn spawn_projectile(
    world: &mut World,
    center: Vec2,
    velocity: Vec2,
    action: DebuffKind,
    origin: Option<EntityId>,
    next_id: &mut u32,
) -> (Entity, EntityId) {
    let size = Vec2::from(PROJECTILE_SIZE);
    let id = next_entity_id(next_id);
    let rotation = velocity.y.atan2(velocity.x).to_degrees();
    let entity = world.spawn((
        id,
        EntityKind::Projectile,
        Position(center - size * 0.5),
        Velocity(velocity),
        Rotation(rotation),
        Hitbox { size },
        Projectile { action, origin },
    ));
    (entity, id)
}

/// Look up a live entity by id.
pub fn find_entity(world: &World, id: EntityId) -> Option<Entity> {
    world
        .query::<&EntityId>()
        .iter()
        .find(|(_, eid)| **eid == id)
        .map(|(entity, _)| entity)
}

/// A live entity's bounding box, tagged with its id and kind.
#[derive(Debug, Clone, Copy)]
pub struct EntityBounds {
    pub id: EntityId,
    pub entity: Entity,
    pub kind: EntityKind,
    pub rect: Rect,
}

/// Bounding boxes of every live entity in insertion (spawn) order.
pub fn bounds_in_spawn_order(world: &World) -> Vec<EntityBounds> {
    let mut bounds: Vec<EntityBounds> = world
        .query::<(&EntityId, &EntityKind, &Position, &Hitbox)>()
        .iter()
        .map(|(entity, (id, kind, pos, hitbox))| EntityBounds {
            id: *id,
            entity,
            kind: *kind,
            rect: hitbox.bounds(pos.0),
        })
        .collect();
    bounds.sort_by_key(|b| b.id);
    bounds
}
