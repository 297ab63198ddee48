//! Projectile system: launch, flight and impact.
//!
//! Each tick a projectile moves by its velocity, then tests its bounding box
//! against every other live entity in spawn order, skipping the entity that
//! fired it. The first overlap ends its flight; if that entity is the player
//! the projectile's debuff and damage land. A projectile whose centre is over
//! an occupied tile, or outside the map, is removed as well.

use glam::Vec2;
use hecs::{Entity, World};
use log::debug;

use auber_core::components::{Debuffs, Hitbox, Player, Position, Projectile, Velocity};
use auber_core::constants::MAX_HEALTH;
use auber_core::enums::{DebuffKind, EntityKind};
use auber_core::events::SimEvent;
use auber_core::state::ScoreView;
use auber_core::types::EntityId;
use auber_map::{CollisionMap, TileGrid};

use crate::debuff::{self, EffectClock};
use crate::world_setup::{bounds_in_spawn_order, spawn_projectile};

/// Fire a projectile from `from` toward `target` at `speed` per tick.
pub fn launch(
    world: &mut World,
    from: Vec2,
    target: Vec2,
    speed: f32,
    action: DebuffKind,
    shooter: Option<EntityId>,
    next_id: &mut u32,
    events: &mut Vec<SimEvent>,
) -> EntityId {
    let velocity = (target - from).normalize_or_zero() * speed;
    let (_, id) = spawn_projectile(world, from, velocity, action, shooter, next_id);
    debug!("projectile {} ({action:?}) launched from {from}", id.0);
    events.push(SimEvent::ProjectileFired {
        projectile: id,
        shooter,
        action,
    });
    id
}

pub fn run(
    world: &mut World,
    map: &TileGrid,
    player: Entity,
    clock: &mut EffectClock<'_>,
    despawn_buffer: &mut Vec<Entity>,
    score: &mut ScoreView,
    events: &mut Vec<SimEvent>,
) {
    let mut bounds = bounds_in_spawn_order(world);
    let flying: Vec<usize> = bounds
        .iter()
        .enumerate()
        .filter(|(_, b)| b.kind == EntityKind::Projectile)
        .map(|(i, _)| i)
        .collect();
    let map_area = map.world_bounds();

    for index in flying {
        let entity = bounds[index].entity;
        let Ok((pos, vel, hitbox, projectile)) =
            world.query_one_mut::<(&mut Position, &Velocity, &Hitbox, &Projectile)>(entity)
        else {
            continue;
        };
        pos.0 += vel.0;
        let rect = hitbox.bounds(pos.0);
        let center = hitbox.center(pos.0);
        let projectile = *projectile;
        bounds[index].rect = rect;

        let own_id = bounds[index].id;
        let struck = bounds
            .iter()
            .filter(|b| b.id != own_id && Some(b.id) != projectile.origin)
            .find(|b| b.rect.overlaps(&rect))
            .map(|b| b.entity);

        if let Some(target) = struck {
            if target == player {
                hit_player(world, player, projectile.action, clock, score, events);
            }
            despawn_buffer.push(entity);
            continue;
        }

        if map.blocks(center) || !map_area.contains(center) {
            despawn_buffer.push(entity);
        }
    }
}

/// Apply a projectile's debuff and damage to the player.
pub fn hit_player(
    world: &mut World,
    player: Entity,
    action: DebuffKind,
    clock: &mut EffectClock<'_>,
    score: &mut ScoreView,
    events: &mut Vec<SimEvent>,
) {
    let Ok((state, debuffs)) = world.query_one_mut::<(&mut Player, &mut Debuffs)>(player) else {
        return;
    };
    debuff::apply_debuff(debuffs, player, action, clock, events);
    let damage = clock.tuning.projectile_damage * MAX_HEALTH;
    state.health = (state.health - damage).clamp(0.0, MAX_HEALTH);
    score.hits_taken += 1;

    debug!("player hit by {action:?}, health {:.2}", state.health);
    events.push(SimEvent::PlayerHit {
        action,
        health: state.health,
    });
}
