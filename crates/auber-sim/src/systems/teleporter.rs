//! Teleporter ray: charge, fire, impact and expiry.
//!
//! The weapon charges while the trigger is held and no ray is visible.
//! Releasing it at or above the fire threshold fires: the ray is cast from
//! the player's centre toward the aim point, its impact point becomes the
//! visible ray endpoint, the impact makes noise, and the ray is hidden again
//! after the ray time. Releasing below the threshold bleeds the charge away.

use glam::Vec2;
use hecs::{Entity, World};
use log::{debug, info};

use auber_core::commands::PlayerInput;
use auber_core::components::{Hitbox, Npc, Player, Position};
use auber_core::events::SimEvent;
use auber_core::state::ScoreView;
use auber_core::types::EntityId;
use auber_map::CollisionMap;
use auber_nav::Navigator;

use crate::debuff::{self, EffectClock};
use crate::raycast::{cast_ray, RayCast, RayHit};
use crate::systems::noise;
use crate::timers::TimerAction;

/// Everything a shot can touch besides the world.
pub struct ShotContext<'a, M: CollisionMap> {
    pub map: &'a M,
    pub navigator: &'a dyn Navigator,
    pub despawn_buffer: &'a mut Vec<Entity>,
    pub score: &'a mut ScoreView,
}

/// Advance the weapon by one tick. Returns the cast if the ray fired.
pub fn run<M: CollisionMap>(
    world: &mut World,
    player: Entity,
    input: &PlayerInput,
    shot: &mut ShotContext<'_, M>,
    clock: &mut EffectClock<'_>,
    events: &mut Vec<SimEvent>,
) -> Option<RayCast> {
    let should_fire = {
        let Ok(mut state) = world.get::<&mut Player>(player) else {
            return None;
        };
        let rate = clock.tuning.charge_rate;
        if input.fire && state.ray_endpoint.is_none() {
            state.charge = (state.charge + rate).min(1.0);
            false
        } else if state.charge >= clock.tuning.fire_threshold {
            true
        } else {
            state.charge = (state.charge - rate).max(0.0);
            false
        }
    };

    if should_fire {
        fire(world, player, input.aim, shot, clock, events)
    } else {
        None
    }
}

/// Discharge the weapon toward `aim`.
pub fn fire<M: CollisionMap>(
    world: &mut World,
    player: Entity,
    aim: Vec2,
    shot: &mut ShotContext<'_, M>,
    clock: &mut EffectClock<'_>,
    events: &mut Vec<SimEvent>,
) -> Option<RayCast> {
    let (player_id, origin) = {
        let Ok((id, pos, hitbox)) =
            world.query_one_mut::<(&EntityId, &Position, &Hitbox)>(player)
        else {
            return None;
        };
        (*id, hitbox.center(pos.0))
    };

    let cast = cast_ray(world, shot.map, origin, aim, Some(player_id));

    let (shot_number, stun_armed) = {
        let Ok(mut state) = world.get::<&mut Player>(player) else {
            return None;
        };
        state.charge = 0.0;
        state.ray_endpoint = Some(cast.point);
        state.ray_shot = state.ray_shot.wrapping_add(1);
        (state.ray_shot, state.stun_shot)
    };
    debug!(
        "ray fired from {origin} toward {aim}: impact {} ({:?})",
        cast.point,
        cast.hit_id()
    );
    events.push(SimEvent::RayFired {
        from: origin,
        to: cast.point,
        hit: cast.hit_id(),
    });

    if let Some(hit) = cast.entity {
        let stunned = handle_hit(world, hit, stun_armed, shot, clock, events);
        if stunned {
            if let Ok(mut state) = world.get::<&mut Player>(player) {
                state.stun_shot = false;
            }
        }
    }

    noise::propagate(
        world,
        shot.navigator,
        cast.point,
        clock.tuning.hearing_radius,
        events,
    );

    clock.timers.schedule(
        clock.now,
        clock.tuning.ray_time_ms,
        TimerAction::ClearRay {
            player,
            shot: shot_number,
        },
    );
    Some(cast)
}

/// Resolve a direct hit. Returns whether an armed stun shot was spent.
///
/// A hidden infiltrator is exposed; an exposed one is captured and queued
/// for removal. A capture leaves the stun shot armed. Civilians and
/// projectiles only absorb the ray.
fn handle_hit<M: CollisionMap>(
    world: &mut World,
    hit: RayHit,
    stun_armed: bool,
    shot: &mut ShotContext<'_, M>,
    clock: &mut EffectClock<'_>,
    events: &mut Vec<SimEvent>,
) -> bool {
    {
        let Ok(mut npc) = world.get::<&mut Npc>(hit.entity) else {
            return false;
        };
        if !npc.is_infiltrator() {
            return false;
        }
        if npc.exposed {
            shot.despawn_buffer.push(hit.entity);
            shot.score.infiltrators_captured += 1;
            info!(
                "infiltrator {} captured ({}/{})",
                hit.id.0, shot.score.infiltrators_captured, shot.score.infiltrators_total
            );
            events.push(SimEvent::InfiltratorCaptured { npc: hit.id });
            return false;
        }
        npc.exposed = true;
        debug!("infiltrator {} exposed", hit.id.0);
        events.push(SimEvent::InfiltratorExposed { npc: hit.id });
    }

    stun_armed && debuff::apply_stun(world, hit.entity, clock, events)
}

/// Timer callback for [`TimerAction::ClearRay`]. A newer shot, or a ray
/// already cleared by a respawn, is left alone.
pub fn clear_ray(world: &mut World, player: Entity, shot: u32, events: &mut Vec<SimEvent>) {
    let Ok(mut state) = world.get::<&mut Player>(player) else {
        return;
    };
    if state.ray_shot != shot || state.ray_endpoint.is_none() {
        return;
    }
    state.ray_endpoint = None;
    events.push(SimEvent::RayExpired);
}
