//! Hostile fire: exposed infiltrators shoot at the player.
//!
//! An exposed infiltrator that is not stunned fires a projectile with a
//! random debuff at the player's centre whenever the player is within range
//! and its cooldown has run out. A hidden player is not fired upon, though
//! cooldowns keep running.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;

use auber_core::components::{Hitbox, Movement, Npc, Player, Position};
use auber_core::config::Tuning;
use auber_core::enums::DebuffKind;
use auber_core::events::SimEvent;
use auber_core::types::EntityId;

use crate::systems::projectile;

pub fn run<R: Rng>(
    world: &mut World,
    player: Entity,
    rng: &mut R,
    tuning: &Tuning,
    next_id: &mut u32,
    events: &mut Vec<SimEvent>,
) {
    let (target, visible) = match world.query_one_mut::<(&Position, &Hitbox, &Player)>(player) {
        Ok((pos, hitbox, state)) => (hitbox.center(pos.0), state.visible),
        Err(_) => return,
    };

    let mut shooters: Vec<(EntityId, Vec2)> = Vec::new();
    for (_entity, (id, pos, hitbox, movement, npc)) in
        world.query_mut::<(&EntityId, &Position, &Hitbox, &Movement, &mut Npc)>()
    {
        npc.fire_cooldown = npc.fire_cooldown.saturating_sub(1);
        if !visible || !npc.is_exposed() || movement.is_frozen() || npc.fire_cooldown > 0 {
            continue;
        }
        let center = hitbox.center(pos.0);
        if center.distance(target) <= tuning.hostile_fire_range {
            npc.fire_cooldown = tuning.hostile_fire_cooldown_ticks;
            shooters.push((*id, center));
        }
    }
    // Spawn order keeps the RNG draws reproducible.
    shooters.sort_by_key(|(id, _)| *id);

    for (id, center) in shooters {
        let action = DebuffKind::random(rng);
        projectile::launch(
            world,
            center,
            target,
            tuning.projectile_speed,
            action,
            Some(id),
            next_id,
            events,
        );
    }
}
