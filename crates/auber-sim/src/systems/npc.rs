//! NPC system: runs the flee FSM from auber-nav for every NPC.

use hecs::World;
use log::trace;

use auber_core::components::{Hitbox, Movement, Npc, Position, Velocity};
use auber_core::types::EntityId;

use auber_nav::fsm::{evaluate, NpcContext};

pub fn run(world: &mut World) {
    for (_entity, (id, pos, vel, hitbox, movement, npc)) in world.query_mut::<(
        &EntityId,
        &Position,
        &mut Velocity,
        &Hitbox,
        &Movement,
        &mut Npc,
    )>() {
        let ctx = NpcContext {
            phase: npc.phase,
            center: hitbox.center(pos.0),
            velocity: vel.0,
            movement: *movement,
            destination: npc.destination,
        };

        let update = evaluate(&ctx);
        if update.phase_changed {
            trace!("npc {} {:?} -> {:?}", id.0, npc.phase, update.new_phase);
        }
        npc.phase = update.new_phase;
        npc.destination = update.destination;
        vel.0 = update.new_velocity;
    }
}
