//! Noise propagation: NPCs that hear a ray impact run for a flee point.

use glam::Vec2;
use hecs::World;
use log::debug;

use auber_core::components::{Npc, Position, Velocity};
use auber_core::events::SimEvent;
use auber_core::types::EntityId;
use auber_nav::fsm;
use auber_nav::Navigator;

/// Startle every NPC strictly within `hearing_radius` of `impact`, measured
/// to the NPC's position. Exposed infiltrators hold their ground. Returns the
/// number of NPCs sent fleeing.
pub fn propagate(
    world: &mut World,
    navigator: &dyn Navigator,
    impact: Vec2,
    hearing_radius: f32,
    events: &mut Vec<SimEvent>,
) -> usize {
    let mut listeners: Vec<(EntityId, hecs::Entity, Vec2)> = world
        .query::<(&EntityId, &Position, &Npc)>()
        .iter()
        .filter(|(_, (_, pos, npc))| {
            npc.has_flee_behavior() && navigator.distance(impact, pos.0) < hearing_radius
        })
        .map(|(entity, (id, pos, _))| (*id, entity, pos.0))
        .collect();
    listeners.sort_by_key(|(id, _, _)| *id);

    let mut startled = 0;
    for (id, entity, position) in listeners {
        let Some(destination) = navigator.nearest_flee_point(position) else {
            continue;
        };
        let Ok((npc, vel)) = world.query_one_mut::<(&mut Npc, &mut Velocity)>(entity) else {
            continue;
        };
        let update = fsm::startle(npc.phase, destination);
        npc.phase = update.new_phase;
        npc.destination = update.destination;
        vel.0 = update.new_velocity;

        events.push(SimEvent::NpcStartled {
            npc: id,
            destination,
        });
        startled += 1;
    }
    if startled > 0 {
        debug!("ray impact at {impact} startled {startled} npcs");
    }
    startled
}
