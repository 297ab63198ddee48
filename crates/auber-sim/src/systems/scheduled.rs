//! Applies timer actions that have come due.

use hecs::World;
use log::trace;

use auber_core::config::Tuning;
use auber_core::events::SimEvent;

use crate::debuff;
use crate::systems::teleporter;
use crate::timers::{TimerAction, TimerQueue};

/// Drain and apply every action due at tick `now`.
pub fn run(
    world: &mut World,
    timers: &mut TimerQueue,
    now: u64,
    tuning: &Tuning,
    events: &mut Vec<SimEvent>,
) {
    let due = timers.drain_due(now);
    if due.is_empty() {
        return;
    }
    trace!("tick {now}: {} timer actions due, {} pending", due.len(), timers.len());

    for action in due {
        match action {
            TimerAction::ExpireDebuff {
                player,
                kind,
                generation,
            } => {
                debuff::expire_debuff(world, player, kind, generation, tuning, events);
            }
            TimerAction::ClearRay { player, shot } => {
                teleporter::clear_ray(world, player, shot, events);
            }
            TimerAction::RestoreSpeed { npc } => {
                debuff::restore_speed(world, npc, events);
            }
        }
    }
}
