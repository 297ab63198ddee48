//! Debuff and stun controller.
//!
//! Applying an effect is synchronous; its expiry is a scheduled
//! [`TimerAction`]. Debuff expiries carry the generation current when they
//! were scheduled, so a re-application or a respawn turns older expiries
//! into no-ops instead of letting them cut the newer effect short.

use glam::Vec2;
use hecs::{Entity, World};
use log::{debug, trace};

use auber_core::components::{Debuffs, Movement, Npc, Velocity};
use auber_core::config::Tuning;
use auber_core::enums::DebuffKind;
use auber_core::events::SimEvent;
use auber_core::types::EntityId;

use crate::timers::{TimerAction, TimerQueue};

/// Shared inputs for scheduling an effect's expiry.
pub struct EffectClock<'a> {
    pub now: u64,
    pub tuning: &'a Tuning,
    pub timers: &'a mut TimerQueue,
}

/// Set `kind` on the player now and schedule its expiry.
pub fn apply_debuff(
    debuffs: &mut Debuffs,
    player: Entity,
    kind: DebuffKind,
    clock: &mut EffectClock<'_>,
    events: &mut Vec<SimEvent>,
) {
    debuffs.set(kind, true);
    let generation = debuffs.bump(kind);
    let duration = clock.tuning.debuff_duration_ms(kind);
    let due = clock.timers.schedule(
        clock.now,
        duration,
        TimerAction::ExpireDebuff {
            player,
            kind,
            generation,
        },
    );
    debug!("debuff {kind:?} applied for {duration} ms (generation {generation}, due tick {due})");
    events.push(SimEvent::DebuffApplied { kind });
}

/// Clear every debuff and invalidate their pending expiries.
pub fn clear_debuffs(debuffs: &mut Debuffs) {
    for kind in DebuffKind::ALL {
        debuffs.set(kind, false);
        debuffs.bump(kind);
    }
}

/// Timer callback for [`TimerAction::ExpireDebuff`]. Returns whether a flag
/// was cleared.
pub fn expire_debuff(
    world: &mut World,
    player: Entity,
    kind: DebuffKind,
    generation: u32,
    tuning: &Tuning,
    events: &mut Vec<SimEvent>,
) -> bool {
    let Ok(mut debuffs) = world.get::<&mut Debuffs>(player) else {
        trace!("debuff expiry for despawned player ignored");
        return false;
    };
    let current = debuffs.generation(kind) == generation;
    if !(current || tuning.legacy_debuff_expiry) || !debuffs.is_active(kind) {
        trace!("stale {kind:?} expiry (generation {generation}) ignored");
        return false;
    }
    debuffs.set(kind, false);
    debug!("debuff {kind:?} expired");
    events.push(SimEvent::DebuffExpired { kind });
    true
}

/// Freeze an infiltrator and schedule its recovery. Civilians are immune.
pub fn apply_stun(
    world: &mut World,
    npc: Entity,
    clock: &mut EffectClock<'_>,
    events: &mut Vec<SimEvent>,
) -> bool {
    let Ok((id, info, movement, velocity)) =
        world.query_one_mut::<(&EntityId, &Npc, &mut Movement, &mut Velocity)>(npc)
    else {
        return false;
    };
    if !info.is_infiltrator() {
        return false;
    }
    movement.speed = 0.0;
    movement.max_speed = 0.0;
    velocity.0 = Vec2::ZERO;
    let id = *id;

    clock.timers.schedule(
        clock.now,
        clock.tuning.stun_duration_ms,
        TimerAction::RestoreSpeed { npc },
    );
    debug!("infiltrator {} stunned", id.0);
    events.push(SimEvent::InfiltratorStunned { npc: id });
    true
}

/// Timer callback for [`TimerAction::RestoreSpeed`].
pub fn restore_speed(world: &mut World, npc: Entity, events: &mut Vec<SimEvent>) -> bool {
    let Ok((id, movement)) = world.query_one_mut::<(&EntityId, &mut Movement)>(npc) else {
        trace!("stun recovery for despawned npc ignored");
        return false;
    };
    *movement = Movement::npc_baseline();
    debug!("infiltrator {} recovered from stun", id.0);
    events.push(SimEvent::StunExpired { npc: *id });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use auber_core::constants::{NPC_MAX_SPEED, NPC_SPEED};
    use auber_core::enums::NpcKind;

    #[test]
    fn test_apply_debuff_schedules_expiry() {
        let mut world = World::new();
        let player = world.spawn((Debuffs::default(),));
        let tuning = Tuning::default();
        let mut timers = TimerQueue::new();
        let mut events = Vec::new();

        {
            let mut debuffs = world.get::<&mut Debuffs>(player).unwrap();
            let mut clock = EffectClock {
                now: 10,
                tuning: &tuning,
                timers: &mut timers,
            };
            apply_debuff(&mut debuffs, player, DebuffKind::Blind, &mut clock, &mut events);
            assert!(debuffs.blinded);
        }
        // Blind lasts 2000 ms = 120 ticks.
        assert_eq!(timers.next_due(), Some(130));
        assert_eq!(events, vec![SimEvent::DebuffApplied { kind: DebuffKind::Blind }]);

        for action in timers.drain_due(130) {
            if let TimerAction::ExpireDebuff {
                player,
                kind,
                generation,
            } = action
            {
                assert!(expire_debuff(&mut world, player, kind, generation, &tuning, &mut events));
            }
        }
        assert!(!world.get::<&Debuffs>(player).unwrap().blinded);
    }

    #[test]
    fn test_stale_generation_is_ignored() {
        let mut world = World::new();
        let mut debuffs = Debuffs::default();
        debuffs.set(DebuffKind::Slow, true);
        let stale = debuffs.bump(DebuffKind::Slow);
        debuffs.bump(DebuffKind::Slow);
        let player = world.spawn((debuffs,));
        let mut events = Vec::new();

        let tuning = Tuning::default();
        assert!(!expire_debuff(&mut world, player, DebuffKind::Slow, stale, &tuning, &mut events));
        assert!(world.get::<&Debuffs>(player).unwrap().slowed);

        let legacy = Tuning {
            legacy_debuff_expiry: true,
            ..Tuning::default()
        };
        assert!(expire_debuff(&mut world, player, DebuffKind::Slow, stale, &legacy, &mut events));
        assert!(!world.get::<&Debuffs>(player).unwrap().slowed);
    }

    #[test]
    fn test_clear_debuffs_invalidates_expiries() {
        let mut debuffs = Debuffs::default();
        debuffs.set(DebuffKind::Confuse, true);
        let before = debuffs.generation(DebuffKind::Confuse);
        clear_debuffs(&mut debuffs);
        assert!(!debuffs.confused);
        assert_ne!(debuffs.generation(DebuffKind::Confuse), before);
    }

    #[test]
    fn test_stun_only_freezes_infiltrators() {
        let mut world = World::new();
        let tuning = Tuning::default();
        let mut timers = TimerQueue::new();
        let mut events = Vec::new();
        let spawn = |world: &mut World, id: u32, kind: NpcKind| {
            world.spawn((
                EntityId(id),
                Npc::new(kind),
                Movement::npc_baseline(),
                Velocity(Vec2::new(1.0, 0.0)),
            ))
        };
        let civilian = spawn(&mut world, 1, NpcKind::Civilian);
        let infiltrator = spawn(&mut world, 2, NpcKind::Infiltrator);

        let mut clock = EffectClock {
            now: 0,
            tuning: &tuning,
            timers: &mut timers,
        };
        assert!(!apply_stun(&mut world, civilian, &mut clock, &mut events));
        assert!(apply_stun(&mut world, infiltrator, &mut clock, &mut events));

        let movement = *world.get::<&Movement>(infiltrator).unwrap();
        assert_eq!(movement.speed, 0.0);
        assert_eq!(movement.max_speed, 0.0);
        assert_eq!(timers.next_due(), Some(300));

        assert!(restore_speed(&mut world, infiltrator, &mut events));
        let movement = *world.get::<&Movement>(infiltrator).unwrap();
        assert_eq!(movement.speed, NPC_SPEED);
        assert_eq!(movement.max_speed, NPC_MAX_SPEED);

        world.despawn(infiltrator).unwrap();
        assert!(!restore_speed(&mut world, infiltrator, &mut events));
    }
}
