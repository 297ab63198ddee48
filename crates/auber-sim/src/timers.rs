//! One-shot delayed actions.
//!
//! Nothing runs on another thread: a scheduled action is queued with the tick
//! it becomes due on, and the engine drains due actions at the start of each
//! tick. Actions carry the entity they target and are guarded against that
//! entity having been despawned in the meantime.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hecs::Entity;

use auber_core::enums::DebuffKind;
use auber_core::types::ticks_for_ms;

/// Mutation applied when a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Clear a debuff flag if `generation` is still the current one.
    ExpireDebuff {
        player: Entity,
        kind: DebuffKind,
        generation: u32,
    },
    /// Hide the ray fired as shot number `shot`.
    ClearRay { player: Entity, shot: u32 },
    /// Give a stunned NPC its designed speed back.
    RestoreSpeed { npc: Entity },
}

#[derive(Debug)]
struct Scheduled {
    fire_tick: u64,
    seq: u64,
    action: TimerAction,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.fire_tick == other.fire_tick && self.seq == other.seq
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    // Reversed so the max-heap pops the earliest (tick, seq) first.
    fn cmp(&self, other: &Self) -> Ordering {
        (other.fire_tick, other.seq).cmp(&(self.fire_tick, self.seq))
    }
}

/// Pending timer actions ordered by due tick, then by scheduling order.
#[derive(Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Scheduled>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to fire `delay_ms` after tick `now`. Returns the due tick.
    pub fn schedule(&mut self, now: u64, delay_ms: u64, action: TimerAction) -> u64 {
        let fire_tick = now.saturating_add(ticks_for_ms(delay_ms));
        self.heap.push(Scheduled {
            fire_tick,
            seq: self.next_seq,
            action,
        });
        self.next_seq += 1;
        fire_tick
    }

    /// Remove and return every action due at or before `now`, in firing order.
    pub fn drain_due(&mut self, now: u64) -> Vec<TimerAction> {
        let mut due = Vec::new();
        while self.heap.peek().is_some_and(|s| s.fire_tick <= now) {
            if let Some(scheduled) = self.heap.pop() {
                due.push(scheduled.action);
            }
        }
        due
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Due tick of the earliest pending action.
    pub fn next_due(&self) -> Option<u64> {
        self.heap.peek().map(|s| s.fire_tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restore_actions(count: usize) -> Vec<TimerAction> {
        let mut world = hecs::World::new();
        (0..count)
            .map(|_| TimerAction::RestoreSpeed { npc: world.spawn(()) })
            .collect()
    }

    #[test]
    fn test_schedule_rounds_up_to_ticks() {
        let action = restore_actions(1)[0];
        let mut timers = TimerQueue::new();
        assert_eq!(timers.schedule(10, 250, action), 25);
        assert_eq!(timers.schedule(10, 251, action), 26);
        assert_eq!(timers.schedule(0, 0, action), 0);
        assert_eq!(timers.next_due(), Some(0));
        assert_eq!(timers.len(), 3);
    }

    #[test]
    fn test_drain_due_in_order() {
        let actions = restore_actions(3);
        let mut timers = TimerQueue::new();
        timers.schedule(0, 1000, actions[2]);
        timers.schedule(0, 500, actions[0]);
        timers.schedule(0, 500, actions[1]);

        assert!(timers.drain_due(29).is_empty());
        // Same due tick keeps scheduling order.
        assert_eq!(timers.drain_due(30), vec![actions[0], actions[1]]);
        assert_eq!(timers.drain_due(1000), vec![actions[2]]);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_late_drain_fires_once() {
        let action = restore_actions(1)[0];
        let mut timers = TimerQueue::new();
        timers.schedule(5, 100, action);
        assert_eq!(timers.drain_due(500), vec![action]);
        assert!(timers.drain_due(501).is_empty());
    }

    #[test]
    fn test_huge_delay_saturates_instead_of_overflowing() {
        let action = restore_actions(1)[0];
        let mut timers = TimerQueue::new();
        assert_eq!(timers.schedule(u64::MAX - 1, u64::MAX, action), u64::MAX);
        assert!(timers.drain_due(u64::MAX - 1).is_empty());
    }
}
