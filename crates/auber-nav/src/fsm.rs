//! NPC flee state machine.
//!
//! Pure functions over plain data: the simulation packs an [`NpcContext`] per
//! NPC each tick and writes the returned [`NpcUpdate`] back.

use glam::Vec2;

use auber_core::components::Movement;
use auber_core::constants::NPC_ARRIVAL_RADIUS;
use auber_core::enums::NpcPhase;

/// Input to the NPC FSM for a single entity.
#[derive(Debug, Clone, Copy)]
pub struct NpcContext {
    pub phase: NpcPhase,
    /// Centre of the NPC's bounding box.
    pub center: Vec2,
    pub velocity: Vec2,
    pub movement: Movement,
    pub destination: Option<Vec2>,
}

/// Output from the NPC FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NpcUpdate {
    pub new_phase: NpcPhase,
    pub new_velocity: Vec2,
    pub destination: Option<Vec2>,
    pub phase_changed: bool,
}

/// Evaluate one NPC for the current tick.
pub fn evaluate(ctx: &NpcContext) -> NpcUpdate {
    // Stunned NPCs hold position but keep their plan.
    if ctx.movement.is_frozen() {
        return NpcUpdate {
            new_phase: ctx.phase,
            new_velocity: Vec2::ZERO,
            destination: ctx.destination,
            phase_changed: false,
        };
    }

    match (ctx.phase, ctx.destination) {
        (NpcPhase::Fleeing, Some(dest)) => evaluate_fleeing(ctx, dest),
        (NpcPhase::Fleeing, None) => arrive(),
        // Idle NPCs coast; friction in the movement pass brings them to rest.
        (NpcPhase::Idle, _) => NpcUpdate {
            new_phase: NpcPhase::Idle,
            new_velocity: ctx.velocity,
            destination: None,
            phase_changed: false,
        },
    }
}

/// Put an NPC into flight toward `destination`.
pub fn startle(phase: NpcPhase, destination: Vec2) -> NpcUpdate {
    NpcUpdate {
        new_phase: NpcPhase::Fleeing,
        new_velocity: Vec2::ZERO,
        destination: Some(destination),
        phase_changed: phase != NpcPhase::Fleeing,
    }
}

fn evaluate_fleeing(ctx: &NpcContext, dest: Vec2) -> NpcUpdate {
    let offset = dest - ctx.center;
    if offset.length() <= NPC_ARRIVAL_RADIUS {
        return arrive();
    }

    let accelerated = ctx.velocity + offset.normalize_or_zero() * ctx.movement.speed;
    NpcUpdate {
        new_phase: NpcPhase::Fleeing,
        new_velocity: accelerated.clamp_length_max(ctx.movement.max_speed),
        destination: Some(dest),
        phase_changed: false,
    }
}

fn arrive() -> NpcUpdate {
    NpcUpdate {
        new_phase: NpcPhase::Idle,
        new_velocity: Vec2::ZERO,
        destination: None,
        phase_changed: true,
    }
}
