//! Snapshot system: queries the ECS world and builds a GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::{Entity, World};

use auber_core::components::*;
use auber_core::constants::{BLINDED_VISION_RADIUS, VISION_RADIUS};
use auber_core::enums::*;
use auber_core::events::SimEvent;
use auber_core::state::*;
use auber_core::types::{EntityId, SimTime};

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    player: Entity,
    time: &SimTime,
    phase: GamePhase,
    events: Vec<SimEvent>,
    score: &ScoreView,
) -> GameStateSnapshot {
    let fired_this_tick = events
        .iter()
        .any(|e| matches!(e, SimEvent::RayFired { .. }));

    GameStateSnapshot {
        time: *time,
        phase,
        player: build_player(world, player, fired_this_tick),
        npcs: build_npcs(world),
        projectiles: build_projectiles(world),
        events,
        score: score.clone(),
    }
}

fn build_player(world: &World, player: Entity, fired_this_tick: bool) -> PlayerView {
    let mut query = match world.query_one::<(
        &EntityId,
        &Position,
        &Rotation,
        &Hitbox,
        &Player,
        &Debuffs,
    )>(player)
    {
        Ok(query) => query,
        Err(_) => return PlayerView::default(),
    };
    let Some((id, pos, rotation, hitbox, state, debuffs)) = query.get() else {
        return PlayerView::default();
    };

    PlayerView {
        id: *id,
        position: pos.0,
        center: hitbox.center(pos.0),
        rotation: rotation.0,
        health: state.health,
        charge: state.charge,
        weapon: weapon_state(state, fired_this_tick),
        ray_endpoint: state.ray_endpoint,
        confused: debuffs.confused,
        slowed: debuffs.slowed,
        blinded: debuffs.blinded,
        vision_radius: if debuffs.blinded {
            BLINDED_VISION_RADIUS
        } else {
            VISION_RADIUS
        },
        stun_shot_armed: state.stun_shot,
        visible: state.visible,
    }
}

/// Display state of the teleporter.
pub fn weapon_state(player: &Player, fired_this_tick: bool) -> WeaponState {
    match (player.ray_endpoint, fired_this_tick) {
        (Some(_), true) => WeaponState::Discharged,
        (Some(_), false) => WeaponState::RayActive,
        (None, _) if player.charge > 0.0 => WeaponState::Charging,
        (None, _) => WeaponState::Idle,
    }
}

fn build_npcs(world: &World) -> Vec<NpcView> {
    let mut npcs: Vec<NpcView> = world
        .query::<(&EntityId, &Position, &Movement, &Npc)>()
        .iter()
        .map(|(_, (id, pos, movement, npc))| NpcView {
            id: *id,
            kind: npc.kind,
            position: pos.0,
            phase: npc.phase,
            exposed: npc.exposed,
            stunned: movement.is_frozen(),
        })
        .collect();
    npcs.sort_by_key(|n| n.id);
    npcs
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&EntityId, &Position, &Projectile)>()
        .iter()
        .map(|(_, (id, pos, projectile))| ProjectileView {
            id: *id,
            position: pos.0,
            action: projectile.action,
        })
        .collect();
    projectiles.sort_by_key(|p| p.id);
    projectiles
}
