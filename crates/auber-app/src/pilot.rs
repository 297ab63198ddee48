//! Scripted player for headless runs.
//!
//! Walks toward the nearest infiltrator, charges the teleporter and releases
//! it once the charge passes the fire threshold. Returns to the medbay while
//! badly hurt.

use glam::Vec2;

use auber_core::commands::PlayerInput;
use auber_core::constants::NPC_SIZE;
use auber_core::enums::NpcKind;
use auber_core::state::GameStateSnapshot;

/// Preferred firing distance to the target.
const STANDOFF: f32 = 96.0;

/// Health below which the pilot heads home.
const RETREAT_HEALTH: f32 = 0.3;

/// Dead zone for axis steering, so the pilot does not jitter on arrival.
const STEER_DEAD_ZONE: f32 = 4.0;

#[derive(Debug, Clone)]
pub struct Pilot {
    medbay: Vec2,
    fire_threshold: f32,
}

impl Pilot {
    pub fn new(medbay: Vec2, fire_threshold: f32) -> Self {
        Self {
            medbay,
            fire_threshold,
        }
    }

    /// Input for the tick following `snapshot`.
    pub fn input(&self, snapshot: &GameStateSnapshot) -> PlayerInput {
        let player = &snapshot.player;
        let half_npc = Vec2::from(NPC_SIZE) * 0.5;

        if player.health < RETREAT_HEALTH {
            return steer_toward(player.center, self.medbay, 0.0);
        }

        let target = snapshot
            .npcs
            .iter()
            .filter(|npc| npc.kind == NpcKind::Infiltrator)
            .map(|npc| npc.position + half_npc)
            .min_by(|a, b| {
                a.distance_squared(player.center)
                    .total_cmp(&b.distance_squared(player.center))
            });
        let Some(target) = target else {
            return PlayerInput::default();
        };

        let mut input = steer_toward(player.center, target, STANDOFF);
        input.aim = target;
        // Hold until charged, then let go to fire.
        input.fire = player.ray_endpoint.is_none() && player.charge < self.fire_threshold;
        input
    }
}

fn steer_toward(from: Vec2, to: Vec2, standoff: f32) -> PlayerInput {
    let mut input = PlayerInput {
        aim: to,
        ..PlayerInput::default()
    };
    if from.distance(to) <= standoff {
        return input;
    }
    let delta = to - from;
    input.right = delta.x > STEER_DEAD_ZONE;
    input.left = delta.x < -STEER_DEAD_ZONE;
    input.up = delta.y > STEER_DEAD_ZONE;
    input.down = delta.y < -STEER_DEAD_ZONE;
    input
}
