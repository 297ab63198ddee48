//! Player system: respawn, medbay healing, input-driven movement and
//! teleporter pads.
//!
//! Runs before the teleporter, so the charge penalty on movement uses the
//! charge left over from the previous tick.

use glam::Vec2;
use hecs::{Entity, World};
use log::{debug, info};

use auber_core::commands::PlayerInput;
use auber_core::components::*;
use auber_core::config::Tuning;
use auber_core::constants::MAX_HEALTH;
use auber_core::events::SimEvent;
use auber_core::types::Rect;
use auber_map::TeleporterPad;

use crate::debuff;

/// Where the player heals and where a respawn lands.
#[derive(Debug, Clone, Copy)]
pub struct Medbay {
    pub spawn: Vec2,
    pub area: Rect,
}

/// Send the player back to the medbay and reset their status. Health is not
/// restored; the medbay heals it back up.
pub fn respawn(world: &mut World, player: Entity, medbay: &Medbay, events: &mut Vec<SimEvent>) {
    let Ok((pos, vel, state, debuffs)) =
        world.query_one_mut::<(&mut Position, &mut Velocity, &mut Player, &mut Debuffs)>(player)
    else {
        return;
    };
    pos.0 = medbay.spawn;
    vel.0 = Vec2::ZERO;
    state.charge = 0.0;
    state.ray_endpoint = None;
    debuff::clear_debuffs(debuffs);

    info!("player respawned at medbay (health {:.2})", state.health);
    events.push(SimEvent::PlayerRespawned);
}

pub fn run(
    world: &mut World,
    player: Entity,
    input: &PlayerInput,
    medbay: &Medbay,
    teleporters: &[TeleporterPad],
    tuning: &Tuning,
    events: &mut Vec<SimEvent>,
) {
    let needs_respawn = world
        .get::<&Player>(player)
        .is_ok_and(|p| p.health <= 0.0);
    if needs_respawn {
        respawn(world, player, medbay, events);
    }

    let Ok((pos, vel, rotation, hitbox, movement, state, debuffs)) = world
        .query_one_mut::<(
            &mut Position,
            &mut Velocity,
            &mut Rotation,
            &Hitbox,
            &Movement,
            &mut Player,
            &Debuffs,
        )>(player)
    else {
        return;
    };

    if medbay.area.contains(pos.0) {
        state.health = (state.health + tuning.heal_rate).min(MAX_HEALTH);
    }

    let modifier = charge_speed_modifier(state.charge, movement.speed);
    vel.0 = steer(vel.0, input, movement, modifier, debuffs);

    let pressed = input.interact && !state.interact_held;
    state.interact_held = input.interact;
    if pressed {
        let center = hitbox.center(pos.0);
        if let Some(pad) = teleporters.iter().find(|pad| pad.area.contains(center)) {
            let from = pos.0;
            pos.0 = pad.destination;
            vel.0 = Vec2::ZERO;
            debug!("player teleported from {from} to {}", pad.destination);
            events.push(SimEvent::PlayerTeleported {
                from,
                to: pad.destination,
            });
        }
    }

    let to_aim = input.aim - hitbox.center(pos.0);
    rotation.0 = to_aim.y.atan2(to_aim.x).to_degrees() - 90.0;
}

/// Acceleration lost while charging. Reaches the full speed at half charge.
pub fn charge_speed_modifier(charge: f32, speed: f32) -> f32 {
    (charge * speed * 2.0).min(speed)
}

/// Apply one tick of directional input to `velocity`.
///
/// A confused player's velocity is flipped before and after the input is
/// added, which inverts the input without inverting the momentum.
pub fn steer(
    velocity: Vec2,
    input: &PlayerInput,
    movement: &Movement,
    modifier: f32,
    debuffs: &Debuffs,
) -> Vec2 {
    let mut v = velocity;
    if debuffs.slowed {
        v *= 0.5;
    }
    if debuffs.confused {
        v = -v;
    }

    let accel = movement.speed - modifier;
    let max = movement.max_speed;
    if input.up {
        v.y = (v.y + accel).min(max);
    }
    if input.left {
        v.x = (v.x - accel).max(-max);
    }
    if input.down {
        v.y = (v.y - accel).max(-max);
    }
    if input.right {
        v.x = (v.x + accel).min(max);
    }

    if debuffs.confused {
        v = -v;
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use auber_core::constants::{PLAYER_MAX_SPEED, PLAYER_SPEED};

    fn player_movement() -> Movement {
        Movement {
            speed: PLAYER_SPEED,
            max_speed: PLAYER_MAX_SPEED,
        }
    }

    fn right() -> PlayerInput {
        PlayerInput {
            right: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_charge_modifier_caps_at_speed() {
        assert_eq!(charge_speed_modifier(0.0, 0.4), 0.0);
        assert!((charge_speed_modifier(0.25, 0.4) - 0.2).abs() < 1e-6);
        assert_eq!(charge_speed_modifier(0.5, 0.4), 0.4);
        assert_eq!(charge_speed_modifier(1.0, 0.4), 0.4);
    }

    #[test]
    fn test_steer_accelerates_and_clamps() {
        let debuffs = Debuffs::default();
        let mut v = Vec2::ZERO;
        v = steer(v, &right(), &player_movement(), 0.0, &debuffs);
        assert!((v.x - PLAYER_SPEED).abs() < 1e-6);
        for _ in 0..20 {
            v = steer(v, &right(), &player_movement(), 0.0, &debuffs);
        }
        assert_eq!(v.x, PLAYER_MAX_SPEED);
    }

    #[test]
    fn test_full_charge_stops_acceleration() {
        let debuffs = Debuffs::default();
        let modifier = charge_speed_modifier(1.0, PLAYER_SPEED);
        let v = steer(Vec2::ZERO, &right(), &player_movement(), modifier, &debuffs);
        assert_eq!(v, Vec2::ZERO);
    }

    #[test]
    fn test_confused_inverts_input() {
        let debuffs = Debuffs {
            confused: true,
            ..Default::default()
        };
        let v = steer(Vec2::ZERO, &right(), &player_movement(), 0.0, &debuffs);
        assert!((v.x + PLAYER_SPEED).abs() < 1e-6, "right moves left: {v:?}");

        // Momentum keeps its direction.
        let coasting = steer(
            Vec2::new(1.0, 0.0),
            &PlayerInput::default(),
            &player_movement(),
            0.0,
            &debuffs,
        );
        assert_eq!(coasting, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_slowed_halves_velocity() {
        let debuffs = Debuffs {
            slowed: true,
            ..Default::default()
        };
        let v = steer(
            Vec2::new(2.0, -1.0),
            &PlayerInput::default(),
            &player_movement(),
            0.0,
            &debuffs,
        );
        assert_eq!(v, Vec2::new(1.0, -0.5));
    }
}
