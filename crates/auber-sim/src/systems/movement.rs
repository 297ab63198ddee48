//! Kinematic integration with tile collision.
//!
//! Moves every entity that has a `Movement` component (the player and NPCs)
//! by its velocity, one axis at a time. An axis whose step would put the
//! bounding box into an occupied tile is cancelled and its velocity zeroed,
//! so entities slide along walls. Friction is applied afterwards.
//! Projectiles are not moved here.

use glam::Vec2;
use hecs::World;

use auber_core::components::{Hitbox, Movement, Position, Velocity};
use auber_core::constants::FRICTION;
use auber_core::types::Rect;
use auber_map::CollisionMap;

/// Keeps a box flush against a wall from counting the wall's tile.
const EDGE_EPSILON: f32 = 0.01;

pub fn run(world: &mut World, map: &impl CollisionMap) {
    for (_entity, (pos, vel, hitbox, _movement)) in
        world.query_mut::<(&mut Position, &mut Velocity, &Hitbox, &Movement)>()
    {
        let step_x = pos.0 + Vec2::new(vel.0.x, 0.0);
        if blocked(map, hitbox.bounds(step_x)) {
            vel.0.x = 0.0;
        } else {
            pos.0 = step_x;
        }

        let step_y = pos.0 + Vec2::new(0.0, vel.0.y);
        if blocked(map, hitbox.bounds(step_y)) {
            vel.0.y = 0.0;
        } else {
            pos.0 = step_y;
        }

        vel.0 *= FRICTION;
    }
}

/// Whether any tile under `rect` is occupied.
pub fn blocked(map: &impl CollisionMap, rect: Rect) -> bool {
    let (x0, y0) = map.world_to_tile(rect.min);
    let (x1, y1) = map.world_to_tile(rect.max() - Vec2::splat(EDGE_EPSILON));
    (x0..=x1).any(|x| (y0..=y1).any(|y| map.is_occupied(x, y)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use auber_map::TileGrid;

    fn walled_corridor() -> TileGrid {
        // Wall column at tile x = 4.
        let mut map = TileGrid::new(8, 8);
        for y in 0..8 {
            map.set_occupied(4, y, true);
        }
        map
    }

    fn spawn_mover(world: &mut World, pos: Vec2, vel: Vec2) -> hecs::Entity {
        world.spawn((
            Position(pos),
            Velocity(vel),
            Hitbox {
                size: Vec2::splat(16.0),
            },
            Movement::npc_baseline(),
        ))
    }

    #[test]
    fn test_free_movement_applies_friction() {
        let map = walled_corridor();
        let mut world = World::new();
        let e = spawn_mover(&mut world, Vec2::new(32.0, 32.0), Vec2::new(2.0, 1.0));
        run(&mut world, &map);
        assert_eq!(world.get::<&Position>(e).unwrap().0, Vec2::new(34.0, 33.0));
        let vel = world.get::<&Velocity>(e).unwrap().0;
        assert!((vel.x - 1.8).abs() < 1e-6);
        assert!((vel.y - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_wall_blocks_one_axis_only() {
        let map = walled_corridor();
        let mut world = World::new();
        // Right edge at 127, wall starts at 128.
        let e = spawn_mover(&mut world, Vec2::new(111.0, 32.0), Vec2::new(2.0, 1.5));
        run(&mut world, &map);
        let pos = world.get::<&Position>(e).unwrap().0;
        assert_eq!(pos.x, 111.0, "x step into the wall is cancelled");
        assert_eq!(pos.y, 33.5, "y still slides");
        assert_eq!(world.get::<&Velocity>(e).unwrap().0.x, 0.0);
    }

    #[test]
    fn test_flush_against_wall_is_not_blocked() {
        let map = walled_corridor();
        let rect = Rect::new(Vec2::new(112.0, 32.0), Vec2::splat(16.0));
        assert!(!blocked(&map, rect));
        let rect = Rect::new(Vec2::new(112.5, 32.0), Vec2::splat(16.0));
        assert!(blocked(&map, rect));
    }

    #[test]
    fn test_entities_without_movement_are_skipped() {
        let map = walled_corridor();
        let mut world = World::new();
        let e = world.spawn((Position(Vec2::ZERO), Velocity(Vec2::ONE)));
        run(&mut world, &map);
        assert_eq!(world.get::<&Position>(e).unwrap().0, Vec2::ZERO);
    }
}
