//! Cleanup system: removes entities queued for removal during the tick.

use hecs::{Entity, World};
use log::trace;

/// Despawn everything in the buffer. Entities queued twice, or already gone,
/// are skipped.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.sort();
    despawn_buffer.dedup();
    for entity in despawn_buffer.drain(..) {
        if world.despawn(entity).is_err() {
            trace!("entity {entity:?} was already despawned");
        }
    }
}
