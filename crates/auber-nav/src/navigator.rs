//! Navigation queries.
//!
//! Path computation belongs to the navigation mesh; the simulation only asks
//! how far apart two points are and where a startled NPC should run to.

use glam::Vec2;

pub trait Navigator {
    /// Distance between two world-space points.
    fn distance(&self, a: Vec2, b: Vec2) -> f32;

    /// Flee destination for an NPC standing at `from`, if any is known.
    fn nearest_flee_point(&self, from: Vec2) -> Option<Vec2>;
}

pub fn euclidean_distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Picks the closest of a fixed set of flee points.
#[derive(Debug, Clone, Default)]
pub struct FleePointNavigator {
    points: Vec<Vec2>,
}

impl FleePointNavigator {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }
}

impl Navigator for FleePointNavigator {
    fn distance(&self, a: Vec2, b: Vec2) -> f32 {
        euclidean_distance(a, b)
    }

    fn nearest_flee_point(&self, from: Vec2) -> Option<Vec2> {
        // Ties keep the earlier point.
        self.points.iter().copied().fold(None, |best: Option<Vec2>, p| match best {
            Some(b) if b.distance_squared(from) <= p.distance_squared(from) => Some(b),
            _ => Some(p),
        })
    }
}
