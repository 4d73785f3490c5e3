//! Periodic asteroid spawner
//!
//! Runs on wall-clock time: the driver feeds elapsed milliseconds and the
//! spawner reports how many whole intervals have passed. Each firing drops one
//! asteroid just outside a random screen edge, heading inward.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Asteroid;
use crate::settings::GameConfig;

/// Screen edge an asteroid enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Left,
    Bottom,
    Right,
    Top,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Bottom, Edge::Right, Edge::Top];

    /// Unit velocity pointing into the play area
    pub fn inward(self) -> Vec2 {
        match self {
            Edge::Left => Vec2::new(1.0, 0.0),
            Edge::Bottom => Vec2::new(0.0, -1.0),
            Edge::Right => Vec2::new(-1.0, 0.0),
            Edge::Top => Vec2::new(0.0, 1.0),
        }
    }
}

/// Build an asteroid sitting `radius` outside `edge`
///
/// `along` is the coordinate parallel to the edge (y for left/right, x for
/// top/bottom).
pub fn asteroid_on_edge(
    id: u32,
    edge: Edge,
    radius: f32,
    along: f32,
    width: f32,
    height: f32,
) -> Asteroid {
    let position = match edge {
        Edge::Left => Vec2::new(-radius, along),
        Edge::Bottom => Vec2::new(along, height + radius),
        Edge::Right => Vec2::new(width + radius, along),
        Edge::Top => Vec2::new(along, -radius),
    };

    Asteroid {
        id,
        position,
        velocity: edge.inward(),
        radius,
    }
}

/// Interval timer that manufactures asteroids
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    /// Milliseconds between spawns
    pub interval_ms: f64,
    /// Time banked toward the next spawn
    elapsed_ms: f64,
}

impl Spawner {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            elapsed_ms: 0.0,
        }
    }

    /// Bank elapsed time; returns how many spawns are now due
    ///
    /// Every interval crossed counts, so a long gap yields several spawns
    /// rather than dropping any.
    pub fn advance(&mut self, elapsed_ms: f64) -> usize {
        if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            self.elapsed_ms += elapsed_ms;
        }

        let mut due = 0;
        while self.elapsed_ms >= self.interval_ms {
            self.elapsed_ms -= self.interval_ms;
            due += 1;
        }
        due
    }

    /// Roll a new asteroid: random edge, radius and position along the edge
    pub fn spawn<R: Rng>(&self, id: u32, config: &GameConfig, rng: &mut R) -> Asteroid {
        let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
        let radius = rng.random_range(config.asteroid_radius_min..config.asteroid_radius_max);
        let along = match edge {
            Edge::Left | Edge::Right => rng.random_range(0.0..config.height),
            Edge::Top | Edge::Bottom => rng.random_range(0.0..config.width),
        };

        asteroid_on_edge(id, edge, radius, along, config.width, config.height)
    }
}
