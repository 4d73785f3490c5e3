//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, motion in per-frame units
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod geometry;
pub mod spawner;
pub mod state;
pub mod tick;

pub use geometry::{
    Circle, circle_collision, circle_polygon_collision, closest_point_on_segment, distance,
    point_in_polygon, point_on_segment,
};
pub use spawner::{Edge, Spawner, asteroid_on_edge};
pub use state::{Asteroid, GameEvent, GamePhase, GameState, Keys, Player, Projectile};
pub use tick::{TickOutcome, is_off_screen, tick};
