//! Astro Drift - A browser asteroid shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, spawning, collisions, game state)
//! - `session`: Frame driver tying the clock, spawner and renderer together
//! - `renderer`: Snapshot hand-off and the Canvas 2D backend
//! - `platform`: Keyboard mapping and frame clock
//! - `settings`: Validated gameplay configuration

pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::{Session, SessionStatus};
pub use settings::{ConfigError, GameConfig};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Frame cadence the per-frame speeds are tuned for, in milliseconds
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per animation frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Ship body circle (drawn, not used for asteroid hits)
    pub const SHIP_BODY_RADIUS: f32 = 5.0;
    /// Ship hull in local space: nose, then the two rear corners
    pub const SHIP_NOSE: Vec2 = Vec2::new(30.0, 0.0);
    pub const SHIP_REAR_RIGHT: Vec2 = Vec2::new(-10.0, 10.0);
    pub const SHIP_REAR_LEFT: Vec2 = Vec2::new(-10.0, -10.0);

    /// Projectile radius
    pub const PROJECTILE_RADIUS: f32 = 5.0;

    /// Default play area (used natively and when no canvas size is known)
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;

    /// Default tuning, per frame
    pub const THRUST_SPEED: f32 = 3.0;
    pub const ROTATIONAL_SPEED: f32 = 0.05;
    pub const FRICTION: f32 = 0.97;
    pub const PROJECTILE_SPEED: f32 = 3.0;

    /// Asteroid spawning
    pub const SPAWN_INTERVAL_MS: f64 = 3000.0;
    /// Shortest accepted spawn interval (a few frames)
    pub const MIN_SPAWN_INTERVAL_MS: f64 = 50.0;
    pub const ASTEROID_RADIUS_MIN: f32 = 10.0;
    pub const ASTEROID_RADIUS_MAX: f32 = 60.0;
}

/// Rotate a local-frame offset by `rotation` radians
#[inline]
pub fn rotate_point(offset: Vec2, rotation: f32) -> Vec2 {
    let (sin, cos) = rotation.sin_cos();
    Vec2::new(offset.x * cos - offset.y * sin, offset.x * sin + offset.y * cos)
}

/// Unit vector pointing along `rotation`
#[inline]
pub fn heading(rotation: f32) -> Vec2 {
    Vec2::new(rotation.cos(), rotation.sin())
}
