//! Game state and core simulation types
//!
//! All mutable simulation state lives in [`GameState`]; the tick and the
//! spawner are the only things that mutate entity collections.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Circle;
use super::spawner::Spawner;
use crate::consts::*;
use crate::settings::{ConfigError, GameConfig};
use crate::{heading, rotate_point};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// An asteroid touched the ship hull; nothing moves or spawns any more
    GameOver,
}

/// Held control keys, mutated by input edges and read once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keys {
    pub thrust: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
}

/// Things that happened during a tick or input event (for logging)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ProjectileFired { id: u32 },
    /// Projectile left the play area
    ProjectileExpired { id: u32 },
    AsteroidSpawned { id: u32, radius: f32 },
    /// Asteroid left the play area
    AsteroidEscaped { id: u32 },
    /// Asteroid and projectile destroyed each other
    AsteroidDestroyed { id: u32, projectile_id: u32 },
    PlayerHit { asteroid_id: u32 },
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Centre of the body circle
    pub position: Vec2,
    /// Displacement per frame
    pub velocity: Vec2,
    /// Heading in radians, unbounded
    pub rotation: f32,
}

impl Player {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            rotation: 0.0,
        }
    }

    /// World-space hull triangle: nose, rear-right, rear-left
    ///
    /// Always derived from the current pose; never cache it across ticks.
    pub fn hull_vertices(&self) -> [Vec2; 3] {
        [SHIP_NOSE, SHIP_REAR_RIGHT, SHIP_REAR_LEFT]
            .map(|offset| self.position + rotate_point(offset, self.rotation))
    }

    /// Body circle (rendered; asteroid hits use the hull)
    pub fn body(&self) -> Circle {
        Circle::new(self.position, SHIP_BODY_RADIUS)
    }

    /// Tip of the ship, where projectiles leave from
    pub fn nose(&self) -> Vec2 {
        self.position + heading(self.rotation) * SHIP_NOSE.x
    }

    /// Apply one frame of input, friction and motion
    ///
    /// Thrust sets velocity outright; without thrust velocity decays by
    /// `friction`. Rotate-right wins when both rotate keys are held.
    pub fn step(&mut self, keys: &Keys, friction: f32, thrust_speed: f32, rotational_speed: f32) {
        if keys.thrust {
            self.velocity = heading(self.rotation) * thrust_speed;
        } else {
            self.velocity *= friction;
        }

        if keys.rotate_right {
            self.rotation += rotational_speed;
        } else if keys.rotate_left {
            self.rotation -= rotational_speed;
        }

        self.position += self.velocity;
    }
}

/// A shot fired from the ship's nose
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
}

impl Projectile {
    pub fn new(id: u32, position: Vec2, velocity: Vec2) -> Self {
        Self {
            id,
            position,
            velocity,
            radius: PROJECTILE_RADIUS,
        }
    }

    #[inline]
    pub fn step(&mut self) {
        self.position += self.velocity;
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.position, self.radius)
    }
}

/// A drifting rock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
}

impl Asteroid {
    #[inline]
    pub fn step(&mut self) {
        self.position += self.velocity;
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.position, self.radius)
    }
}

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Validated tuning
    pub config: GameConfig,
    /// Current phase
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// The ship
    pub player: Player,
    /// Live projectiles, oldest first
    pub projectiles: Vec<Projectile>,
    /// Live asteroids, oldest first
    pub asteroids: Vec<Asteroid>,
    /// Asteroid timer
    pub spawner: Spawner,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new session; fails if the configuration is unusable
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let centre = Vec2::new(config.width / 2.0, config.height / 2.0);
        let spawner = Spawner::new(config.spawn_interval_ms);

        Ok(Self {
            seed,
            phase: GamePhase::Playing,
            time_ticks: 0,
            player: Player::new(centre),
            projectiles: Vec::new(),
            asteroids: Vec::new(),
            spawner,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            config,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Fire a projectile from the ship's nose along its heading
    ///
    /// Returns the projectile id, or `None` once the session has ended.
    pub fn fire(&mut self) -> Option<u32> {
        if self.is_over() {
            return None;
        }

        let id = self.next_entity_id();
        let velocity = heading(self.player.rotation) * self.config.projectile_speed;
        self.projectiles
            .push(Projectile::new(id, self.player.nose(), velocity));
        self.events.push(GameEvent::ProjectileFired { id });
        log::trace!("Projectile {} fired", id);
        Some(id)
    }

    /// Feed wall-clock time to the spawner, appending any asteroids that are due
    ///
    /// Returns how many were spawned. Does nothing once the session has ended.
    pub fn spawn_due(&mut self, elapsed_ms: f64) -> usize {
        if self.is_over() {
            return 0;
        }

        let due = self.spawner.advance(elapsed_ms);
        for _ in 0..due {
            let id = self.next_entity_id();
            let asteroid = self.spawner.spawn(id, &self.config, &mut self.rng);
            log::debug!(
                "Asteroid {} spawned at ({:.0}, {:.0}) r={:.1}",
                id,
                asteroid.position.x,
                asteroid.position.y,
                asteroid.radius
            );
            self.events.push(GameEvent::AsteroidSpawned {
                id,
                radius: asteroid.radius,
            });
            self.asteroids.push(asteroid);
        }
        due
    }

    /// Take all events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_2;

    fn state() -> GameState {
        GameState::new(GameConfig::default(), 12345).unwrap()
    }

    #[test]
    fn test_new_state_centres_player() {
        let state = state();
        assert_eq!(state.player.position, Vec2::new(400.0, 300.0));
        assert_eq!(state.player.velocity, Vec2::ZERO);
        assert_eq!(state.player.rotation, 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.seed, 12345);
        assert!(state.projectiles.is_empty());
        assert!(state.asteroids.is_empty());
    }

    #[test]
    fn test_new_state_rejects_bad_config() {
        let config = GameConfig {
            thrust_speed: 0.0,
            ..Default::default()
        };
        assert!(GameState::new(config, 1).is_err());
    }

    #[test]
    fn test_hull_vertices_rotation_zero() {
        let player = Player::new(Vec2::new(100.0, 100.0));
        let hull = player.hull_vertices();
        assert_eq!(hull[0], Vec2::new(130.0, 100.0));
        assert_eq!(hull[1], Vec2::new(90.0, 110.0));
        assert_eq!(hull[2], Vec2::new(90.0, 90.0));
    }

    #[test]
    fn test_hull_vertices_follow_pose() {
        let mut player = Player::new(Vec2::new(100.0, 100.0));
        player.rotation = FRAC_PI_2;
        let hull = player.hull_vertices();
        assert_relative_eq!(hull[0].x, 100.0, epsilon = 1e-4);
        assert_relative_eq!(hull[0].y, 130.0, epsilon = 1e-4);

        player.position = Vec2::new(0.0, 0.0);
        let moved = player.hull_vertices();
        assert_relative_eq!(moved[0].y, 30.0, epsilon = 1e-4);
    }

    #[test]
    fn test_thrust_sets_velocity() {
        let mut player = Player::new(Vec2::new(400.0, 300.0));
        let keys = Keys {
            thrust: true,
            ..Default::default()
        };
        player.step(&keys, 0.97, 3.0, 0.05);
        assert_eq!(player.velocity, Vec2::new(3.0, 0.0));
        assert_eq!(player.position, Vec2::new(403.0, 300.0));

        // Not accumulated
        player.step(&keys, 0.97, 3.0, 0.05);
        assert_eq!(player.velocity, Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_friction_decays_velocity() {
        let mut player = Player::new(Vec2::ZERO);
        player.velocity = Vec2::new(3.0, -2.0);
        player.step(&Keys::default(), 0.5, 3.0, 0.05);
        assert_eq!(player.velocity, Vec2::new(1.5, -1.0));
        assert_eq!(player.position, Vec2::new(1.5, -1.0));
    }

    #[test]
    fn test_rotate_right_wins() {
        let mut player = Player::new(Vec2::ZERO);
        let both = Keys {
            rotate_left: true,
            rotate_right: true,
            ..Default::default()
        };
        player.step(&both, 0.97, 3.0, 0.05);
        assert_relative_eq!(player.rotation, 0.05);

        let left = Keys {
            rotate_left: true,
            ..Default::default()
        };
        player.step(&left, 0.97, 3.0, 0.05);
        player.step(&left, 0.97, 3.0, 0.05);
        assert_relative_eq!(player.rotation, -0.05);
    }

    #[test]
    fn test_fire_from_nose() {
        let mut state = state();
        state.player.position = Vec2::new(100.0, 100.0);
        let id = state.fire().unwrap();
        let shot = &state.projectiles[0];
        assert_eq!(shot.id, id);
        assert_eq!(shot.position, Vec2::new(130.0, 100.0));
        assert_eq!(shot.velocity, Vec2::new(3.0, 0.0));
        assert_eq!(shot.radius, 5.0);
        assert_eq!(state.drain_events(), vec![GameEvent::ProjectileFired { id }]);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_fire_after_game_over_ignored() {
        let mut state = state();
        state.phase = GamePhase::GameOver;
        assert_eq!(state.fire(), None);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_spawn_due_stops_after_game_over() {
        let mut state = state();
        assert_eq!(state.spawn_due(3000.0), 1);
        state.phase = GamePhase::GameOver;
        assert_eq!(state.spawn_due(30_000.0), 0);
        assert_eq!(state.asteroids.len(), 1);
    }

    #[test]
    fn test_entity_ids_unique() {
        let mut state = state();
        state.fire();
        state.spawn_due(6000.0);
        state.fire();
        let mut ids: Vec<u32> = state
            .projectiles
            .iter()
            .map(|p| p.id)
            .chain(state.asteroids.iter().map(|a| a.id))
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    proptest! {
        #[test]
        fn prop_friction_never_reverses(
            vx in -10.0f32..10.0, vy in -10.0f32..10.0, friction in 0.01f32..0.999,
        ) {
            let mut player = Player::new(Vec2::ZERO);
            player.velocity = Vec2::new(vx, vy);
            for _ in 0..200 {
                let before = player.velocity;
                player.step(&Keys::default(), friction, 3.0, 0.05);
                prop_assert!(player.velocity.x * before.x >= 0.0);
                prop_assert!(player.velocity.y * before.y >= 0.0);
                prop_assert!(player.velocity.x.abs() <= before.x.abs());
                prop_assert!(player.velocity.y.abs() <= before.y.abs());
            }
        }
    }

    #[test]
    fn test_friction_approaches_rest() {
        let mut player = Player::new(Vec2::ZERO);
        player.velocity = Vec2::new(3.0, 3.0);
        for _ in 0..5_000 {
            player.step(&Keys::default(), 0.97, 3.0, 0.05);
        }
        assert!(player.velocity.length() < 1e-30);

        // Halving rounds the last subnormal to zero
        player.velocity = Vec2::new(3.0, -3.0);
        for _ in 0..200 {
            player.step(&Keys::default(), 0.5, 3.0, 0.05);
        }
        assert_eq!(player.velocity, Vec2::ZERO);
    }
}
