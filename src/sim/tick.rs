//! Per-frame simulation tick
//!
//! Advances the ship, projectiles and asteroids once, prunes anything that
//! has fully left the play area and resolves collisions. Step order is fixed:
//! ship, projectiles, then asteroids (move, ship hit, prune, projectile hits).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{circle_collision, circle_polygon_collision};
use super::state::{GameEvent, GamePhase, GameState, Keys};

/// What a tick produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// Keep ticking
    Continue,
    /// An asteroid hit the ship this tick, or the session had already ended
    GameOver,
}

/// True once a circle is entirely outside the `width` x `height` play area
#[inline]
pub fn is_off_screen(position: Vec2, radius: f32, width: f32, height: f32) -> bool {
    position.x + radius < 0.0
        || position.x - radius > width
        || position.y - radius > height
        || position.y + radius < 0.0
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, keys: &Keys) -> TickOutcome {
    if state.is_over() {
        return TickOutcome::GameOver;
    }

    state.time_ticks += 1;
    let (width, height) = (state.config.width, state.config.height);

    state.player.step(
        keys,
        state.config.friction,
        state.config.thrust_speed,
        state.config.rotational_speed,
    );

    // Projectiles: move, then drop those that have left the screen
    let events = &mut state.events;
    state.projectiles.retain_mut(|projectile| {
        projectile.step();
        if is_off_screen(projectile.position, projectile.radius, width, height) {
            events.push(GameEvent::ProjectileExpired { id: projectile.id });
            false
        } else {
            true
        }
    });

    // Hull is derived once per tick, after the ship has moved
    let hull = state.player.hull_vertices();

    // Reverse order keeps unvisited indices valid across removals
    let mut i = state.asteroids.len();
    while i > 0 {
        i -= 1;
        let asteroid = &mut state.asteroids[i];
        asteroid.step();

        if circle_polygon_collision(&asteroid.circle(), &hull) {
            let asteroid_id = asteroid.id;
            state.phase = GamePhase::GameOver;
            state.events.push(GameEvent::PlayerHit { asteroid_id });
            log::info!(
                "Ship hit by asteroid {} after {} ticks (seed {})",
                asteroid_id,
                state.time_ticks,
                state.seed
            );
            return TickOutcome::GameOver;
        }

        if is_off_screen(asteroid.position, asteroid.radius, width, height) {
            let id = asteroid.id;
            state.asteroids.remove(i);
            state.events.push(GameEvent::AsteroidEscaped { id });
            log::trace!("Asteroid {} left the play area", id);
            continue;
        }

        let rock = asteroid.circle();
        let rock_id = asteroid.id;
        if let Some(j) = state
            .projectiles
            .iter()
            .rposition(|projectile| circle_collision(&rock, &projectile.circle()))
        {
            let projectile = state.projectiles.remove(j);
            state.asteroids.remove(i);
            state.events.push(GameEvent::AsteroidDestroyed {
                id: rock_id,
                projectile_id: projectile.id,
            });
            log::debug!("Asteroid {} destroyed by projectile {}", rock_id, projectile.id);
        }
    }

    TickOutcome::Continue
}
