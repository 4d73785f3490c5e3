//! Session driver
//!
//! Owns the game state, the held keys and the frame clock. Each animation
//! frame runs whatever ticks are due (spawner first, then the tick, so a
//! tick always sees a settled asteroid list) and renders one snapshot.
//! Game over stops both ticking and spawning for good.

use crate::consts::FRAME_MS;
use crate::platform::{FrameClock, InputEvent, apply_event};
use crate::renderer::{Frame, Renderer};
use crate::settings::{ConfigError, GameConfig};
use crate::sim::{GameEvent, GameState, Keys, TickOutcome, tick};

/// Whether the driver should keep requesting frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    Over,
}

pub struct Session {
    pub state: GameState,
    pub keys: Keys,
    clock: FrameClock,
}

impl Session {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        let state = GameState::new(config, seed)?;
        log::info!(
            "Session started: {}x{} seed {}",
            state.config.width,
            state.config.height,
            seed
        );
        Ok(Self {
            state,
            keys: Keys::default(),
            clock: FrameClock::new(),
        })
    }

    pub fn status(&self) -> SessionStatus {
        if self.state.is_over() {
            SessionStatus::Over
        } else {
            SessionStatus::Running
        }
    }

    /// Apply a keyboard edge (held keys or fire)
    pub fn handle_input(&mut self, event: InputEvent) {
        apply_event(&mut self.keys, &mut self.state, event);
    }

    /// Run one fixed step: spawner, then tick
    ///
    /// The spawner gets one nominal frame of time per step, so when the clock
    /// drops time past `MAX_SUBSTEPS` (below ~15 fps) spawning slows with it.
    pub fn step(&mut self) -> TickOutcome {
        self.state.spawn_due(FRAME_MS);
        tick(&mut self.state, &self.keys)
    }

    /// Advance to `now_ms` and draw the result
    pub fn frame<R: Renderer>(
        &mut self,
        now_ms: f64,
        renderer: &mut R,
    ) -> Result<SessionStatus, R::Error> {
        let due = self.clock.advance(now_ms);
        for _ in 0..due {
            if self.step() == TickOutcome::GameOver {
                break;
            }
        }

        for event in self.state.drain_events() {
            log_event(&event);
        }

        renderer.draw(&Frame::capture(&self.state))?;
        Ok(self.status())
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::PlayerHit { asteroid_id } => {
            log::info!("Game over: ship hit by asteroid {}", asteroid_id)
        }
        GameEvent::AsteroidDestroyed { id, projectile_id } => {
            log::debug!("Asteroid {} shot down by {}", id, projectile_id)
        }
        other => log::trace!("{:?}", other),
    }
}
