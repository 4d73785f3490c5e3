//! Rendering hand-off
//!
//! The simulation knows nothing about pixels. Once per animation frame the
//! session captures a [`Frame`] and passes it to a [`Renderer`].

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{Circle, GamePhase, GameState};

/// Ship pose plus the shapes derived from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipPose {
    pub position: Vec2,
    pub rotation: f32,
    pub body: Circle,
    pub hull: [Vec2; 3],
}

/// Immutable snapshot of everything a renderer needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub tick: u64,
    pub phase: GamePhase,
    pub width: f32,
    pub height: f32,
    pub ship: ShipPose,
    pub projectiles: Vec<Circle>,
    pub asteroids: Vec<Circle>,
}

impl Frame {
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;
        Self {
            tick: state.time_ticks,
            phase: state.phase,
            width: state.config.width,
            height: state.config.height,
            ship: ShipPose {
                position: player.position,
                rotation: player.rotation,
                body: player.body(),
                hull: player.hull_vertices(),
            },
            projectiles: state.projectiles.iter().map(|p| p.circle()).collect(),
            asteroids: state.asteroids.iter().map(|a| a.circle()).collect(),
        }
    }
}

/// Something that can draw a frame
pub trait Renderer {
    type Error: std::fmt::Debug;

    fn draw(&mut self, frame: &Frame) -> Result<(), Self::Error>;
}
