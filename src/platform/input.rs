//! Keyboard input mapping
//!
//! Held controls live in [`Keys`]; firing is an edge, turned into a
//! projectile the moment it arrives.

use crate::sim::{GameState, Keys};

/// A held control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Thrust,
    RotateLeft,
    RotateRight,
}

impl Control {
    /// Map a `KeyboardEvent.code` to a held control
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" | "ArrowUp" => Some(Control::Thrust),
            "KeyA" | "ArrowLeft" => Some(Control::RotateLeft),
            "KeyD" | "ArrowRight" => Some(Control::RotateRight),
            _ => None,
        }
    }
}

/// A discrete input edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Press(Control),
    Release(Control),
    Fire,
}

impl InputEvent {
    /// Translate a keydown; auto-repeats are dropped so a held Space fires once
    pub fn from_keydown(code: &str, repeat: bool) -> Option<Self> {
        if code == "Space" {
            return (!repeat).then_some(InputEvent::Fire);
        }
        Control::from_code(code).map(InputEvent::Press)
    }

    pub fn from_keyup(code: &str) -> Option<Self> {
        Control::from_code(code).map(InputEvent::Release)
    }
}

impl Keys {
    /// Update the flag for one control
    pub fn set(&mut self, control: Control, pressed: bool) {
        match control {
            Control::Thrust => self.thrust = pressed,
            Control::RotateLeft => self.rotate_left = pressed,
            Control::RotateRight => self.rotate_right = pressed,
        }
    }
}

/// Apply an input edge to the held-key state and the game
pub fn apply_event(keys: &mut Keys, state: &mut GameState, event: InputEvent) {
    match event {
        InputEvent::Press(control) => keys.set(control, true),
        InputEvent::Release(control) => keys.set(control, false),
        InputEvent::Fire => {
            state.fire();
        }
    }
}
