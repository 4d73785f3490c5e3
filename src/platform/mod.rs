//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keyboard codes to ship controls)
//! - Time/ticks (fixed-cadence frame clock)

pub mod clock;
pub mod input;

pub use clock::FrameClock;
pub use input::{Control, InputEvent, apply_event};
