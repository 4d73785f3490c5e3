//! Fixed-cadence frame clock
//!
//! Animation-frame timestamps arrive at whatever rate the display runs; the
//! simulation wants one tick per nominal frame. The clock banks real time and
//! hands out whole ticks, capped so a stalled tab can't trigger a burst.

use crate::consts::{FRAME_MS, MAX_SUBSTEPS};

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f64,
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed an animation-frame timestamp (ms); returns ticks to run now
    ///
    /// The first call always yields one tick.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let elapsed = match self.last_time {
            Some(last) => (now_ms - last).clamp(0.0, FRAME_MS * MAX_SUBSTEPS as f64),
            None => FRAME_MS,
        };
        self.last_time = Some(now_ms);
        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= FRAME_MS && ticks < MAX_SUBSTEPS {
            self.accumulator -= FRAME_MS;
            ticks += 1;
        }
        ticks
    }
}
