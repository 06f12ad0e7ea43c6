//! Frame ticks and fixed-timestep accumulation
//!
//! Shakes guard against being advanced twice in one frame by remembering the
//! [`FrameTick`] they last consumed. The host owns the counter.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Identifier of one logical frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct FrameTick(pub u64);

impl FrameTick {
    #[inline]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Monotonic frame counter with a fixed-step accumulator
#[derive(Debug, Clone)]
pub struct FrameClock {
    tick: FrameTick,
    step: f32,
    accumulator: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

impl FrameClock {
    pub fn new(step: f32) -> Self {
        Self {
            tick: FrameTick::default(),
            step,
            accumulator: 0.0,
        }
    }

    /// Tick of the most recent step
    pub fn current(&self) -> FrameTick {
        self.tick
    }

    /// Fixed step length (seconds)
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Start a new logical frame and return its tick
    pub fn advance(&mut self) -> FrameTick {
        self.tick = self.tick.next();
        self.tick
    }

    /// Accumulate `frame_dt` and return the ticks of the fixed steps it covers
    ///
    /// At most [`MAX_SUBSTEPS`] steps are produced. Leftover time beyond the cap
    /// is dropped to avoid a spiral of death.
    pub fn accumulate(&mut self, frame_dt: f32) -> Vec<FrameTick> {
        if self.step <= 0.0 {
            return vec![self.advance()];
        }

        self.accumulator += frame_dt.max(0.0);

        let mut ticks = Vec::new();
        while self.accumulator >= self.step && (ticks.len() as u32) < MAX_SUBSTEPS {
            ticks.push(self.advance());
            self.accumulator -= self.step;
        }
        if ticks.len() as u32 == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(self.step);
        }
        ticks
    }
}
