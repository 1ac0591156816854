//! Fixed-rate frame driver
//!
//! Converts variable frame times into whole simulation ticks. One-shot input
//! edges are delivered on the first tick of a frame and then cleared.

use crate::consts::MAX_SUBSTEPS;
use crate::sim::{GameState, TickInput, tick};

/// Longest frame we try to catch up on (seconds)
const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
    max_substeps: u32,
}

impl FixedTimestep {
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            dt: 1.0 / ticks_per_second.max(1) as f32,
            accumulator: 0.0,
            max_substeps: MAX_SUBSTEPS,
        }
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Add a frame's elapsed time and return how many ticks are due
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);
        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < self.max_substeps {
            self.accumulator -= self.dt;
            substeps += 1;
        }
        substeps
    }

    /// Run every tick due this frame. Returns the number of ticks run.
    pub fn run_frame(&mut self, state: &mut GameState, input: &mut TickInput, frame_dt: f32) -> u32 {
        let substeps = self.advance(frame_dt);
        for _ in 0..substeps {
            tick(state, input);
            // Clear one-shot inputs after processing
            *input = TickInput::default();
        }
        substeps
    }
}
