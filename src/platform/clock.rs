//! Fixed timestep driver
//!
//! Frames arrive at whatever rate the host manages; the simulation is fed
//! equal slices. Large gaps (tab in background, debugger pause) are clamped
//! so we never try to catch up on seconds of backlog.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone)]
pub struct FixedStep {
    pub step: f32,
    pub max_substeps: u32,
    pub max_frame_dt: f32,
    accumulator: f32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

impl FixedStep {
    pub fn new(step: f32) -> Self {
        Self {
            step,
            max_substeps: MAX_SUBSTEPS,
            max_frame_dt: MAX_FRAME_DT,
            accumulator: 0.0,
        }
    }

    /// Feed a frame delta, returns how many fixed steps to run
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 || self.step <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt.min(self.max_frame_dt);

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_substeps {
            self.accumulator -= self.step;
            steps += 1;
        }

        // Drop backlog we refused to simulate
        if steps == self.max_substeps && self.accumulator >= self.step {
            log::debug!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        steps
    }

    /// Leftover time as a fraction of a step (for render interpolation)
    pub fn alpha(&self) -> f32 {
        if self.step <= 0.0 {
            0.0
        } else {
            self.accumulator / self.step
        }
    }
}
