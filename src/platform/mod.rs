//! Platform adapters
//!
//! Turn raw frame timing and key state into what the simulation consumes:
//! - `clock`: fixed-step accumulator
//! - `input`: held keys to edge-triggered `TickInput`

pub mod clock;
pub mod input;

pub use clock::FixedStep;
pub use input::{EdgeDetector, Key};
