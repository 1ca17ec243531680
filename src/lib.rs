//! Spy's Return - A single-screen elevator-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, elevators, collisions, progression, scoring)
//! - `settings`: Data-driven game tuning
//! - `persistence`: Key-value storage backends
//! - `highscores`: High score persistence collaborator
//! - `platform`: Clock and input adapters feeding the simulation

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::HighScoreStore;
pub use settings::Settings;

/// Game configuration constants (defaults for [`Settings`])
pub mod consts {
    /// Fixed simulation timestep used by the runners (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta accepted by the clock (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// HUD band at the top of the screen; elevators stay below it
    pub const HUD_HEIGHT: f32 = 80.0;
    pub const FLOOR_HEIGHT: f32 = 100.0;
    pub const FLOORS_PER_LEVEL: u32 = 6;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    /// Horizontal run speed (pixels/s)
    pub const PLAYER_SPEED: f32 = 200.0;
    /// Slowest run speed a settings file may ask for
    pub const MIN_PLAYER_SPEED: f32 = 10.0;

    /// Elevator defaults
    pub const ELEVATOR_COUNT: usize = 6;
    pub const ELEVATOR_WIDTH: f32 = 20.0;
    pub const ELEVATOR_HEIGHT: f32 = 60.0;
    /// Random base speed range (inclusive)
    pub const ELEVATOR_BASE_SPEED_MIN: u32 = 80;
    pub const ELEVATOR_BASE_SPEED_MAX: u32 = 160;
    /// Speed added per level
    pub const LEVEL_SPEED_BOOST: f32 = 20.0;
    /// Speed added per elevator index (right-hand shafts run faster)
    pub const INDEX_SPEED_BOOST: f32 = 5.0;
    /// Speed units per radian/second of oscillation
    pub const SPEED_TO_ANGULAR: f32 = 100.0;

    /// Collision leniency (pixels removed from the player hitbox)
    pub const LENIENCY_HORIZONTAL: f32 = 5.0;
    pub const LENIENCY_VERTICAL: f32 = 3.0;

    /// Timed gameplay state (seconds)
    pub const INVULNERABILITY_DURATION: f32 = 0.3;
    pub const TRANSITION_DURATION: f32 = 0.4;

    /// Scoring
    pub const FLOOR_POINTS: u64 = 50;
    pub const LEVEL_BONUS: u64 = 100;
    pub const CLEAN_RUN_BASE_BONUS: u64 = 100;
    pub const CLEAN_RUN_FLOOR_INCREMENT: u64 = 10;
    /// Points per distance threshold crossed
    pub const MOVEMENT_SCORE_RATE: u64 = 1;
    /// Pixels of travel per distance award
    pub const MOVEMENT_SCORE_THRESHOLD: f32 = 10.0;
    /// Smallest distance threshold a settings file may ask for
    pub const MIN_MOVEMENT_SCORE_THRESHOLD: f32 = 1.0;
}

/// Cubic ease-out, `t` in [0, 1]
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}
