//! Game settings and tuning
//!
//! Every gameplay number lives here so a session can be rebalanced from JSON.
//! Persisted separately from the high score.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::KeyValueStore;
use crate::sim::Direction;

/// Playfield geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    /// HUD band at the top of the screen
    pub hud_height: f32,
    pub floor_height: f32,
    pub floors_per_level: u32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            hud_height: HUD_HEIGHT,
            floor_height: FLOOR_HEIGHT,
            floors_per_level: FLOORS_PER_LEVEL,
        }
    }
}

impl Arena {
    /// Center y of a floor (0-based, floor 0 at the bottom)
    pub fn floor_y(&self, floor: u32) -> f32 {
        self.height - (floor as f32 + 1.0) * self.floor_height + self.hud_height
    }

    /// Center x a runner of the given half width starts from when crossing in `direction`
    pub fn start_x(&self, direction: Direction, half_width: f32) -> f32 {
        match direction {
            Direction::Right => half_width,
            Direction::Left => self.width - half_width,
        }
    }
}

/// Runner tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    /// Horizontal speed (pixels/s)
    pub speed: f32,
    /// Pixels shaved off the hitbox width (split evenly per side)
    pub leniency_horizontal: f32,
    /// Pixels shaved off the hitbox height (split evenly per side)
    pub leniency_vertical: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed: PLAYER_SPEED,
            leniency_horizontal: LENIENCY_HORIZONTAL,
            leniency_vertical: LENIENCY_VERTICAL,
        }
    }
}

/// Elevator generation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevatorTuning {
    pub count: usize,
    pub width: f32,
    pub height: f32,
    pub base_speed_min: u32,
    pub base_speed_max: u32,
    pub level_speed_boost: f32,
    pub index_speed_boost: f32,
    pub speed_to_angular: f32,
}

impl Default for ElevatorTuning {
    fn default() -> Self {
        Self {
            count: ELEVATOR_COUNT,
            width: ELEVATOR_WIDTH,
            height: ELEVATOR_HEIGHT,
            base_speed_min: ELEVATOR_BASE_SPEED_MIN,
            base_speed_max: ELEVATOR_BASE_SPEED_MAX,
            level_speed_boost: LEVEL_SPEED_BOOST,
            index_speed_boost: INDEX_SPEED_BOOST,
            speed_to_angular: SPEED_TO_ANGULAR,
        }
    }
}

/// Point values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTuning {
    pub floor_points: u64,
    pub level_bonus: u64,
    pub clean_run_base: u64,
    pub clean_run_floor_increment: u64,
    pub movement_rate: u64,
    pub movement_threshold: f32,
}

impl Default for ScoreTuning {
    fn default() -> Self {
        Self {
            floor_points: FLOOR_POINTS,
            level_bonus: LEVEL_BONUS,
            clean_run_base: CLEAN_RUN_BASE_BONUS,
            clean_run_floor_increment: CLEAN_RUN_FLOOR_INCREMENT,
            movement_rate: MOVEMENT_SCORE_RATE,
            movement_threshold: MOVEMENT_SCORE_THRESHOLD,
        }
    }
}

/// Timed gameplay windows (seconds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub invulnerability: f32,
    pub transition: f32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            invulnerability: INVULNERABILITY_DURATION,
            transition: TRANSITION_DURATION,
        }
    }
}

/// Complete game tuning
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub arena: Arena,
    pub player: PlayerTuning,
    pub elevators: ElevatorTuning,
    pub scoring: ScoreTuning,
    pub timing: Timing,
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "spysReturnSettings";

    /// Parse settings from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.normalized())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Clamp values that would stall or break the simulation
    pub fn normalized(mut self) -> Self {
        self.arena.floors_per_level = self.arena.floors_per_level.max(1);
        self.arena.floor_height = self.arena.floor_height.max(1.0);
        self.arena.width = self.arena.width.max(self.player.width);

        if self.elevators.base_speed_min > self.elevators.base_speed_max {
            std::mem::swap(
                &mut self.elevators.base_speed_min,
                &mut self.elevators.base_speed_max,
            );
        }
        if self.elevators.speed_to_angular <= 0.0 {
            self.elevators.speed_to_angular = SPEED_TO_ANGULAR;
        }

        if !(self.scoring.movement_threshold > 0.0) {
            self.scoring.movement_threshold = MOVEMENT_SCORE_THRESHOLD;
        }
        self.scoring.movement_threshold = self
            .scoring
            .movement_threshold
            .max(MIN_MOVEMENT_SCORE_THRESHOLD);

        if !self.player.speed.is_finite() {
            self.player.speed = PLAYER_SPEED;
        }
        self.player.speed = self.player.speed.max(MIN_PLAYER_SPEED);

        self.timing.invulnerability = self.timing.invulnerability.max(0.0);
        self.timing.transition = self.timing.transition.max(0.0);
        self
    }

    /// Load settings from a store, falling back to defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Some(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from storage");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings: {}", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to a store
    pub fn save(&self, store: &mut impl KeyValueStore) {
        match self.to_json() {
            Ok(json) => {
                if store.set(Self::STORAGE_KEY, &json) {
                    log::info!("Settings saved");
                }
            }
            Err(e) => log::warn!("Could not serialize settings: {}", e),
        }
    }
}
