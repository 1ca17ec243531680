//! Scoring rules
//!
//! - distance: a few points for every stretch of floor covered
//! - clean run: bonus for crossing a floor without changing your mind
//! - floor/level completion: flat awards
//!
//! Score only ever goes up within a session.

use serde::{Deserialize, Serialize};

use super::player::Direction;
use crate::settings::ScoreTuning;

/// Result of adding points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreUpdate {
    pub score: u64,
    /// Set when the award raised the high score
    pub new_high: Option<u64>,
}

/// Clean-run bonus for a floor: doubles per level, grows linearly per floor
pub fn clean_run_amount(tuning: &ScoreTuning, level: u32, floor: u32) -> u64 {
    let level_multiplier = 1u64.checked_shl(level.saturating_sub(1)).unwrap_or(u64::MAX);
    tuning
        .clean_run_base
        .saturating_mul(level_multiplier)
        .saturating_add(u64::from(floor.saturating_sub(1)) * tuning.clean_run_floor_increment)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Score {
    pub score: u64,
    pub high_score: u64,
    /// Distance (pixels) not yet converted to points
    pub distance_accumulator: f32,
    /// First direction pressed on the current floor
    pub initial_direction_this_floor: Option<Direction>,
    /// The runner pressed the other way at some point this floor
    pub bonus_streak_broken: bool,
}

impl Score {
    pub fn new(high_score: u64) -> Self {
        Self {
            high_score,
            ..Default::default()
        }
    }

    /// Track a directional input for the clean-run bonus.
    /// `already_moving` is the runner's state before the input.
    pub fn record_direction(&mut self, direction: Direction, already_moving: bool) {
        if !already_moving {
            self.initial_direction_this_floor = Some(direction);
            self.bonus_streak_broken = false;
        } else if self.initial_direction_this_floor != Some(direction) {
            self.bonus_streak_broken = true;
        }
    }

    /// Clean-run bonus earned on the floor being crossed, if any
    pub fn clean_run_bonus(&self, tuning: &ScoreTuning, level: u32, floor: u32) -> Option<u64> {
        if self.bonus_streak_broken || self.initial_direction_this_floor.is_none() {
            return None;
        }
        Some(clean_run_amount(tuning, level, floor))
    }

    /// Convert travelled distance into points, carrying the remainder.
    /// Returns the points earned (already added to the score).
    pub fn accrue_distance(&mut self, distance: f32, tuning: &ScoreTuning) -> u64 {
        self.distance_accumulator += distance.abs();
        if !(tuning.movement_threshold > 0.0) || !self.distance_accumulator.is_finite() {
            self.distance_accumulator = 0.0;
            return 0;
        }

        let steps = (self.distance_accumulator / tuning.movement_threshold).floor();
        if steps < 1.0 {
            return 0;
        }
        self.distance_accumulator =
            (self.distance_accumulator - steps * tuning.movement_threshold).max(0.0);

        let earned = (steps as u64).saturating_mul(tuning.movement_rate);
        self.score = self.score.saturating_add(earned);
        earned
    }

    /// Add points and raise the high score if beaten
    pub fn award(&mut self, points: u64) -> ScoreUpdate {
        self.score = self.score.saturating_add(points);
        ScoreUpdate {
            score: self.score,
            new_high: self.update_high_score(),
        }
    }

    /// Raise the high score when strictly exceeded
    pub fn update_high_score(&mut self) -> Option<u64> {
        if self.score > self.high_score {
            self.high_score = self.score;
            Some(self.high_score)
        } else {
            None
        }
    }

    /// Forget per-floor tracking (after a cross)
    pub fn reset_floor_tracking(&mut self) {
        self.initial_direction_this_floor = None;
        self.bonus_streak_broken = false;
    }

    /// Fresh run; the high score survives
    pub fn reset(&mut self) {
        *self = Self::new(self.high_score);
    }
}
