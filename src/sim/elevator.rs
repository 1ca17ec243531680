//! Elevator cars
//!
//! Each car oscillates vertically in its shaft. Position is a pure function
//! of elapsed time and is recomputed every tick, never integrated, so a
//! session replays identically at any tick rate.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::settings::{Arena, ElevatorTuning};

/// A single elevator car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Elevator {
    pub id: u32,
    /// Shaft center x
    pub x: f32,
    /// Current center y
    pub y: f32,
    /// Center of the oscillation
    pub baseline_y: f32,
    pub amplitude: f32,
    /// Radians per second
    pub angular_speed: f32,
    /// Radians
    pub phase: f32,
    pub width: f32,
    pub height: f32,
}

impl Elevator {
    /// Center y at elapsed time `t` (seconds). The angle is reduced in f64
    /// so long sessions keep full resolution.
    #[inline]
    pub fn y_at(&self, t: f64) -> f32 {
        let angle = (f64::from(self.angular_speed) * t + f64::from(self.phase))
            .rem_euclid(std::f64::consts::TAU);
        self.baseline_y + self.amplitude * (angle as f32).sin()
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Bounding box at the current position
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.pos(), self.size())
    }

    /// Top edge of the car (where the cable attaches)
    pub fn top(&self) -> f32 {
        self.y - self.height / 2.0
    }
}

/// Oscillation speed for an elevator: random base, faster with level and shaft index
pub fn speed_for(tuning: &ElevatorTuning, level: u32, index: usize, base_speed: f32) -> f32 {
    base_speed + level as f32 * tuning.level_speed_boost + index as f32 * tuning.index_speed_boost
}

/// All elevators on screen, ordered by id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElevatorSet {
    elevators: Vec<Elevator>,
}

impl ElevatorSet {
    /// Build a fresh set for `level`. Shafts are evenly spaced across the
    /// arena and cars stay below the HUD band.
    pub fn generate(arena: &Arena, tuning: &ElevatorTuning, level: u32, rng: &mut impl Rng) -> Self {
        let min_y = arena.hud_height + tuning.height / 2.0;
        let max_y = arena.height - tuning.height / 2.0;
        let amplitude = ((max_y - min_y) / 2.0).max(0.0);
        let baseline_y = (min_y + max_y) / 2.0;
        let spacing_x = arena.width / (tuning.count as f32 + 1.0);

        let elevators = (0..tuning.count)
            .map(|i| {
                let base_speed = rng.random_range(tuning.base_speed_min..=tuning.base_speed_max) as f32;
                let speed = speed_for(tuning, level, i, base_speed);
                let phase = rng.random_range(0.0..std::f32::consts::TAU);
                Elevator {
                    id: i as u32,
                    x: spacing_x * (i as f32 + 1.0),
                    y: baseline_y,
                    baseline_y,
                    amplitude,
                    angular_speed: speed / tuning.speed_to_angular,
                    phase,
                    width: tuning.width,
                    height: tuning.height,
                }
            })
            .collect();

        log::debug!("Generated {} elevators for level {}", tuning.count, level);
        Self { elevators }
    }

    /// Build from explicit cars (sorted by id)
    pub fn from_elevators(mut elevators: Vec<Elevator>) -> Self {
        elevators.sort_by_key(|e| e.id);
        Self { elevators }
    }

    /// Move every car to its position at elapsed time `t`
    pub fn advance(&mut self, t: f64) {
        for elevator in &mut self.elevators {
            elevator.y = elevator.y_at(t);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Elevator> {
        self.elevators.iter()
    }

    pub fn as_slice(&self) -> &[Elevator] {
        &self.elevators
    }

    pub fn len(&self) -> usize {
        self.elevators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elevators.is_empty()
    }
}
