//! The runner
//!
//! Moves horizontally along the current floor. The y coordinate is owned by
//! the floor index; only floor transitions change it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::settings::PlayerTuning;

/// Horizontal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// -1 for left, +1 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// The player's runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Center position
    pub pos: Vec2,
    pub size: Vec2,
    pub facing: Direction,
    /// Running (set by the first directional input on a floor)
    pub moving: bool,
    /// Direction of travel; `Some` only while `moving`
    pub committed_direction: Option<Direction>,
    pub invulnerable: bool,
}

impl Player {
    pub fn new(tuning: &PlayerTuning, pos: Vec2) -> Self {
        Self {
            pos,
            size: Vec2::new(tuning.width, tuning.height),
            facing: Direction::Right,
            moving: false,
            committed_direction: None,
            invulnerable: false,
        }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.size.x / 2.0
    }

    /// Full bounding box
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.pos, self.size)
    }

    /// Bounding box shrunk by the collision leniency
    pub fn hitbox(&self, leniency: Vec2) -> Rect {
        self.bounds().shrink(leniency)
    }

    /// Start (or redirect) running
    pub fn commit(&mut self, direction: Direction) {
        self.moving = true;
        self.committed_direction = Some(direction);
        self.facing = direction;
    }

    /// Stop running and drop the committed direction
    pub fn stop(&mut self) {
        self.moving = false;
        self.committed_direction = None;
    }

    /// Advance along the floor, clamped to the screen.
    /// Returns the absolute horizontal displacement.
    pub fn step(&mut self, speed: f32, dt: f32, screen_width: f32) -> f32 {
        let Some(direction) = self.committed_direction else {
            return 0.0;
        };
        if !self.moving {
            return 0.0;
        }

        let start_x = self.pos.x;
        let half = self.half_width();
        let max_x = (screen_width - half).max(half);
        self.pos.x = (start_x + speed * dt * direction.sign()).clamp(half, max_x);
        (self.pos.x - start_x).abs()
    }

    /// Whether the runner is at (or past) the screen edge on `direction`'s side
    pub fn at_edge(&self, direction: Direction, screen_width: f32) -> bool {
        let half = self.half_width();
        match direction {
            Direction::Left => self.pos.x <= half,
            Direction::Right => self.pos.x >= screen_width - half,
        }
    }
}
