//! Floor and level progression
//!
//! Floors alternate crossing direction: floor 0 is crossed left-to-right,
//! floor 1 right-to-left, and so on. Finishing the last floor of a level
//! starts the next level back on floor 0 heading right.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::player::{Direction, Player};
use crate::ease_out_cubic;

/// Positional interpolation moving the runner to its next floor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub from: Vec2,
    pub to: Vec2,
    pub elapsed: f32,
    pub duration: f32,
}

impl Transition {
    pub fn new(from: Vec2, to: Vec2, duration: f32) -> Self {
        Self {
            from,
            to,
            elapsed: 0.0,
            duration: duration.max(0.0),
        }
    }

    /// Linear progress in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    /// Eased position at the current progress
    pub fn position(&self) -> Vec2 {
        self.from.lerp(self.to, ease_out_cubic(self.progress()))
    }

    /// Advance by `dt` and return the new position
    pub fn advance(&mut self, dt: f32) -> Vec2 {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.position()
    }

    pub fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }
}

/// What a floor cross completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cross {
    /// Level the crossed floor belonged to
    pub level: u32,
    /// Crossed floor, 1-based
    pub floor: u32,
    /// The cross also finished the level
    pub level_up: bool,
}

/// Level/floor counters and the in-flight floor transition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progression {
    /// Current level, starting at 1
    pub level: u32,
    /// Current floor, 0-based
    pub floor: u32,
    pub floors_per_level: u32,
    /// Direction the current floor must be crossed in
    pub crossing_direction: Direction,
    /// Set while the runner animates to its next floor
    pub transition: Option<Transition>,
}

impl Progression {
    pub fn new(floors_per_level: u32) -> Self {
        Self {
            level: 1,
            floor: 0,
            floors_per_level: floors_per_level.max(1),
            crossing_direction: Direction::Right,
            transition: None,
        }
    }

    #[inline]
    pub fn transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Current floor, 1-based
    #[inline]
    pub fn display_floor(&self) -> u32 {
        self.floor + 1
    }

    /// Whether the runner finished the floor: it must be heading the
    /// required way and have reached that side. The opposite edge only clamps.
    pub fn edge_reached(&self, player: &Player, screen_width: f32) -> bool {
        player.committed_direction == Some(self.crossing_direction)
            && player.at_edge(self.crossing_direction, screen_width)
    }

    /// Move to the next floor (or level) and return what was completed
    pub fn advance(&mut self) -> Cross {
        let cross = Cross {
            level: self.level,
            floor: self.display_floor(),
            level_up: self.floor + 1 >= self.floors_per_level,
        };

        if cross.level_up {
            self.level += 1;
            self.floor = 0;
            self.crossing_direction = Direction::Right;
        } else {
            self.floor += 1;
            self.crossing_direction = self.crossing_direction.flipped();
        }

        cross
    }

    pub fn begin_transition(&mut self, transition: Transition) {
        self.transition = Some(transition);
    }

    /// Advance the in-flight transition. Returns the runner position and
    /// whether the animation finished; the transition is cleared once done.
    pub fn step_transition(&mut self, dt: f32) -> Option<(Vec2, bool)> {
        let transition = self.transition.as_mut()?;
        let pos = transition.advance(dt);
        let done = transition.is_complete();
        if done {
            self.transition = None;
        }
        Some((pos, done))
    }
}
