//! Axis-aligned rectangle geometry for the runner and elevator cars
//!
//! Screen space: x grows to the right, y grows downward, so `min` is the
//! top-left corner and `max` the bottom-right.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle of `size` centered on `center`
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Shrink by `inset` in total per axis, keeping the center.
    /// Never produces a negative size.
    pub fn shrink(&self, inset: Vec2) -> Self {
        let size = Vec2::new(
            (self.width() - inset.x).max(0.0),
            (self.height() - inset.y).max(0.0),
        );
        let min = self.min + inset * 0.5;
        Self {
            min,
            max: min + size,
        }
    }

    /// Intersection test. Touching edges count; empty rectangles never intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.width() <= 0.0 || self.height() <= 0.0 || other.width() <= 0.0 || other.height() <= 0.0 {
            return false;
        }
        !(self.max.x < other.min.x
            || self.max.y < other.min.y
            || self.min.x > other.max.x
            || self.min.y > other.max.y)
    }
}
