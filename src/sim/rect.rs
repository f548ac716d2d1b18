//! Playfield rectangle geometry
//!
//! The playfield is an axis-aligned rectangle: `min` is the top-left corner,
//! `max` the bottom-right (screen coordinates, y grows downward). Entities
//! never leave it - the drone is clamped inside, targets reflect off it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in screen space
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

    /// Rectangle with the given size anchored at the origin
    pub fn from_size(width: f32, height: f32) -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(width, height),
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

    /// Center point of the rectangle
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Shrink the rectangle by `d` on all four sides
    pub fn inset(&self, d: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(d),
            max: self.max - Vec2::splat(d),
        }
    }

    /// Clamp a point into the rectangle (per axis)
    pub fn clamp_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }

    /// Check if a point is inside the rectangle (edges inclusive)
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}
