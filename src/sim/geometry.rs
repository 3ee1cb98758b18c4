//! Axis-aligned rectangle geometry and collision resolution
//!
//! Screen coordinates: x grows to the right, y grows downward, so the "top"
//! of a rect is its minimum y.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (origin is the top-left corner)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Rect of the given size centered on a point
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            origin: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn min_x(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn min_y(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.origin + self.size / 2.0
    }

    /// Strict overlap test (touching edges do not intersect)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min_x() < other.max_x()
            && self.max_x() > other.min_x()
            && self.min_y() < other.max_y()
            && self.max_y() > other.min_y()
    }

    /// Clamp horizontally so the rect lies within `[min_x, max_x]`
    ///
    /// A rect wider than the range is pinned to `min_x`.
    pub fn clamp_x(&mut self, min_x: f32, max_x: f32) {
        let hi = (max_x - self.width()).max(min_x);
        self.origin.x = self.origin.x.clamp(min_x, hi);
    }
}

/// The side of an obstacle a moving rect entered through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    /// Reflect the velocity component on this side's axis
    pub fn reflect(self, vel: Vec2) -> Vec2 {
        match self {
            Side::Left | Side::Right => Vec2::new(-vel.x, vel.y),
            Side::Top | Side::Bottom => Vec2::new(vel.x, -vel.y),
        }
    }

    /// Origin that places `mover` flush against this side of `obstacle`
    pub fn flush_origin(self, mover: &Rect, obstacle: &Rect) -> Vec2 {
        match self {
            Side::Left => Vec2::new(obstacle.min_x() - mover.width(), mover.min_y()),
            Side::Right => Vec2::new(obstacle.max_x(), mover.min_y()),
            Side::Top => Vec2::new(mover.min_x(), obstacle.min_y() - mover.height()),
            Side::Bottom => Vec2::new(mover.min_x(), obstacle.max_y()),
        }
    }
}

/// Find the side with the smallest penetration (minimum translation vector)
///
/// Ties go to the first side in left, right, top, bottom order.
pub fn resolve_overlap(mover: &Rect, obstacle: &Rect) -> Side {
    let candidates = [
        (Side::Left, mover.max_x() - obstacle.min_x()),
        (Side::Right, obstacle.max_x() - mover.min_x()),
        (Side::Top, mover.max_y() - obstacle.min_y()),
        (Side::Bottom, obstacle.max_y() - mover.min_y()),
    ];

    let mut best = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.1 < best.1 {
            best = *candidate;
        }
    }
    best.0
}
