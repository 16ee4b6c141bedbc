//! Drag gesture math
//!
//! Turns a pair of screen points into a launch angle and a bounded magnitude.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_IMPULSE;
use crate::unit_from_angle;

/// A screen/world coordinate
pub type Point2D = Vec2;

/// Launch impulse derived from a drag gesture
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpulseVector {
    /// Launch direction (radians, counter-clockwise from +x)
    pub angle: f32,
    /// Launch strength in `[0, MAX_IMPULSE]`
    pub magnitude: f32,
}

impl ImpulseVector {
    /// Unit vector along the launch angle
    #[inline]
    pub fn direction(&self) -> Vec2 {
        unit_from_angle(self.angle)
    }

    /// Direction scaled by magnitude
    #[inline]
    pub fn to_vec2(&self) -> Vec2 {
        self.direction() * self.magnitude
    }
}

/// Angle of the vector from `a` to `b`; zero when the points coincide
#[inline]
pub fn angle_between(a: Point2D, b: Point2D) -> f32 {
    (b.y - a.y).atan2(b.x - a.x)
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Point2D, b: Point2D) -> f32 {
    a.distance(b)
}

/// Launch impulse for a drag from `start` to `end`
///
/// The launch points toward `end`, and the drag length is clamped to
/// `MAX_IMPULSE`.
pub fn impulse_from_drag(start: Point2D, end: Point2D) -> ImpulseVector {
    ImpulseVector {
        angle: angle_between(start, end),
        magnitude: distance(start, end).min(MAX_IMPULSE),
    }
}
