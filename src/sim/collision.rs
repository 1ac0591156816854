//! Axis-aligned bounding boxes and overlap tests
//!
//! Every collidable entity is an upright box centered on its position, so the
//! whole collision story is one strict interval-overlap check per axis.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box given by its min/max corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box of the given size centered at `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }
}

/// Strict overlap test: boxes that only touch along an edge do not collide
#[inline]
pub fn check_collision(a: &Aabb, b: &Aabb) -> bool {
    a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
}
