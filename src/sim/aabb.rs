//! Axis-aligned bounding boxes
//!
//! Every entity exposes its extent through [`Bounded`], so overlap tests never
//! need to know which kind of entity they are looking at.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (y-up)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box horizontally centered on `anchor.x` that rises `height` above `anchor.y`
    pub fn standing(anchor: Vec2, width: f32, height: f32) -> Self {
        let half = width / 2.0;
        Self {
            min: Vec2::new(anchor.x - half, anchor.y),
            max: Vec2::new(anchor.x + half, anchor.y + height),
        }
    }

    /// Square of side `2 * radius` centered on `center`
    pub fn around(center: Vec2, radius: f32) -> Self {
        let r = Vec2::splat(radius);
        Self {
            min: center - r,
            max: center + r,
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap: boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
    }
}

/// Anything that occupies space in the world
pub trait Bounded {
    fn bounds(&self) -> Aabb;

    fn overlaps<B: Bounded + ?Sized>(&self, other: &B) -> bool {
        self.bounds().overlaps(&other.bounds())
    }
}

impl Bounded for Aabb {
    fn bounds(&self) -> Aabb {
        *self
    }
}
