use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

/// A point in a figure's local (unrotated, unscaled) space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Joint {
    pub x: f32,
    pub y: f32,
}

impl Joint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Vector from `self` to `other`
    pub fn vector_to(self, other: Joint) -> Vec2 {
        Vec2::new(other.x - self.x, other.y - self.y)
    }

    pub fn distance(self, other: Joint) -> f32 {
        self.vector_to(other).length()
    }

    pub fn offset(self, delta: Vec2) -> Joint {
        Joint::new(self.x + delta.x, self.y + delta.y)
    }
}

impl From<Joint> for Pos2 {
    fn from(joint: Joint) -> Self {
        Pos2::new(joint.x, joint.y)
    }
}

impl From<Pos2> for Joint {
    fn from(pos: Pos2) -> Self {
        Joint::new(pos.x, pos.y)
    }
}

impl From<[f32; 2]> for Joint {
    fn from([x, y]: [f32; 2]) -> Self {
        Joint::new(x, y)
    }
}

impl From<Joint> for [f32; 2] {
    fn from(joint: Joint) -> Self {
        [joint.x, joint.y]
    }
}
