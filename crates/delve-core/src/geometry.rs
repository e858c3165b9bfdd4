use serde::{Deserialize, Serialize};

/// World-space position. The ground plane is X/Z, Y points up.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn distance(&self, other: Vec3) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Point on the ground plane at `radius` from this one, in the direction
    /// of `angle` (radians, 0 = +Z, same convention as entity rotation).
    pub fn on_ground(&self, angle: f32, radius: f32) -> Vec3 {
        Vec3 {
            x: self.x + radius * angle.sin(),
            y: self.y,
            z: self.z + radius * angle.cos(),
        }
    }
}

/// Screen-space position in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
