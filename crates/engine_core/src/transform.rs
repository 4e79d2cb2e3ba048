//! World placement of renderable meshes.

use glam::{Vec2, Vec3};

/// A world-space translation applied to a whole mesh.
///
/// Terrain patches are never rotated or scaled; only their origin moves.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub position: Vec3,
}

impl Transform {
    /// Create a new transform at the given position.
    pub fn from_position(position: Vec3) -> Self {
        Self { position }
    }

    /// Horizontal (x, z) part of the position.
    pub fn ground_offset(&self) -> Vec2 {
        Vec2::new(self.position.x, self.position.z)
    }

    /// Move on the ground plane, leaving the height untouched.
    pub fn set_ground_offset(&mut self, offset: Vec2) {
        self.position.x = offset.x;
        self.position.z = offset.y;
    }

    /// Translate by a world-space delta.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_offset_keeps_height() {
        let mut t = Transform::from_position(Vec3::new(1.0, 4.0, 2.0));
        t.set_ground_offset(Vec2::new(-3.0, 9.0));
        assert_eq!(t.position, Vec3::new(-3.0, 4.0, 9.0));
        assert_eq!(t.ground_offset(), Vec2::new(-3.0, 9.0));
    }
}
