//! Vertex types for rendering.

use bytemuck::{Pod, Zeroable};

/// Ribbon vertex: position only, matching the flat xyz terrain buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct RibbonVertex {
    pub position: [f32; 3],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_positions_cast_to_vertices() {
        let positions = [0.0_f32, 1.0, 2.0, 3.0, 4.0, 5.0];
        let vertices: &[RibbonVertex] = bytemuck::cast_slice(&positions);
        assert_eq!(vertices.len(), 2);
        assert_eq!(vertices[1].position, [3.0, 4.0, 5.0]);
    }
}
