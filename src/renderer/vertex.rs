//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Floats per vertex when flattened for upload
    pub const FLOATS: usize = 6;
}

/// Flatten vertices into a float slice without copying
pub fn as_floats(vertices: &[Vertex]) -> &[f32] {
    bytemuck::cast_slice(vertices)
}

/// Colors for toy elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.94, 0.94, 0.94, 1.0];
    pub const EDGE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const BALL: [f32; 4] = [1.0, 0.255, 0.212, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_layout() {
        let vertices = [
            Vertex::new(1.0, 2.0, colors::BALL),
            Vertex::new(3.0, 4.0, colors::EDGE),
        ];
        let floats = as_floats(&vertices);
        assert_eq!(floats.len(), 2 * Vertex::FLOATS);
        assert_eq!(&floats[..2], &[1.0, 2.0]);
        assert_eq!(&floats[6..8], &[3.0, 4.0]);
        assert_eq!(&floats[8..12], &colors::EDGE);
    }

    #[test]
    fn test_palette_is_opaque_and_distinct() {
        for c in [colors::BACKGROUND, colors::EDGE, colors::BALL] {
            assert_eq!(c[3], 1.0);
        }
        assert_ne!(colors::BACKGROUND, colors::EDGE);
        assert_ne!(colors::BACKGROUND, colors::BALL);
    }
}
