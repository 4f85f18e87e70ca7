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

    /// Byte stride of one vertex in a packed buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();

    /// Offset of `color` within a vertex
    pub const COLOR_OFFSET: usize = std::mem::size_of::<[f32; 2]>();
}

/// Colors for game elements
pub mod colors {
    pub const PLAYER: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const OBSTACLE: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    /// Star brightness per parallax layer, far to near
    pub const STAR_LAYERS: [[f32; 4]; 3] = [
        [0.45, 0.45, 0.55, 1.0],
        [0.7, 0.7, 0.8, 1.0],
        [1.0, 1.0, 1.0, 1.0],
    ];
}
