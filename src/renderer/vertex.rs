//! Vertex types for textured 2D sprites

use bytemuck::{Pod, Zeroable};

/// Sprite vertex: logical position, normalized texture coordinate, tint
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, u: f32, v: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
            color,
        }
    }

    /// Byte stride of one vertex in a packed buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Tints for sprites and text
pub mod colors {
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    /// Highlighted menu entry
    pub const HIGHLIGHT: [f32; 4] = [103.0 / 255.0, 1.0, 1.0, 1.0];
    /// Pause overlay text
    pub const PAUSE: [f32; 4] = [0.0, 121.0 / 255.0, 241.0 / 255.0, 1.0];
    pub const FPS: [f32; 4] = [0.0, 228.0 / 255.0, 48.0 / 255.0, 1.0];
    pub const GAME_OVER: [f32; 4] = [1.0, 0.3, 0.3, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_is_tightly_packed() {
        assert_eq!(Vertex::STRIDE, 32);
        let verts = [Vertex::new(1.0, 2.0, 0.5, 0.25, colors::WHITE); 2];
        let bytes: &[u8] = bytemuck::cast_slice(&verts);
        assert_eq!(bytes.len(), 64);
        let back: &[Vertex] = bytemuck::cast_slice(bytes);
        assert_eq!(back[1].uv, [0.5, 0.25]);
    }
}
