//! Sprite tessellation
//!
//! Turns scene sprites into two-triangle quads for any backend that draws
//! textured triangles. Positions stay in logical pixels; the backend applies
//! the viewport projection.

use glam::Vec2;

use super::scene::{Scene, Sprite, TextureId};
use super::vertex::Vertex;

/// Two triangles covering the sprite's destination
pub fn sprite_quad(sprite: &Sprite, texture_size: Vec2) -> [Vertex; 6] {
    let dst = sprite.dst;
    let (u0, v0, u1, v1) = match sprite.src {
        Some(src) if texture_size.x > 0.0 && texture_size.y > 0.0 => (
            src.left() / texture_size.x,
            src.top() / texture_size.y,
            src.right() / texture_size.x,
            src.bottom() / texture_size.y,
        ),
        _ => (0.0, 0.0, 1.0, 1.0),
    };
    let (v0, v1) = if sprite.flip_y { (v1, v0) } else { (v0, v1) };

    let tl = Vertex::new(dst.left(), dst.top(), u0, v0, sprite.tint);
    let tr = Vertex::new(dst.right(), dst.top(), u1, v0, sprite.tint);
    let bl = Vertex::new(dst.left(), dst.bottom(), u0, v1, sprite.tint);
    let br = Vertex::new(dst.right(), dst.bottom(), u1, v1, sprite.tint);

    [tl, bl, tr, tr, bl, br]
}

/// Vertices for every sprite of one texture, in draw order
pub fn batch(scene: &Scene, texture: TextureId, texture_size: Vec2) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for sprite in scene.sprites_for(texture) {
        vertices.extend_from_slice(&sprite_quad(sprite, texture_size));
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::vertex::colors;
    use crate::sim::Rect;

    #[test]
    fn test_quad_uvs_from_atlas_rect() {
        let sprite = Sprite::quad(
            TextureId::Breakout,
            Rect::new(32.0, 64.0, 64.0, 16.0),
            Vec2::new(10.0, 20.0),
        );
        let verts = sprite_quad(&sprite, Vec2::new(192.0, 256.0));

        // Top-left corner
        assert_eq!(verts[0].position, [10.0, 20.0]);
        assert_eq!(verts[0].uv, [32.0 / 192.0, 0.25]);
        // Bottom-right corner
        assert_eq!(verts[5].position, [74.0, 36.0]);
        assert_eq!(verts[5].uv, [0.5, 80.0 / 256.0]);
        assert!(verts.iter().all(|v| v.color == colors::WHITE));
    }

    #[test]
    fn test_flipped_whole_texture() {
        let sprite = Sprite {
            flip_y: true,
            ..Sprite::whole(TextureId::Pipe, Rect::new(0.0, -200.0, 70.0, 288.0))
        };
        let verts = sprite_quad(&sprite, Vec2::new(70.0, 288.0));
        assert_eq!(verts[0].uv, [0.0, 1.0]);
        assert_eq!(verts[5].uv, [1.0, 0.0]);
    }

    #[test]
    fn test_batch_filters_by_texture() {
        let mut scene = Scene::new(100.0, 100.0);
        scene.sprite(Sprite::whole(TextureId::Bird, Rect::new(0.0, 0.0, 1.0, 1.0)));
        scene.sprite(Sprite::whole(TextureId::Pipe, Rect::new(0.0, 0.0, 1.0, 1.0)));
        scene.sprite(Sprite::whole(TextureId::Pipe, Rect::new(5.0, 0.0, 1.0, 1.0)));

        let pipes = batch(&scene, TextureId::Pipe, Vec2::ONE);
        assert_eq!(pipes.len(), 12);
        assert_eq!(pipes[6].position, [5.0, 0.0]);
    }
}
