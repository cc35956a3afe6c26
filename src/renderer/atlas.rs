//! Sprite sheet quad tables
//!
//! Quads are source rectangles in texture pixels. The tables are built once
//! from fixed sheet layouts, so every index derived from a valid entity is in
//! range.

use crate::sim::Rect;
use crate::sim::breakout::state::{BALL_SKINS, PADDLE_SIZES, PADDLE_SKINS};

/// Bricks per sheet row
const BRICK_SHEET_COLUMNS: usize = 6;
/// Brick quads on the sheet (five colours of four tiers, plus the locked brick)
pub const BRICK_QUADS: usize = 21;

/// Quad tables for the Breakout sheets
#[derive(Debug, Clone, PartialEq)]
pub struct Atlas {
    paddles: Vec<Rect>,
    balls: Vec<Rect>,
    bricks: Vec<Rect>,
    hearts: [Rect; 2],
}

impl Default for Atlas {
    fn default() -> Self {
        Self::new()
    }
}

impl Atlas {
    /// Build every quad table for the Breakout sheet
    pub fn new() -> Self {
        Self {
            paddles: paddle_quads(),
            balls: ball_quads(),
            bricks: brick_quads(),
            hearts: [Rect::new(0.0, 0.0, 10.0, 9.0), Rect::new(10.0, 0.0, 10.0, 9.0)],
        }
    }

    /// Paddle quad for a 1-based skin and size
    pub fn paddle(&self, skin: u8, size: u8) -> Rect {
        let skin = skin.clamp(1, PADDLE_SKINS) as usize;
        let size = size.clamp(1, PADDLE_SIZES) as usize;
        self.paddles[(size - 1) + PADDLE_SIZES as usize * (skin - 1)]
    }

    /// Ball quad for a 0-based skin
    pub fn ball(&self, skin: u8) -> Rect {
        self.balls[(skin as usize).min(self.balls.len() - 1)]
    }

    /// Brick quad by sprite index
    pub fn brick(&self, index: usize) -> Rect {
        self.bricks[index.min(self.bricks.len() - 1)]
    }

    /// Full or empty heart
    pub fn heart(&self, full: bool) -> Rect {
        if full { self.hearts[0] } else { self.hearts[1] }
    }

    /// Number of paddle quads (skins times sizes)
    pub fn paddle_count(&self) -> usize {
        self.paddles.len()
    }

    /// Number of ball skins
    pub fn ball_count(&self) -> usize {
        self.balls.len()
    }

    /// Number of brick sprites
    pub fn brick_count(&self) -> usize {
        self.bricks.len()
    }
}

/// Four skins, each a 32px band starting at y=64 holding four sizes
fn paddle_quads() -> Vec<Rect> {
    let mut quads = Vec::with_capacity((PADDLE_SKINS * PADDLE_SIZES) as usize);
    for skin in 0..PADDLE_SKINS {
        let y = 64.0 + skin as f32 * 32.0;
        quads.push(Rect::new(0.0, y, 32.0, 16.0));
        quads.push(Rect::new(32.0, y, 64.0, 16.0));
        quads.push(Rect::new(96.0, y, 96.0, 16.0));
        quads.push(Rect::new(0.0, y + 16.0, 128.0, 16.0));
    }
    quads
}

/// 8x8 balls: four at y=48, three more below them
fn ball_quads() -> Vec<Rect> {
    (0..BALL_SKINS as usize)
        .map(|i| {
            let (col, y) = if i < 4 { (i, 48.0) } else { (i - 4, 56.0) };
            Rect::new(96.0 + col as f32 * 8.0, y, 8.0, 8.0)
        })
        .collect()
}

/// 32x16 bricks packed six per row from the top-left
fn brick_quads() -> Vec<Rect> {
    (0..BRICK_QUADS)
        .map(|i| {
            let x = (i % BRICK_SHEET_COLUMNS) as f32 * 32.0;
            let y = (i / BRICK_SHEET_COLUMNS) as f32 * 16.0;
            Rect::new(x, y, 32.0, 16.0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        let atlas = Atlas::new();
        assert_eq!(atlas.paddle_count(), 16);
        assert_eq!(atlas.ball_count(), 7);
        assert_eq!(atlas.brick_count(), 21);
    }

    #[test]
    fn test_paddle_lookup() {
        let atlas = Atlas::new();
        // Default paddle: skin 1, size 2
        assert_eq!(atlas.paddle(1, 2), Rect::new(32.0, 64.0, 64.0, 16.0));
        assert_eq!(atlas.paddle(2, 4), Rect::new(0.0, 112.0, 128.0, 16.0));
        // Out of range clamps instead of panicking
        assert_eq!(atlas.paddle(9, 0), atlas.paddle(4, 1));
    }

    #[test]
    fn test_ball_and_brick_lookup() {
        let atlas = Atlas::new();
        assert_eq!(atlas.ball(0), Rect::new(96.0, 48.0, 8.0, 8.0));
        assert_eq!(atlas.ball(4), Rect::new(96.0, 56.0, 8.0, 8.0));
        assert_eq!(atlas.ball(6), Rect::new(112.0, 56.0, 8.0, 8.0));
        assert_eq!(atlas.brick(0), Rect::new(0.0, 0.0, 32.0, 16.0));
        assert_eq!(atlas.brick(7), Rect::new(32.0, 16.0, 32.0, 16.0));
        assert_eq!(atlas.brick(20), Rect::new(64.0, 48.0, 32.0, 16.0));
    }

    #[test]
    fn test_paddle_quads_match_paddle_widths() {
        let atlas = Atlas::new();
        for size in 1..=PADDLE_SIZES {
            assert_eq!(atlas.paddle(1, size).width, 32.0 * size as f32);
        }
    }
}
