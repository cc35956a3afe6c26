//! Axis-aligned rectangles
//!
//! Every entity in both games is a box in playfield pixels with y growing
//! downward: `(x, y)` is the top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Box with top-left `(x, y)`
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Build from a top-left position and a size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    /// Left edge x
    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Right edge x
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y
    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Bottom edge y
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Top-left corner
    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Width and height
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Centre point
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Same size, moved to a new top-left corner
    pub fn with_pos(&self, pos: Vec2) -> Self {
        Self::new(pos.x, pos.y, self.width, self.height)
    }

    /// Inclusive AABB overlap: boxes that share an edge overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.x > other.right()
            || other.x > self.right()
            || self.y > other.bottom()
            || other.y > self.bottom())
    }

    /// Shrink by `margin` on every side
    pub fn inset(&self, margin: f32) -> Self {
        Self::new(
            self.x + margin,
            self.y + margin,
            (self.width - 2.0 * margin).max(0.0),
            (self.height - 2.0 * margin).max(0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_is_inclusive() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let touching = Rect::new(10.0, 0.0, 5.0, 5.0);
        let apart = Rect::new(10.5, 0.0, 5.0, 5.0);
        assert!(a.overlaps(&touching));
        assert!(touching.overlaps(&a));
        assert!(!a.overlaps(&apart));
    }

    #[test]
    fn test_overlap_needs_both_axes() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let below = Rect::new(2.0, 20.0, 4.0, 4.0);
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_inset() {
        let bird = Rect::new(100.0, 50.0, 38.0, 24.0).inset(2.0);
        assert_eq!(bird, Rect::new(102.0, 52.0, 34.0, 20.0));
        // Never inverts
        assert_eq!(Rect::new(0.0, 0.0, 2.0, 2.0).inset(5.0).width, 0.0);
    }

    #[test]
    fn test_center_and_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.top(), 20.0);
    }
}
