//! Letterbox presentation
//!
//! The games draw at a fixed logical resolution. `Viewport` scales that
//! surface uniformly to fit the window and centres it, leaving bars on the
//! longer axis.

use glam::{Mat4, Vec2};

use crate::sim::Rect;

/// Mapping between logical playfield pixels and the window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Uniform logical-to-window scale
    pub scale: f32,
    /// Window position of the logical origin
    pub offset: Vec2,
    /// Playfield size in logical pixels
    pub logical: Vec2,
    /// Window size in physical pixels
    pub window: Vec2,
}

impl Viewport {
    /// Largest uniform scale that fits `logical` inside `window`, centred
    pub fn fit(window: Vec2, logical: Vec2) -> Self {
        let scale = if logical.x > 0.0 && logical.y > 0.0 {
            (window.x / logical.x).min(window.y / logical.y).max(0.0)
        } else {
            0.0
        };
        let offset = (window - logical * scale) * 0.5;
        Self {
            scale,
            offset,
            logical,
            window,
        }
    }

    /// Window-space rectangle the logical surface is drawn into
    pub fn target(&self) -> Rect {
        Rect::from_pos_size(self.offset, self.logical * self.scale)
    }

    /// Map a logical point to window pixels
    pub fn to_window(&self, logical: Vec2) -> Vec2 {
        self.offset + logical * self.scale
    }

    /// Map a window point (e.g. the mouse) to logical pixels; `None` on a
    /// degenerate window
    pub fn to_logical(&self, window: Vec2) -> Option<Vec2> {
        if self.scale <= 0.0 {
            return None;
        }
        Some((window - self.offset) / self.scale)
    }

    /// Orthographic projection from logical pixels (y down) to clip space
    /// covering the whole window, bars included
    pub fn projection(&self) -> Mat4 {
        if self.scale <= 0.0 {
            return Mat4::IDENTITY;
        }
        let left = -self.offset.x / self.scale;
        let top = -self.offset.y / self.scale;
        let right = left + self.window.x / self.scale;
        let bottom = top + self.window.y / self.scale;
        Mat4::orthographic_rh(left, right, bottom, top, -1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    const LOGICAL: Vec2 = Vec2::new(432.0, 243.0);

    #[test]
    fn test_exact_multiple_has_no_bars() {
        let vp = Viewport::fit(Vec2::new(1296.0, 729.0), LOGICAL);
        assert_eq!(vp.scale, 3.0);
        assert_eq!(vp.offset, Vec2::ZERO);
    }

    #[test]
    fn test_tall_window_letterboxes_vertically() {
        let vp = Viewport::fit(Vec2::new(864.0, 1000.0), LOGICAL);
        assert_eq!(vp.scale, 2.0);
        assert_eq!(vp.offset, Vec2::new(0.0, 257.0));
        assert_eq!(vp.target(), Rect::new(0.0, 257.0, 864.0, 486.0));
    }

    #[test]
    fn test_wide_window_pillarboxes() {
        let vp = Viewport::fit(Vec2::new(2000.0, 486.0), LOGICAL);
        assert_eq!(vp.scale, 2.0);
        assert_eq!(vp.offset, Vec2::new(568.0, 0.0));
    }

    #[test]
    fn test_window_logical_mapping() {
        let vp = Viewport::fit(Vec2::new(864.0, 1000.0), LOGICAL);
        let p = Vec2::new(100.0, 50.0);
        assert_eq!(vp.to_window(p), Vec2::new(200.0, 357.0));
        assert_eq!(vp.to_logical(Vec2::new(200.0, 357.0)), Some(p));

        let collapsed = Viewport::fit(Vec2::ZERO, LOGICAL);
        assert_eq!(collapsed.to_logical(Vec2::ZERO), None);
    }

    #[test]
    fn test_projection_centres_playfield() {
        let vp = Viewport::fit(Vec2::new(1000.0, 1000.0), LOGICAL);
        let clip = vp.projection() * Vec4::new(216.0, 121.5, 0.0, 1.0);
        assert!(clip.x.abs() < 1e-4);
        assert!(clip.y.abs() < 1e-4);

        // Logical top-left sits below the top bar, left edge of the window
        let corner = vp.projection() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((corner.x + 1.0).abs() < 1e-4);
        assert!(corner.y < 1.0 && corner.y > 0.0);
    }
}
