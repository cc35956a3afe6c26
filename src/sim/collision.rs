//! Collision detection and response for axis-aligned boxes
//!
//! Three kinds of contact exist in these games:
//! - a ball bouncing off a static box (bricks), classified by the side it hit
//! - a ball bouncing off the paddle, with steering from the paddle's motion
//! - a terminal overlap (bird vs. pipe) that never bounces

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Which side of the static box was struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// Result of resolving a contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Side of the static box that was hit
    pub side: Side,
    /// Velocity after the bounce
    pub velocity: Vec2,
    /// Top-left of the moving box, pushed out of the static box
    pub position: Vec2,
}

/// Resolve a moving box against a static one
///
/// Returns `None` when the boxes do not overlap. Sides are tested in priority
/// order: left (moving right), right (moving left), top, bottom. `edge_inset`
/// shrinks the moving box horizontally for the side tests so grazing a corner
/// reads as a top/bottom hit.
pub fn resolve(moving: Rect, velocity: Vec2, fixed: Rect, edge_inset: f32) -> Option<Resolution> {
    if !moving.overlaps(&fixed) {
        return None;
    }

    let mut velocity = velocity;
    let mut position = moving.pos();

    let side = if moving.left() + edge_inset < fixed.left() && velocity.x > 0.0 {
        velocity.x = -velocity.x;
        position.x = fixed.left() - moving.width;
        Side::Left
    } else if moving.right() - edge_inset > fixed.right() && velocity.x < 0.0 {
        velocity.x = -velocity.x;
        position.x = fixed.right();
        Side::Right
    } else if moving.top() < fixed.top() {
        velocity.y = -velocity.y;
        position.y = fixed.top() - moving.height;
        Side::Top
    } else {
        velocity.y = -velocity.y;
        position.y = fixed.bottom();
        Side::Bottom
    };

    Some(Resolution {
        side,
        velocity,
        position,
    })
}

/// Reflect off the left, right and top edges of a playfield `width` wide
///
/// The bottom edge is open. Returns true if any wall was hit.
pub fn bounce_off_walls(rect: &mut Rect, velocity: &mut Vec2, width: f32) -> bool {
    let mut hit = false;

    if rect.x <= 0.0 {
        rect.x = 0.0;
        velocity.x = -velocity.x;
        hit = true;
    }

    if rect.x >= width - rect.width {
        rect.x = width - rect.width;
        velocity.x = -velocity.x;
        hit = true;
    }

    if rect.y <= 0.0 {
        rect.y = 0.0;
        velocity.y = -velocity.y;
        hit = true;
    }

    hit
}

/// Paddle steering constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleSteer {
    /// Horizontal speed given to any steered ball
    pub base: f32,
    /// Extra horizontal speed per pixel between ball and paddle centres
    pub per_px: f32,
}

/// Bounce a ball off the paddle
///
/// The ball always leaves upward, sitting on the paddle's top edge. When the
/// paddle is moving toward the side of its centre the ball landed on, the
/// horizontal speed is replaced by `base + per_px * distance` in the paddle's
/// direction; otherwise it is kept.
pub fn paddle_bounce(
    ball: Rect,
    velocity: Vec2,
    paddle: Rect,
    paddle_dx: f32,
    steer: PaddleSteer,
) -> Option<Resolution> {
    if !ball.overlaps(&paddle) {
        return None;
    }

    let paddle_center = paddle.center().x;
    let ball_center = ball.center().x;
    let redirect = steer.base + steer.per_px * (paddle_center - ball_center).abs();

    let vx = if ball_center < paddle_center && paddle_dx < 0.0 {
        -redirect
    } else if ball_center > paddle_center && paddle_dx > 0.0 {
        redirect
    } else {
        velocity.x
    };

    Some(Resolution {
        side: Side::Top,
        velocity: Vec2::new(vx, -velocity.y.abs()),
        position: Vec2::new(ball.x, paddle.top() - ball.height),
    })
}

/// Overlap test after shrinking `a` by `margin` on every side
#[inline]
pub fn overlaps_with_margin(a: Rect, margin: f32, b: Rect) -> bool {
    a.inset(margin).overlaps(&b)
}
