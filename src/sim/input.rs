//! Per-tick input
//!
//! Key presses are one-shot: the frame driver latches them until a tick has
//! consumed them. Held keys are level-triggered and copied every frame.

use serde::{Deserialize, Serialize};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    // === One-shot presses ===
    /// Enter / confirm
    pub confirm: bool,
    /// Pause toggle
    pub pause: bool,
    /// Menu up
    pub up: bool,
    /// Menu down
    pub down: bool,
    /// Flap (space)
    pub jump: bool,

    // === Held keys ===
    pub left_held: bool,
    pub right_held: bool,
}

impl TickInput {
    /// Confirm press only
    pub fn confirm() -> Self {
        Self {
            confirm: true,
            ..Default::default()
        }
    }

    /// Pause press only
    pub fn pause() -> Self {
        Self {
            pause: true,
            ..Default::default()
        }
    }

    /// Flap press only
    pub fn jump() -> Self {
        Self {
            jump: true,
            ..Default::default()
        }
    }

    /// Fold newer input into this one: presses accumulate, held keys are replaced
    pub fn latch(&mut self, newer: &TickInput) {
        self.confirm |= newer.confirm;
        self.pause |= newer.pause;
        self.up |= newer.up;
        self.down |= newer.down;
        self.jump |= newer.jump;
        self.left_held = newer.left_held;
        self.right_held = newer.right_held;
    }

    /// Clear one-shot presses after a tick processed them
    pub fn clear_presses(&mut self) {
        self.confirm = false;
        self.pause = false;
        self.up = false;
        self.down = false;
        self.jump = false;
    }

    /// Horizontal direction from held keys (-1, 0 or 1); left wins ties
    pub fn horizontal(&self) -> f32 {
        if self.left_held {
            -1.0
        } else if self.right_held {
            1.0
        } else {
            0.0
        }
    }
}
