//! Breakout: paddle, ball and procedurally laid out bricks

pub mod bricks;
pub mod state;
pub mod tick;

pub use bricks::{LayoutPlan, RowColors, RowPlan, RowPresence, Style};
pub use state::{Ball, Brick, MenuItem, Mode, Paddle, Session};
pub use tick::{autopilot, tick};
