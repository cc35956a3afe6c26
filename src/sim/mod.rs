//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies; sound is requested through `Cue`s

pub mod breakout;
pub mod collision;
pub mod flappy;
pub mod input;
pub mod rect;

pub use collision::{
    PaddleSteer, Resolution, Side, bounce_off_walls, overlaps_with_margin, paddle_bounce, resolve,
};
pub use input::TickInput;
pub use rect::Rect;
