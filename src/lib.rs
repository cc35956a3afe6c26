//! Retro Arcade - Breakout and Flappy Bird simulation cores
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, spawners, state machines)
//! - `driver`: Fixed timestep frame driver
//! - `renderer`: Sprite atlas tables, scene building and letterbox presentation math
//! - `audio`: Fire-and-forget sound cues
//! - `settings`: Data-driven game tuning

pub mod audio;
pub mod driver;
pub mod error;
pub mod highscores;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use audio::{AudioBackend, AudioManager, Cue};
pub use driver::{FrameDriver, Simulation};
pub use error::Error;
pub use highscores::HighScores;
pub use settings::{AudioSettings, BreakoutConfig, FlappyConfig, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the rate both games were tuned at)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the driver will account for (window drags, breakpoints)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
