//! Flappy Bird: a flapping bird and endlessly scrolling pipe pairs

pub mod pipes;
pub mod state;
pub mod tick;

pub use pipes::PipeSpawner;
pub use state::{Bird, Mode, Parallax, Pipe, PipePair, Session};
pub use tick::{autopilot, tick};
