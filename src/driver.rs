//! Fixed timestep frame driver
//!
//! The host calls `advance` once per displayed frame with the wall-clock time
//! since the previous frame. Elapsed time is banked in an accumulator and
//! spent in whole `SIM_DT` ticks, so the simulation sees the same timestep no
//! matter how fast frames arrive.

use crate::audio::{AudioManager, Cue};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{TickInput, breakout, flappy};

/// A game the frame driver can step
pub trait Simulation {
    /// Advance by one fixed timestep
    fn tick(&mut self, input: &TickInput, dt: f32);
    /// Drain pending sound cues
    fn take_cues(&mut self) -> Vec<Cue>;
    /// Whether updates are suspended by the pause overlay
    fn is_paused(&self) -> bool;
}

impl Simulation for breakout::Session {
    fn tick(&mut self, input: &TickInput, dt: f32) {
        breakout::tick(self, input, dt);
    }

    fn take_cues(&mut self) -> Vec<Cue> {
        breakout::Session::take_cues(self)
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

impl Simulation for flappy::Session {
    fn tick(&mut self, input: &TickInput, dt: f32) {
        flappy::tick(self, input, dt);
    }

    fn take_cues(&mut self) -> Vec<Cue> {
        flappy::Session::take_cues(self)
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

const FPS_WINDOW: usize = 60;

/// Accumulator, latched input and frame timing
#[derive(Debug, Clone)]
pub struct FrameDriver {
    accumulator: f32,
    pending: TickInput,
    ticks: u64,
    // FPS tracking over the last FPS_WINDOW frames
    frame_times: [f32; FPS_WINDOW],
    frame_index: usize,
    clock: f32,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDriver {
    /// Driver with nothing banked and no input held
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            pending: TickInput::default(),
            ticks: 0,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            clock: 0.0,
        }
    }

    /// Record input from the host; presses stay latched until a tick runs
    pub fn latch(&mut self, input: &TickInput) {
        self.pending.latch(input);
    }

    /// Total ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Unspent time, always less than one tick after a normal frame
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Average frames per second over the recent window (0 until it fills)
    pub fn fps(&self) -> u32 {
        let oldest = self.frame_times[self.frame_index];
        let elapsed = self.clock - oldest;
        if oldest > 0.0 && elapsed > 0.0 {
            (FPS_WINDOW as f32 / elapsed).round() as u32
        } else {
            0
        }
    }

    /// Run as many fixed ticks as `elapsed` pays for, then dispatch cues.
    /// Returns the number of ticks run.
    pub fn advance<S: Simulation + ?Sized>(
        &mut self,
        sim: &mut S,
        elapsed: f32,
        audio: &mut AudioManager,
    ) -> u32 {
        let dt = elapsed.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            sim.tick(&self.pending, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.pending.clear_presses();
        }
        self.ticks += substeps as u64;

        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::warn!(
                "Frame needed more than {} ticks, dropping {:.3}s",
                MAX_SUBSTEPS,
                self.accumulator
            );
            self.accumulator %= SIM_DT;
        }

        audio.play_all(sim.take_cues());
        audio.sync_music(sim.is_paused());

        self.clock += elapsed.max(0.0);
        self.frame_times[self.frame_index] = self.clock;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        substeps
    }
}
