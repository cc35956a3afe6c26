//! Flappy Bird entities and session state

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::pipes::PipeSpawner;
use crate::audio::Cue;
use crate::settings::FlappyConfig;
use crate::sim::rect::Rect;

/// Current mode of the Flappy Bird state machine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Mode {
    /// Title screen
    Title,
    /// Counting down to play; `remaining` numbers left to show
    Countdown { remaining: u8, timer: f32 },
    /// Active gameplay
    Play,
    /// Crashed, showing the score
    Score,
}

/// The bird
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    pub x: f32,
    pub y: f32,
    /// Vertical displacement per tick (positive is down)
    pub dy: f32,
    pub width: f32,
    pub height: f32,
}

impl Bird {
    /// Centred in the playfield, at rest
    pub fn new(config: &FlappyConfig) -> Self {
        Self {
            x: config.width / 2.0 - config.bird_width / 2.0,
            y: config.height / 2.0 - config.bird_height / 2.0,
            dy: 0.0,
            width: config.bird_width,
            height: config.bird_height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Apply gravity, then a flap if requested, then move. Returns true on a flap.
    pub fn update(&mut self, dt: f32, jump: bool, config: &FlappyConfig) -> bool {
        self.dy += config.gravity * dt;
        if jump {
            self.dy = config.jump_velocity;
        }
        self.y += self.dy;
        jump
    }
}

/// One half of a pipe pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipe {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Drawn upside down (the top pipe)
    pub flipped: bool,
}

impl Pipe {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Top and bottom pipe sharing a scroll speed and a gap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipePair {
    pub top: Pipe,
    pub bottom: Pipe,
    /// Horizontal velocity (negative scrolls left)
    pub scroll: f32,
    /// Vertical opening between the pipes
    pub gap: f32,
    /// Set once the bird has passed this pair
    pub scored: bool,
}

impl PipePair {
    /// A pair at `x` whose top pipe starts at `top_y`
    pub fn new(x: f32, top_y: f32, gap: f32, config: &FlappyConfig) -> Self {
        let pipe = |y: f32, flipped: bool| Pipe {
            x,
            y,
            width: config.pipe_width,
            height: config.pipe_height,
            flipped,
        };
        Self {
            top: pipe(top_y, true),
            bottom: pipe(top_y + config.pipe_height + gap, false),
            scroll: -config.pipe_speed,
            gap,
            scored: false,
        }
    }

    pub fn x(&self) -> f32 {
        self.top.x
    }

    /// Right edge of the pair
    pub fn trailing_edge(&self) -> f32 {
        self.top.x + self.top.width
    }

    /// Y of the top of the opening
    pub fn gap_top(&self) -> f32 {
        self.top.y + self.top.height
    }

    /// Y of the bottom of the opening
    pub fn gap_bottom(&self) -> f32 {
        self.bottom.y
    }

    /// Scroll both pipes. Returns true on the tick the trailing edge crosses `bird_x`.
    pub fn update(&mut self, dt: f32, bird_x: f32) -> bool {
        let before = self.trailing_edge();
        self.top.x += self.scroll * dt;
        self.bottom.x += self.scroll * dt;
        let after = self.trailing_edge();

        if !self.scored && before > bird_x && after <= bird_x {
            self.scored = true;
            return true;
        }
        false
    }

    /// Fully past the left edge of the playfield
    pub fn is_offscreen(&self) -> bool {
        self.top.x < -self.top.width
    }
}

/// Looping background and ground offsets
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Parallax {
    pub background: f32,
    pub ground: f32,
}

impl Parallax {
    pub fn update(&mut self, dt: f32, config: &FlappyConfig) {
        self.background = (self.background + config.background_scroll_speed * dt)
            .rem_euclid(config.background_loop);
        self.ground =
            (self.ground + config.ground_scroll_speed * dt).rem_euclid(config.ground_loop);
    }
}

/// Complete Flappy Bird session
#[derive(Debug, Clone)]
pub struct Session {
    pub config: FlappyConfig,
    pub mode: Mode,
    /// Orthogonal to the mode: suspends updates, draws an overlay
    pub paused: bool,
    pub score: u32,
    /// Round counter (1-based), advanced on every retry
    pub round: u32,
    pub bird: Bird,
    /// Active pairs, oldest first
    pub pipes: Vec<PipePair>,
    pub spawner: PipeSpawner,
    pub parallax: Parallax,
    pub(crate) rng: Pcg32,
    pub(crate) cues: Vec<Cue>,
}

impl Session {
    /// Create a session on the title screen
    pub fn new(config: FlappyConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let spawner = PipeSpawner::new(&config, &mut rng);

        Self {
            mode: Mode::Title,
            paused: false,
            score: 0,
            round: 1,
            bird: Bird::new(&config),
            pipes: Vec::with_capacity(config.max_pipe_pairs),
            spawner,
            parallax: Parallax::default(),
            rng,
            cues: Vec::new(),
            config,
        }
    }

    /// Take the cues emitted since the last call
    pub fn take_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    pub(crate) fn cue(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    /// Clear the field for another attempt and advance the round counter
    pub(crate) fn reset_for_retry(&mut self) {
        self.score = 0;
        self.round += 1;
        self.bird = Bird::new(&self.config);
        self.pipes.clear();
        self.spawner = PipeSpawner::new(&self.config, &mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bird_gravity_and_flap() {
        let config = FlappyConfig::default();
        let mut bird = Bird::new(&config);
        assert_eq!(bird.y, 132.0);

        bird.update(0.5, false, &config);
        assert_eq!(bird.dy, 10.0);
        assert_eq!(bird.y, 142.0);

        assert!(bird.update(0.5, true, &config));
        assert_eq!(bird.dy, -5.0);
        assert_eq!(bird.y, 137.0);
    }

    #[test]
    fn test_pair_geometry() {
        let config = FlappyConfig::default();
        let pair = PipePair::new(544.0, -200.0, 100.0, &config);
        assert!(pair.top.flipped);
        assert!(!pair.bottom.flipped);
        assert_eq!(pair.gap_top(), 88.0);
        assert_eq!(pair.gap_bottom(), 188.0);
        assert_eq!(pair.trailing_edge(), 614.0);
    }

    #[test]
    fn test_scored_exactly_when_trailing_edge_reaches_bird() {
        let config = FlappyConfig {
            pipe_speed: 64.0,
            ..Default::default()
        };
        let dt = 1.0 / 64.0; // exactly one pixel per tick

        // Trailing edge moves 171 -> 170: bird at 171 was already passed
        let mut pair = PipePair::new(101.0, -200.0, 100.0, &config);
        assert!(!pair.update(dt, 171.0));
        assert!(!pair.scored);

        // Same move with the bird at 170: crossing happens this tick
        let mut pair = PipePair::new(101.0, -200.0, 100.0, &config);
        assert!(pair.update(dt, 170.0));
        assert!(pair.scored);
        assert_eq!(pair.x(), 100.0);

        // Never again
        for _ in 0..200 {
            assert!(!pair.update(dt, 170.0));
        }
    }

    #[test]
    fn test_offscreen() {
        let config = FlappyConfig::default();
        let mut pair = PipePair::new(-70.0, -200.0, 100.0, &config);
        assert!(!pair.is_offscreen());
        pair.update(0.1, 0.0);
        assert!(pair.is_offscreen());
    }

    #[test]
    fn test_parallax_loops() {
        let config = FlappyConfig::default();
        let mut parallax = Parallax::default();
        for _ in 0..20 {
            parallax.update(1.0, &config);
        }
        assert!((parallax.background - (600.0 % 413.0)).abs() < 1e-3);
        assert!((parallax.ground - (1200.0 % 514.0)).abs() < 1e-3);
    }
}
