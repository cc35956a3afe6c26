//! Breakout entities and session state

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bricks;
use crate::audio::Cue;
use crate::highscores::HighScores;
use crate::settings::BreakoutConfig;
use crate::sim::rect::Rect;

/// Paddle sprite skins in the atlas
pub const PADDLE_SKINS: u8 = 4;
/// Paddle sizes in the atlas
pub const PADDLE_SIZES: u8 = 4;
/// Ball sprite skins in the atlas
pub const BALL_SKINS: u8 = 7;

/// Title menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuItem {
    Start,
    HighScores,
}

impl MenuItem {
    pub fn toggled(self) -> Self {
        match self {
            MenuItem::Start => MenuItem::HighScores,
            MenuItem::HighScores => MenuItem::Start,
        }
    }
}

/// Current mode of the Breakout state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Title menu
    Title { highlighted: MenuItem },
    /// Leaderboard screen
    HighScores,
    /// Ball resting on the paddle, waiting for confirm
    Serve,
    /// Active gameplay
    Play,
    /// Every brick cleared, waiting for confirm
    Victory,
    /// Health ran out; `rank` is the leaderboard position reached, if any
    GameOver { rank: Option<usize> },
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    /// Horizontal velocity this tick
    pub dx: f32,
    pub width: f32,
    pub height: f32,
    /// Sprite skin (1-4)
    pub skin: u8,
    /// Sprite size (1-4)
    pub size: u8,
}

impl Paddle {
    /// Paddle at its configured size, centred above the floor
    pub fn new(config: &BreakoutConfig) -> Self {
        let size = config.paddle_size.clamp(1, PADDLE_SIZES);
        let width = config.paddle_unit_width * size as f32;
        Self {
            x: config.width / 2.0 - width / 2.0,
            y: config.height - config.paddle_floor_offset,
            dx: 0.0,
            width,
            height: config.paddle_height,
            skin: config.paddle_skin.clamp(1, PADDLE_SKINS),
            size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Move by held direction (-1, 0, 1) and clamp inside `[0, playfield_width - width]`
    pub fn update(&mut self, direction: f32, speed: f32, playfield_width: f32, dt: f32) {
        self.dx = direction * speed;
        self.x += self.dx * dt;
        self.clamp(playfield_width);
    }

    fn clamp(&mut self, playfield_width: f32) {
        self.x = self.x.min(playfield_width - self.width).max(0.0);
    }

    /// Change size (1-4), keeping the paddle centred where it was
    pub fn resize(&mut self, size: u8, unit_width: f32, playfield_width: f32) {
        let center = self.x + self.width / 2.0;
        self.size = size.clamp(1, PADDLE_SIZES);
        self.width = unit_width * self.size as f32;
        self.x = center - self.width / 2.0;
        self.clamp(playfield_width);
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub width: f32,
    pub height: f32,
    /// Sprite skin (0-6)
    pub skin: u8,
}

impl Ball {
    /// Motionless square ball of side `size`
    pub fn new(size: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            dx: 0.0,
            dy: 0.0,
            width: size,
            height: size,
            skin: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.dx, self.dy)
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.x = rect.x;
        self.y = rect.y;
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.dx = velocity.x;
        self.dy = velocity.y;
    }

    /// Rest centred on top of the paddle, motionless
    pub fn rest_on(&mut self, paddle: &Paddle) {
        self.x = paddle.x + paddle.width / 2.0 - self.width / 2.0;
        self.y = paddle.y - self.height;
        self.dx = 0.0;
        self.dy = 0.0;
    }

    pub fn update(&mut self, dt: f32) {
        self.x += self.dx * dt;
        self.y += self.dy * dt;
    }
}

/// A brick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub in_play: bool,
    /// Colour (1-5)
    pub color: u8,
    /// Quality tier (0-3)
    pub tier: u8,
}

impl Brick {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Index into the brick atlas
    pub fn sprite_index(&self) -> usize {
        (self.color as usize - 1) * 4 + self.tier as usize
    }

    /// Points awarded for hitting this brick
    pub fn points(&self) -> u64 {
        self.tier as u64 * 200 + self.color as u64 * 25
    }
}

/// Complete Breakout session
#[derive(Debug, Clone)]
pub struct Session {
    pub config: BreakoutConfig,
    pub mode: Mode,
    /// Orthogonal to the mode: suspends updates, draws an overlay
    pub paused: bool,
    pub health: u8,
    pub score: u64,
    /// Level counter (1-based)
    pub level: u32,
    /// Score that restores the next heart
    pub recover_points: u64,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: Vec<Brick>,
    pub high_scores: HighScores,
    pub(crate) rng: Pcg32,
    pub(crate) cues: Vec<Cue>,
}

impl Session {
    /// Create a session on the title screen
    pub fn new(config: BreakoutConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let paddle = Paddle::new(&config);
        let mut ball = Ball::new(config.ball_size);
        ball.rest_on(&paddle);
        let bricks = bricks::generate(1, &config, &mut rng);

        Self {
            health: config.starting_health,
            recover_points: config.recover_points,
            mode: Mode::Title {
                highlighted: MenuItem::Start,
            },
            paused: false,
            score: 0,
            level: 1,
            paddle,
            ball,
            bricks,
            high_scores: HighScores::new(),
            rng,
            cues: Vec::new(),
            config,
        }
    }

    /// Start with an existing leaderboard
    pub fn with_high_scores(mut self, high_scores: HighScores) -> Self {
        self.high_scores = high_scores;
        self
    }

    /// Bricks still standing
    pub fn bricks_in_play(&self) -> usize {
        self.bricks.iter().filter(|b| b.in_play).count()
    }

    /// Take the cues emitted since the last call
    pub fn take_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    pub(crate) fn cue(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    /// Fresh run after game over: score and health reset, level advances
    pub(crate) fn reset_for_retry(&mut self) {
        self.score = 0;
        self.health = self.config.starting_health;
        self.recover_points = self.config.recover_points;
        self.level += 1;
        self.paddle = Paddle::new(&self.config);
        self.bricks = bricks::generate(self.level, &self.config, &mut self.rng);
        self.ball.rest_on(&self.paddle);
    }

    /// Next level after a clear: score and health carry over
    pub(crate) fn advance_level(&mut self) {
        self.level += 1;
        self.bricks = bricks::generate(self.level, &self.config, &mut self.rng);
        self.ball.rest_on(&self.paddle);
    }
}
