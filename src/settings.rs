//! Game settings and tuning
//!
//! Every constant the two games were tuned with lives in a config struct so a
//! JSON file can override any subset of it. Missing fields keep their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Audio preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Silence everything
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.25,
            muted: false,
        }
    }
}

/// Breakout tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakoutConfig {
    // === Playfield ===
    pub width: f32,
    pub height: f32,

    // === Paddle ===
    pub paddle_speed: f32,
    /// Sprite skin (1-4)
    pub paddle_skin: u8,
    /// Starting size (1-4), width is `paddle_unit_width * size`
    pub paddle_size: u8,
    pub paddle_unit_width: f32,
    pub paddle_height: f32,
    /// Distance from the paddle's top edge to the bottom of the playfield
    pub paddle_floor_offset: f32,

    // === Ball ===
    pub ball_size: f32,
    /// Horizontal launch speed is drawn from `[-launch_dx, launch_dx]`
    pub launch_dx: f32,
    pub launch_dy_min: f32,
    pub launch_dy_max: f32,
    /// Constant part of the paddle steering redirect
    pub steer_base: f32,
    /// Redirect added per pixel of distance from the paddle centre
    pub steer_per_px: f32,
    /// Vertical speed multiplier per brick hit
    pub brick_speedup: f32,
    /// Speed-up only applies while `|vy|` is below this
    pub speedup_limit: f32,
    /// Inset used when deciding which side of a brick was hit
    pub edge_inset: f32,

    // === Bricks ===
    pub brick_width: f32,
    pub brick_height: f32,
    /// Y of the first brick row
    pub brick_top: f32,
    pub rows_min: u32,
    pub rows_max: u32,
    pub columns_min: u32,
    pub columns_max: u32,
    pub tier_cap: u8,
    pub color_cap: u8,

    // === Session ===
    pub starting_health: u8,
    pub max_health: u8,
    /// First score threshold that restores a heart (doubles each time)
    pub recover_points: u64,
    pub recover_points_cap: u64,
}

impl Default for BreakoutConfig {
    fn default() -> Self {
        Self {
            width: 432.0,
            height: 243.0,

            paddle_speed: 200.0,
            paddle_skin: 1,
            paddle_size: 2,
            paddle_unit_width: 32.0,
            paddle_height: 16.0,
            paddle_floor_offset: 32.0,

            ball_size: 8.0,
            launch_dx: 200.0,
            launch_dy_min: 50.0,
            launch_dy_max: 60.0,
            steer_base: 50.0,
            steer_per_px: 8.0,
            brick_speedup: 1.02,
            speedup_limit: 150.0,
            edge_inset: 2.0,

            brick_width: 32.0,
            brick_height: 16.0,
            brick_top: 16.0,
            rows_min: 3,
            rows_max: 5,
            columns_min: 7,
            columns_max: 13,
            tier_cap: 3,
            color_cap: 5,

            starting_health: 3,
            max_health: 3,
            recover_points: 5000,
            recover_points_cap: 100_000,
        }
    }
}

/// Flappy Bird tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlappyConfig {
    // === Playfield ===
    pub width: f32,
    pub height: f32,
    /// Bird dies once its top edge is below `height - floor_margin`
    pub floor_margin: f32,

    // === Bird ===
    pub bird_width: f32,
    pub bird_height: f32,
    /// Added to the vertical velocity every second
    pub gravity: f32,
    /// Vertical velocity after a flap (negative is up)
    pub jump_velocity: f32,
    /// Forgiveness inset applied to the bird's box on every side
    pub collision_margin: f32,

    // === Pipes ===
    pub pipe_speed: f32,
    pub pipe_width: f32,
    pub pipe_height: f32,
    pub gap_min: f32,
    pub gap_max: f32,
    /// Spawn x is `width + spawn_offset`
    pub spawn_offset: f32,
    /// Largest change of the top pipe offset between two pairs
    pub pipe_step: f32,
    /// Minimum visible length of the top pipe
    pub top_clearance: f32,
    pub max_pipe_pairs: usize,
    pub spawn_interval_initial: f32,
    pub spawn_interval_min: f32,
    pub spawn_interval_max: f32,

    // === Countdown ===
    pub countdown_ticks: u8,
    pub countdown_step: f32,

    // === Parallax ===
    pub background_scroll_speed: f32,
    pub background_loop: f32,
    pub ground_scroll_speed: f32,
    pub ground_loop: f32,
}

impl Default for FlappyConfig {
    fn default() -> Self {
        Self {
            width: 512.0,
            height: 288.0,
            floor_margin: 15.0,

            bird_width: 38.0,
            bird_height: 24.0,
            gravity: 20.0,
            jump_velocity: -5.0,
            collision_margin: 2.0,

            pipe_speed: 60.0,
            pipe_width: 70.0,
            pipe_height: 288.0,
            gap_min: 80.0,
            gap_max: 120.0,
            spawn_offset: 32.0,
            pipe_step: 20.0,
            top_clearance: 10.0,
            max_pipe_pairs: 10,
            spawn_interval_initial: 2.0,
            spawn_interval_min: 1.5,
            spawn_interval_max: 2.5,

            countdown_ticks: 3,
            countdown_step: 0.75,

            background_scroll_speed: 30.0,
            background_loop: 413.0,
            ground_scroll_speed: 60.0,
            ground_loop: 514.0,
        }
    }
}

/// Top-level settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed shared by both games (None = pick one at startup)
    pub seed: Option<u64>,
    pub audio: AudioSettings,
    pub breakout: BreakoutConfig,
    pub flappy: FlappyConfig,
    /// Where the Breakout leaderboard is kept (None = in memory only)
    pub highscores_path: Option<PathBuf>,
}

impl Settings {
    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, Error> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file is missing or bad
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(Error::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                log::warn!("Ignoring settings at {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Save settings as JSON
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Reject configurations the simulation cannot run
    pub fn validate(&self) -> Result<(), Error> {
        let b = &self.breakout;
        let f = &self.flappy;

        let checks: [(bool, &str); 18] = [
            (b.width > 0.0 && b.height > 0.0, "breakout playfield must be non-empty"),
            (b.rows_min >= 1 && b.rows_min <= b.rows_max, "breakout rows_min must be in 1..=rows_max"),
            (b.columns_min >= 1 && b.columns_min <= b.columns_max, "breakout columns_min must be in 1..=columns_max"),
            (
                odd_ceiling(b.columns_max) as f32 * b.brick_width <= b.width,
                "breakout brick grid is wider than the playfield",
            ),
            ((1..=4).contains(&b.paddle_skin), "breakout paddle_skin must be 1-4"),
            ((1..=4).contains(&b.paddle_size), "breakout paddle_size must be 1-4"),
            ((1..=5).contains(&b.color_cap) && b.tier_cap <= 3, "breakout color_cap must be 1-5 and tier_cap 0-3"),
            (b.starting_health >= 1 && b.starting_health <= b.max_health, "breakout starting_health must be in 1..=max_health"),
            (b.launch_dx >= 0.0 && b.launch_dy_min <= b.launch_dy_max, "breakout launch ranges are inverted"),
            (f.width > 0.0 && f.height > 0.0, "flappy playfield must be non-empty"),
            (f.gap_min > 0.0 && f.gap_min <= f.gap_max, "flappy gap_min must be in (0, gap_max]"),
            (
                f.gap_max + f.top_clearance <= f.height,
                "flappy gap_max plus top_clearance must fit on screen",
            ),
            (
                f.spawn_interval_initial > 0.0
                    && f.spawn_interval_min > 0.0
                    && f.spawn_interval_min <= f.spawn_interval_max,
                "flappy spawn intervals must be positive and min <= max",
            ),
            (f.countdown_step > 0.0, "flappy countdown_step must be positive"),
            (f.pipe_step >= 0.0, "flappy pipe_step must not be negative"),
            (f.max_pipe_pairs >= 1, "flappy max_pipe_pairs must be at least 1"),
            (f.background_loop > 0.0 && f.ground_loop > 0.0, "flappy loop points must be positive"),
            (f.collision_margin * 2.0 < f.bird_width.min(f.bird_height), "flappy collision_margin swallows the bird"),
        ];

        match checks.iter().find(|(ok, _)| !ok) {
            Some((_, reason)) => Err(Error::InvalidSettings((*reason).to_string())),
            None => Ok(()),
        }
    }
}

/// Largest column count the layout generator can produce (even counts round up)
pub(crate) fn odd_ceiling(n: u32) -> u32 {
    if n % 2 == 0 { n + 1 } else { n }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "flappy": { "gravity": 25.0 } }"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.flappy.gravity, 25.0);
        assert_eq!(settings.flappy.pipe_width, 70.0);
        assert_eq!(settings.breakout.width, 432.0);
    }

    #[test]
    fn test_inverted_gap_rejected() {
        let err = Settings::from_json(r#"{ "flappy": { "gap_min": 130.0 } }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidSettings(_)));
    }

    #[test]
    fn test_fixed_spawn_interval_accepted() {
        let settings =
            Settings::from_json(r#"{ "flappy": { "spawn_interval_min": 2.0, "spawn_interval_max": 2.0 } }"#)
                .unwrap();
        assert_eq!(settings.flappy.spawn_interval_min, settings.flappy.spawn_interval_max);
    }

    #[test]
    fn test_gap_taller_than_screen_rejected() {
        let err = Settings::from_json(r#"{ "flappy": { "gap_min": 285.0, "gap_max": 285.0 } }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidSettings(_)));

        // 278 + 10 clearance fills the 288px screen exactly
        assert!(Settings::from_json(r#"{ "flappy": { "gap_min": 200.0, "gap_max": 278.0 } }"#).is_ok());
    }

    #[test]
    fn test_grid_wider_than_playfield_rejected() {
        let mut settings = Settings::default();
        settings.breakout.columns_max = 14; // rounds up to 15 columns of 32px
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        assert!(matches!(Settings::from_json("{ seed: }"), Err(Error::Json(_))));
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("retro_arcade_settings_{}.json", std::process::id()));
        let mut settings = Settings::default();
        settings.audio.muted = true;
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert!(loaded.audio.muted);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_or_default(Path::new("/nonexistent/retro_arcade.json"));
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_odd_ceiling() {
        assert_eq!(odd_ceiling(12), 13);
        assert_eq!(odd_ceiling(13), 13);
        assert_eq!(odd_ceiling(7), 7);
    }
}
