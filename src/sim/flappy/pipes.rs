//! Pipe spawning
//!
//! A timer spawns one pair per interval at the right edge. The top pipe's
//! offset wanders from the previous pair's by at most `pipe_step` and is
//! clamped so the whole opening stays on screen.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::PipePair;
use crate::settings::FlappyConfig;

/// Spawn timer plus the random-walk memory of the last top pipe offset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeSpawner {
    /// Seconds since the last spawn
    pub timer: f32,
    /// Seconds until the next spawn
    pub interval: f32,
    /// Top pipe y of the previous pair
    pub last_y: f32,
}

impl PipeSpawner {
    pub fn new<R: Rng>(config: &FlappyConfig, rng: &mut R) -> Self {
        // First opening starts 20-100px below the top of the screen
        let last_y = -config.pipe_height + rng.random_range(20.0..100.0);
        Self {
            timer: 0.0,
            interval: config.spawn_interval_initial,
            last_y,
        }
    }

    /// Top pipe y for a pair with opening `gap`, wandering from the last one
    pub fn next_top_y<R: Rng>(&self, gap: f32, config: &FlappyConfig, rng: &mut R) -> f32 {
        let step = roll(rng, -config.pipe_step, config.pipe_step);
        let highest = -config.pipe_height + config.top_clearance;
        let lowest = config.height - gap - config.pipe_height;
        (self.last_y + step).min(lowest).max(highest)
    }

    /// Advance the timer and spawn at most one pair. Returns true if a pair spawned.
    pub fn update<R: Rng>(
        &mut self,
        dt: f32,
        pipes: &mut Vec<PipePair>,
        config: &FlappyConfig,
        rng: &mut R,
    ) -> bool {
        self.timer += dt;
        if self.timer < self.interval {
            return false;
        }

        self.timer = 0.0;
        self.interval = roll(rng, config.spawn_interval_min, config.spawn_interval_max);

        if pipes.len() >= config.max_pipe_pairs {
            log::debug!("Pipe cap reached, skipping spawn");
            return false;
        }

        let gap = roll(rng, config.gap_min, config.gap_max);
        let top_y = self.next_top_y(gap, config, rng);
        self.last_y = top_y;

        let x = config.width + config.spawn_offset;
        pipes.push(PipePair::new(x, top_y, gap, config));
        log::debug!(
            "Spawned pipes at y={:.1} gap={:.1}, next in {:.2}s",
            top_y,
            gap,
            self.interval
        );
        true
    }
}

/// Uniform in `[min, max)`; a collapsed or inverted range is fixed at `min`
fn roll<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_first_spawn_after_two_seconds() {
        let config = FlappyConfig::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut spawner = PipeSpawner::new(&config, &mut rng);
        let mut pipes = Vec::new();
        let dt = 0.25;

        for _ in 0..8 {
            spawner.update(dt, &mut pipes, &config, &mut rng);
            for pair in pipes.iter_mut() {
                pair.update(dt, 237.0);
            }
        }

        assert_eq!(pipes.len(), 1);
        // Spawned at 544 on the last step, then scrolled for that step
        assert_eq!(pipes[0].x(), 544.0 - 60.0 * dt);
        assert!((1.5..2.5).contains(&spawner.interval));
        assert_eq!(spawner.timer, 0.0);
    }

    #[test]
    fn test_cap_skips_spawn_but_rearms() {
        let config = FlappyConfig {
            max_pipe_pairs: 1,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(2);
        let mut spawner = PipeSpawner::new(&config, &mut rng);
        let mut pipes = Vec::new();

        assert!(spawner.update(2.0, &mut pipes, &config, &mut rng));
        assert!(!spawner.update(3.0, &mut pipes, &config, &mut rng));
        assert_eq!(pipes.len(), 1);
        assert_eq!(spawner.timer, 0.0);
    }

    #[test]
    fn test_fixed_interval_and_gap() {
        let config = FlappyConfig {
            spawn_interval_min: 2.0,
            spawn_interval_max: 2.0,
            gap_min: 100.0,
            gap_max: 100.0,
            pipe_step: 0.0,
            max_pipe_pairs: 8,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(4);
        let mut spawner = PipeSpawner::new(&config, &mut rng);
        let mut pipes = Vec::new();

        for _ in 0..4 {
            assert!(spawner.update(2.0, &mut pipes, &config, &mut rng));
            assert_eq!(spawner.interval, 2.0);
        }
        assert!(pipes.iter().all(|pair| pair.gap == 100.0));
        // No wander: every pair sits where the first one did
        assert!(pipes.iter().all(|pair| pair.top.y == pipes[0].top.y));
    }

    proptest! {
        #[test]
        fn prop_openings_stay_on_screen(
            seed in any::<u64>(),
            spawns in 1usize..40,
            gap_min in 60.0f32..200.0,
            gap_extra in 0.0f32..78.0,
        ) {
            // Tallest gap still leaves the top clearance on a 288px screen
            let config = FlappyConfig {
                max_pipe_pairs: 64,
                gap_min,
                gap_max: gap_min + gap_extra,
                ..Default::default()
            };
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut spawner = PipeSpawner::new(&config, &mut rng);
            let mut pipes = Vec::new();
            let mut last_y = spawner.last_y;

            for _ in 0..spawns {
                prop_assert!(spawner.update(10.0, &mut pipes, &config, &mut rng));
                let pair = pipes.last().unwrap();

                prop_assert!((config.gap_min..=config.gap_max).contains(&pair.gap));
                prop_assert!(pair.gap_top() >= config.top_clearance);
                prop_assert!(pair.gap_bottom() <= config.height);
                // Wandering is bounded unless the clamp pulled it back on screen
                let moved = (pair.top.y - last_y).abs();
                prop_assert!(moved <= config.pipe_step + 1e-3 || pair.gap_top() <= config.top_clearance + 1e-3 || pair.gap_bottom() >= config.height - 1e-3);
                last_y = pair.top.y;
            }
        }
    }
}
