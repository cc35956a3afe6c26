//! Headless demo runner
//!
//! Plays one of the games with its autopilot for a number of simulated
//! seconds, building a scene every frame as a windowed host would, then logs
//! a summary. Windowing, textures and sound mixing live in the host; here
//! cues go to the log.
//!
//! Usage: `retro-arcade <breakout|flappy> [seconds] [settings.json]`

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;
use retro_arcade::audio::LogBackend;
use retro_arcade::consts::SIM_DT;
use retro_arcade::renderer::{Atlas, Scene, TextureId, Viewport, scene, shapes};
use retro_arcade::sim::{TickInput, breakout, flappy};
use retro_arcade::{AudioManager, FrameDriver, HighScores, Settings, Simulation};

const USAGE: &str = "usage: retro-arcade <breakout|flappy> [seconds] [settings.json]";
const DEFAULT_SECONDS: f32 = 60.0;
/// Window size the letterbox is computed for
const WINDOW: Vec2 = Vec2::new(1280.0, 720.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Game {
    Breakout,
    Flappy,
}

#[derive(Debug)]
struct Args {
    game: Game,
    seconds: f32,
    settings: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let game = match args.next().as_deref() {
        Some("breakout") => Game::Breakout,
        Some("flappy") => Game::Flappy,
        Some(other) => return Err(format!("unknown game '{}'", other)),
        None => return Err("missing game".to_string()),
    };
    let seconds = match args.next() {
        Some(s) => s
            .parse::<f32>()
            .ok()
            .filter(|s| *s > 0.0)
            .ok_or_else(|| format!("bad duration '{}'", s))?,
        None => DEFAULT_SECONDS,
    };
    let settings = args.next().map(PathBuf::from);
    Ok(Args {
        game,
        seconds,
        settings,
    })
}

/// What a run produced, for the summary line
#[derive(Debug, Default)]
struct RunStats {
    frames: u32,
    ticks: u64,
    vertices: usize,
    labels: usize,
}

/// Drive `sim` for `frames` frames of one tick each
fn run<S: Simulation>(
    sim: &mut S,
    frames: u32,
    audio: &mut AudioManager,
    pilot: impl Fn(&S) -> TickInput,
    draw: impl Fn(&S) -> Scene,
) -> RunStats {
    let mut driver = FrameDriver::new();
    let mut stats = RunStats::default();

    for frame in 0..frames {
        driver.latch(&pilot(sim));
        driver.advance(sim, SIM_DT, audio);

        let mut scene = draw(sim);
        scene.fps(driver.fps());
        stats.vertices += [TextureId::Breakout, TextureId::Pipe, TextureId::Bird]
            .into_iter()
            .map(|texture| shapes::batch(&scene, texture, Vec2::ONE).len())
            .sum::<usize>();
        stats.labels += scene.labels.len();
        stats.frames = frame + 1;
    }

    stats.ticks = driver.ticks();
    stats
}

/// Seed from the wall clock when the settings do not pin one
fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn save_high_scores(scores: &HighScores, path: &Path) {
    if let Err(err) = scores.save(path) {
        log::warn!("Could not save high scores to {}: {}", path.display(), err);
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}\n{}", msg, USAGE);
            return ExitCode::from(2);
        }
    };

    let settings = args
        .settings
        .as_deref()
        .map(Settings::load_or_default)
        .unwrap_or_default();
    let seed = settings.seed.unwrap_or_else(time_seed);
    let frames = (args.seconds / SIM_DT).round() as u32;
    log::info!(
        "Retro Arcade (headless) starting: {:?}, seed {}, {} frames",
        args.game,
        seed,
        frames
    );

    let mut audio = AudioManager::from_settings(&settings.audio, Box::new(LogBackend));
    let levels = audio.levels();
    log::info!(
        "Audio: master {:.2}, sfx {:.2}, muted {}",
        levels.master_volume,
        levels.sfx_volume,
        levels.muted
    );

    match args.game {
        Game::Breakout => {
            let config = settings.breakout.clone();
            let viewport = Viewport::fit(WINDOW, Vec2::new(config.width, config.height));
            log::info!(
                "Letterbox: scale {:.3}, offset ({:.1}, {:.1})",
                viewport.scale,
                viewport.offset.x,
                viewport.offset.y
            );

            let scores = settings
                .highscores_path
                .as_deref()
                .map(HighScores::load_or_default)
                .unwrap_or_default();
            let mut session = breakout::Session::new(config, seed).with_high_scores(scores);
            let atlas = Atlas::new();

            let stats = run(
                &mut session,
                frames,
                &mut audio,
                breakout::autopilot,
                |s| scene::breakout(s, &atlas),
            );
            log::debug!("{:?}", stats);
            log::info!(
                "Breakout finished in {:?}: level {}, score {}, health {}",
                session.mode,
                session.level,
                session.score,
                session.health
            );

            if let Some(path) = settings.highscores_path.as_deref() {
                save_high_scores(&session.high_scores, path);
            }
        }
        Game::Flappy => {
            let config = settings.flappy.clone();
            let viewport = Viewport::fit(WINDOW, Vec2::new(config.width, config.height));
            log::info!(
                "Letterbox: scale {:.3}, offset ({:.1}, {:.1})",
                viewport.scale,
                viewport.offset.x,
                viewport.offset.y
            );

            let mut session = flappy::Session::new(config, seed);
            let stats = run(
                &mut session,
                frames,
                &mut audio,
                flappy::autopilot,
                scene::flappy,
            );
            log::debug!("{:?}", stats);
            log::info!(
                "Flappy finished in {:?}: round {}, score {}",
                session.mode,
                session.round,
                session.score
            );
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, String> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_args() {
        let parsed = args(&["flappy", "5", "cfg.json"]).unwrap();
        assert_eq!(parsed.game, Game::Flappy);
        assert_eq!(parsed.seconds, 5.0);
        assert_eq!(parsed.settings, Some(PathBuf::from("cfg.json")));

        let parsed = args(&["breakout"]).unwrap();
        assert_eq!(parsed.seconds, DEFAULT_SECONDS);
        assert!(parsed.settings.is_none());

        assert!(args(&[]).is_err());
        assert!(args(&["pong"]).is_err());
        assert!(args(&["flappy", "-1"]).is_err());
    }

    #[test]
    fn test_short_headless_run() {
        let mut audio = AudioManager::new(Box::new(LogBackend));
        let mut session = flappy::Session::new(Default::default(), 3);
        let stats = run(&mut session, 120, &mut audio, flappy::autopilot, scene::flappy);
        assert_eq!(stats.frames, 120);
        assert_eq!(stats.ticks, 120);
        assert!(stats.labels >= 120);
    }
}
