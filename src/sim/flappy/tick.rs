//! Fixed timestep Flappy Bird tick
//!
//! Mode graph: Title -> Countdown -> Play -> Score -> Countdown.

use super::state::{Mode, Session};
use crate::audio::Cue;
use crate::sim::collision::overlaps_with_margin;
use crate::sim::input::TickInput;

const AUTOPILOT_OVERSHOOT: f32 = 46.0;
const AUTOPILOT_MARGIN: f32 = 6.0;

/// Advance the session by one fixed timestep
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) {
    if input.pause && matches!(session.mode, Mode::Countdown { .. } | Mode::Play) {
        session.paused = !session.paused;
        session.cue(Cue::Pause);
        log::info!("{}", if session.paused { "Paused" } else { "Resumed" });
    }

    if session.paused {
        return;
    }

    // Scenery keeps moving everywhere except the score screen
    if session.mode != Mode::Score {
        let config = &session.config;
        session.parallax.update(dt, config);
    }

    match session.mode {
        Mode::Title => {
            if input.confirm {
                session.cue(Cue::Confirm);
                start_countdown(session);
            }
        }
        Mode::Countdown { remaining, timer } => update_countdown(session, remaining, timer + dt),
        Mode::Play => update_play(session, input, dt),
        Mode::Score => {
            if input.confirm {
                session.reset_for_retry();
                session.cue(Cue::Confirm);
                start_countdown(session);
            }
        }
    }
}

fn set_mode(session: &mut Session, mode: Mode) {
    log::info!("Flappy: {:?} -> {:?}", session.mode, mode);
    session.mode = mode;
}

fn start_countdown(session: &mut Session) {
    let remaining = session.config.countdown_ticks;
    set_mode(
        session,
        Mode::Countdown {
            remaining,
            timer: 0.0,
        },
    );
}

fn update_countdown(session: &mut Session, mut remaining: u8, mut timer: f32) {
    let step = session.config.countdown_step;
    if timer >= step {
        timer -= step;
        remaining = remaining.saturating_sub(1);
    }

    if remaining == 0 {
        set_mode(session, Mode::Play);
    } else {
        session.mode = Mode::Countdown { remaining, timer };
    }
}

fn update_play(session: &mut Session, input: &TickInput, dt: f32) {
    let config = session.config.clone();

    session
        .spawner
        .update(dt, &mut session.pipes, &config, &mut session.rng);

    if session.bird.update(dt, input.jump, &config) {
        session.cue(Cue::Jump);
    }

    let bird_x = session.bird.x;
    let mut passed = 0;
    for pair in session.pipes.iter_mut() {
        if pair.update(dt, bird_x) {
            passed += 1;
        }
    }
    for _ in 0..passed {
        session.score += 1;
        session.cue(Cue::Score);
    }

    session.pipes.retain(|pair| !pair.is_offscreen());

    let bird = session.bird.rect();
    let crashed = session.pipes.iter().any(|pair| {
        overlaps_with_margin(bird, config.collision_margin, pair.top.rect())
            || overlaps_with_margin(bird, config.collision_margin, pair.bottom.rect())
    });
    if crashed {
        crash(session, "pipe");
        return;
    }

    if session.bird.y > config.height - config.floor_margin {
        crash(session, "ground");
    }
}

fn crash(session: &mut Session, what: &str) {
    log::info!("Hit the {} with {} points", what, session.score);
    session.cue(Cue::Explosion);
    session.cue(Cue::Hurt);
    set_mode(session, Mode::Score);
}

/// Demo player: flaps to stay inside the opening of the nearest pipes
pub fn autopilot(session: &Session) -> TickInput {
    let mut input = TickInput::default();

    match session.mode {
        Mode::Title | Mode::Score => input.confirm = true,
        Mode::Countdown { .. } => {}
        Mode::Play => {
            let bird = session.bird.rect();
            let config = &session.config;

            // Opening of the nearest pair not yet passed, or mid-screen
            let (band_top, band_bottom) = session
                .pipes
                .iter()
                .find(|pair| pair.trailing_edge() >= bird.left())
                .map(|pair| (pair.gap_top(), pair.gap_bottom()))
                .unwrap_or_else(|| {
                    let mid = (config.height - config.floor_margin) / 2.0;
                    (mid - 40.0, mid + 40.0)
                });

            // A flap carries the bird about 40px past the point where flapping
            // stops, so the threshold sits that far plus the bird below the top
            let threshold = (band_top + bird.height + AUTOPILOT_OVERSHOOT)
                .min(band_bottom - AUTOPILOT_MARGIN);
            input.jump = bird.bottom() > threshold;
        }
    }

    input
}
