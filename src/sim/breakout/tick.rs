//! Fixed timestep Breakout tick
//!
//! One call advances the active mode by `dt`. Transitions are decided after
//! the mode's update logic has run, and every transition goes through the
//! mode graph: Title -> Serve -> Play -> (Serve | Victory | GameOver) -> Serve.

use rand::Rng;

use super::state::{BALL_SKINS, MenuItem, Mode, Session};
use crate::audio::Cue;
use crate::sim::collision::{PaddleSteer, bounce_off_walls, paddle_bounce, resolve};
use crate::sim::input::TickInput;

/// Advance the session by one fixed timestep
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) {
    // Pause only applies while a ball is in the field
    if input.pause && matches!(session.mode, Mode::Serve | Mode::Play) {
        session.paused = !session.paused;
        session.cue(Cue::Pause);
        log::info!("{}", if session.paused { "Paused" } else { "Resumed" });
    }

    if session.paused {
        return;
    }

    match session.mode {
        Mode::Title { highlighted } => update_title(session, input, highlighted),
        Mode::HighScores => {
            if input.confirm {
                session.cue(Cue::Select);
                set_mode(
                    session,
                    Mode::Title {
                        highlighted: MenuItem::HighScores,
                    },
                );
            }
        }
        Mode::Serve => update_serve(session, input, dt),
        Mode::Play => update_play(session, input, dt),
        Mode::Victory => {
            if input.confirm {
                session.advance_level();
                session.cue(Cue::Confirm);
                set_mode(session, Mode::Serve);
            }
        }
        Mode::GameOver { .. } => {
            if input.confirm {
                session.reset_for_retry();
                session.cue(Cue::Confirm);
                set_mode(session, Mode::Serve);
            }
        }
    }
}

fn set_mode(session: &mut Session, mode: Mode) {
    log::info!("Breakout: {:?} -> {:?}", session.mode, mode);
    session.mode = mode;
}

fn update_title(session: &mut Session, input: &TickInput, highlighted: MenuItem) {
    if input.up || input.down {
        session.cue(Cue::Select);
        session.mode = Mode::Title {
            highlighted: highlighted.toggled(),
        };
        return;
    }

    if input.confirm {
        session.cue(Cue::Confirm);
        match highlighted {
            MenuItem::Start => {
                session.ball.rest_on(&session.paddle);
                set_mode(session, Mode::Serve);
            }
            MenuItem::HighScores => set_mode(session, Mode::HighScores),
        }
    }
}

fn update_serve(session: &mut Session, input: &TickInput, dt: f32) {
    let config = &session.config;
    session
        .paddle
        .update(input.horizontal(), config.paddle_speed, config.width, dt);
    session.ball.rest_on(&session.paddle);

    if input.confirm {
        let dx = session
            .rng
            .random_range(-config.launch_dx..=config.launch_dx);
        let dy = -session
            .rng
            .random_range(config.launch_dy_min..=config.launch_dy_max);
        session.ball.dx = dx;
        session.ball.dy = dy;
        session.ball.skin = session.rng.random_range(0..BALL_SKINS);
        set_mode(session, Mode::Play);
    }
}

fn update_play(session: &mut Session, input: &TickInput, dt: f32) {
    let config = session.config.clone();

    session
        .paddle
        .update(input.horizontal(), config.paddle_speed, config.width, dt);
    session.ball.update(dt);

    // Walls
    let mut rect = session.ball.rect();
    let mut velocity = session.ball.velocity();
    if bounce_off_walls(&mut rect, &mut velocity, config.width) {
        session.cue(Cue::WallHit);
    }
    session.ball.set_rect(rect);
    session.ball.set_velocity(velocity);

    // Paddle
    let steer = PaddleSteer {
        base: config.steer_base,
        per_px: config.steer_per_px,
    };
    if let Some(res) = paddle_bounce(
        session.ball.rect(),
        session.ball.velocity(),
        session.paddle.rect(),
        session.paddle.dx,
        steer,
    ) {
        session.ball.set_velocity(res.velocity);
        session.ball.set_rect(session.ball.rect().with_pos(res.position));
        session.cue(Cue::PaddleHit);
    }

    // Bricks: only the first overlapping brick is resolved each tick
    let ball_rect = session.ball.rect();
    let hit = session
        .bricks
        .iter()
        .position(|b| b.in_play && b.rect().overlaps(&ball_rect));

    if let Some(index) = hit {
        let brick_rect = session.bricks[index].rect();
        if let Some(res) = resolve(ball_rect, session.ball.velocity(), brick_rect, config.edge_inset) {
            let brick = &mut session.bricks[index];
            brick.in_play = false;
            let points = brick.points();
            session.score += points;
            session.cue(Cue::BrickHit);

            session.ball.set_velocity(res.velocity);
            session.ball.set_rect(ball_rect.with_pos(res.position));
            if session.ball.dy.abs() < config.speedup_limit {
                session.ball.dy *= config.brick_speedup;
            }

            try_recover(session);

            if session.bricks_in_play() == 0 {
                session.cue(Cue::Victory);
                set_mode(session, Mode::Victory);
                return;
            }
        }
    }

    // Floor
    if session.ball.y >= config.height {
        lose_life(session);
    }
}

/// Restore a heart and grow the paddle once the score passes the threshold
fn try_recover(session: &mut Session) {
    if session.score <= session.recover_points {
        return;
    }

    let config = &session.config;
    session.health = (session.health + 1).min(config.max_health);
    session.recover_points += (session.recover_points * 2).min(config.recover_points_cap);
    let size = session.paddle.size + 1;
    session
        .paddle
        .resize(size, config.paddle_unit_width, config.width);
    session.cue(Cue::Recover);
    log::info!(
        "Recovered: health {}, next at {}",
        session.health,
        session.recover_points
    );
}

fn lose_life(session: &mut Session) {
    session.health = session.health.saturating_sub(1);
    session.cue(Cue::Hurt);

    let size = session.paddle.size.saturating_sub(1);
    let config = &session.config;
    session
        .paddle
        .resize(size, config.paddle_unit_width, config.width);

    if session.health == 0 {
        let rank = session.high_scores.add_score(session.score, session.level);
        if let Some(rank) = rank {
            log::info!("New high score #{}: {}", rank, session.score);
            session.cue(Cue::HighScore);
        }
        log::info!(
            "Game over on level {} with {} points",
            session.level,
            session.score
        );
        session.cue(Cue::GameOver);
        set_mode(session, Mode::GameOver { rank });
    } else {
        session.ball.rest_on(&session.paddle);
        set_mode(session, Mode::Serve);
    }
}

/// Demo player: tracks the ball with the paddle and confirms every prompt
pub fn autopilot(session: &Session) -> TickInput {
    let mut input = TickInput::default();

    match session.mode {
        Mode::Title { highlighted } => {
            if highlighted == MenuItem::Start {
                input.confirm = true;
            } else {
                input.up = true;
            }
        }
        Mode::Play => {
            let ball_center = session.ball.rect().center().x;
            let paddle_center = session.paddle.rect().center().x;
            // Aim slightly off-centre so rebounds pick up some steering
            let target = ball_center + session.ball.dx.signum() * session.paddle.width / 6.0;
            let deadzone = session.paddle.width / 8.0;
            if target < paddle_center - deadzone {
                input.left_held = true;
            } else if target > paddle_center + deadzone {
                input.right_held = true;
            }
        }
        Mode::Serve | Mode::HighScores | Mode::Victory | Mode::GameOver { .. } => {
            input.confirm = true;
        }
    }

    input
}
