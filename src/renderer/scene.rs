//! Scene building
//!
//! A `Scene` is everything one frame draws, in logical playfield pixels:
//! textured sprites in back-to-front order plus text labels on top. Building
//! a scene only reads the session, so the host can draw at any rate without
//! touching simulation state.

use glam::Vec2;

use super::atlas::Atlas;
use super::vertex::colors;
use crate::sim::Rect;
use crate::sim::breakout::{self, MenuItem};
use crate::sim::flappy;

/// Textures the host must provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureId {
    /// Full-screen Breakout backdrop
    Background,
    /// Breakout sheet: paddles, balls, bricks
    Breakout,
    Hearts,
    /// Scrolling Flappy backdrop
    Scenery,
    Ground,
    Bird,
    Pipe,
}

/// Font sizes, in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSize {
    Small,
    Medium,
    Large,
    Huge,
}

impl FontSize {
    pub fn pixels(self) -> f32 {
        match self {
            FontSize::Small => 8.0,
            FontSize::Medium => 16.0,
            FontSize::Large => 32.0,
            FontSize::Huge => 56.0,
        }
    }
}

/// Horizontal anchoring of a label's `pos.x`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    /// `pos.x` is the centre of the text
    Center,
    /// `pos.x` is the right edge of the text
    Right,
}

/// One textured rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub texture: TextureId,
    /// Source quad in texture pixels; `None` samples the whole texture
    pub src: Option<Rect>,
    /// Destination in logical pixels
    pub dst: Rect,
    /// Draw upside down
    pub flip_y: bool,
    pub tint: [f32; 4],
}

impl Sprite {
    /// A quad from a sheet, drawn at its natural size
    pub fn quad(texture: TextureId, src: Rect, pos: Vec2) -> Self {
        Self {
            texture,
            src: Some(src),
            dst: src.with_pos(pos),
            flip_y: false,
            tint: colors::WHITE,
        }
    }

    /// A whole texture stretched over `dst`
    pub fn whole(texture: TextureId, dst: Rect) -> Self {
        Self {
            texture,
            src: None,
            dst,
            flip_y: false,
            tint: colors::WHITE,
        }
    }
}

/// One line of text; the host measures and rasterizes it
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    /// Anchor point; y is the top of the text
    pub pos: Vec2,
    pub size: FontSize,
    pub align: Align,
    pub color: [f32; 4],
}

/// Everything to draw for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Logical resolution
    pub width: f32,
    pub height: f32,
    /// Back to front
    pub sprites: Vec<Sprite>,
    /// Drawn after all sprites
    pub labels: Vec<Label>,
}

impl Scene {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            sprites: Vec::new(),
            labels: Vec::new(),
        }
    }

    pub fn sprite(&mut self, sprite: Sprite) {
        self.sprites.push(sprite);
    }

    pub fn text(
        &mut self,
        text: impl Into<String>,
        pos: Vec2,
        size: FontSize,
        align: Align,
        color: [f32; 4],
    ) {
        self.labels.push(Label {
            text: text.into(),
            pos,
            size,
            align,
            color,
        });
    }

    /// Text centred horizontally on the playfield
    pub fn centered(&mut self, text: impl Into<String>, y: f32, size: FontSize, color: [f32; 4]) {
        let pos = Vec2::new(self.width / 2.0, y);
        self.text(text, pos, size, Align::Center, color);
    }

    /// Frame counter in the top-left corner
    pub fn fps(&mut self, fps: u32) {
        self.text(
            format!("{} FPS", fps),
            Vec2::new(5.0, 5.0),
            FontSize::Small,
            Align::Left,
            colors::FPS,
        );
    }

    fn pause_overlay(&mut self) {
        let y = self.height / 2.0 - 16.0;
        self.centered("PAUSED", y, FontSize::Large, colors::PAUSE);
    }

    /// First label with exactly this text
    pub fn find_label(&self, text: &str) -> Option<&Label> {
        self.labels.iter().find(|label| label.text == text)
    }

    /// Sprites drawn from one texture, in draw order
    pub fn sprites_for(&self, texture: TextureId) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter().filter(move |s| s.texture == texture)
    }
}

/// Build the Breakout frame
pub fn breakout(session: &breakout::Session, atlas: &Atlas) -> Scene {
    use breakout::Mode;

    let config = &session.config;
    let (w, h) = (config.width, config.height);
    let mut scene = Scene::new(w, h);

    // Backdrop overdraws by a pixel or two to hide seams when scaled
    scene.sprite(Sprite::whole(
        TextureId::Background,
        Rect::new(0.0, 0.0, w + 1.0, h + 2.0),
    ));

    match session.mode {
        Mode::Title { highlighted } => {
            scene.centered("BREAKOUT", h / 3.0, FontSize::Large, colors::WHITE);
            let color = |item: MenuItem| {
                if highlighted == item {
                    colors::HIGHLIGHT
                } else {
                    colors::WHITE
                }
            };
            scene.centered(
                "START",
                h / 2.0 + 70.0,
                FontSize::Medium,
                color(MenuItem::Start),
            );
            scene.centered(
                "HIGH SCORES",
                h / 2.0 + 90.0,
                FontSize::Medium,
                color(MenuItem::HighScores),
            );
        }
        Mode::HighScores => {
            scene.centered("High Scores", 20.0, FontSize::Large, colors::WHITE);
            if session.high_scores.is_empty() {
                scene.centered("No scores yet", 80.0, FontSize::Medium, colors::WHITE);
            }
            for (i, entry) in session.high_scores.entries.iter().enumerate() {
                let y = 60.0 + i as f32 * 13.0;
                let row = |x: f32, text: String, align: Align| (Vec2::new(x, y), text, align);
                for (pos, text, align) in [
                    row(w / 4.0, format!("{}.", i + 1), Align::Left),
                    row(w / 2.0, format!("Level {}", entry.level), Align::Center),
                    row(w * 3.0 / 4.0, entry.score.to_string(), Align::Right),
                ] {
                    scene.text(text, pos, FontSize::Medium, align, colors::WHITE);
                }
            }
            scene.centered(
                "Press Enter to return to the main menu!",
                h - 18.0,
                FontSize::Small,
                colors::WHITE,
            );
        }
        Mode::Serve | Mode::Play | Mode::Victory | Mode::GameOver { .. } => {
            breakout_field(&mut scene, session, atlas);

            match session.mode {
                Mode::Serve => {
                    scene.centered(
                        format!("Level {}", session.level),
                        h / 3.0,
                        FontSize::Large,
                        colors::WHITE,
                    );
                    scene.centered(
                        "Press Enter to serve!",
                        h / 2.0,
                        FontSize::Medium,
                        colors::WHITE,
                    );
                }
                Mode::Victory => {
                    scene.centered(
                        format!("Level {} complete!", session.level),
                        h / 4.0,
                        FontSize::Large,
                        colors::WHITE,
                    );
                    scene.centered(
                        "Press Enter to serve!",
                        h / 2.0,
                        FontSize::Medium,
                        colors::WHITE,
                    );
                }
                Mode::GameOver { rank } => {
                    scene.centered("GAME OVER", h / 3.0, FontSize::Large, colors::GAME_OVER);
                    scene.centered(
                        format!("Final Score: {}", session.score),
                        h / 2.0,
                        FontSize::Medium,
                        colors::WHITE,
                    );
                    if let Some(rank) = rank {
                        scene.centered(
                            format!("New high score! #{}", rank),
                            h / 2.0 + 20.0,
                            FontSize::Medium,
                            colors::HIGHLIGHT,
                        );
                    }
                    scene.centered("Press Enter!", h - h / 4.0, FontSize::Medium, colors::WHITE);
                }
                _ => {}
            }
        }
    }

    if session.paused {
        scene.pause_overlay();
    }
    scene
}

/// Bricks, paddle, ball and the health/score HUD
fn breakout_field(scene: &mut Scene, session: &breakout::Session, atlas: &Atlas) {
    let config = &session.config;

    for brick in session.bricks.iter().filter(|b| b.in_play) {
        scene.sprite(Sprite::quad(
            TextureId::Breakout,
            atlas.brick(brick.sprite_index()),
            Vec2::new(brick.x, brick.y),
        ));
    }

    let paddle = &session.paddle;
    scene.sprite(Sprite::quad(
        TextureId::Breakout,
        atlas.paddle(paddle.skin, paddle.size),
        Vec2::new(paddle.x, paddle.y),
    ));

    let ball = &session.ball;
    scene.sprite(Sprite::quad(
        TextureId::Breakout,
        atlas.ball(ball.skin),
        Vec2::new(ball.x, ball.y),
    ));

    let hearts_x = config.width - 100.0;
    for i in 0..config.max_health {
        let full = i < session.health;
        scene.sprite(Sprite::quad(
            TextureId::Hearts,
            atlas.heart(full),
            Vec2::new(hearts_x + i as f32 * 11.0, 4.0),
        ));
    }

    scene.text(
        "Score:",
        Vec2::new(config.width - 60.0, 5.0),
        FontSize::Small,
        Align::Left,
        colors::WHITE,
    );
    scene.text(
        session.score.to_string(),
        Vec2::new(config.width - 5.0, 5.0),
        FontSize::Small,
        Align::Right,
        colors::WHITE,
    );
}

/// Build the Flappy Bird frame
pub fn flappy(session: &flappy::Session) -> Scene {
    use flappy::Mode;

    let config = &session.config;
    let (w, h) = (config.width, config.height);
    let mut scene = Scene::new(w, h);

    // Scenery is wider than the screen and loops before its seam shows
    scene.sprite(Sprite::whole(
        TextureId::Scenery,
        Rect::new(-session.parallax.background, 0.0, config.background_loop + w, h),
    ));

    if session.mode == Mode::Play {
        for pair in &session.pipes {
            for pipe in [&pair.top, &pair.bottom] {
                scene.sprite(Sprite {
                    flip_y: pipe.flipped,
                    ..Sprite::whole(TextureId::Pipe, pipe.rect())
                });
            }
        }
        scene.sprite(Sprite::whole(TextureId::Bird, session.bird.rect()));
    }

    scene.sprite(Sprite::whole(
        TextureId::Ground,
        Rect::new(-session.parallax.ground, h - 16.0, config.ground_loop + w, 16.0),
    ));

    match session.mode {
        Mode::Title => {
            scene.centered("Fifty Bird", 64.0, FontSize::Large, colors::WHITE);
            scene.centered("Press Enter", 100.0, FontSize::Medium, colors::WHITE);
        }
        Mode::Countdown { remaining, .. } => {
            scene.centered(remaining.to_string(), 120.0, FontSize::Huge, colors::WHITE);
        }
        Mode::Play => {
            scene.text(
                format!("Score: {}", session.score),
                Vec2::new(8.0, 8.0),
                FontSize::Large,
                Align::Left,
                colors::WHITE,
            );
        }
        Mode::Score => {
            scene.centered("Oof! You lost!", 64.0, FontSize::Large, colors::WHITE);
            scene.centered(
                format!("Score: {}", session.score),
                100.0,
                FontSize::Medium,
                colors::WHITE,
            );
            scene.centered(
                "Press Enter to Play Again!",
                160.0,
                FontSize::Medium,
                colors::WHITE,
            );
        }
    }

    if session.paused {
        scene.pause_overlay();
    }
    scene
}
