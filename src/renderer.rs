//! Rendering collaborator interface
//!
//! The simulation never reads anything back from the renderer. Each frame the
//! driver calls `draw_frame` once, after the tick has completed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{Entity, GamePhase, GameState};
use crate::tuning::PlayerControl;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0);
    pub const WHITE: Color = Color(255, 255, 255);
    pub const GREEN: Color = Color(0, 255, 0);
    pub const SKY_BLUE: Color = Color(135, 206, 235);
    pub const WHITE_SMOKE: Color = Color(245, 245, 245);
    pub const ROSE_RED: Color = Color(194, 30, 86);
    pub const BLUE_GRAY: Color = Color(102, 153, 204);
    pub const BLUE_GREEN: Color = Color(13, 152, 186);
    pub const DARK_SLATE: Color = Color(47, 79, 79);
}

/// Axis-aligned screen rectangle given by its edges
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn lrtb(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }
}

/// Draw calls the core needs from a rendering backend
pub trait Renderer {
    /// Start a new frame filled with `color`
    fn clear(&mut self, color: Color);
    /// Stretch a background texture over the whole screen
    fn draw_background(&mut self, id: &str);
    fn draw(&mut self, entities: &[Entity]);
    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color, size: f32);
    fn draw_filled_rect(&mut self, rect: Rect, color: Color);
}

const TEXT_SIZE: f32 = 14.0;

/// Draw the current screen for `state`
pub fn draw_frame(state: &GameState, renderer: &mut dyn Renderer) {
    let screen = state.tuning.screen;
    let center = screen / 2.0;
    let full = Rect::lrtb(0.0, screen.x, screen.y, 0.0);

    match state.phase() {
        GamePhase::Instructions => {
            renderer.clear(Color::BLACK);
            renderer.draw_filled_rect(full, Color::BLACK);
            let controls = match state.tuning.player_control {
                PlayerControl::Lateral => "Use arrow keys to move BB8 and use SPACE to shoot.",
                PlayerControl::Thrust => {
                    "Use W, A, S, and D to move the plane and use SPACE to shoot."
                }
            };
            let text = format!(
                "{controls}  Choose level 1 to {}.",
                state.tuning.level_count()
            );
            renderer.draw_text(&text, center - Vec2::new(290.0, 0.0), Color::GREEN, TEXT_SIZE);
        }
        GamePhase::Level(level) => {
            // Level config is validated when the level starts
            let (color, background) = state
                .tuning
                .level(level)
                .map(|cfg| (cfg.background_color, cfg.background.as_deref()))
                .unwrap_or((Color::BLACK, None));
            renderer.clear(color);
            if let Some(id) = background {
                renderer.draw_background(id);
            }

            renderer.draw(&state.ground_enemies);
            renderer.draw(&state.aerial_enemies);
            renderer.draw(state.player.as_slice());
            renderer.draw(&state.player_bullets);
            renderer.draw(&state.explosions);
            renderer.draw(&state.enemy_bullets);

            draw_hud(state, level, renderer);
        }
        GamePhase::GameOver => {
            renderer.clear(Color::BLACK);
            renderer.draw_filled_rect(full, Color::BLACK);
            let text = format!(
                "Game over! Choose level 1 to {} to play again!",
                state.tuning.level_count()
            );
            renderer.draw_text(&text, center - Vec2::new(150.0, 0.0), Color::GREEN, TEXT_SIZE);
            renderer.draw_text(
                "Press I for instructions.",
                center - Vec2::new(90.0, 20.0),
                Color::GREEN,
                TEXT_SIZE,
            );
            renderer.draw_text(
                &format!("Score: {}", state.score),
                center - Vec2::new(35.0, 40.0),
                Color::WHITE,
                TEXT_SIZE,
            );
        }
    }
}

fn draw_hud(state: &GameState, level: u32, renderer: &mut dyn Renderer) {
    let screen = state.tuning.screen;
    let mut lines = vec![format!("Level: {level}"), format!("Score: {}", state.score)];
    if let Some(speed) = state.player.as_ref().and_then(|p| p.speed()) {
        lines.push(format!("Speed: {speed}"));
    }

    let panel_height = 20.0 * lines.len() as f32 - 5.0;
    renderer.draw_filled_rect(
        Rect::lrtb(screen.x - 95.0, screen.x, screen.y, screen.y - panel_height),
        Color::WHITE,
    );
    for (i, line) in lines.iter().enumerate() {
        let pos = Vec2::new(screen.x - 90.0, screen.y - 15.0 - 20.0 * i as f32);
        renderer.draw_text(line, pos, Color::BLACK, TEXT_SIZE);
    }
}

/// Renderer that records text and counts sprites instead of drawing
///
/// Used by the headless binary and tests.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    pub frames: u64,
    pub sprites: usize,
    pub background: Option<String>,
    pub texts: Vec<String>,
}

impl Renderer for HeadlessRenderer {
    fn clear(&mut self, _color: Color) {
        self.frames += 1;
        self.sprites = 0;
        self.background = None;
        self.texts.clear();
    }

    fn draw_background(&mut self, id: &str) {
        self.background = Some(id.to_string());
    }

    fn draw(&mut self, entities: &[Entity]) {
        self.sprites += entities.len();
    }

    fn draw_text(&mut self, text: &str, _pos: Vec2, _color: Color, _size: f32) {
        log::trace!("text: {text}");
        self.texts.push(text.to_string());
    }

    fn draw_filled_rect(&mut self, _rect: Rect, _color: Color) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_instructions_screen() {
        let state = GameState::new(Tuning::bb8(), 1);
        let mut renderer = HeadlessRenderer::default();
        draw_frame(&state, &mut renderer);
        assert_eq!(renderer.frames, 1);
        assert!(renderer.texts[0].contains("arrow keys"));
        assert_eq!(renderer.sprites, 0);
    }

    #[test]
    fn test_level_screen_draws_hud_and_sprites() {
        let mut state = GameState::new(Tuning::bb8(), 1);
        state.select_level(2).unwrap();
        let mut renderer = HeadlessRenderer::default();
        draw_frame(&state, &mut renderer);
        assert_eq!(renderer.background.as_deref(), Some("sky2"));
        // player + two troopers
        assert_eq!(renderer.sprites, 3);
        assert_eq!(renderer.texts, vec!["Level: 2", "Score: 0"]);
    }

    #[test]
    fn test_fighter_hud_shows_speed() {
        let mut state = GameState::new(Tuning::fighter(), 1);
        state.select_level(1).unwrap();
        let mut renderer = HeadlessRenderer::default();
        draw_frame(&state, &mut renderer);
        assert_eq!(renderer.texts.last().map(String::as_str), Some("Speed: 2"));
    }

    #[test]
    fn test_game_over_screen_shows_score() {
        let mut state = GameState::new(Tuning::bb8(), 1);
        state.select_level(1).unwrap();
        state.score = 9;
        state.end_game();
        let mut renderer = HeadlessRenderer::default();
        draw_frame(&state, &mut renderer);
        assert!(renderer.texts.iter().any(|t| t == "Score: 9"));
    }
}
