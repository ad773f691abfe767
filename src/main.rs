//! BB8 Attack entry point
//!
//! Runs the game headless with a scripted pilot: loads settings, plays from
//! level 1 until the game ends or the frame limit is hit, and logs the result.

use std::path::PathBuf;

use anyhow::{Context, Result};
use glam::Vec2;

use bb8_attack::audio::AudioManager;
use bb8_attack::consts::TICKS_PER_SECOND;
use bb8_attack::renderer::HeadlessRenderer;
use bb8_attack::sim::{Entity, GamePhase, GameState, Key, KeyEvent, TickInput};
use bb8_attack::tuning::PlayerControl;
use bb8_attack::{FrameDriver, Settings, normalize_degrees};

const DEFAULT_SETTINGS: &str = "bb8-attack.json";
const MAX_FRAMES: u64 = TICKS_PER_SECOND as u64 * 180;
const FIRE_INTERVAL: u64 = 12;
/// Degrees of heading error tolerated before turning
const AIM_TOLERANCE: f32 = 6.0;

fn main() -> Result<()> {
    env_logger::init();

    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS));
    let settings = Settings::load_or_default(&settings_path);
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!(
        "BB8 Attack ({}) starting with seed {}",
        settings.mode.as_str(),
        seed
    );

    let mut audio = AudioManager::new();
    settings.apply_audio(&mut audio);
    let tuning = settings
        .load_tuning()
        .context("failed to load custom tuning")?;
    let state = GameState::new(tuning, seed);
    let mut driver = FrameDriver::new(state, audio, HeadlessRenderer::default());
    let mut pilot = Autopilot::default();

    for frame in 0..MAX_FRAMES {
        let input = pilot.next_input(driver.state());
        driver
            .frame(&input)
            .with_context(|| format!("simulation failed on frame {frame}"))?;
        if driver.state().phase() == GamePhase::GameOver {
            break;
        }
    }

    let state = driver.state();
    log::info!(
        "Finished on {:?} after {} ticks: score {}, {} sounds, {} frames drawn",
        state.phase(),
        state.time_ticks,
        state.score,
        driver.audio().played(),
        driver.renderer().frames
    );
    Ok(())
}

/// Scripted player: starts level 1, steers at the nearest enemy, fires
/// on a fixed cadence
#[derive(Debug, Default)]
struct Autopilot {
    started: bool,
    held: Option<Key>,
    frames: u64,
}

impl Autopilot {
    fn next_input(&mut self, state: &GameState) -> TickInput {
        self.frames += 1;
        let mut input = TickInput::default();

        if !state.is_running() {
            if !self.started {
                self.started = true;
                input.events.push(KeyEvent::Press(Key::Digit(1)));
            }
            return input;
        }
        let Some(player) = state.player.as_ref() else {
            return input;
        };

        let wanted = nearest_enemy(state, player.pos)
            .and_then(|target| match state.tuning.player_control {
                PlayerControl::Lateral => steer_lateral(player, target),
                PlayerControl::Thrust => steer_thrust(player, target),
            });
        if wanted != self.held {
            if let Some(key) = self.held.take() {
                input.events.push(KeyEvent::Release(key));
            }
            if let Some(key) = wanted {
                input.events.push(KeyEvent::Press(key));
            }
            self.held = wanted;
        }

        if self.frames % FIRE_INTERVAL == 0 {
            input.events.push(KeyEvent::Press(Key::Space));
            input.events.push(KeyEvent::Release(Key::Space));
        }
        input
    }
}

fn nearest_enemy(state: &GameState, from: Vec2) -> Option<Vec2> {
    state
        .ground_enemies
        .iter()
        .chain(&state.aerial_enemies)
        .filter(|e| e.is_alive() && e.pos.y <= state.tuning.screen.y)
        .map(|e| e.pos)
        .min_by(|a, b| a.distance_squared(from).total_cmp(&b.distance_squared(from)))
}

fn steer_lateral(player: &Entity, target: Vec2) -> Option<Key> {
    let dx = target.x - player.pos.x;
    if dx.abs() < player.size.x / 4.0 {
        None
    } else if dx < 0.0 {
        Some(Key::Left)
    } else {
        Some(Key::Right)
    }
}

fn steer_thrust(player: &Entity, target: Vec2) -> Option<Key> {
    // Inverse of heading_to_velocity: 0 = up, positive turns left
    let to = target - player.pos;
    let desired = (-to.x).atan2(to.y).to_degrees();
    let error = normalize_degrees(desired - player.heading);
    if error > AIM_TOLERANCE {
        Some(Key::A)
    } else if error < -AIM_TOLERANCE {
        Some(Key::D)
    } else {
        None
    }
}
