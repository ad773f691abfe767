//! Frame-driven simulation tick
//!
//! Order within a tick: key edges → kinematics → player collisions →
//! enemy fire → bullet collisions → level transitions. Entities killed in a
//! pass stay in their collection (skipped by later queries) until the next
//! compaction.

use super::collision::{collide_one_vs_many, collides_with_any};
use super::entity::Motion;
use super::input::{Key, KeyEvent, TickInput};
use super::kinematics;
use super::spawn;
use super::state::{GameEvent, GameState};
use crate::audio::Sound;
use crate::error::SimError;
use crate::tuning::PlayerControl;

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> Result<(), SimError> {
    for &event in &input.events {
        apply_key_event(state, event)?;
    }

    // Nothing moves on the instructions or game-over screens
    if !state.is_running() {
        return Ok(());
    }

    state.time_ticks += 1;

    advance_kinematics(state);
    state.compact();

    let player_destroyed = resolve_player_hits(state);
    if !player_destroyed {
        spawn::roll_enemy_fire(state);
    }
    resolve_bullet_hits(state);
    state.compact();

    // A destroyed player wins over a cleared level on the same tick
    if player_destroyed {
        state.end_game();
    } else if state.hostiles_remaining() == 0 {
        state.advance_level()?;
    }

    Ok(())
}

/// Apply one key edge
pub fn apply_key_event(state: &mut GameState, event: KeyEvent) -> Result<(), SimError> {
    state.input.apply(event);
    let running = state.is_running();

    match event {
        KeyEvent::Press(key) if running => handle_play_press(state, key),
        KeyEvent::Release(key) if running => handle_play_release(state, key),
        KeyEvent::Press(Key::I) => state.show_instructions(),
        KeyEvent::Press(Key::Digit(n)) => {
            let level = u32::from(n);
            if (1..=state.level_count()).contains(&level) {
                state.select_level(level)?;
            } else {
                log::debug!("No level {} to select", level);
            }
        }
        KeyEvent::Press(key) => log::debug!("Ignored {:?} while not running", key),
        KeyEvent::Release(_) => {}
    }
    Ok(())
}

fn handle_play_press(state: &mut GameState, key: Key) {
    let tuning = &state.tuning;
    let (step, turn_rate) = (tuning.lateral_step, tuning.turn_rate);
    let (min_speed, max_speed) = (tuning.min_speed, tuning.max_speed);

    match (tuning.player_control, key) {
        (_, Key::Space) => {
            spawn::fire_player_bullet(state);
        }
        (PlayerControl::Lateral, Key::Left) => nudge_lateral(state, -step),
        (PlayerControl::Lateral, Key::Right) => nudge_lateral(state, step),
        (PlayerControl::Thrust, Key::A) => set_turn(state, turn_rate),
        (PlayerControl::Thrust, Key::D) => set_turn(state, -turn_rate),
        (PlayerControl::Thrust, Key::W) => throttle(state, 1.0, min_speed, max_speed),
        (PlayerControl::Thrust, Key::S) => throttle(state, -1.0, min_speed, max_speed),
        (_, key) => log::debug!("Ignored {:?} while running", key),
    }
}

/// Releasing a direction falls back to the opposite key if it is still held
fn handle_play_release(state: &mut GameState, key: Key) {
    let input = &state.input;
    let held_direction = |positive: Key, negative: Key| -> f32 {
        if input.is_key_down(positive) {
            1.0
        } else if input.is_key_down(negative) {
            -1.0
        } else {
            0.0
        }
    };
    let lateral = state.tuning.lateral_step * held_direction(Key::Right, Key::Left);
    let turn = state.tuning.turn_rate * held_direction(Key::A, Key::D);

    let Some(player) = state.player.as_mut() else {
        return;
    };
    match (&mut player.motion, key) {
        (Motion::Lateral { velocity }, Key::Left | Key::Right) => *velocity = lateral,
        (Motion::Thrust { angular_velocity, .. }, Key::A | Key::D) => *angular_velocity = turn,
        _ => {}
    }
}

fn nudge_lateral(state: &mut GameState, delta: f32) {
    if let Some(Motion::Lateral { velocity }) = state.player.as_mut().map(|p| &mut p.motion) {
        *velocity += delta;
    }
}

fn set_turn(state: &mut GameState, rate: f32) {
    if let Some(Motion::Thrust {
        angular_velocity, ..
    }) = state.player.as_mut().map(|p| &mut p.motion)
    {
        *angular_velocity = rate;
    }
}

/// Step speed by `delta` while it is inside the throttle range
fn throttle(state: &mut GameState, delta: f32, min: f32, max: f32) {
    if let Some(Motion::Thrust { speed, .. }) = state.player.as_mut().map(|p| &mut p.motion) {
        if (delta > 0.0 && *speed < max) || (delta < 0.0 && *speed > min) {
            *speed += delta;
        }
    }
}

fn advance_kinematics(state: &mut GameState) {
    let screen = state.tuning.screen;
    let rng = &mut state.rng;

    if let Some(player) = state.player.as_mut() {
        kinematics::update(player, screen, rng);
    }
    for group in [
        &mut state.ground_enemies,
        &mut state.aerial_enemies,
        &mut state.player_bullets,
        &mut state.explosions,
        &mut state.enemy_bullets,
    ] {
        for entity in group.iter_mut() {
            kinematics::update(entity, screen, rng);
        }
    }
}

/// Player against enemies and enemy bullets; returns true if destroyed
fn resolve_player_hits(state: &mut GameState) -> bool {
    let Some(player) = state.player.as_ref() else {
        return false;
    };

    let rammed = collides_with_any(player, &state.ground_enemies)
        || collides_with_any(player, &state.aerial_enemies);
    let shot_by = collide_one_vs_many(player, &state.enemy_bullets);
    if !rammed && shot_by.is_empty() {
        return false;
    }

    if let Some(&first) = shot_by.first() {
        state.enemy_bullets[first].kill();
    }
    if let Some(player) = state.player.as_mut() {
        player.kill();
    }
    log::info!("Player destroyed on tick {}", state.time_ticks);
    state.push_event(GameEvent::Sound(Sound::Explosion));
    state.push_event(GameEvent::PlayerDestroyed);
    true
}

/// Each live player bullet against both enemy groups
///
/// A hit kills the bullet and every enemy it overlaps, scores each kill, and
/// leaves a single explosion at the first enemy matched.
fn resolve_bullet_hits(state: &mut GameState) {
    for b in 0..state.player_bullets.len() {
        let bullet = &state.player_bullets[b];
        if !bullet.is_alive() {
            continue;
        }

        let ground = collide_one_vs_many(bullet, &state.ground_enemies);
        let aerial = collide_one_vs_many(bullet, &state.aerial_enemies);
        let first_hit = ground
            .first()
            .map(|&i| state.ground_enemies[i].pos)
            .or_else(|| aerial.first().map(|&i| state.aerial_enemies[i].pos));
        let Some(explosion_pos) = first_hit else {
            continue;
        };

        state.player_bullets[b].kill();
        for &i in &ground {
            state.ground_enemies[i].kill();
        }
        for &i in &aerial {
            state.aerial_enemies[i].kill();
        }

        let kills = (ground.len() + aerial.len()) as i64;
        state.score += kills * state.tuning.kill_score;
        log::debug!("Bullet hit {} enemies, score {}", kills, state.score);

        spawn::spawn_explosion(state, explosion_pos);
        state.push_event(GameEvent::Sound(Sound::Explosion));
    }
}
