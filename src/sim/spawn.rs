//! Entity construction: level population, shots, explosions
//!
//! Placement and enemy fire draw from the state's seeded RNG.

use glam::Vec2;
use rand::Rng;

use super::entity::{Entity, EntityKind, Motion};
use super::kinematics::random_between;
use super::state::{GameEvent, GameState};
use crate::audio::Sound;
use crate::tuning::{EnemyBehavior, FirePattern, LevelConfig, PlayerControl, Span};

/// Sprite art for bullets points sideways; travel is heading - 90
const BULLET_ART_OFFSET: f32 = 90.0;
/// Enemy plane art is drawn at 45 degrees
const PLANE_ART_OFFSET: f32 = 45.0;
const PLAYER_BOTTOM_MARGIN: f32 = 2.0;

/// Fresh player at the mode's start position
pub fn player(state: &mut GameState) -> Entity {
    let id = state.next_entity_id();
    let screen = state.tuning.screen;
    let size = state.tuning.sizes.player;

    match state.tuning.player_control {
        PlayerControl::Lateral => {
            let mut player = Entity::new(
                id,
                EntityKind::Player,
                Vec2::new(screen.x / 2.0, 0.0),
                size,
                Motion::Lateral { velocity: 0.0 },
            );
            player.set_bottom(PLAYER_BOTTOM_MARGIN);
            player
        }
        PlayerControl::Thrust => Entity::new(
            id,
            EntityKind::Player,
            screen / 2.0,
            size,
            Motion::Thrust {
                speed: state.tuning.start_speed,
                angular_velocity: 0.0,
            },
        ),
    }
}

/// Spawn `config.enemy_count` enemies into their bands
pub fn populate_enemies(state: &mut GameState, config: &LevelConfig) {
    for index in 0..config.enemy_count {
        let spawned = enemy(state, config, index);
        log::debug!("Spawned {:?} #{} at {:?}", spawned.kind, index, spawned.pos);
        match spawned.kind {
            EntityKind::AerialEnemy => state.aerial_enemies.push(spawned),
            _ => state.ground_enemies.push(spawned),
        }
    }
}

/// Build the `index`-th enemy of a level
pub fn enemy(state: &mut GameState, config: &LevelConfig, index: usize) -> Entity {
    let band = *config.bands.band_for(index);
    let id = state.next_entity_id();
    let pos = Vec2::new(
        sample(&mut state.rng, band.x),
        sample(&mut state.rng, band.y),
    );
    let sizes = state.tuning.sizes;

    match config.enemies {
        EnemyBehavior::Scroll { descent } => Entity::new(
            id,
            EntityKind::GroundEnemy,
            pos,
            sizes.ground_enemy,
            Motion::Scroll { descent },
        ),
        EnemyBehavior::Bounce => {
            let sign = |flip: bool| if flip { -1.0 } else { 1.0 };
            let velocity = Vec2::new(
                sign(state.rng.random_bool(0.5)),
                sign(state.rng.random_bool(0.5)),
            );
            Entity::new(
                id,
                EntityKind::GroundEnemy,
                pos,
                sizes.ground_enemy,
                Motion::Bounce { velocity },
            )
        }
        EnemyBehavior::Aerial { speed } => {
            let heading = sample(&mut state.rng, band.heading);
            Entity::new(
                id,
                EntityKind::AerialEnemy,
                pos,
                sizes.aerial_enemy,
                Motion::Projectile {
                    speed,
                    offset: PLANE_ART_OFFSET,
                },
            )
            .with_heading(heading)
        }
    }
}

/// Fire from the player: bullet, laser sound, score cost
///
/// Returns false when there is no player to fire from.
pub fn fire_player_bullet(state: &mut GameState) -> bool {
    let Some(player) = state.player.as_ref() else {
        return false;
    };
    let size = state.tuning.sizes.player_bullet;
    let (pos, heading) = match state.tuning.player_control {
        // Straight up from the top edge
        PlayerControl::Lateral => (
            Vec2::new(player.pos.x, player.top() + size.y / 2.0),
            BULLET_ART_OFFSET,
        ),
        PlayerControl::Thrust => (player.pos, player.heading + BULLET_ART_OFFSET),
    };

    let id = state.next_entity_id();
    let bullet = Entity::new(
        id,
        EntityKind::PlayerBullet,
        pos,
        size,
        Motion::Projectile {
            speed: state.tuning.player_bullet_speed,
            offset: BULLET_ART_OFFSET,
        },
    )
    .with_heading(heading);

    state.player_bullets.push(bullet);
    state.score += state.tuning.fire_cost;
    state.push_event(GameEvent::Sound(Sound::Laser));
    true
}

/// Independent 1-in-N roll per live enemy; each success fires one bullet
pub fn roll_enemy_fire(state: &mut GameState) {
    let odds = state.tuning.fire_odds.max(1);
    let mut shooters = Vec::new();
    for enemy in state.ground_enemies.iter().chain(&state.aerial_enemies) {
        if enemy.is_alive() && state.rng.random_range(0..odds) == 0 {
            shooters.push((enemy.pos, enemy.bottom()));
        }
    }

    for (center, bottom) in shooters {
        let bullet = enemy_bullet(state, center, bottom);
        log::debug!("Enemy fired from {:?}", center);
        state.enemy_bullets.push(bullet);
    }
}

fn enemy_bullet(state: &mut GameState, center: Vec2, bottom: f32) -> Entity {
    let size = state.tuning.sizes.enemy_bullet;
    let (pos, travel) = match state.tuning.enemy_fire {
        FirePattern::Downward => (Vec2::new(center.x, bottom - size.y / 2.0), 180.0),
        FirePattern::Cardinal => {
            let quarter = state.rng.random_range(0..4u32);
            (center, quarter as f32 * 90.0)
        }
    };

    let id = state.next_entity_id();
    Entity::new(
        id,
        EntityKind::EnemyBullet,
        pos,
        size,
        Motion::Projectile {
            speed: state.tuning.enemy_bullet_speed,
            offset: BULLET_ART_OFFSET,
        },
    )
    .with_heading(crate::normalize_degrees(travel + BULLET_ART_OFFSET))
}

/// Add an explosion animation centered at `pos`
pub fn spawn_explosion(state: &mut GameState, pos: Vec2) {
    let id = state.next_entity_id();
    let explosion = Entity::new(
        id,
        EntityKind::Explosion,
        pos,
        state.tuning.sizes.explosion,
        Motion::Animation {
            frame: 0,
            length: state.tuning.explosion_frames,
        },
    );
    state.explosions.push(explosion);
}

fn sample<R: Rng>(rng: &mut R, span: Span) -> f32 {
    random_between(rng, span.min, span.max)
}
