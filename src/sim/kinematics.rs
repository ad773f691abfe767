//! Per-kind motion rules
//!
//! One unit step per tick. Each rule touches only the entity it is given;
//! the scroll respawn draws from the caller's RNG.

use glam::Vec2;
use rand::Rng;

use super::entity::{Entity, Motion};
use crate::heading_to_velocity;

/// Advance one entity by one tick
pub fn update<R: Rng>(entity: &mut Entity, screen: Vec2, rng: &mut R) {
    debug_assert!(entity.is_alive(), "updated entity {} after kill", entity.id);
    if !entity.is_alive() {
        return;
    }

    match entity.motion {
        Motion::Lateral { velocity } => update_lateral(entity, velocity, screen),
        Motion::Thrust {
            speed,
            angular_velocity,
        } => update_thrust(entity, speed, angular_velocity, screen),
        Motion::Projectile { speed, offset } => update_projectile(entity, speed, offset, screen),
        Motion::Scroll { descent } => update_scroll(entity, descent, screen, rng),
        Motion::Bounce { velocity } => update_bounce(entity, velocity, screen),
        Motion::Animation { frame, length } => update_animation(entity, frame, length),
    }
}

/// Slide horizontally, wrapping once fully off one side
fn update_lateral(entity: &mut Entity, velocity: f32, screen: Vec2) {
    entity.pos.x += velocity;
    if entity.right() < 0.0 {
        entity.set_right(screen.x);
    } else if entity.left() > screen.x {
        entity.set_left(0.0);
    }
}

/// Turn, move along heading, then clamp inside the screen
fn update_thrust(entity: &mut Entity, speed: f32, angular_velocity: f32, screen: Vec2) {
    entity.heading = crate::normalize_degrees(entity.heading + angular_velocity);
    entity.pos += heading_to_velocity(entity.heading, speed);

    if entity.left() < 0.0 {
        entity.set_left(0.0);
    }
    if entity.right() > screen.x {
        entity.set_right(screen.x);
    }
    if entity.top() > screen.y {
        entity.set_top(screen.y);
    }
    if entity.bottom() < 0.0 {
        entity.set_bottom(0.0);
    }
}

/// Straight line; dies once past the edge it is travelling towards
fn update_projectile(entity: &mut Entity, speed: f32, offset: f32, screen: Vec2) {
    let velocity = heading_to_velocity(entity.heading - offset, speed);
    entity.pos += velocity;
    if entity.exited_screen(velocity, screen) {
        entity.kill();
    }
}

/// Scroll down; once the top edge is below the screen, reappear above it
fn update_scroll<R: Rng>(entity: &mut Entity, descent: f32, screen: Vec2, rng: &mut R) {
    entity.pos.y -= descent;
    if entity.top() < 0.0 {
        let w = entity.size.x;
        let h = entity.size.y;
        entity.pos = Vec2::new(
            random_between(rng, w, screen.x - w),
            random_between(rng, screen.y + h, screen.y * 2.0),
        );
    }
}

/// Move and reflect each axis independently off the screen edges
fn update_bounce(entity: &mut Entity, velocity: Vec2, screen: Vec2) {
    entity.pos += velocity;
    let mut velocity = velocity;
    if entity.left() < 0.0 {
        velocity.x = velocity.x.abs();
    } else if entity.right() > screen.x {
        velocity.x = -velocity.x.abs();
    }
    if entity.bottom() < 0.0 {
        velocity.y = velocity.y.abs();
    } else if entity.top() > screen.y {
        velocity.y = -velocity.y.abs();
    }
    entity.motion = Motion::Bounce { velocity };
}

fn update_animation(entity: &mut Entity, frame: u32, length: u32) {
    let frame = frame + 1;
    entity.motion = Motion::Animation { frame, length };
    if frame >= length {
        entity.kill();
    }
}

/// Uniform sample from `[lo, hi)`, or `lo` when the range is empty
pub fn random_between<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityKind;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const SCREEN: Vec2 = Vec2::new(800.0, 600.0);

    fn entity(kind: EntityKind, pos: Vec2, size: Vec2, motion: Motion) -> Entity {
        Entity::new(1, kind, pos, size, motion)
    }

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_lateral_moves_by_velocity() {
        let mut e = entity(
            EntityKind::Player,
            Vec2::new(400.0, 32.0),
            Vec2::splat(60.0),
            Motion::Lateral { velocity: -4.0 },
        );
        update(&mut e, SCREEN, &mut rng());
        assert_eq!(e.pos, Vec2::new(396.0, 32.0));
    }

    #[test]
    fn test_lateral_wraps_left_to_right() {
        let mut e = entity(
            EntityKind::Player,
            Vec2::new(-28.0, 32.0),
            Vec2::splat(60.0),
            Motion::Lateral { velocity: -4.0 },
        );
        update(&mut e, SCREEN, &mut rng());
        assert_eq!(e.right(), SCREEN.x);
    }

    #[test]
    fn test_lateral_wraps_right_to_left() {
        let mut e = entity(
            EntityKind::Player,
            Vec2::new(828.0, 32.0),
            Vec2::splat(60.0),
            Motion::Lateral { velocity: 4.0 },
        );
        update(&mut e, SCREEN, &mut rng());
        assert_eq!(e.left(), 0.0);
    }

    #[test]
    fn test_thrust_heading_zero_moves_up() {
        let mut e = entity(
            EntityKind::Player,
            Vec2::new(400.0, 300.0),
            Vec2::splat(54.0),
            Motion::Thrust {
                speed: 2.0,
                angular_velocity: 0.0,
            },
        );
        update(&mut e, SCREEN, &mut rng());
        assert!((e.pos.x - 400.0).abs() < 1e-4);
        assert!((e.pos.y - 302.0).abs() < 1e-4);
    }

    #[test]
    fn test_thrust_turns_then_moves() {
        let mut e = entity(
            EntityKind::Player,
            Vec2::new(400.0, 300.0),
            Vec2::splat(54.0),
            Motion::Thrust {
                speed: 5.0,
                angular_velocity: 90.0,
            },
        );
        update(&mut e, SCREEN, &mut rng());
        assert_eq!(e.heading, 90.0);
        // heading 90 points left
        assert!((e.pos.x - 395.0).abs() < 1e-4);
    }

    #[test]
    fn test_thrust_clamps_to_screen() {
        let mut e = entity(
            EntityKind::Player,
            Vec2::new(400.0, 598.0),
            Vec2::splat(54.0),
            Motion::Thrust {
                speed: 5.0,
                angular_velocity: 0.0,
            },
        );
        update(&mut e, SCREEN, &mut rng());
        assert_eq!(e.top(), SCREEN.y);

        let mut e = entity(
            EntityKind::Player,
            Vec2::new(10.0, 300.0),
            Vec2::splat(54.0),
            Motion::Thrust {
                speed: 5.0,
                angular_velocity: 0.0,
            },
        )
        .with_heading(90.0);
        update(&mut e, SCREEN, &mut rng());
        assert_eq!(e.left(), 0.0);
    }

    #[test]
    fn test_projectile_despawns_only_when_fully_out() {
        let mut e = entity(
            EntityKind::PlayerBullet,
            Vec2::new(400.0, 595.0),
            Vec2::new(6.0, 20.0),
            Motion::Projectile {
                speed: 10.0,
                offset: 90.0,
            },
        )
        .with_heading(90.0);
        update(&mut e, SCREEN, &mut rng());
        // bottom at 595 is still on screen
        assert!(e.is_alive());
        update(&mut e, SCREEN, &mut rng());
        assert!(!e.is_alive());
    }

    #[test]
    fn test_enemy_bullet_travels_down() {
        let mut e = entity(
            EntityKind::EnemyBullet,
            Vec2::new(400.0, 300.0),
            Vec2::new(6.0, 20.0),
            Motion::Projectile {
                speed: 10.0,
                offset: 90.0,
            },
        )
        .with_heading(-90.0);
        update(&mut e, SCREEN, &mut rng());
        assert!((e.pos.y - 290.0).abs() < 1e-4);
        assert!((e.pos.x - 400.0).abs() < 1e-4);
    }

    #[test]
    fn test_enemy_bullet_above_screen_falls_into_view() {
        let mut e = entity(
            EntityKind::EnemyBullet,
            Vec2::new(100.0, 685.0),
            Vec2::new(6.0, 20.0),
            Motion::Projectile {
                speed: 10.0,
                offset: 90.0,
            },
        )
        .with_heading(-90.0);
        for _ in 0..20 {
            update(&mut e, SCREEN, &mut rng());
            assert!(e.is_alive());
        }
        assert!(e.top() < SCREEN.y);
    }

    #[test]
    fn test_aerial_travels_on_45_degree_offset() {
        let mut e = entity(
            EntityKind::AerialEnemy,
            Vec2::new(400.0, 300.0),
            Vec2::splat(50.0),
            Motion::Projectile {
                speed: 2.0,
                offset: 45.0,
            },
        )
        .with_heading(45.0);
        update(&mut e, SCREEN, &mut rng());
        assert!((e.pos.y - 302.0).abs() < 1e-4);
    }

    #[test]
    fn test_scroll_descends() {
        let mut e = entity(
            EntityKind::GroundEnemy,
            Vec2::new(100.0, 300.0),
            Vec2::new(40.0, 50.0),
            Motion::Scroll { descent: 2.0 },
        );
        update(&mut e, SCREEN, &mut rng());
        assert_eq!(e.pos, Vec2::new(100.0, 298.0));
        assert!(e.is_alive());
    }

    #[test]
    fn test_bounce_reflects_per_axis() {
        let mut e = entity(
            EntityKind::GroundEnemy,
            Vec2::new(20.5, 300.0),
            Vec2::new(40.0, 50.0),
            Motion::Bounce {
                velocity: Vec2::new(-1.0, 1.0),
            },
        );
        update(&mut e, SCREEN, &mut rng());
        assert_eq!(
            e.motion,
            Motion::Bounce {
                velocity: Vec2::new(1.0, 1.0)
            }
        );

        let mut e = entity(
            EntityKind::GroundEnemy,
            Vec2::new(300.0, 575.0),
            Vec2::new(40.0, 50.0),
            Motion::Bounce {
                velocity: Vec2::new(1.0, 1.0),
            },
        );
        update(&mut e, SCREEN, &mut rng());
        assert_eq!(
            e.motion,
            Motion::Bounce {
                velocity: Vec2::new(1.0, -1.0)
            }
        );
    }

    #[test]
    fn test_animation_expires_at_length() {
        let mut e = entity(
            EntityKind::Explosion,
            Vec2::new(100.0, 100.0),
            Vec2::splat(64.0),
            Motion::Animation {
                frame: 0,
                length: 3,
            },
        );
        update(&mut e, SCREEN, &mut rng());
        update(&mut e, SCREEN, &mut rng());
        assert_eq!(e.frame_index(), Some(2));
        assert!(e.is_alive());
        assert_eq!(e.pos, Vec2::new(100.0, 100.0));
        update(&mut e, SCREEN, &mut rng());
        assert!(!e.is_alive());
    }

    proptest! {
        #[test]
        fn prop_scroll_respawn_lands_above_screen(
            x in 40.0f32..760.0,
            y in -60.0f32..30.0,
            seed in any::<u64>(),
        ) {
            let size = Vec2::new(40.0, 50.0);
            let mut e = entity(EntityKind::GroundEnemy, Vec2::new(x, y), size, Motion::Scroll { descent: 2.0 });
            let was_below = e.top() - 2.0 < 0.0;
            update(&mut e, SCREEN, &mut Pcg32::seed_from_u64(seed));
            if was_below {
                prop_assert!(e.pos.y >= SCREEN.y && e.pos.y < SCREEN.y * 2.0);
                prop_assert!(e.pos.x >= size.x && e.pos.x < SCREEN.x - size.x);
            } else {
                prop_assert_eq!(e.pos.y, y - 2.0);
            }
        }

        #[test]
        fn prop_lateral_wrap_is_lossless(x in -40.0f32..840.0, v in -8.0f32..8.0) {
            let size = Vec2::splat(60.0);
            let mut e = entity(EntityKind::Player, Vec2::new(x, 32.0), size, Motion::Lateral { velocity: v });
            update(&mut e, SCREEN, &mut rng());
            let moved = x + v;
            if moved + size.x / 2.0 < 0.0 {
                prop_assert_eq!(e.right(), SCREEN.x);
            } else if moved - size.x / 2.0 > SCREEN.x {
                prop_assert_eq!(e.left(), 0.0);
            } else {
                prop_assert_eq!(e.pos.x, moved);
            }
            prop_assert_eq!(e.pos.y, 32.0);
        }
    }
}
