//! BB8 Attack - a top-down arcade shooter
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (entities, kinematics, collisions, game state)
//! - `frame`: Frame driver tying the simulation to audio and rendering
//! - `renderer`: Rendering collaborator interface
//! - `audio`: Sound effect collaborator interface
//! - `tuning`: Data-driven game balance and level tables
//! - `settings`: User configuration

pub mod audio;
pub mod error;
pub mod frame;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, SimError};
pub use frame::FrameDriver;
pub use settings::Settings;
pub use tuning::{GameMode, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal simulation rate (one tick per rendered frame)
    pub const TICKS_PER_SECOND: u32 = 60;
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Cap on ticks per rendered frame after a stall
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Explosion animation length in frames
    pub const EXPLOSION_FRAMES: u32 = 50;

    /// Odds (1 in N) that an enemy fires on a given tick
    pub const ENEMY_FIRE_ODDS: u32 = 800;

    /// Lateral player step per key press
    pub const LATERAL_STEP: f32 = 4.0;

    /// Thrust player turning and speed limits
    pub const TURN_RATE: f32 = 4.0;
    pub const MIN_PLANE_SPEED: f32 = 2.0;
    pub const MAX_PLANE_SPEED: f32 = 5.0;
    pub const START_PLANE_SPEED: f32 = 2.0;

    /// Projectile speeds (pixels per tick)
    pub const BB8_BULLET_SPEED: f32 = 10.0;
    pub const PLANE_BULLET_SPEED: f32 = 20.0;
    pub const ENEMY_BULLET_SPEED: f32 = 10.0;
    pub const ENEMY_PLANE_SPEED: f32 = 2.5;

    /// Ground enemy scroll speed
    pub const TROOPER_DESCENT: f32 = 2.0;
}

/// Normalize angle in degrees to [-180, 180)
#[inline]
pub fn normalize_degrees(mut angle: f32) -> f32 {
    while angle >= 180.0 {
        angle -= 360.0;
    }
    while angle < -180.0 {
        angle += 360.0;
    }
    angle
}

/// Per-tick displacement for `speed` along `heading` (degrees, 0 = up)
#[inline]
pub fn heading_to_velocity(heading: f32, speed: f32) -> Vec2 {
    let rad = heading.to_radians();
    Vec2::new(-speed * rad.sin(), speed * rad.cos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_zero_is_up() {
        let v = heading_to_velocity(0.0, 3.0);
        assert!(v.x.abs() < 1e-5);
        assert!((v.y - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_heading_ninety_is_left() {
        let v = heading_to_velocity(90.0, 1.0);
        assert!((v.x + 1.0).abs() < 1e-5);
        assert!(v.y.abs() < 1e-5);
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(190.0), -170.0);
        assert_eq!(normalize_degrees(-190.0), 170.0);
        assert_eq!(normalize_degrees(45.0), 45.0);
    }
}
