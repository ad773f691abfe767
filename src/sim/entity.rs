//! Entities and their per-kind motion state
//!
//! Every moving thing on screen is an `Entity`: an axis-aligned rectangle
//! with a kind tag and a `Motion` variant carrying the data its update rule
//! needs. The kind set is closed, so dispatch is a plain `match`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Closed set of entity categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    GroundEnemy,
    AerialEnemy,
    PlayerBullet,
    EnemyBullet,
    Explosion,
}

/// Per-kind motion data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// Horizontal slide with wraparound (pixels per tick)
    Lateral { velocity: f32 },
    /// Turn + thrust along the heading, clamped to the screen
    Thrust { speed: f32, angular_velocity: f32 },
    /// Straight line along `heading - offset`, despawns off-screen
    Projectile { speed: f32, offset: f32 },
    /// Scrolls down, respawns above the screen
    Scroll { descent: f32 },
    /// Per-axis velocity reflected at the screen edges
    Bounce { velocity: Vec2 },
    /// Stationary animation, dies after `length` frames
    Animation { frame: u32, length: u32 },
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap; boxes that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// A moving rectangular body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    /// Center, screen space, origin bottom-left
    pub pos: Vec2,
    /// Fixed at spawn
    pub size: Vec2,
    /// Degrees, 0 = up
    pub heading: f32,
    pub motion: Motion,
    alive: bool,
}

impl Entity {
    pub fn new(id: u32, kind: EntityKind, pos: Vec2, size: Vec2, motion: Motion) -> Self {
        Self {
            id,
            kind,
            pos,
            size,
            heading: 0.0,
            motion,
            alive: true,
        }
    }

    pub fn with_heading(mut self, heading: f32) -> Self {
        self.heading = heading;
        self
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Mark for removal at the next compaction
    #[inline]
    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.size.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y - self.size.y / 2.0
    }

    pub fn set_left(&mut self, left: f32) {
        self.pos.x = left + self.size.x / 2.0;
    }

    pub fn set_right(&mut self, right: f32) {
        self.pos.x = right - self.size.x / 2.0;
    }

    pub fn set_top(&mut self, top: f32) {
        self.pos.y = top - self.size.y / 2.0;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.pos.y = bottom + self.size.y / 2.0;
    }

    /// True once the trailing edge has crossed the screen edge `velocity`
    /// points at
    ///
    /// A body off screen but moving towards it has not exited.
    pub fn exited_screen(&self, velocity: Vec2, screen: Vec2) -> bool {
        (velocity.y < 0.0 && self.top() < 0.0)
            || (velocity.y > 0.0 && self.bottom() > screen.y)
            || (velocity.x < 0.0 && self.right() < 0.0)
            || (velocity.x > 0.0 && self.left() > screen.x)
    }

    /// Thrust speed (thrust-controlled players only)
    pub fn speed(&self) -> Option<f32> {
        match self.motion {
            Motion::Thrust { speed, .. } => Some(speed),
            _ => None,
        }
    }

    /// Current animation frame (explosions only)
    pub fn frame_index(&self) -> Option<u32> {
        match self.motion {
            Motion::Animation { frame, .. } => Some(frame),
            _ => None,
        }
    }

    /// True for kinds that count towards clearing a level
    pub fn is_hostile_body(&self) -> bool {
        matches!(self.kind, EntityKind::GroundEnemy | EntityKind::AerialEnemy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(x: f32, y: f32) -> Entity {
        Entity::new(
            1,
            EntityKind::GroundEnemy,
            Vec2::new(x, y),
            Vec2::new(20.0, 10.0),
            Motion::Scroll { descent: 2.0 },
        )
    }

    #[test]
    fn test_edges() {
        let e = block(100.0, 50.0);
        assert_eq!(e.left(), 90.0);
        assert_eq!(e.right(), 110.0);
        assert_eq!(e.top(), 55.0);
        assert_eq!(e.bottom(), 45.0);
    }

    #[test]
    fn test_edge_setters_move_center() {
        let mut e = block(100.0, 50.0);
        e.set_right(800.0);
        assert_eq!(e.pos.x, 790.0);
        e.set_bottom(2.0);
        assert_eq!(e.pos.y, 7.0);
    }

    #[test]
    fn test_exit_uses_trailing_edge() {
        let screen = Vec2::new(800.0, 600.0);
        let down = Vec2::new(0.0, -1.0);
        let right = Vec2::new(1.0, 0.0);
        // Center below screen but top edge still visible
        assert!(!block(100.0, -4.0).exited_screen(down, screen));
        assert!(block(100.0, -6.0).exited_screen(down, screen));
        assert!(!block(805.0, 300.0).exited_screen(right, screen));
        assert!(block(811.0, 300.0).exited_screen(right, screen));
    }

    #[test]
    fn test_entering_body_has_not_exited() {
        let screen = Vec2::new(800.0, 600.0);
        // Above the screen and falling into view
        assert!(!block(100.0, 700.0).exited_screen(Vec2::new(0.0, -10.0), screen));
        assert!(block(100.0, 700.0).exited_screen(Vec2::new(0.0, 10.0), screen));
        // Left of the screen moving right
        assert!(!block(-50.0, 300.0).exited_screen(Vec2::new(2.0, 0.0), screen));
    }

    #[test]
    fn test_kill_marks_not_alive() {
        let mut e = block(0.0, 0.0);
        assert!(e.is_alive());
        e.kill();
        assert!(!e.is_alive());
    }

    #[test]
    fn test_touching_boxes_do_not_overlap() {
        let a = Aabb::from_center(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::from_center(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        assert!(!a.overlaps(&b));
        let c = Aabb::from_center(Vec2::new(9.0, 0.0), Vec2::splat(10.0));
        assert!(a.overlaps(&c));
    }
}
