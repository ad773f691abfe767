//! Data-driven game balance
//!
//! Each game mode has a preset `Tuning`: player controls, sprite sizes,
//! scoring, and the per-level configuration table. Presets serialize to JSON
//! so a custom level table can be loaded without recompiling.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, SimError};
use crate::renderer::Color;

/// Game variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// BB8 slides along the bottom edge, troopers scroll down
    #[default]
    Bb8Attack,
    /// Steerable fighter jet against enemy planes crossing the screen
    Fighter,
    /// Steerable fighter against ground drones bouncing off the walls
    Arena,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Bb8Attack => "BB8 Attack",
            GameMode::Fighter => "Fighter",
            GameMode::Arena => "Arena",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bb8" | "bb8attack" | "bb8 attack" => Some(GameMode::Bb8Attack),
            "fighter" | "plane" => Some(GameMode::Fighter),
            "arena" => Some(GameMode::Arena),
            _ => None,
        }
    }

    /// Preset tuning for this mode
    pub fn tuning(&self) -> Tuning {
        match self {
            GameMode::Bb8Attack => Tuning::bb8(),
            GameMode::Fighter => Tuning::fighter(),
            GameMode::Arena => Tuning::arena(),
        }
    }
}

/// How the player moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerControl {
    /// Left/right only, wraps horizontally
    Lateral,
    /// Turn + thrust along heading, clamped to the screen
    Thrust,
}

/// Direction policy for enemy bullets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirePattern {
    /// Straight down from the enemy's bottom edge
    Downward,
    /// One of the four cardinal directions, from the enemy's center
    Cardinal,
}

/// Enemy kind and motion used by a level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyBehavior {
    /// Ground enemies scrolling down and respawning above the screen
    Scroll { descent: f32 },
    /// Ground enemies bouncing off the screen edges
    Bounce,
    /// Aerial enemies crossing the screen on a fixed heading
    Aerial { speed: f32 },
}

/// Half-open interval `[min, max)`; `min == max` pins the value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub const fn fixed(value: f32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn contains(&self, value: f32) -> bool {
        if self.max > self.min {
            value >= self.min && value < self.max
        } else {
            value == self.min
        }
    }
}

/// Rectangular spawn region plus initial heading range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnBand {
    pub x: Span,
    pub y: Span,
    pub heading: Span,
}

/// Which band an enemy spawns in, keyed by its spawn index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BandLayout {
    Single(SpawnBand),
    /// Even indices use the first band, odd the second
    Parity([SpawnBand; 2]),
    /// Band chosen by `index % 4`
    Quadrant([SpawnBand; 4]),
}

impl BandLayout {
    pub fn band_for(&self, index: usize) -> &SpawnBand {
        match self {
            BandLayout::Single(band) => band,
            BandLayout::Parity(bands) => &bands[index % 2],
            BandLayout::Quadrant(bands) => &bands[index % 4],
        }
    }
}

/// Configuration for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub enemy_count: usize,
    /// Background texture identifier (resolved by the renderer)
    pub background: Option<String>,
    pub background_color: Color,
    pub enemies: EnemyBehavior,
    pub bands: BandLayout,
}

/// Sprite dimensions after scaling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteSizes {
    pub player: Vec2,
    pub ground_enemy: Vec2,
    pub aerial_enemy: Vec2,
    pub player_bullet: Vec2,
    pub enemy_bullet: Vec2,
    pub explosion: Vec2,
}

/// Complete balance table for a game mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub mode: GameMode,
    pub screen: Vec2,
    pub player_control: PlayerControl,
    pub sizes: SpriteSizes,

    // === Player ===
    pub lateral_step: f32,
    pub turn_rate: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub start_speed: f32,
    pub player_bullet_speed: f32,

    // === Enemies ===
    pub enemy_bullet_speed: f32,
    pub enemy_fire: FirePattern,
    /// 1-in-N chance per enemy per tick
    pub fire_odds: u32,

    // === Scoring ===
    /// Score change for every shot fired (usually zero or negative)
    pub fire_cost: i64,
    /// Score awarded per enemy destroyed
    pub kill_score: i64,

    pub explosion_frames: u32,
    /// Levels 1..=L, index 0 is level 1
    pub levels: Vec<LevelConfig>,
}

impl Tuning {
    /// BB8 against scrolling stormtroopers
    pub fn bb8() -> Self {
        let sizes = SpriteSizes {
            player: Vec2::new(60.0, 60.0),
            ground_enemy: Vec2::new(40.0, 50.0),
            aerial_enemy: Vec2::new(50.0, 50.0),
            player_bullet: Vec2::new(6.0, 20.0),
            enemy_bullet: Vec2::new(6.0, 20.0),
            explosion: Vec2::new(64.0, 64.0),
        };
        let w = sizes.ground_enemy.x;
        let band = SpawnBand {
            x: Span::new(w, SCREEN_WIDTH - w),
            y: Span::new(SCREEN_HEIGHT / 2.0, SCREEN_HEIGHT * 2.0),
            heading: Span::fixed(0.0),
        };
        let level = |count: usize, background: &str, color: Color| LevelConfig {
            enemy_count: count,
            background: Some(background.to_string()),
            background_color: color,
            enemies: EnemyBehavior::Scroll {
                descent: TROOPER_DESCENT,
            },
            bands: BandLayout::Single(band),
        };

        Self {
            mode: GameMode::Bb8Attack,
            screen: Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            player_control: PlayerControl::Lateral,
            sizes,
            lateral_step: LATERAL_STEP,
            turn_rate: TURN_RATE,
            min_speed: MIN_PLANE_SPEED,
            max_speed: MAX_PLANE_SPEED,
            start_speed: 0.0,
            player_bullet_speed: BB8_BULLET_SPEED,
            enemy_bullet_speed: ENEMY_BULLET_SPEED,
            enemy_fire: FirePattern::Downward,
            fire_odds: ENEMY_FIRE_ODDS,
            fire_cost: -1,
            kill_score: 2,
            explosion_frames: EXPLOSION_FRAMES,
            levels: vec![
                level(1, "sky1", Color::SKY_BLUE),
                level(2, "sky2", Color::WHITE_SMOKE),
                level(3, "sky3", Color::ROSE_RED),
            ],
        }
    }

    /// Fighter jet against enemy planes entering from three sides
    pub fn fighter() -> Self {
        let third_w = SCREEN_WIDTH / 3.0;
        let third_h = SCREEN_HEIGHT / 3.0;
        let quadrants = [
            // from the bottom
            SpawnBand {
                x: Span::new(third_w, third_w * 2.0),
                y: Span::fixed(0.0),
                heading: Span::new(5.0, 85.0),
            },
            // from the top
            SpawnBand {
                x: Span::new(third_w, third_w * 2.0),
                y: Span::fixed(SCREEN_HEIGHT),
                heading: Span::new(160.0, 280.0),
            },
            // from the left
            SpawnBand {
                x: Span::fixed(0.0),
                y: Span::new(third_h, third_h * 2.0),
                heading: Span::new(-90.0, 0.0),
            },
            // from the right
            SpawnBand {
                x: Span::fixed(SCREEN_WIDTH),
                y: Span::new(third_h, third_h * 2.0),
                heading: Span::new(100.0, 170.0),
            },
        ];
        let level = |count: usize, color: Color| LevelConfig {
            enemy_count: count,
            background: None,
            background_color: color,
            enemies: EnemyBehavior::Aerial {
                speed: ENEMY_PLANE_SPEED,
            },
            bands: BandLayout::Quadrant(quadrants),
        };

        Self {
            mode: GameMode::Fighter,
            screen: Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            player_control: PlayerControl::Thrust,
            sizes: SpriteSizes {
                player: Vec2::new(54.0, 54.0),
                ground_enemy: Vec2::new(40.0, 50.0),
                aerial_enemy: Vec2::new(50.0, 50.0),
                player_bullet: Vec2::new(10.0, 10.0),
                enemy_bullet: Vec2::new(10.0, 10.0),
                explosion: Vec2::new(64.0, 64.0),
            },
            lateral_step: LATERAL_STEP,
            turn_rate: TURN_RATE,
            min_speed: MIN_PLANE_SPEED,
            max_speed: MAX_PLANE_SPEED,
            start_speed: START_PLANE_SPEED,
            player_bullet_speed: PLANE_BULLET_SPEED,
            enemy_bullet_speed: ENEMY_BULLET_SPEED,
            enemy_fire: FirePattern::Cardinal,
            fire_odds: ENEMY_FIRE_ODDS,
            fire_cost: 0,
            kill_score: 1,
            explosion_frames: EXPLOSION_FRAMES,
            levels: vec![
                level(1, Color::SKY_BLUE),
                level(2, Color::BLUE_GRAY),
                level(3, Color::BLUE_GREEN),
            ],
        }
    }

    /// Fighter against drones bouncing around the screen
    pub fn arena() -> Self {
        let mut tuning = Self::fighter();
        let w = tuning.sizes.ground_enemy.x;
        let third_h = SCREEN_HEIGHT / 3.0;
        let x = Span::new(w, SCREEN_WIDTH - w);
        let rows = [
            // upper third
            SpawnBand {
                x,
                y: Span::new(third_h * 2.0, SCREEN_HEIGHT - w),
                heading: Span::fixed(0.0),
            },
            // lower third
            SpawnBand {
                x,
                y: Span::new(w, third_h),
                heading: Span::fixed(0.0),
            },
        ];
        let level = |count: usize, color: Color| LevelConfig {
            enemy_count: count,
            background: Some("arena".to_string()),
            background_color: color,
            enemies: EnemyBehavior::Bounce,
            bands: BandLayout::Parity(rows),
        };

        tuning.mode = GameMode::Arena;
        tuning.levels = vec![
            level(2, Color::DARK_SLATE),
            level(4, Color::BLUE_GRAY),
            level(6, Color::ROSE_RED),
        ];
        tuning
    }

    /// Number of playable levels (L)
    pub fn level_count(&self) -> u32 {
        self.levels.len() as u32
    }

    /// Configuration for level `level` (1-based)
    pub fn level(&self, level: u32) -> Result<&LevelConfig, SimError> {
        if level == 0 {
            return Err(SimError::UnknownLevel {
                level,
                levels: self.level_count(),
            });
        }
        self.levels
            .get(level as usize - 1)
            .ok_or(SimError::UnknownLevel {
                level,
                levels: self.level_count(),
            })
    }

    /// Parse and validate a tuning table
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        if tuning.levels.is_empty() {
            return Err(SimError::EmptyLevelTable.into());
        }
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::bb8()
    }
}
