//! Game state and the level/game state machine
//!
//! `GameState` is the single owned context for a play session. The frame
//! driver and tick borrow it mutably for one tick at a time.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::input::InputState;
use super::spawn;
use crate::audio::Sound;
use crate::error::SimError;
use crate::tuning::Tuning;

/// Screen the game is on, derived from `current_level`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Level 0
    Instructions,
    /// Levels 1..=L
    Level(u32),
    /// Level L+1
    GameOver,
}

/// Things that happened during a tick, drained by the frame driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(Sound),
    LevelStarted { level: u32 },
    LevelCleared { level: u32 },
    PlayerDestroyed,
    GameOver { score: i64 },
}

/// Complete simulation state for one play session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// 0 = instructions, 1..=L = playing, L+1 = game over
    pub current_level: u32,
    /// No floor; firing can drive it negative
    pub score: i64,
    /// Ticks simulated while running
    pub time_ticks: u64,
    pub player: Option<Entity>,
    pub ground_enemies: Vec<Entity>,
    pub aerial_enemies: Vec<Entity>,
    pub player_bullets: Vec<Entity>,
    pub enemy_bullets: Vec<Entity>,
    pub explosions: Vec<Entity>,
    pub input: InputState,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a session on the instructions screen
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            current_level: 0,
            score: 0,
            time_ticks: 0,
            player: None,
            ground_enemies: Vec::new(),
            aerial_enemies: Vec::new(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            explosions: Vec::new(),
            input: InputState::default(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn level_count(&self) -> u32 {
        self.tuning.level_count()
    }

    pub fn phase(&self) -> GamePhase {
        match self.current_level {
            0 => GamePhase::Instructions,
            n if n <= self.level_count() => GamePhase::Level(n),
            _ => GamePhase::GameOver,
        }
    }

    /// True iff a level is being played
    pub fn is_running(&self) -> bool {
        matches!(self.phase(), GamePhase::Level(_))
    }

    /// Live enemies left in the level
    pub fn hostiles_remaining(&self) -> usize {
        self.ground_enemies
            .iter()
            .chain(&self.aerial_enemies)
            .filter(|e| e.is_alive() && e.is_hostile_body())
            .count()
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start `level` from the instructions or game-over screen
    ///
    /// Resets the score and rebuilds every collection. Ignored while a level
    /// is running.
    pub fn select_level(&mut self, level: u32) -> Result<(), SimError> {
        if self.is_running() {
            log::debug!("Level select {} ignored while running", level);
            return Ok(());
        }
        self.tuning.level(level)?;
        self.score = 0;
        self.input.clear();
        self.setup_level(level, true)
    }

    /// Return to the instructions screen (ignored while running)
    pub fn show_instructions(&mut self) {
        if self.is_running() {
            log::debug!("Instructions ignored while running");
            return;
        }
        self.current_level = 0;
    }

    /// Clear and repopulate collections for `level`
    ///
    /// The player is kept when `reset_player` is false and one exists.
    pub fn setup_level(&mut self, level: u32, reset_player: bool) -> Result<(), SimError> {
        let config = self.tuning.level(level)?.clone();

        self.ground_enemies.clear();
        self.aerial_enemies.clear();
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.explosions.clear();

        if reset_player || self.player.is_none() {
            self.player = Some(spawn::player(self));
        }
        spawn::populate_enemies(self, &config);
        self.current_level = level;

        log::info!(
            "Level {} started: {} enemies, background {:?}",
            level,
            config.enemy_count,
            config.background
        );
        self.push_event(GameEvent::LevelStarted { level });
        Ok(())
    }

    /// Current level cleared: move to the next one or finish the game
    pub fn advance_level(&mut self) -> Result<(), SimError> {
        let cleared = self.current_level;
        log::info!("Level {} cleared with score {}", cleared, self.score);
        self.push_event(GameEvent::LevelCleared { level: cleared });

        if cleared < self.level_count() {
            self.setup_level(cleared + 1, false)
        } else {
            self.end_game();
            Ok(())
        }
    }

    /// Enter the game-over screen, keeping the score
    pub fn end_game(&mut self) {
        self.current_level = self.level_count() + 1;
        log::info!("Game over with score {}", self.score);
        self.push_event(GameEvent::GameOver { score: self.score });
    }

    /// Drop every entity marked not-alive
    pub fn compact(&mut self) {
        if self.player.as_ref().is_some_and(|p| !p.is_alive()) {
            self.player = None;
        }
        self.ground_enemies.retain(Entity::is_alive);
        self.aerial_enemies.retain(Entity::is_alive);
        self.player_bullets.retain(Entity::is_alive);
        self.enemy_bullets.retain(Entity::is_alive);
        self.explosions.retain(Entity::is_alive);
    }
}
