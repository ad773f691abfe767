//! Keyboard input model
//!
//! The window layer translates platform key codes into `Key` and batches the
//! press/release edges that arrived since the last tick into a `TickInput`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    /// Turn left
    A,
    /// Turn right
    D,
    /// Throttle up
    W,
    /// Throttle down
    S,
    Space,
    /// Back to instructions
    I,
    /// Level select, 1-9
    Digit(u8),
}

/// Discrete key edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Press(Key),
    Release(Key),
}

/// Edge events for a single tick, applied in order before kinematics
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<KeyEvent>,
}

impl TickInput {
    pub fn press(key: Key) -> Self {
        Self {
            events: vec![KeyEvent::Press(key)],
        }
    }

    pub fn release(key: Key) -> Self {
        Self {
            events: vec![KeyEvent::Release(key)],
        }
    }

    pub fn then(mut self, event: KeyEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Currently held keys; last event wins
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Key>,
}

impl InputState {
    pub fn apply(&mut self, event: KeyEvent) {
        match event {
            KeyEvent::Press(key) => {
                self.held.insert(key);
            }
            KeyEvent::Release(key) => {
                self.held.remove(&key);
            }
        }
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}
