//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Collections iterate in insertion order
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod input;
pub mod kinematics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{collide_groups, collide_one_vs_many, collides_with_any, overlaps};
pub use entity::{Aabb, Entity, EntityKind, Motion};
pub use input::{InputState, Key, KeyEvent, TickInput};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{apply_key_event, tick};
