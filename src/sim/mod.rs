//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete step per tick
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod board;
pub mod direction;
pub mod state;
pub mod tick;

pub use board::{Board, Cell};
pub use direction::Direction;
pub use state::{CollisionPolicy, GamePhase, GameState};
pub use tick::{TickOutcome, tick, tick_interval_ms};
