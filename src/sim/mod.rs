//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, platform or network dependencies

pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{PlayerBox, find_collision, obstacle_hits_player};
pub use state::{GameOverCause, GamePhase, GameState, Obstacle, Snapshot};
pub use tick::{TickInput, TickOutcome, tick};
