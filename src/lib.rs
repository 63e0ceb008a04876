//! Flappy Mode - a tap-to-flap arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scoring)
//! - `session`: Owns the simulation, merges input, drives the fixed tick
//! - `persistence`: Score gateway and the game-over leaderboard flow
//! - `platform`: Browser bindings (wasm32 only)
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{GameError, GatewayError, TuningError};
pub use session::GameSession;
pub use settings::{Avatar, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulation tick rate
    pub const TICK_HZ: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Stage height in pixels (player position is measured from the top)
    pub const STAGE_HEIGHT: f32 = 600.0;
    /// Viewport width used until the presentation layer reports one
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 400.0;

    /// Player box
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;

    /// Physics, in pixels per tick
    pub const GRAVITY: f32 = 0.3;
    pub const VELOCITY_DAMPING: f32 = 0.98;
    pub const JUMP_STRENGTH: f32 = 6.0;

    /// Obstacles
    pub const OBSTACLE_WIDTH: f32 = 40.0;
    /// Vertical gap between halves, also the horizontal spawn spacing
    pub const GAP_DISTANCE: f32 = 250.0;
    pub const OBSTACLE_MIN_HEIGHT: f32 = 100.0;
    pub const OBSTACLE_MAX_HEIGHT: f32 = 300.0;
    /// Spawn edge never sits closer than this to the right border
    pub const SPAWN_EDGE_INSET: f32 = 50.0;

    /// Forgiveness applied on both collision axes
    pub const COLLISION_MARGIN: f32 = 5.0;

    /// Scroll speed and leveling
    pub const INITIAL_SPEED: f32 = 2.0;
    pub const SPEED_INCREMENT: f32 = 0.5;
    pub const LEVEL_SCORE_STEP: u64 = 1000;

    /// Longest accepted player name
    pub const MAX_PLAYER_NAME_LEN: usize = 20;
}

/// Trim and validate a player name before it reaches the simulation
pub fn normalize_player_name(name: &str) -> Result<String, GameError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(GameError::EmptyPlayerName);
    }
    if name.chars().count() > consts::MAX_PLAYER_NAME_LEN {
        return Err(GameError::PlayerNameTooLong {
            max: consts::MAX_PLAYER_NAME_LEN,
        });
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_name_is_trimmed() {
        assert_eq!(normalize_player_name("  Chad ").unwrap(), "Chad");
    }

    #[test]
    fn test_player_name_rejects_blank() {
        assert!(matches!(
            normalize_player_name("   "),
            Err(GameError::EmptyPlayerName)
        ));
    }

    #[test]
    fn test_player_name_length_limit() {
        let long = "x".repeat(consts::MAX_PLAYER_NAME_LEN + 1);
        assert!(matches!(
            normalize_player_name(&long),
            Err(GameError::PlayerNameTooLong { max: 20 })
        ));
        let exact = "y".repeat(consts::MAX_PLAYER_NAME_LEN);
        assert_eq!(normalize_player_name(&exact).unwrap(), exact);
    }
}
