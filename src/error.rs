//! Error types
//!
//! Nothing here is fatal to the simulation: gateway errors degrade to a
//! non-persisted game-over, and game errors are rejected before a run starts.

use thiserror::Error;

use crate::sim::GamePhase;

/// Rejected session commands
#[derive(Debug, Error)]
pub enum GameError {
    #[error("please enter your name")]
    EmptyPlayerName,
    #[error("player name is longer than {max} characters")]
    PlayerNameTooLong { max: usize },
    #[error("a game can only start from the idle screen (currently {0:?})")]
    NotIdle(GamePhase),
}

/// Failures talking to the score store
///
/// "No record for this nickname" is not an error; gateways return `Ok(None)`.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("network request failed: {0}")]
    Network(String),
    #[error("score store answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed score data: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Storage(String),
    #[error("score file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Invalid game balance data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("could not parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}
