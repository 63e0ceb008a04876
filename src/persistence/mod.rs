//! Score persistence
//!
//! The leaderboard is a remote table of one [`ScoreRecord`] per nickname,
//! reached through [`ScoreGateway`]. Stores:
//! - `memory`: in-process table with a call log (tests)
//! - `file`: JSON file on disk (native)
//! - `local`: LocalStorage (wasm32)
//! - `rest`: PostgREST-style remote table (request building everywhere,
//!   `fetch` transport on wasm32)

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
pub mod flow;
#[cfg(target_arch = "wasm32")]
pub mod local;
pub mod memory;
pub mod rest;
pub mod table;

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

pub use flow::{GameOverReport, SubmitOutcome, fetch_leaderboard, submit_game_over};
pub use memory::MemoryScoreStore;
pub use table::ScoreTable;

/// Size of the leaderboard shown after a run
pub const TOP_SCORES_LIMIT: usize = 10;

/// A player's best score. `nickname` is the unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub nickname: String,
    pub score: u64,
}

impl ScoreRecord {
    pub fn new(nickname: impl Into<String>, score: u64) -> Self {
        Self {
            nickname: nickname.into(),
            score,
        }
    }
}

/// Remote scored-record store
///
/// Each call is independent; there are no transactions. Futures are awaited
/// on the single UI thread, so implementations need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait ScoreGateway {
    /// The record for `nickname`, or `None` when the player has never finished a run
    async fn fetch_score(&self, nickname: &str) -> Result<Option<ScoreRecord>, GatewayError>;

    /// Create a record; fails if the nickname already has one
    async fn insert_score(&self, nickname: &str, score: u64) -> Result<(), GatewayError>;

    /// Create or overwrite the record for `nickname`
    async fn upsert_score(&self, nickname: &str, score: u64) -> Result<(), GatewayError>;

    /// Best `limit` records, highest score first
    async fn fetch_top_scores(&self, limit: usize) -> Result<Vec<ScoreRecord>, GatewayError>;
}
