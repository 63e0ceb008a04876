//! LocalStorage score store (wasm32)
//!
//! Offline fallback when no remote table is configured. The leaderboard is
//! then per-browser.

use super::table::ScoreTable;
use super::{ScoreGateway, ScoreRecord};
use crate::error::GatewayError;

#[derive(Debug, Clone)]
pub struct LocalScoreStore {
    key: String,
}

impl Default for LocalScoreStore {
    fn default() -> Self {
        Self::new(Self::STORAGE_KEY)
    }
}

impl LocalScoreStore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "flappy_mode_scores";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, GatewayError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| GatewayError::Storage("LocalStorage unavailable".to_string()))
    }

    fn load(&self) -> Result<ScoreTable, GatewayError> {
        let storage = Self::storage()?;
        match storage.get_item(&self.key) {
            Ok(Some(json)) => {
                let records: Vec<ScoreRecord> = serde_json::from_str(&json)?;
                Ok(ScoreTable::from_records(records))
            }
            Ok(None) => Ok(ScoreTable::new()),
            Err(e) => Err(GatewayError::Storage(format!("{e:?}"))),
        }
    }

    fn save(&self, table: &ScoreTable) -> Result<(), GatewayError> {
        let json = serde_json::to_string(table)?;
        Self::storage()?
            .set_item(&self.key, &json)
            .map_err(|e| GatewayError::Storage(format!("{e:?}")))?;
        log::info!("High scores saved ({} entries)", table.len());
        Ok(())
    }
}

impl ScoreGateway for LocalScoreStore {
    async fn fetch_score(&self, nickname: &str) -> Result<Option<ScoreRecord>, GatewayError> {
        Ok(self.load()?.get(nickname).cloned())
    }

    async fn insert_score(&self, nickname: &str, score: u64) -> Result<(), GatewayError> {
        let mut table = self.load()?;
        if !table.insert(nickname, score) {
            return Err(GatewayError::Status {
                status: 409,
                body: format!("duplicate nickname {nickname}"),
            });
        }
        self.save(&table)
    }

    async fn upsert_score(&self, nickname: &str, score: u64) -> Result<(), GatewayError> {
        let mut table = self.load()?;
        table.upsert(nickname, score);
        self.save(&table)
    }

    async fn fetch_top_scores(&self, limit: usize) -> Result<Vec<ScoreRecord>, GatewayError> {
        Ok(self.load()?.top(limit))
    }
}
