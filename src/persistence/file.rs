//! JSON file score store (native)
//!
//! The whole table is rewritten on every write: tmp file first, then renamed
//! over the real one.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::table::ScoreTable;
use super::{ScoreGateway, ScoreRecord};
use crate::error::GatewayError;

#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current table; a missing file is an empty leaderboard
    pub fn load(&self) -> Result<ScoreTable, GatewayError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ScoreTable::new()),
            Err(e) => return Err(e.into()),
        };
        let records: Vec<ScoreRecord> = serde_json::from_str(&json)?;
        Ok(ScoreTable::from_records(records))
    }

    fn save(&self, table: &ScoreTable) -> Result<(), GatewayError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(table)?)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("Scores saved to {} ({} entries)", self.path.display(), table.len());
        Ok(())
    }
}

impl ScoreGateway for FileScoreStore {
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
