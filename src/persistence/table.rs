//! Nickname-keyed score table
//!
//! Backing data for the local stores. Kept sorted descending by score, one
//! entry per nickname.

use serde::{Deserialize, Serialize};

use super::ScoreRecord;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreTable {
    entries: Vec<ScoreRecord>,
}

impl ScoreTable {
    /// Create empty table
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from unordered records; a later duplicate nickname replaces an earlier one
    pub fn from_records(records: impl IntoIterator<Item = ScoreRecord>) -> Self {
        let mut table = Self::new();
        for record in records {
            table.upsert(&record.nickname, record.score);
        }
        table
    }

    pub fn get(&self, nickname: &str) -> Option<&ScoreRecord> {
        self.entries.iter().find(|e| e.nickname == nickname)
    }

    /// Add a record for a new nickname. Returns false (and changes nothing) if it exists.
    pub fn insert(&mut self, nickname: &str, score: u64) -> bool {
        if self.get(nickname).is_some() {
            return false;
        }
        self.place(ScoreRecord::new(nickname, score));
        true
    }

    /// Create or overwrite the record for `nickname`
    pub fn upsert(&mut self, nickname: &str, score: u64) {
        self.entries.retain(|e| e.nickname != nickname);
        self.place(ScoreRecord::new(nickname, score));
    }

    /// Insert keeping descending order; ties keep the earlier record first
    fn place(&mut self, record: ScoreRecord) {
        let pos = self.entries.iter().position(|e| record.score > e.score);
        match pos {
            Some(i) => self.entries.insert(i, record),
            None => self.entries.push(record),
        }
    }

    /// Best `limit` records, highest first
    pub fn top(&self, limit: usize) -> Vec<ScoreRecord> {
        self.entries.iter().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
