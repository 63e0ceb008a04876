//! In-process score store
//!
//! Behaves like the remote table and records every call, so tests can check
//! which writes a game-over issued. Individual operations can be made to fail.

use std::cell::RefCell;

use super::table::ScoreTable;
use super::{ScoreGateway, ScoreRecord};
use crate::error::GatewayError;

/// Gateway operations, for failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayOp {
    FetchScore,
    Insert,
    Upsert,
    FetchTop,
}

/// A call the store received
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    FetchScore(String),
    Insert(ScoreRecord),
    Upsert(ScoreRecord),
    FetchTop(usize),
}

impl GatewayCall {
    pub fn is_write(&self) -> bool {
        matches!(self, GatewayCall::Insert(_) | GatewayCall::Upsert(_))
    }
}

#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    table: RefCell<ScoreTable>,
    calls: RefCell<Vec<GatewayCall>>,
    failing: RefCell<Vec<GatewayOp>>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = ScoreRecord>) -> Self {
        Self {
            table: RefCell::new(ScoreTable::from_records(records)),
            ..Self::default()
        }
    }

    /// Make every future call of `op` fail with a network error
    pub fn fail_on(&self, op: GatewayOp) {
        self.failing.borrow_mut().push(op);
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.borrow().clone()
    }

    pub fn writes(&self) -> Vec<GatewayCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.is_write())
            .cloned()
            .collect()
    }

    /// Copy of the current table contents
    pub fn table(&self) -> ScoreTable {
        self.table.borrow().clone()
    }

    fn record(&self, call: GatewayCall, op: GatewayOp) -> Result<(), GatewayError> {
        self.calls.borrow_mut().push(call);
        if self.failing.borrow().contains(&op) {
            return Err(GatewayError::Network(format!("{op:?} unavailable")));
        }
        Ok(())
    }
}

impl ScoreGateway for MemoryScoreStore {
    async fn fetch_score(&self, nickname: &str) -> Result<Option<ScoreRecord>, GatewayError> {
        self.record(GatewayCall::FetchScore(nickname.to_string()), GatewayOp::FetchScore)?;
        Ok(self.table.borrow().get(nickname).cloned())
    }

    async fn insert_score(&self, nickname: &str, score: u64) -> Result<(), GatewayError> {
        self.record(
            GatewayCall::Insert(ScoreRecord::new(nickname, score)),
            GatewayOp::Insert,
        )?;
        if self.table.borrow_mut().insert(nickname, score) {
            Ok(())
        } else {
            Err(GatewayError::Status {
                status: 409,
                body: format!("duplicate nickname {nickname}"),
            })
        }
    }

    async fn upsert_score(&self, nickname: &str, score: u64) -> Result<(), GatewayError> {
        self.record(
            GatewayCall::Upsert(ScoreRecord::new(nickname, score)),
            GatewayOp::Upsert,
        )?;
        self.table.borrow_mut().upsert(nickname, score);
        Ok(())
    }

    async fn fetch_top_scores(&self, limit: usize) -> Result<Vec<ScoreRecord>, GatewayError> {
        self.record(GatewayCall::FetchTop(limit), GatewayOp::FetchTop)?;
        Ok(self.table.borrow().top(limit))
    }
}
