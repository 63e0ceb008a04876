//! Game-over leaderboard flow
//!
//! Runs once per finished run: save the score if it is a personal best, then
//! fetch the top scores for display. Steps are independent. A failure is
//! logged and reported but never undoes an earlier step.

use serde::Serialize;

use super::{ScoreGateway, ScoreRecord, TOP_SCORES_LIMIT};
use crate::error::GatewayError;

/// What happened to the player's record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// First finished run for this nickname
    Created,
    /// Beat the previous best
    Improved { previous: u64 },
    /// Did not beat the stored best; nothing written
    NotImproved { best: u64 },
    /// The store could not be read or written
    Failed { reason: String },
}

/// Result of the game-over flow, for the game-over screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameOverReport {
    pub nickname: String,
    pub score: u64,
    pub outcome: SubmitOutcome,
    /// `None` when the leaderboard fetch failed
    pub top_scores: Option<Vec<ScoreRecord>>,
}

impl GameOverReport {
    /// The "score saved" banner should show
    pub fn score_updated(&self) -> bool {
        matches!(
            self.outcome,
            SubmitOutcome::Created | SubmitOutcome::Improved { .. }
        )
    }
}

/// Save a finished run and fetch the leaderboard
pub async fn submit_game_over<G: ScoreGateway>(
    gateway: &G,
    nickname: &str,
    score: u64,
) -> GameOverReport {
    let outcome = save_best(gateway, nickname, score).await;
    match &outcome {
        SubmitOutcome::Created => log::info!("Created score record for {nickname}: {score}"),
        SubmitOutcome::Improved { previous } => {
            log::info!("New best for {nickname}: {score} (was {previous})")
        }
        SubmitOutcome::NotImproved { best } => {
            log::info!("Score {score} for {nickname} does not beat {best}; not updated")
        }
        SubmitOutcome::Failed { reason } => {
            log::error!("Could not save score for {nickname}: {reason}")
        }
    }

    let top_scores = match fetch_leaderboard(gateway, TOP_SCORES_LIMIT).await {
        Ok(scores) => Some(scores),
        Err(e) => {
            log::error!("Error fetching high scores: {e}");
            None
        }
    };

    GameOverReport {
        nickname: nickname.to_string(),
        score,
        outcome,
        top_scores,
    }
}

async fn save_best<G: ScoreGateway>(gateway: &G, nickname: &str, score: u64) -> SubmitOutcome {
    let existing = match gateway.fetch_score(nickname).await {
        Ok(existing) => existing,
        Err(e) => return failed("fetching current score", e),
    };

    match existing {
        None => match gateway.insert_score(nickname, score).await {
            Ok(()) => SubmitOutcome::Created,
            Err(e) => failed("creating player record", e),
        },
        Some(best) if score > best.score => match gateway.upsert_score(nickname, score).await {
            Ok(()) => SubmitOutcome::Improved {
                previous: best.score,
            },
            Err(e) => failed("updating score", e),
        },
        Some(best) => SubmitOutcome::NotImproved { best: best.score },
    }
}

fn failed(step: &str, error: GatewayError) -> SubmitOutcome {
    SubmitOutcome::Failed {
        reason: format!("{step}: {error}"),
    }
}

/// Leaderboard for the rankings screen, highest first
pub async fn fetch_leaderboard<G: ScoreGateway>(
    gateway: &G,
    limit: usize,
) -> Result<Vec<ScoreRecord>, GatewayError> {
    let mut scores = gateway.fetch_top_scores(limit).await?;
    scores.sort_by(|a, b| b.score.cmp(&a.score));
    scores.truncate(limit);
    Ok(scores)
}
