//! Game session controller
//!
//! Owns the [`GameState`] for the lifetime of the game screen. The
//! presentation layer talks only to this type: it writes commands
//! (`request_*`), feeds frame time into [`GameSession::update`], and reads
//! [`GameSession::snapshot`] to draw.
//!
//! A finished run yields one [`GameOverSummary`]. The caller runs the
//! persistence flow with it and hands the resulting report back through
//! [`GameSession::accept_report`]; reports never touch the simulation.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::error::{GameError, TuningError};
use crate::normalize_player_name;
use crate::persistence::GameOverReport;
use crate::settings::Avatar;
use crate::sim::{GameOverCause, GamePhase, GameState, Snapshot, TickInput, TickOutcome, tick};
use crate::tuning::Tuning;

/// Emitted exactly once per Running → Over transition
#[derive(Debug, Clone, PartialEq)]
pub struct GameOverSummary {
    /// Run that produced this summary; pass back with the report
    pub run_id: u64,
    pub nickname: String,
    pub score: u64,
    pub level: u32,
    pub cause: GameOverCause,
}

#[derive(Debug)]
pub struct GameSession {
    state: GameState,
    avatar: Avatar,
    /// Single-slot jump request, consumed by the next tick
    pending_jump: bool,
    accumulator: f32,
    /// Incremented whenever a run starts or is reset
    run_id: u64,
    last_report: Option<GameOverReport>,
}

impl GameSession {
    /// Idle session; rejects tuning the simulation cannot play
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self {
            state: GameState::new(seed, tuning),
            avatar: Avatar::default(),
            pending_jump: false,
            accumulator: 0.0,
            run_id: 0,
            last_report: None,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn avatar(&self) -> Avatar {
        self.avatar
    }

    pub fn set_avatar(&mut self, avatar: Avatar) {
        self.avatar = avatar;
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        if width > 0.0 {
            self.state.viewport_width = width;
        }
    }

    /// Tap, click or key press. Dropped unless a run is in progress.
    pub fn request_jump(&mut self) {
        if self.state.is_running() {
            self.pending_jump = true;
        } else {
            log::debug!("Jump ignored in {:?}", self.state.phase);
        }
    }

    /// Idle → Running with a validated player name
    pub fn request_start(&mut self, name: &str) -> Result<(), GameError> {
        if self.state.phase != GamePhase::Idle {
            return Err(GameError::NotIdle(self.state.phase));
        }
        let name = normalize_player_name(name)?;

        self.state.player_name = name;
        self.state.phase = GamePhase::Running;
        self.pending_jump = false;
        self.accumulator = 0.0;
        self.run_id += 1;
        self.last_report = None;
        log::info!(
            "Run {} started for {} ({}), seed {}",
            self.run_id,
            self.state.player_name,
            self.avatar.as_str(),
            self.state.seed
        );
        Ok(())
    }

    /// Back to the start screen with fresh state. Reports still in flight
    /// for the previous run are ignored when they arrive.
    pub fn request_reset(&mut self, seed: u64) {
        self.state.reset(seed);
        self.pending_jump = false;
        self.accumulator = 0.0;
        self.run_id += 1;
        self.last_report = None;
        log::info!("Game reset with seed: {}", seed);
    }

    /// Run exactly one tick, consuming the pending jump
    pub fn step(&mut self) -> Option<GameOverSummary> {
        let input = TickInput {
            jump: std::mem::take(&mut self.pending_jump),
        };
        match tick(&mut self.state, &input) {
            TickOutcome::GameOver(cause) => Some(GameOverSummary {
                run_id: self.run_id,
                nickname: self.state.player_name.clone(),
                score: self.state.score,
                level: self.state.level,
                cause,
            }),
            TickOutcome::Advanced | TickOutcome::Inactive => None,
        }
    }

    /// Run ticks for `dt` seconds of frame time
    pub fn update(&mut self, dt: f32) -> Option<GameOverSummary> {
        if !self.state.is_running() {
            self.accumulator = 0.0;
            return None;
        }
        self.accumulator += dt.clamp(0.0, 0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
            if let Some(summary) = self.step() {
                self.accumulator = 0.0;
                return Some(summary);
            }
        }
        // Frames slower than MAX_SUBSTEPS ticks drop the backlog
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        None
    }

    /// Store the persistence result for display. Returns false for a stale
    /// report from a run that has since been reset.
    pub fn accept_report(&mut self, run_id: u64, report: GameOverReport) -> bool {
        if run_id != self.run_id || !self.state.is_over() {
            log::debug!("Dropping report for run {} (current run {})", run_id, self.run_id);
            return false;
        }
        self.last_report = Some(report);
        true
    }

    pub fn last_report(&self) -> Option<&GameOverReport> {
        self.last_report.as_ref()
    }
}
