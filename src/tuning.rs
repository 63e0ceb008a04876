//! Data-driven game balance
//!
//! Every physics and pacing constant the tick reads lives in [`Tuning`].
//! Defaults mirror `crate::consts`; a JSON document may override any subset.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub stage_height: f32,

    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,

    /// Added to velocity every tick
    pub gravity: f32,
    /// Velocity multiplier applied before gravity; 1.0 is undamped
    pub damping: f32,
    pub jump_strength: f32,

    pub obstacle_width: f32,
    pub gap_distance: f32,
    /// Top half height is drawn uniformly from `[min, max)`
    pub obstacle_min_height: f32,
    pub obstacle_max_height: f32,
    pub spawn_edge_inset: f32,

    pub collision_margin: f32,

    pub initial_speed: f32,
    pub speed_increment: f32,
    pub level_score_step: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            stage_height: STAGE_HEIGHT,
            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            gravity: GRAVITY,
            damping: VELOCITY_DAMPING,
            jump_strength: JUMP_STRENGTH,
            obstacle_width: OBSTACLE_WIDTH,
            gap_distance: GAP_DISTANCE,
            obstacle_min_height: OBSTACLE_MIN_HEIGHT,
            obstacle_max_height: OBSTACLE_MAX_HEIGHT,
            spawn_edge_inset: SPAWN_EDGE_INSET,
            collision_margin: COLLISION_MARGIN,
            initial_speed: INITIAL_SPEED,
            speed_increment: SPEED_INCREMENT,
            level_score_step: LEVEL_SCORE_STEP,
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject geometry the simulation cannot play
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.stage_height <= 0.0 {
            return Err(TuningError::Invalid("stage height must be positive".into()));
        }
        if self.gap_distance <= 0.0 || self.gap_distance >= self.stage_height {
            return Err(TuningError::Invalid(format!(
                "gap distance {} must be inside (0, {})",
                self.gap_distance, self.stage_height
            )));
        }
        if self.obstacle_min_height < 0.0 || self.obstacle_min_height >= self.obstacle_max_height {
            return Err(TuningError::Invalid(format!(
                "obstacle height range [{}, {}) is empty",
                self.obstacle_min_height, self.obstacle_max_height
            )));
        }
        // Tallest top half must still leave a non-negative bottom half
        if self.obstacle_max_height + self.gap_distance > self.stage_height {
            return Err(TuningError::Invalid(format!(
                "obstacle max height {} plus gap {} exceeds stage height {}",
                self.obstacle_max_height, self.gap_distance, self.stage_height
            )));
        }
        if self.obstacle_width <= 0.0 || self.player_width <= 0.0 || self.player_height <= 0.0 {
            return Err(TuningError::Invalid("widths and heights must be positive".into()));
        }
        if self.level_score_step == 0 {
            return Err(TuningError::Invalid("level score step must be non-zero".into()));
        }
        if self.initial_speed <= 0.0 {
            return Err(TuningError::Invalid("initial speed must be positive".into()));
        }
        Ok(())
    }

    /// Where a new obstacle pair appears for a given viewport width
    pub fn spawn_x(&self, viewport_width: f32) -> f32 {
        (viewport_width - self.spawn_edge_inset).min(viewport_width - self.gap_distance / 2.0)
    }

    /// Resting position for a fresh run: avatar centered on the stage
    pub fn start_position(&self) -> f32 {
        (self.stage_height - self.player_height) / 2.0
    }
}
