//! Game state and core simulation types
//!
//! Everything the tick mutates lives in [`GameState`], including the seeded
//! RNG, so a seed plus a jump sequence fully determines a run.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_VIEWPORT_WIDTH;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, waiting for a player name
    Idle,
    /// Active gameplay
    Running,
    /// Run ended; terminal until reset
    Over,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Position would have gone above the stage
    HitCeiling,
    /// Position would have gone below the stage
    HitFloor,
    HitObstacle,
}

/// One half of an obstacle pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Extent from the stage edge it hangs from
    pub height: f32,
    /// Hangs from the ceiling (true) or stands on the floor (false)
    pub is_top: bool,
    /// Cosmetic tint, never read by gameplay
    pub is_green: bool,
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    /// Width of the visible play area, reported by the presentation layer
    pub viewport_width: f32,
    pub phase: GamePhase,
    pub player_name: String,
    /// Top edge of the avatar, in `[0, stage_height]` while running
    pub player_position: f32,
    /// Pixels per tick, positive is downward
    pub player_velocity: f32,
    /// Spawn order, oldest first; pairs are adjacent (top, then bottom)
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    pub level: u32,
    pub game_speed: f32,
    /// Last `score / level_score_step` that triggered a level-up
    pub leveled_at: u64,
    /// Simulation tick counter for the current run
    pub time_ticks: u64,
}

impl GameState {
    /// Create an idle game state with the given seed. `tuning` must pass
    /// [`Tuning::validate`]; an empty obstacle height range panics on spawn.
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            phase: GamePhase::Idle,
            player_name: String::new(),
            player_position: tuning.start_position(),
            player_velocity: 0.0,
            obstacles: Vec::new(),
            score: 0,
            level: 1,
            game_speed: tuning.initial_speed,
            leveled_at: 0,
            time_ticks: 0,
        }
    }

    /// Back to the idle defaults. Keeps player name, tuning and viewport.
    pub fn reset(&mut self, seed: u64) {
        let player_name = std::mem::take(&mut self.player_name);
        let viewport_width = self.viewport_width;
        *self = Self::new(seed, self.tuning);
        self.player_name = player_name;
        self.viewport_width = viewport_width;
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }

    pub fn player_left(&self) -> f32 {
        self.tuning.player_x
    }

    pub fn player_right(&self) -> f32 {
        self.tuning.player_x + self.tuning.player_width
    }

    pub fn player_bottom(&self) -> f32 {
        self.player_position + self.tuning.player_height
    }

    /// Spawn a top/bottom pair at the spawn edge. Returns the top height.
    pub fn spawn_obstacle_pair(&mut self) -> f32 {
        let t = self.tuning;
        let top_height = self
            .rng
            .random_range(t.obstacle_min_height..t.obstacle_max_height);
        let bottom_height = t.stage_height - top_height - t.gap_distance;
        let x = t.spawn_x(self.viewport_width);

        let top_green = self.rng.random_bool(0.5);
        let bottom_green = self.rng.random_bool(0.5);
        self.obstacles.push(Obstacle {
            x,
            height: top_height,
            is_top: true,
            is_green: top_green,
        });
        self.obstacles.push(Obstacle {
            x,
            height: bottom_height,
            is_top: false,
            is_green: bottom_green,
        });
        top_height
    }

    /// Presentation-facing copy of the state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player_position: self.player_position,
            player_velocity: self.player_velocity,
            obstacles: self.obstacles.clone(),
            score: self.score,
            level: self.level,
            game_speed: self.game_speed,
            is_running: self.is_running(),
            is_over: self.is_over(),
        }
    }
}

/// What the presentation layer reads every frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub player_position: f32,
    pub player_velocity: f32,
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    pub level: u32,
    pub game_speed: f32,
    pub is_running: bool,
    pub is_over: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(7, Tuning::default());
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.player_position, 270.0);
        assert_eq!(state.player_velocity, 0.0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.game_speed, 2.0);
        assert!(!state.is_running() && !state.is_over());
    }

    #[test]
    fn test_spawned_pair_fills_stage() {
        let mut state = GameState::new(42, Tuning::default());
        for _ in 0..50 {
            state.spawn_obstacle_pair();
        }
        for pair in state.obstacles.chunks(2) {
            let (top, bottom) = (pair[0], pair[1]);
            assert!(top.is_top && !bottom.is_top);
            assert_eq!(top.x, bottom.x);
            assert!((100.0..300.0).contains(&top.height));
            let total = top.height + bottom.height + state.tuning.gap_distance;
            assert!((total - state.tuning.stage_height).abs() < 1e-3);
        }
    }

    #[test]
    fn test_same_seed_same_obstacles() {
        let mut a = GameState::new(1234, Tuning::default());
        let mut b = GameState::new(1234, Tuning::default());
        for _ in 0..10 {
            assert_eq!(a.spawn_obstacle_pair(), b.spawn_obstacle_pair());
        }
        assert_eq!(a.obstacles, b.obstacles);
    }

    #[test]
    fn test_reset_keeps_player_and_viewport() {
        let mut state = GameState::new(1, Tuning::default());
        state.player_name = "Chad".into();
        state.viewport_width = 1280.0;
        state.phase = GamePhase::Over;
        state.score = 4321;
        state.level = 5;
        state.spawn_obstacle_pair();

        state.reset(2);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.player_name, "Chad");
        assert_eq!(state.viewport_width, 1280.0);
        assert_eq!(state.seed, 2);
        assert_eq!(state.snapshot(), GameState::new(2, Tuning::default()).snapshot());
    }
}
