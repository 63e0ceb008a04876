//! Demo-mode pilot
//!
//! Decides when to flap so the avatar follows the center of the next gap.
//! Used by the headless binary; gameplay never depends on it.

use super::state::GameState;

/// How far below the gap center the avatar may sink before flapping
const AIM_SLACK: f32 = 20.0;

/// Vertical center of the next gap ahead of the player, if one is on screen
pub fn next_gap_center(state: &GameState) -> Option<f32> {
    let t = &state.tuning;
    state
        .obstacles
        .iter()
        .filter(|o| o.is_top && o.x + t.obstacle_width > state.player_left())
        .min_by(|a, b| a.x.total_cmp(&b.x))
        .map(|top| top.height + t.gap_distance / 2.0)
}

/// Whether a jump should be requested before the next tick
pub fn wants_jump(state: &GameState) -> bool {
    if !state.is_running() {
        return false;
    }
    let t = &state.tuning;
    let target = next_gap_center(state).unwrap_or(t.stage_height / 2.0);

    // Look one tick ahead; only flap while falling so jumps do not stack
    let center = state.player_position + t.player_height / 2.0 + state.player_velocity;
    state.player_velocity >= 0.0 && center > target + AIM_SLACK
}
