//! Player/obstacle collision tests
//!
//! Axis-aligned boxes with a forgiveness margin shaved off both axes, so a
//! graze by a few pixels does not end the run.

use super::state::{GameState, Obstacle};

/// Horizontal extent of the player plus its vertical edges
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerBox {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl PlayerBox {
    pub fn of(state: &GameState) -> Self {
        Self {
            left: state.player_left(),
            right: state.player_right(),
            top: state.player_position,
            bottom: state.player_bottom(),
        }
    }
}

/// Obstacle columns overlap the player's columns
#[inline]
pub fn overlaps_horizontally(x: f32, width: f32, player: &PlayerBox, margin: f32) -> bool {
    x < player.right - margin && x + width > player.left + margin
}

/// Obstacle and player share rows
#[inline]
pub fn overlaps_vertically(
    obstacle: &Obstacle,
    player: &PlayerBox,
    stage_height: f32,
    margin: f32,
) -> bool {
    if obstacle.is_top {
        player.top < obstacle.height - margin
    } else {
        player.bottom > stage_height - obstacle.height + margin
    }
}

/// Full test for one obstacle half
pub fn obstacle_hits_player(
    obstacle: &Obstacle,
    player: &PlayerBox,
    obstacle_width: f32,
    stage_height: f32,
    margin: f32,
) -> bool {
    overlaps_horizontally(obstacle.x, obstacle_width, player, margin)
        && overlaps_vertically(obstacle, player, stage_height, margin)
}

/// First obstacle (in spawn order) touching the player
pub fn find_collision(state: &GameState) -> Option<&Obstacle> {
    let player = PlayerBox::of(state);
    let t = &state.tuning;
    state.obstacles.iter().find(|o| {
        obstacle_hits_player(o, &player, t.obstacle_width, t.stage_height, t.collision_margin)
    })
}
