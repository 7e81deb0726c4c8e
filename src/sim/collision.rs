//! Collision test between the player and the food
//!
//! Bodies are circles on the ground plane with radius half their width.
//! One pass answers two questions that gameplay keeps coupled: may the
//! player move here, and which food is it pressing against. You can only
//! start eating something you are colliding with.

use glam::Vec2;

use super::state::Food;
use crate::planar;

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Candidate overlaps at least one food
    pub hit: bool,
    /// Closest overlapping food; first in iteration order on exact ties
    pub nearest: Option<usize>,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            nearest: None,
        }
    }
}

/// Check the player's footprint at `candidate` against every food.
///
/// Overlap when the centre distance is at most `player_width / 2 +
/// food_width / 2`. Only a strictly smaller distance replaces the current
/// nearest, so equal distances keep the earlier food.
pub fn collision_test(candidate: Vec2, player_width: f32, foods: &[Food]) -> CollisionResult {
    let mut result = CollisionResult::miss();
    let mut min_dist = f32::MAX;

    for (i, food) in foods.iter().enumerate() {
        let reach = player_width * 0.5 + food.size.x * 0.5;
        let dist = planar(food.position).distance(candidate);
        if dist <= reach {
            result.hit = true;
            if dist < min_dist {
                min_dist = dist;
                result.nearest = Some(i);
            }
        }
    }

    result
}
