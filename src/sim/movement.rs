//! Player movement
//!
//! Held directions become a displacement, the opossum turns to face it, the
//! collision test may veto the step, and the result is clamped to the walls.

use glam::{Vec2, Vec3};

use super::collision::collision_test;
use super::state::GameState;
use crate::platform::InputLatch;
use crate::{planar, yaw};

/// Unit-length-or-zero direction from the held buttons
pub fn intent(input: &InputLatch) -> Vec2 {
    let mut dir = Vec2::ZERO;
    if input.up.pressed {
        dir.y += 1.0;
    }
    if input.left.pressed {
        dir.x -= 1.0;
    }
    if input.down.pressed {
        dir.y -= 1.0;
    }
    if input.right.pressed {
        dir.x += 1.0;
    }
    dir.normalize_or_zero()
}

/// Facing offset in degrees about +Z for a displacement, `None` when idle.
///
/// Up is 0, down 180, left +90, right -90. Diagonals sit 45 degrees off the
/// vertical toward the horizontal direction.
pub fn facing_degrees(step: Vec2) -> Option<f32> {
    if step == Vec2::ZERO {
        return None;
    }
    // +1 moving left, -1 moving right
    let side = (step.x < 0.0) as i32 - (step.x > 0.0) as i32;
    let degrees = if step.x != 0.0 && step.y != 0.0 {
        let base = if step.y < 0.0 { 135.0 } else { 45.0 };
        side as f32 * base
    } else if step.y == 0.0 {
        side as f32 * 90.0
    } else if step.y < 0.0 {
        180.0
    } else {
        0.0
    };
    Some(degrees)
}

/// Advance the player by one frame of held input
pub fn update_movement(state: &mut GameState, input: &mut InputLatch, dt: f32) {
    if state.hiding.is_hiding() {
        input.reset_directional_downs();
        return;
    }

    let step = intent(input) * state.settings.player.speed * dt;
    let player = &mut state.player;

    if let Some(degrees) = facing_degrees(step) {
        player.rotation = yaw(degrees) * player.default_rotation;
    }

    let candidate = planar(player.position) + step;
    let collision = collision_test(candidate, player.size.x, &state.foods);
    if let Some(nearest) = collision.nearest {
        state.target = Some(nearest);
    }
    if !collision.hit {
        player.position += Vec3::new(step.x, step.y, 0.0);
    }

    input.reset_directional_downs();

    let margin = player.half_width();
    state.walls.clamp(&mut player.position, margin);
}
