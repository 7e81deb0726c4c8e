//! Per-frame simulation step
//!
//! Advances the garden by one variable-length frame. Order matters: status
//! is resolved first from last frame's results, then movement, hiding, the
//! patrol, eating and finally the text/audio triggers.

use super::eating::update_eating;
use super::hiding::update_hiding;
use super::movement::update_movement;
use super::patrol::update_patrol;
use super::state::{GameEvent, GameState};
use super::status::resolve_status;
use super::triggers::update_triggers;
use crate::platform::InputLatch;

/// Advance the game state by one frame, returning what happened
pub fn tick(state: &mut GameState, input: &mut InputLatch, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.frame += 1;

    if resolve_status(state, &mut events) {
        return events;
    }

    update_movement(state, input, dt);
    update_hiding(state, input.hide.pressed, dt);
    update_patrol(state, dt, &mut events);
    update_eating(state, input.eat.pressed, dt, &mut events);
    update_triggers(state, dt, &mut events);

    events
}
