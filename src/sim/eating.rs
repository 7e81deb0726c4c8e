//! Eating the targeted food
//!
//! The target comes only from the collision test; holding eat chews it down
//! and the food disappears when its lifetime runs out.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EatState {
    /// Eat held with a valid target this frame
    pub active: bool,
    /// Eating text is on screen and must be cleared once when eating stops
    pub text_shown: bool,
}

/// Chew on the target for one frame
pub fn update_eating(state: &mut GameState, held: bool, dt: f32, events: &mut Vec<GameEvent>) {
    state.eating.active = held && state.target.is_some();
    if !state.eating.active {
        return;
    }
    let Some(index) = state.target else {
        return;
    };
    let Some(food) = state.foods.get_mut(index) else {
        debug_assert!(false, "target {index} out of range");
        state.target = None;
        state.eating.active = false;
        return;
    };

    food.lifetime -= dt;
    if food.lifetime > 0.0 {
        return;
    }

    let eaten = state.foods.swap_remove(index);
    state.target = None;
    log::info!(
        "Ate {} ({:?}), {} left",
        eaten.name,
        eaten.kind,
        state.foods.len()
    );
    events.push(GameEvent::FoodEaten {
        name: eaten.name,
        remaining: state.foods.len(),
    });
}
