//! Hiding: sinking into the dirt while the hide button is held
//!
//! Depth is tracked as a distance in `[0, player.size.z]` and the player's z
//! is derived from it. Rising snaps the last `HIDE_SNAP` of depth to zero so
//! float drift from repeated steps never leaves the player stuck just below
//! the ground.

use serde::{Deserialize, Serialize};

use super::state::GameState;
use crate::consts::HIDE_SNAP;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HideState {
    /// How far below the ground the player is
    pub distance: f32,
    /// Fully sunk: the patrol cannot see the player
    pub is_hidden: bool,
    /// Hide button was held last frame
    pub held: bool,
    /// Hiding text is on screen and must be cleared once on release
    pub text_shown: bool,
}

impl HideState {
    /// Any depth at all; movement is frozen while true
    #[inline]
    pub fn is_hiding(&self) -> bool {
        self.distance != 0.0
    }
}

/// Sink or rise by one frame
pub fn update_hiding(state: &mut GameState, held: bool, dt: f32) {
    let full = state.player.size.z;
    let step = state.settings.player.hide_speed * dt;
    let hiding = &mut state.hiding;

    hiding.held = held;
    if held {
        if hiding.distance < full {
            hiding.distance = (hiding.distance + step).min(full);
        }
    } else if hiding.distance > 0.0 {
        hiding.distance -= step;
        if hiding.distance <= HIDE_SNAP {
            hiding.distance = 0.0;
        }
    }
    hiding.is_hidden = hiding.distance == full;

    state.player.position.z = state.player.rest_z - hiding.distance;
}
