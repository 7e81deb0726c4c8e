//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering and
//! platform code:
//! - Variable frame time, supplied by the caller
//! - Seeded RNG only
//! - Stable iteration order (scene order, then swap-removals)
//! - Side effects leave as `GameEvent`s

pub mod collision;
pub mod eating;
pub mod hiding;
pub mod movement;
pub mod patrol;
pub mod state;
pub mod status;
pub mod text;
pub mod tick;
pub mod triggers;

pub use collision::{CollisionResult, collision_test};
pub use eating::{EatState, update_eating};
pub use hiding::{HideState, update_hiding};
pub use movement::{facing_degrees, intent, update_movement};
pub use patrol::{Patrol, PatrolBand, PatrolPhase, update_patrol};
pub use state::{
    ActiveLoops, AudioCue, Food, FoodKind, GameEvent, GamePhase, GameState, LoopChannel, Player,
    Walls,
};
pub use status::resolve_status;
pub use text::{DotCycle, StatusText, TextStatus};
pub use tick::tick;
pub use triggers::update_triggers;
