//! Opossum Garden - stealth-survival gameplay core
//!
//! Core modules:
//! - `sim`: Frame-stepped game state (movement, eating, hiding, patrol, status)
//! - `scene`: Named transforms, drawables and the camera the core binds to
//! - `audio`: Positional audio service contract
//! - `platform`: Input latch for discrete key events
//! - `settings`: Data-driven tuning
//! - `mode`: Drives the sim each frame and applies its events

pub mod audio;
pub mod error;
pub mod mode;
pub mod platform;
pub mod scene;
pub mod settings;
pub mod sim;

pub use error::{LoadError, SettingsError};
pub use mode::GardenMode;
pub use settings::Settings;

use glam::{Quat, Vec2, Vec3};

/// Game configuration constants (defaults for `Settings`)
pub mod consts {
    use glam::{Vec2, Vec3};

    /// Nominal frame time used by the headless driver
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Scene node names
    pub const PLAYER_NAME: &str = "opossum";
    pub const BOUNDS_NAME: &str = "dirt";
    pub const CABBAGE_PREFIX: &str = "cabbage";
    pub const CARROT_PREFIX: &str = "carrot";

    /// Player movement (units per second)
    pub const PLAYER_SPEED: f32 = 100.0;
    /// Player bounding box (width, depth, height)
    pub const PLAYER_SIZE: Vec3 = Vec3::new(16.0, 24.0, 10.0);
    /// Descent/ascent speed while hiding (units per second)
    pub const HIDE_SPEED: f32 = 20.0;
    /// Depth below which a rising player is back on the ground
    pub const HIDE_SNAP: f32 = 1.0e-3;

    /// Garden bounds half extents around the dirt patch
    pub const BOUNDS_HALF_EXTENTS: Vec2 = Vec2::new(150.0, 100.0);

    /// Food bounding sizes and seconds of eating required
    pub const CABBAGE_SIZE: Vec3 = Vec3::new(14.0, 14.0, 10.0);
    pub const CABBAGE_EAT_TIME: f32 = 2.0;
    pub const CARROT_SIZE: Vec3 = Vec3::new(8.0, 8.0, 6.0);
    pub const CARROT_EAT_TIME: f32 = 1.0;

    /// Food counts validated at load
    pub const FOOD_COUNT: usize = 20;
    pub const FOOD_PER_KIND: usize = 10;

    /// Footsteps patrol
    pub const FOOTSTEP_SPEED: f32 = 80.0;
    pub const FOOTSTEP_PATH_LENGTH: f32 = 400.0;
    /// Spawn point relative to the dirt patch centre
    pub const FOOTSTEP_SPAWN_OFFSET: Vec3 = Vec3::new(-200.0, 40.0, 0.0);
    pub const FOOTSTEP_FALLOFF: f32 = 3.0;
    /// Seconds before the first pass
    pub const FIRST_SPAWN_DELAY: f32 = 6.0;
    /// Cooldown re-roll: `rand % SPAWN_JITTER + MIN_SPAWN_TIME` seconds
    pub const MIN_SPAWN_TIME: u32 = 8;
    pub const SPAWN_JITTER: u32 = 7;
    /// Band boundaries as fractions of the path length
    pub const APPROACH_END: f32 = 0.35;
    pub const DETECTION_END: f32 = 0.65;
    pub const RETREAT_END: f32 = 1.0;
    /// Loop volumes per band
    pub const FAR_VOLUME: f32 = 0.7;
    pub const NEAR_VOLUME: f32 = 1.0;

    /// Eating loop and one-shot cues
    pub const EATING_VOLUME: f32 = 0.6;
    pub const EATING_FALLOFF: f32 = 2.0;
    pub const CUE_VOLUME: f32 = 1.0;
    pub const CUE_FALLOFF: f32 = 10.0;

    /// Listener smoothing time (seconds)
    pub const LISTENER_SMOOTHING: f32 = 1.0 / 60.0;

    /// Status text dot animation step (seconds)
    pub const DOT_INTERVAL: f32 = 0.4;
    pub const MAX_DOTS: u8 = 3;

    pub const WIN_TEXT: &str = "You ate the whole garden!";
    pub const LOSE_TEXT: &str = "Spotted! The gardener caught you.";

    /// Default RNG seed
    pub const DEFAULT_SEED: u64 = 0x0905_5055;
}

/// Rotation of `degrees` about +Z (the garden's up axis)
#[inline]
pub fn yaw(degrees: f32) -> Quat {
    Quat::from_rotation_z(degrees.to_radians())
}

/// Ground-plane projection of a world position
#[inline]
pub fn planar(pos: Vec3) -> Vec2 {
    pos.truncate()
}
