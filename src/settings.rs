//! Game settings and tuning
//!
//! Every gameplay constant lives here so a JSON file can override any subset.
//! Missing keys fall back to the defaults in `crate::consts`.

use std::path::Path;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::sim::FoodKind;

/// Scene node names the core binds to at load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneNames {
    pub player: String,
    pub bounds: String,
    pub cabbage_prefix: String,
    pub carrot_prefix: String,
}

impl Default for SceneNames {
    fn default() -> Self {
        Self {
            player: PLAYER_NAME.to_string(),
            bounds: BOUNDS_NAME.to_string(),
            cabbage_prefix: CABBAGE_PREFIX.to_string(),
            carrot_prefix: CARROT_PREFIX.to_string(),
        }
    }
}

impl SceneNames {
    /// Name prefix that marks a food of `kind`
    pub fn prefix(&self, kind: FoodKind) -> &str {
        match kind {
            FoodKind::Cabbage => &self.cabbage_prefix,
            FoodKind::Carrot => &self.carrot_prefix,
        }
    }
}

/// Size and eating time of one food class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoodTuning {
    pub size: Vec3,
    pub eat_time: f32,
}

/// Player movement and hiding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub speed: f32,
    pub size: Vec3,
    pub hide_speed: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            size: PLAYER_SIZE,
            hide_speed: HIDE_SPEED,
        }
    }
}

/// Footsteps patrol timing, path and detection bands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatrolTuning {
    pub speed: f32,
    pub path_length: f32,
    /// Spawn point relative to the bounds centre
    pub spawn_offset: Vec3,
    /// Travel direction (normalized on use)
    pub axis: Vec3,
    pub first_spawn_delay: f32,
    pub min_spawn_time: u32,
    pub spawn_jitter: u32,
    /// Fractions of `path_length` where each band ends
    pub approach_end: f32,
    pub detection_end: f32,
    pub retreat_end: f32,
    pub far_volume: f32,
    pub near_volume: f32,
    pub falloff: f32,
}

impl Default for PatrolTuning {
    fn default() -> Self {
        Self {
            speed: FOOTSTEP_SPEED,
            path_length: FOOTSTEP_PATH_LENGTH,
            spawn_offset: FOOTSTEP_SPAWN_OFFSET,
            axis: Vec3::X,
            first_spawn_delay: FIRST_SPAWN_DELAY,
            min_spawn_time: MIN_SPAWN_TIME,
            spawn_jitter: SPAWN_JITTER,
            approach_end: APPROACH_END,
            detection_end: DETECTION_END,
            retreat_end: RETREAT_END,
            far_volume: FAR_VOLUME,
            near_volume: NEAR_VOLUME,
            falloff: FOOTSTEP_FALLOFF,
        }
    }
}

/// Volumes and falloffs for cues that are not tied to the patrol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioTuning {
    pub eating_volume: f32,
    pub eating_falloff: f32,
    pub cue_volume: f32,
    pub cue_falloff: f32,
    pub listener_smoothing: f32,
}

impl Default for AudioTuning {
    fn default() -> Self {
        Self {
            eating_volume: EATING_VOLUME,
            eating_falloff: EATING_FALLOFF,
            cue_volume: CUE_VOLUME,
            cue_falloff: CUE_FALLOFF,
            listener_smoothing: LISTENER_SMOOTHING,
        }
    }
}

/// Game settings/tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for the patrol cooldown RNG
    pub seed: u64,
    pub names: SceneNames,
    pub player: PlayerTuning,
    pub cabbage: FoodTuning,
    pub carrot: FoodTuning,
    pub bounds_half_extents: Vec2,
    /// Total foods required at load
    pub food_count: usize,
    /// Foods required per class at load
    pub food_per_kind: usize,
    pub patrol: PatrolTuning,
    pub audio: AudioTuning,
    /// Seconds per dot step in "Eating . . ." / "Hiding . . ."
    pub dot_interval: f32,
    pub win_text: String,
    pub lose_text: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            names: SceneNames::default(),
            player: PlayerTuning::default(),
            cabbage: FoodTuning {
                size: CABBAGE_SIZE,
                eat_time: CABBAGE_EAT_TIME,
            },
            carrot: FoodTuning {
                size: CARROT_SIZE,
                eat_time: CARROT_EAT_TIME,
            },
            bounds_half_extents: BOUNDS_HALF_EXTENTS,
            food_count: FOOD_COUNT,
            food_per_kind: FOOD_PER_KIND,
            patrol: PatrolTuning::default(),
            audio: AudioTuning::default(),
            dot_interval: DOT_INTERVAL,
            win_text: WIN_TEXT.to_string(),
            lose_text: LOSE_TEXT.to_string(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON; absent keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file.
    ///
    /// A missing file is not an error: the defaults are used and the
    /// fallback is logged.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Tuning for a food class
    pub fn food(&self, kind: FoodKind) -> FoodTuning {
        match kind {
            FoodKind::Cabbage => self.cabbage,
            FoodKind::Carrot => self.carrot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "player": { "speed": 50.0 } }"#)
            .expect("valid json");
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.player.speed, 50.0);
        assert_eq!(settings.player.hide_speed, HIDE_SPEED);
        assert_eq!(settings.patrol, PatrolTuning::default());
        assert_eq!(settings.names.player, PLAYER_NAME);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("opossum-garden-no-such-settings.json");
        let settings = Settings::load(&path).expect("defaults");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!(
            "opossum-garden-settings-{}.json",
            std::process::id()
        ));
        let mut settings = Settings::default();
        settings.patrol.min_spawn_time = 3;
        settings.save(&path).expect("save");
        let loaded = Settings::load(&path).expect("load");
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.patrol.min_spawn_time, 3);
    }
}
