//! Game state and core simulation types
//!
//! `GameState` owns every value gameplay mutates. Scene transforms are bound
//! once by `GameState::load`; afterwards the sim works on its own copies and
//! reports changes back through `GameEvent`s.

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::eating::EatState;
use super::hiding::HideState;
use super::patrol::Patrol;
use super::text::StatusText;
use crate::audio::Sample;
use crate::error::LoadError;
use crate::scene::{Scene, Transform, TransformId};
use crate::settings::{FoodTuning, Settings};

/// Overall outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    InProgress,
    /// Every food eaten
    Won,
    /// Caught outside a hiding pose
    Lost,
}

/// Food classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodKind {
    Cabbage,
    Carrot,
}

impl FoodKind {
    pub const ALL: [FoodKind; 2] = [FoodKind::Cabbage, FoodKind::Carrot];
}

/// The opossum
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub transform: TransformId,
    pub position: Vec3,
    pub rotation: Quat,
    /// Orientation at load; facings are offsets from it
    pub default_rotation: Quat,
    /// Ground z; hiding sinks the player below it
    pub rest_z: f32,
    /// Bounding size (width, depth, height)
    pub size: Vec3,
}

impl Player {
    pub fn new(id: TransformId, transform: &Transform, size: Vec3) -> Self {
        Self {
            transform: id,
            position: transform.position,
            rotation: transform.rotation,
            default_rotation: transform.rotation,
            rest_z: transform.position.z,
            size,
        }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.size.x * 0.5
    }
}

/// An edible item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    pub name: String,
    pub kind: FoodKind,
    pub position: Vec3,
    pub size: Vec3,
    /// Seconds of eating left
    pub lifetime: f32,
}

impl Food {
    pub fn new(transform: &Transform, kind: FoodKind, tuning: FoodTuning) -> Self {
        Self {
            name: transform.name.clone(),
            kind,
            position: transform.position,
            size: tuning.size,
            lifetime: tuning.eat_time,
        }
    }
}

/// Garden bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Walls {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Walls {
    pub fn around(center: Vec3, half_extents: Vec2) -> Self {
        Self {
            min_x: center.x - half_extents.x,
            max_x: center.x + half_extents.x,
            min_y: center.y - half_extents.y,
            max_y: center.y + half_extents.y,
        }
    }

    /// Clamp a position so a body of half-width `margin` stays inside.
    ///
    /// The same margin is used on both axes. Lower bound first, then upper,
    /// so a margin wider than the garden pins to the upper side instead of
    /// panicking.
    pub fn clamp(&self, pos: &mut Vec3, margin: f32) {
        pos.x = pos.x.max(self.min_x + margin).min(self.max_x - margin);
        pos.y = pos.y.max(self.min_y + margin).min(self.max_y - margin);
    }
}

/// Looping sounds the sim keeps track of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoopChannel {
    Footsteps,
    Eating,
}

/// Audio requests emitted by the sim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AudioCue {
    StartLoop {
        channel: LoopChannel,
        sample: Sample,
        volume: f32,
        position: Vec3,
        falloff: f32,
    },
    SetVolume {
        channel: LoopChannel,
        volume: f32,
    },
    SetPosition {
        channel: LoopChannel,
        position: Vec3,
    },
    StopLoop {
        channel: LoopChannel,
    },
    PlayOnce {
        sample: Sample,
        volume: f32,
        position: Vec3,
        falloff: f32,
    },
}

/// Events emitted during a frame; the mode layer applies them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Food finished; its drawable must leave the render set
    FoodEaten { name: String, remaining: usize },
    PatrolSpawned,
    PatrolPassed,
    GameWon,
    GameLost,
    Audio(AudioCue),
}

/// Which loops are currently playing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveLoops {
    pub footsteps: bool,
    pub eating: bool,
}

impl ActiveLoops {
    fn flag(&mut self, channel: LoopChannel) -> &mut bool {
        match channel {
            LoopChannel::Footsteps => &mut self.footsteps,
            LoopChannel::Eating => &mut self.eating,
        }
    }

    pub fn is_playing(&self, channel: LoopChannel) -> bool {
        match channel {
            LoopChannel::Footsteps => self.footsteps,
            LoopChannel::Eating => self.eating,
        }
    }

    /// Start `channel`; restarts are emitted as stop + start
    pub fn start(
        &mut self,
        channel: LoopChannel,
        sample: Sample,
        volume: f32,
        position: Vec3,
        falloff: f32,
        events: &mut Vec<GameEvent>,
    ) {
        let playing = self.flag(channel);
        if *playing {
            events.push(GameEvent::Audio(AudioCue::StopLoop { channel }));
        }
        *playing = true;
        events.push(GameEvent::Audio(AudioCue::StartLoop {
            channel,
            sample,
            volume,
            position,
            falloff,
        }));
    }

    /// Stop `channel` if it is playing
    pub fn stop(&mut self, channel: LoopChannel, events: &mut Vec<GameEvent>) {
        let playing = self.flag(channel);
        if *playing {
            *playing = false;
            events.push(GameEvent::Audio(AudioCue::StopLoop { channel }));
        }
    }
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub player: Player,
    /// Remaining foods; order is scene order until swap-removals shuffle it
    pub foods: Vec<Food>,
    pub walls: Walls,
    /// Food currently eligible for eating
    pub target: Option<usize>,
    pub hiding: HideState,
    pub eating: EatState,
    pub patrol: Patrol,
    pub phase: GamePhase,
    pub text: StatusText,
    pub loops: ActiveLoops,
    pub win_cue_played: bool,
    pub fail_cue_played: bool,
    /// Frames simulated
    pub frame: u64,
}

impl GameState {
    /// Bind to a scene and validate it.
    ///
    /// Fails unless the scene has exactly one camera, exactly one player
    /// transform, the bounds transform, and the configured number of foods
    /// of each class.
    pub fn load(scene: &Scene, settings: Settings) -> Result<Self, LoadError> {
        if scene.cameras.len() != 1 {
            return Err(LoadError::CameraCount(scene.cameras.len()));
        }

        let names = &settings.names;
        let players: Vec<TransformId> = scene.find_all(&names.player).collect();
        let player_id = match players.as_slice() {
            [] => return Err(LoadError::MissingPlayer(names.player.clone())),
            [id] => *id,
            _ => {
                return Err(LoadError::DuplicatePlayer {
                    name: names.player.clone(),
                    count: players.len(),
                });
            }
        };
        let bounds_id = scene
            .find(&names.bounds)
            .ok_or_else(|| LoadError::MissingBounds(names.bounds.clone()))?;

        // Scene order; a node matching both prefixes counts as the first kind
        let mut found: Vec<(TransformId, FoodKind)> = FoodKind::ALL
            .into_iter()
            .flat_map(|kind| scene.with_prefix(names.prefix(kind)).map(move |id| (id, kind)))
            .collect();
        found.sort_by_key(|&(id, _)| id);
        found.dedup_by_key(|&mut (id, _)| id);
        let foods: Vec<Food> = found
            .into_iter()
            .map(|(id, kind)| Food::new(scene.transform(id), kind, settings.food(kind)))
            .collect();
        if foods.len() != settings.food_count {
            return Err(LoadError::FoodCount {
                expected: settings.food_count,
                found: foods.len(),
            });
        }
        for kind in FoodKind::ALL {
            let found = foods.iter().filter(|f| f.kind == kind).count();
            if found != settings.food_per_kind {
                return Err(LoadError::FoodKindCount {
                    kind,
                    expected: settings.food_per_kind,
                    found,
                });
            }
        }

        let bounds_center = scene.transform(bounds_id).position;
        let player = Player::new(player_id, scene.transform(player_id), settings.player.size);
        let walls = Walls::around(bounds_center, settings.bounds_half_extents);
        let patrol = Patrol::new(&settings.patrol, bounds_center, settings.seed);

        log::info!(
            "Garden loaded: {} foods, bounds x[{}, {}] y[{}, {}]",
            foods.len(),
            walls.min_x,
            walls.max_x,
            walls.min_y,
            walls.max_y
        );

        Ok(Self {
            settings,
            player,
            foods,
            walls,
            target: None,
            hiding: HideState::default(),
            eating: EatState::default(),
            patrol,
            phase: GamePhase::InProgress,
            text: StatusText::default(),
            loops: ActiveLoops::default(),
            win_cue_played: false,
            fail_cue_played: false,
            frame: 0,
        })
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase != GamePhase::InProgress
    }

    /// Text the HUD shows this frame
    #[inline]
    pub fn show_text(&self) -> &str {
        self.text.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn garden() -> (Scene, Settings) {
        let settings = Settings::default();
        (Scene::demo_garden(&settings), settings)
    }

    #[test]
    fn test_load_demo_garden() {
        let (scene, settings) = garden();
        let state = GameState::load(&scene, settings).expect("valid garden");
        assert_eq!(state.foods.len(), 20);
        assert_eq!(state.phase, GamePhase::InProgress);
        assert_eq!(state.target, None);
        assert_eq!(state.walls.min_x, -150.0);
        assert_eq!(state.walls.max_y, 100.0);
        assert_eq!(state.show_text(), "");
    }

    #[test]
    fn test_load_finds_foods_by_prefix_in_scene_order() {
        let (scene, settings) = garden();
        let state = GameState::load(&scene, settings).expect("valid garden");
        // Rows alternate cabbages and carrots
        assert_eq!(state.foods[0].name, "cabbage.001");
        assert_eq!(state.foods[4].name, "cabbage.005");
        assert_eq!(state.foods[5].name, "carrot.001");
        assert_eq!(state.foods[5].kind, FoodKind::Carrot);
        assert_eq!(state.foods[10].name, "cabbage.006");
        assert!(
            state
                .foods
                .iter()
                .all(|f| f.name.starts_with(state.settings.names.prefix(f.kind)))
        );
    }

    #[test]
    fn test_load_rejects_camera_count() {
        let (mut scene, settings) = garden();
        scene.cameras.clear();
        let err = GameState::load(&scene, settings).unwrap_err();
        assert_eq!(err, LoadError::CameraCount(0));
    }

    #[test]
    fn test_load_rejects_missing_player() {
        let (mut scene, settings) = garden();
        let id = scene.find("opossum").expect("player");
        scene.transform_mut(id).name = "raccoon".into();
        let err = GameState::load(&scene, settings).unwrap_err();
        assert_eq!(err, LoadError::MissingPlayer("opossum".into()));
    }

    #[test]
    fn test_load_rejects_duplicate_player() {
        let (mut scene, settings) = garden();
        scene.add_drawable(Transform::new("opossum", Vec3::ZERO));
        let err = GameState::load(&scene, settings).unwrap_err();
        assert!(matches!(err, LoadError::DuplicatePlayer { count: 2, .. }));
    }

    #[test]
    fn test_load_rejects_food_count() {
        let (mut scene, settings) = garden();
        scene.add_drawable(Transform::new("carrot.099", Vec3::ZERO));
        let err = GameState::load(&scene, settings).unwrap_err();
        assert_eq!(
            err,
            LoadError::FoodCount {
                expected: 20,
                found: 21
            }
        );
    }

    #[test]
    fn test_load_rejects_unbalanced_kinds() {
        let (mut scene, settings) = garden();
        let id = scene.find("carrot.001").expect("carrot");
        scene.transform_mut(id).name = "cabbage.099".into();
        let err = GameState::load(&scene, settings).unwrap_err();
        assert_eq!(
            err,
            LoadError::FoodKindCount {
                kind: FoodKind::Cabbage,
                expected: 10,
                found: 11
            }
        );
    }

    #[test]
    fn test_walls_clamp_uses_margin_on_both_axes() {
        let walls = Walls::around(Vec3::ZERO, Vec2::new(150.0, 100.0));
        let mut pos = Vec3::new(500.0, -500.0, 3.0);
        walls.clamp(&mut pos, 8.0);
        assert_eq!(pos, Vec3::new(142.0, -92.0, 3.0));
    }

    #[test]
    fn test_loop_start_stop() {
        let mut loops = ActiveLoops::default();
        let mut events = Vec::new();
        loops.stop(LoopChannel::Eating, &mut events);
        assert!(events.is_empty());

        loops.start(LoopChannel::Eating, Sample::Munch, 0.6, Vec3::ZERO, 2.0, &mut events);
        assert!(loops.is_playing(LoopChannel::Eating));
        loops.stop(LoopChannel::Eating, &mut events);
        loops.stop(LoopChannel::Eating, &mut events);
        assert_eq!(events.len(), 2);
    }
}
