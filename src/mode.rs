//! Garden game mode
//!
//! Owns the scene, the game state, the input latch and the audio service.
//! Each frame it runs one `tick`, applies the resulting events to the scene
//! and the audio service, then syncs transforms and the audio listener.

use glam::UVec2;

use crate::audio::{AudioService, SoundHandle};
use crate::error::LoadError;
use crate::platform::{InputLatch, Key};
use crate::scene::{Scene, TransformId};
use crate::settings::Settings;
use crate::sim::{AudioCue, GameEvent, GameState, LoopChannel, tick};

pub struct GardenMode<A: AudioService> {
    scene: Scene,
    state: GameState,
    input: InputLatch,
    audio: A,
    camera: TransformId,
    footsteps: Option<SoundHandle>,
    eating: Option<SoundHandle>,
}

impl<A: AudioService> GardenMode<A> {
    /// Bind to `scene`; fails if the scene is not a playable garden
    pub fn new(scene: Scene, settings: Settings, audio: A) -> Result<Self, LoadError> {
        let state = GameState::load(&scene, settings)?;
        let camera = scene
            .cameras
            .first()
            .map(|c| c.transform)
            .ok_or(LoadError::CameraCount(0))?;
        Ok(Self {
            scene,
            state,
            input: InputLatch::new(),
            audio,
            camera,
            footsteps: None,
            eating: None,
        })
    }

    pub fn handle_key_down(&mut self, key: Key) -> bool {
        self.input.on_key_down(key)
    }

    pub fn handle_key_up(&mut self, key: Key) -> bool {
        self.input.on_key_up(key)
    }

    /// Pending pointer-capture release (Escape)
    pub fn take_pointer_release(&mut self) -> bool {
        self.input.take_pointer_release()
    }

    /// Run one frame of `elapsed` seconds
    pub fn update(&mut self, elapsed: f32) -> Vec<GameEvent> {
        let events = tick(&mut self.state, &mut self.input, elapsed);
        for event in &events {
            self.apply(event);
        }
        self.sync_player();
        self.sync_listener();
        events
    }

    /// Prepare the frame for a viewport of `size` pixels
    pub fn draw(&mut self, size: UVec2) {
        if size.y == 0 {
            return;
        }
        let aspect = size.x as f32 / size.y as f32;
        for camera in &mut self.scene.cameras {
            camera.aspect = aspect;
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn show_text(&self) -> &str {
        self.state.show_text()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    fn slot(&mut self, channel: LoopChannel) -> &mut Option<SoundHandle> {
        match channel {
            LoopChannel::Footsteps => &mut self.footsteps,
            LoopChannel::Eating => &mut self.eating,
        }
    }

    fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::FoodEaten { name, remaining } => {
                let removed = self.scene.remove_drawables_named(name);
                if removed == 0 {
                    log::warn!("No drawable named {} to remove", name);
                }
                log::debug!("{} removed, {} foods left", name, remaining);
            }
            GameEvent::Audio(cue) => self.apply_cue(cue),
            GameEvent::PatrolSpawned => log::debug!("Footsteps approaching"),
            GameEvent::PatrolPassed => log::debug!("Footsteps gone"),
            GameEvent::GameWon => log::info!("Won"),
            GameEvent::GameLost => log::info!("Lost"),
        }
    }

    fn apply_cue(&mut self, cue: &AudioCue) {
        match *cue {
            AudioCue::StartLoop {
                channel,
                sample,
                volume,
                position,
                falloff,
            } => {
                let old = self.slot(channel).take();
                if let Some(old) = old {
                    self.audio.stop(old);
                }
                let handle = self.audio.play_loop(sample, volume, position, falloff);
                *self.slot(channel) = Some(handle);
            }
            AudioCue::SetVolume { channel, volume } => {
                let handle = *self.slot(channel);
                match handle {
                    Some(handle) => self.audio.set_volume(handle, volume, 0.0),
                    None => log::trace!("{:?} volume with no handle", channel),
                }
            }
            AudioCue::SetPosition { channel, position } => {
                let handle = *self.slot(channel);
                match handle {
                    Some(handle) => self.audio.set_position(handle, position, 0.0),
                    None => log::trace!("{:?} position with no handle", channel),
                }
            }
            AudioCue::StopLoop { channel } => {
                let handle = self.slot(channel).take();
                match handle {
                    Some(handle) => self.audio.stop(handle),
                    None => log::trace!("{:?} stop with no handle", channel),
                }
            }
            AudioCue::PlayOnce {
                sample,
                volume,
                position,
                falloff,
            } => self.audio.play_once(sample, volume, position, falloff),
        }
    }

    fn sync_player(&mut self) {
        let player = &self.state.player;
        let transform = self.scene.transform_mut(player.transform);
        transform.position = player.position;
        transform.rotation = player.rotation;
    }

    fn sync_listener(&mut self) {
        let camera = self.scene.transform(self.camera);
        let (at, right) = (camera.position, camera.right());
        self.audio
            .set_listener(at, right, self.state.settings.audio.listener_smoothing);
    }
}
