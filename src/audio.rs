//! Positional audio contract
//!
//! The gameplay core never decodes or mixes audio. It emits cues and the
//! mode layer forwards them to an `AudioService`. `AudioLog` is the
//! headless implementation: it hands out handles, records every call and
//! logs it.

use std::collections::HashSet;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Samples the game can play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sample {
    /// Patrolling gardener, looped while the patrol is active
    Footsteps,
    /// Munching, looped while eating
    Munch,
    /// Every food eaten
    Win,
    /// Caught in the open
    Fail,
}

/// Opaque handle to a playing loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoundHandle(pub u32);

/// Positional audio service
pub trait AudioService {
    /// Fire-and-forget sample at a position
    fn play_once(&mut self, sample: Sample, volume: f32, position: Vec3, falloff: f32);

    /// Start a looping sample; the handle stays valid until `stop`
    fn play_loop(&mut self, sample: Sample, volume: f32, position: Vec3, falloff: f32)
    -> SoundHandle;

    fn set_position(&mut self, handle: SoundHandle, position: Vec3, ramp: f32);

    fn set_volume(&mut self, handle: SoundHandle, volume: f32, ramp: f32);

    fn stop(&mut self, handle: SoundHandle);

    /// Move the global listener
    fn set_listener(&mut self, at: Vec3, right: Vec3, smoothing: f32);
}

/// A recorded service call
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCall {
    PlayOnce { sample: Sample, volume: f32, position: Vec3 },
    PlayLoop { sample: Sample, handle: SoundHandle, volume: f32 },
    SetPosition { handle: SoundHandle, position: Vec3 },
    SetVolume { handle: SoundHandle, volume: f32 },
    Stop { handle: SoundHandle },
}

/// Recording audio service for headless runs and tests
#[derive(Debug, Default)]
pub struct AudioLog {
    pub calls: Vec<AudioCall>,
    pub listener: Option<(Vec3, Vec3)>,
    live: HashSet<SoundHandle>,
    next_handle: u32,
}

impl AudioLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `sample` was played as a one-shot
    pub fn one_shots(&self, sample: Sample) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, AudioCall::PlayOnce { sample: s, .. } if *s == sample))
            .count()
    }

    /// How many loops of `sample` were started
    pub fn loops_started(&self, sample: Sample) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, AudioCall::PlayLoop { sample: s, .. } if *s == sample))
            .count()
    }

    /// Loops started and not yet stopped
    pub fn live_loops(&self) -> usize {
        self.live.len()
    }

    #[cfg(test)]
    pub fn is_live(&self, handle: SoundHandle) -> bool {
        self.live.contains(&handle)
    }

    /// Last volume set on `handle`, if any
    #[cfg(test)]
    pub fn last_volume(&self, handle: SoundHandle) -> Option<f32> {
        self.calls.iter().rev().find_map(|c| match c {
            AudioCall::SetVolume { handle: h, volume } if *h == handle => Some(*volume),
            AudioCall::PlayLoop { handle: h, volume, .. } if *h == handle => Some(*volume),
            _ => None,
        })
    }
}

impl AudioService for AudioLog {
    fn play_once(&mut self, sample: Sample, volume: f32, position: Vec3, _falloff: f32) {
        log::debug!("play_once {:?} vol={:.2} at {:?}", sample, volume, position);
        self.calls.push(AudioCall::PlayOnce {
            sample,
            volume,
            position,
        });
    }

    fn play_loop(
        &mut self,
        sample: Sample,
        volume: f32,
        _position: Vec3,
        _falloff: f32,
    ) -> SoundHandle {
        let handle = SoundHandle(self.next_handle);
        self.next_handle += 1;
        self.live.insert(handle);
        log::debug!("loop {:?} -> {:?} vol={:.2}", sample, handle, volume);
        self.calls.push(AudioCall::PlayLoop {
            sample,
            handle,
            volume,
        });
        handle
    }

    fn set_position(&mut self, handle: SoundHandle, position: Vec3, _ramp: f32) {
        if !self.live.contains(&handle) {
            log::trace!("set_position on stopped {:?} ignored", handle);
            return;
        }
        self.calls.push(AudioCall::SetPosition { handle, position });
    }

    fn set_volume(&mut self, handle: SoundHandle, volume: f32, _ramp: f32) {
        if !self.live.contains(&handle) {
            log::trace!("set_volume on stopped {:?} ignored", handle);
            return;
        }
        log::debug!("{:?} volume -> {:.2}", handle, volume);
        self.calls.push(AudioCall::SetVolume { handle, volume });
    }

    fn stop(&mut self, handle: SoundHandle) {
        if self.live.remove(&handle) {
            log::debug!("stop {:?}", handle);
            self.calls.push(AudioCall::Stop { handle });
        }
    }

    fn set_listener(&mut self, at: Vec3, right: Vec3, _smoothing: f32) {
        self.listener = Some((at, right));
    }
}
