//! Footsteps patrol
//!
//! The gardener walks a straight path across the garden, then goes quiet
//! for a random cooldown. Loudness steps through bands as it passes; the
//! loudest band is the detection window, during which `begin_check` pulses
//! every frame.

use glam::Vec3;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{AudioCue, GameEvent, GameState, LoopChannel};
use crate::audio::Sample;
use crate::settings::PatrolTuning;

/// Dormant (cooling down) or walking the path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatrolPhase {
    Dormant,
    Active,
}

/// Position along the path, by fraction traveled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatrolBand {
    Approach,
    /// Detection window
    Overhead,
    Retreat,
    /// Past the end of the path
    Gone,
}

impl PatrolBand {
    pub fn for_fraction(fraction: f32, tuning: &PatrolTuning) -> Self {
        if fraction < tuning.approach_end {
            PatrolBand::Approach
        } else if fraction < tuning.detection_end {
            PatrolBand::Overhead
        } else if fraction <= tuning.retreat_end {
            PatrolBand::Retreat
        } else {
            PatrolBand::Gone
        }
    }

    pub fn volume(self, tuning: &PatrolTuning) -> f32 {
        match self {
            PatrolBand::Approach | PatrolBand::Retreat => tuning.far_volume,
            PatrolBand::Overhead => tuning.near_volume,
            PatrolBand::Gone => 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Patrol {
    pub phase: PatrolPhase,
    /// Seconds until the next spawn (counts down while dormant)
    pub cooldown: f32,
    /// Distance walked on the current pass
    pub traveled: f32,
    pub band: Option<PatrolBand>,
    /// Detection pulse for this frame
    pub begin_check: bool,
    /// Passes completed
    pub passes: u32,
    pub spawn: Vec3,
    pub axis: Vec3,
    rng: Pcg32,
}

impl Patrol {
    pub fn new(tuning: &PatrolTuning, origin: Vec3, seed: u64) -> Self {
        Self {
            phase: PatrolPhase::Dormant,
            cooldown: tuning.first_spawn_delay,
            traveled: 0.0,
            band: None,
            begin_check: false,
            passes: 0,
            spawn: origin + tuning.spawn_offset,
            axis: tuning.axis.normalize_or_zero(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn has_spawned(&self) -> bool {
        self.phase == PatrolPhase::Active
    }

    /// Where the footsteps are
    pub fn position(&self) -> Vec3 {
        self.spawn + self.axis * self.traveled
    }

    /// Next cooldown: `rand % jitter + min` whole seconds
    fn roll_cooldown(&mut self, tuning: &PatrolTuning) -> f32 {
        let jitter = tuning.spawn_jitter.max(1);
        (self.rng.next_u32() % jitter).saturating_add(tuning.min_spawn_time) as f32
    }
}

/// Advance the patrol by one frame
pub fn update_patrol(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    let tuning = &state.settings.patrol;
    let patrol = &mut state.patrol;
    patrol.begin_check = false;

    match patrol.phase {
        PatrolPhase::Dormant => {
            patrol.cooldown -= dt;
            if patrol.cooldown > 0.0 {
                return;
            }
            patrol.phase = PatrolPhase::Active;
            patrol.traveled = 0.0;
            patrol.band = Some(PatrolBand::Approach);
            patrol.cooldown = patrol.roll_cooldown(tuning);
            log::info!(
                "Footsteps spawned at {:?}, next cooldown {}s",
                patrol.spawn,
                patrol.cooldown
            );
            state.loops.start(
                LoopChannel::Footsteps,
                Sample::Footsteps,
                PatrolBand::Approach.volume(tuning),
                patrol.spawn,
                tuning.falloff,
                events,
            );
            events.push(GameEvent::PatrolSpawned);
        }
        PatrolPhase::Active => {
            patrol.traveled += tuning.speed * dt;
            let fraction = if tuning.path_length > 0.0 {
                patrol.traveled / tuning.path_length
            } else {
                f32::INFINITY
            };
            let band = PatrolBand::for_fraction(fraction, tuning);

            if band == PatrolBand::Gone {
                events.push(GameEvent::Audio(AudioCue::SetVolume {
                    channel: LoopChannel::Footsteps,
                    volume: 0.0,
                }));
                state.loops.stop(LoopChannel::Footsteps, events);
                patrol.phase = PatrolPhase::Dormant;
                patrol.band = None;
                patrol.passes += 1;
                log::info!("Footsteps passed ({} so far)", patrol.passes);
                events.push(GameEvent::PatrolPassed);
                return;
            }

            if band == PatrolBand::Overhead {
                patrol.begin_check = true;
            }
            if patrol.band != Some(band) {
                log::debug!("Footsteps band {:?}", band);
                patrol.band = Some(band);
                events.push(GameEvent::Audio(AudioCue::SetVolume {
                    channel: LoopChannel::Footsteps,
                    volume: band.volume(tuning),
                }));
            }
            events.push(GameEvent::Audio(AudioCue::SetPosition {
                channel: LoopChannel::Footsteps,
                position: patrol.position(),
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use crate::settings::Settings;

    fn state(first_spawn_delay: f32) -> GameState {
        let mut settings = Settings::default();
        settings.patrol.first_spawn_delay = first_spawn_delay;
        GameState::load(&Scene::demo_garden(&settings), settings).expect("garden")
    }

    fn run(state: &mut GameState, frames: usize, dt: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..frames {
            update_patrol(state, dt, &mut events);
        }
        events
    }

    #[test]
    fn test_bands() {
        let tuning = PatrolTuning::default();
        assert_eq!(PatrolBand::for_fraction(0.0, &tuning), PatrolBand::Approach);
        assert_eq!(PatrolBand::for_fraction(0.5, &tuning), PatrolBand::Overhead);
        assert_eq!(PatrolBand::for_fraction(0.8, &tuning), PatrolBand::Retreat);
        assert_eq!(PatrolBand::for_fraction(1.0, &tuning), PatrolBand::Retreat);
        assert_eq!(PatrolBand::for_fraction(1.01, &tuning), PatrolBand::Gone);
        assert_eq!(PatrolBand::Overhead.volume(&tuning), 1.0);
        assert_eq!(PatrolBand::Approach.volume(&tuning), 0.7);
        assert_eq!(PatrolBand::Gone.volume(&tuning), 0.0);
    }

    #[test]
    fn test_spawn_after_delay() {
        let mut state = state(1.0);
        let events = run(&mut state, 5, 0.1);
        assert!(events.is_empty());
        assert!(!state.patrol.has_spawned());

        let events = run(&mut state, 6, 0.1);
        assert!(state.patrol.has_spawned());
        assert!(events.contains(&GameEvent::PatrolSpawned));
        assert!(state.loops.footsteps);
        let cooldown = state.patrol.cooldown;
        assert!((8.0..15.0).contains(&cooldown), "cooldown {cooldown}");
    }

    #[test]
    fn test_full_pass_pulses_only_overhead() {
        let mut state = state(0.0);
        let mut events = Vec::new();
        update_patrol(&mut state, 0.1, &mut events);
        assert!(state.patrol.has_spawned());

        // 400 units at 80/s = 5s; 0.1s frames
        let mut pulses = 0;
        let mut frames = 0;
        while state.patrol.has_spawned() {
            update_patrol(&mut state, 0.1, &mut events);
            if state.patrol.begin_check {
                pulses += 1;
                assert_eq!(state.patrol.band, Some(PatrolBand::Overhead));
            }
            frames += 1;
            assert!(frames < 100);
        }
        // 0.35..0.65 of 400 = 140..260 -> traveled 144..256 in 8-unit steps
        assert_eq!(pulses, 15);
        assert!(!state.patrol.begin_check);
        assert!(!state.loops.footsteps);
        assert_eq!(state.patrol.passes, 1);
        assert!(events.contains(&GameEvent::PatrolPassed));
        assert!(events.contains(&GameEvent::Audio(AudioCue::SetVolume {
            channel: LoopChannel::Footsteps,
            volume: 0.0
        })));
    }

    #[test]
    fn test_same_seed_same_cooldowns() {
        let tuning = PatrolTuning::default();
        let mut a = Patrol::new(&tuning, Vec3::ZERO, 42);
        let mut b = Patrol::new(&tuning, Vec3::ZERO, 42);
        for _ in 0..10 {
            assert_eq!(a.roll_cooldown(&tuning), b.roll_cooldown(&tuning));
        }
    }

    #[test]
    fn test_cooldown_saturates_on_huge_minimum() {
        let tuning = PatrolTuning {
            min_spawn_time: u32::MAX,
            ..PatrolTuning::default()
        };
        let mut patrol = Patrol::new(&tuning, Vec3::ZERO, 7);
        for _ in 0..10 {
            assert_eq!(patrol.roll_cooldown(&tuning), u32::MAX as f32);
        }
    }

    #[test]
    fn test_position_follows_axis() {
        let mut state = state(0.0);
        run(&mut state, 1, 0.1);
        let spawn = state.patrol.spawn;
        run(&mut state, 10, 0.1);
        let moved = state.patrol.position() - spawn;
        assert!((moved.x - 80.0).abs() < 1e-3);
        assert_eq!(moved.y, 0.0);
    }
}
