//! Win/lose resolution
//!
//! Runs first every frame, so it judges the detection pulse and hidden flag
//! left by the previous frame's updates. Once the game is over it only
//! tears down loops that are still playing.

use super::state::{AudioCue, GameEvent, GamePhase, GameState, LoopChannel};
use crate::audio::Sample;

/// Resolve the game status; returns true when gameplay must not run
pub fn resolve_status(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    if !state.is_game_over() {
        if state.patrol.begin_check && !state.hiding.is_hidden {
            lose(state, events);
        } else if state.foods.is_empty() {
            win(state, events);
        }
    }

    if state.is_game_over() {
        state.loops.stop(LoopChannel::Footsteps, events);
        state.loops.stop(LoopChannel::Eating, events);
        return true;
    }
    false
}

fn lose(state: &mut GameState, events: &mut Vec<GameEvent>) {
    log::info!("Caught at {:?} on frame {}", state.player.position, state.frame);
    state.phase = GamePhase::Lost;
    state.loops.stop(LoopChannel::Footsteps, events);
    if !state.fail_cue_played {
        state.fail_cue_played = true;
        events.push(cue(state, Sample::Fail));
    }
    let message = state.settings.lose_text.clone();
    state.text.set(&message);
    events.push(GameEvent::GameLost);
}

fn win(state: &mut GameState, events: &mut Vec<GameEvent>) {
    log::info!("Garden cleared on frame {}", state.frame);
    state.phase = GamePhase::Won;
    state.loops.stop(LoopChannel::Footsteps, events);
    if !state.win_cue_played {
        state.win_cue_played = true;
        events.push(cue(state, Sample::Win));
    }
    let message = state.settings.win_text.clone();
    state.text.set(&message);
    events.push(GameEvent::GameWon);
}

fn cue(state: &GameState, sample: Sample) -> GameEvent {
    GameEvent::Audio(AudioCue::PlayOnce {
        sample,
        volume: state.settings.audio.cue_volume,
        position: state.player.position,
        falloff: state.settings.audio.cue_falloff,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use crate::settings::Settings;

    fn state() -> GameState {
        let settings = Settings::default();
        GameState::load(&Scene::demo_garden(&settings), settings).expect("garden")
    }

    fn fail_cues(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    GameEvent::Audio(AudioCue::PlayOnce {
                        sample: Sample::Fail,
                        ..
                    })
                )
            })
            .count()
    }

    #[test]
    fn test_in_progress_by_default() {
        let mut state = state();
        let mut events = Vec::new();
        assert!(!resolve_status(&mut state, &mut events));
        assert!(events.is_empty());
    }

    #[test]
    fn test_pulse_while_hidden_is_safe() {
        let mut state = state();
        state.patrol.begin_check = true;
        state.hiding.is_hidden = true;
        let mut events = Vec::new();
        assert!(!resolve_status(&mut state, &mut events));
        assert_eq!(state.phase, GamePhase::InProgress);
    }

    #[test]
    fn test_pulse_in_the_open_loses_once() {
        let mut state = state();
        state.patrol.begin_check = true;
        state.loops.footsteps = true;
        let mut events = Vec::new();
        assert!(resolve_status(&mut state, &mut events));
        assert_eq!(state.phase, GamePhase::Lost);
        assert_eq!(state.show_text(), state.settings.lose_text);
        assert!(!state.loops.footsteps);
        assert!(events.contains(&GameEvent::GameLost));

        for _ in 0..5 {
            assert!(resolve_status(&mut state, &mut events));
        }
        assert_eq!(fail_cues(&events), 1);
        assert_eq!(
            events.iter().filter(|e| **e == GameEvent::GameLost).count(),
            1
        );
    }

    #[test]
    fn test_empty_garden_wins() {
        let mut state = state();
        state.foods.clear();
        state.loops.eating = true;
        let mut events = Vec::new();
        assert!(resolve_status(&mut state, &mut events));
        assert_eq!(state.phase, GamePhase::Won);
        assert!(state.win_cue_played);
        assert!(!state.loops.eating);
        assert_eq!(state.show_text(), state.settings.win_text);
    }

    #[test]
    fn test_detection_beats_last_bite() {
        let mut state = state();
        state.foods.clear();
        state.patrol.begin_check = true;
        let mut events = Vec::new();
        resolve_status(&mut state, &mut events);
        assert_eq!(state.phase, GamePhase::Lost);
    }
}
