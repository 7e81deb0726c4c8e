//! Status text and eating audio derived from subsystem state
//!
//! Runs last in the frame. Hiding is applied after eating, so holding both
//! shows the hiding text.

use super::state::{GameEvent, GameState, LoopChannel};
use super::text::TextStatus;
use crate::audio::Sample;

pub fn update_triggers(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    let interval = state.settings.dot_interval;

    if state.eating.active {
        if !state.loops.is_playing(LoopChannel::Eating) {
            let audio = &state.settings.audio;
            state.loops.start(
                LoopChannel::Eating,
                Sample::Munch,
                audio.eating_volume,
                state.player.position,
                audio.eating_falloff,
                events,
            );
        }
        state.text.show(TextStatus::Eating, dt, interval);
        state.eating.text_shown = true;
    } else {
        state.loops.stop(LoopChannel::Eating, events);
        if state.eating.text_shown {
            state.text.show(TextStatus::Default, dt, interval);
            state.eating.text_shown = false;
        }
    }

    if state.hiding.held {
        let status = if state.hiding.is_hidden {
            TextStatus::Hidden
        } else {
            TextStatus::Hiding
        };
        state.text.show(status, dt, interval);
        state.hiding.text_shown = true;
    } else if state.hiding.text_shown {
        // Eating already wrote its text this frame
        if !state.eating.active {
            state.text.show(TextStatus::Default, dt, interval);
        }
        state.hiding.text_shown = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use crate::settings::Settings;
    use crate::sim::AudioCue;

    fn state() -> GameState {
        let settings = Settings::default();
        GameState::load(&Scene::demo_garden(&settings), settings).expect("garden")
    }

    #[test]
    fn test_eating_text_and_loop() {
        let mut state = state();
        let mut events = Vec::new();
        state.eating.active = true;
        update_triggers(&mut state, 0.1, &mut events);
        update_triggers(&mut state, 0.1, &mut events);
        assert!(state.show_text().starts_with("Eating"));
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            GameEvent::Audio(AudioCue::StartLoop {
                channel: LoopChannel::Eating,
                sample: Sample::Munch,
                ..
            })
        ));

        state.eating.active = false;
        update_triggers(&mut state, 0.1, &mut events);
        assert_eq!(state.show_text(), "");
        assert!(!state.loops.eating);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_revert_happens_once() {
        let mut state = state();
        let mut events = Vec::new();
        state.hiding.held = true;
        update_triggers(&mut state, 0.1, &mut events);
        assert_eq!(state.show_text(), "Hiding");

        state.hiding.held = false;
        update_triggers(&mut state, 0.1, &mut events);
        assert_eq!(state.show_text(), "");

        // Idle frames do not touch text set elsewhere
        state.text.set("kept");
        update_triggers(&mut state, 0.1, &mut events);
        assert_eq!(state.show_text(), "kept");
    }

    #[test]
    fn test_releasing_hide_keeps_eating_text() {
        let mut state = state();
        let mut events = Vec::new();
        state.eating.active = true;
        state.hiding.held = true;
        update_triggers(&mut state, 0.1, &mut events);
        assert_eq!(state.show_text(), "Hiding");

        state.hiding.held = false;
        update_triggers(&mut state, 0.1, &mut events);
        assert!(state.show_text().starts_with("Eating"));
        assert!(!state.hiding.text_shown);

        // Eating stops later: its own revert clears the text
        state.eating.active = false;
        update_triggers(&mut state, 0.1, &mut events);
        assert_eq!(state.show_text(), "");
    }

    #[test]
    fn test_hiding_text_wins_over_eating() {
        let mut state = state();
        let mut events = Vec::new();
        state.eating.active = true;
        state.hiding.held = true;
        state.hiding.is_hidden = true;
        update_triggers(&mut state, 0.1, &mut events);
        assert_eq!(state.show_text(), "Hidden");
    }
}
