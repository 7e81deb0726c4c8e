//! Input latch
//!
//! Accumulates discrete press/release events into per-action button state.
//! Movement reads `pressed` every frame and zeroes the directional `downs`
//! once per frame, so edge counters must be read before movement runs.

use serde::{Deserialize, Serialize};

/// Keys the garden listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    A,
    D,
    W,
    S,
    Space,
    Return,
    Escape,
    Other(u32),
}

/// Gameplay actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    Eat,
    Hide,
    /// Give the pointer back to the OS (not a gameplay action)
    ReleasePointer,
}

impl Action {
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::A => Some(Action::Left),
            Key::D => Some(Action::Right),
            Key::W => Some(Action::Up),
            Key::S => Some(Action::Down),
            Key::Space => Some(Action::Eat),
            Key::Return => Some(Action::Hide),
            Key::Escape => Some(Action::ReleasePointer),
            Key::Other(_) => None,
        }
    }
}

/// Per-action button state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    /// Presses since the last reset
    pub downs: u8,
    /// Currently held
    pub pressed: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputLatch {
    pub left: Button,
    pub right: Button,
    pub up: Button,
    pub down: Button,
    pub eat: Button,
    pub hide: Button,
    pointer_release: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    fn button_mut(&mut self, action: Action) -> Option<&mut Button> {
        match action {
            Action::Left => Some(&mut self.left),
            Action::Right => Some(&mut self.right),
            Action::Up => Some(&mut self.up),
            Action::Down => Some(&mut self.down),
            Action::Eat => Some(&mut self.eat),
            Action::Hide => Some(&mut self.hide),
            Action::ReleasePointer => None,
        }
    }

    /// Key press; returns false for keys the garden ignores
    pub fn on_key_down(&mut self, key: Key) -> bool {
        let Some(action) = Action::from_key(key) else {
            return false;
        };
        match self.button_mut(action) {
            Some(button) => {
                button.downs = button.downs.saturating_add(1);
                button.pressed = true;
            }
            None => self.pointer_release = true,
        }
        true
    }

    /// Key release; returns false for keys the garden ignores
    pub fn on_key_up(&mut self, key: Key) -> bool {
        let Some(action) = Action::from_key(key) else {
            return false;
        };
        match self.button_mut(action) {
            Some(button) => {
                button.pressed = false;
                true
            }
            // Pointer release reacts to the press only
            None => false,
        }
    }

    /// Take the pending pointer-release request
    pub fn take_pointer_release(&mut self) -> bool {
        std::mem::take(&mut self.pointer_release)
    }

    /// Zero the four directional edge counters
    pub fn reset_directional_downs(&mut self) {
        self.left.downs = 0;
        self.right.downs = 0;
        self.up.downs = 0;
        self.down.downs = 0;
    }
}
