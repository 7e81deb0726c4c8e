//! HUD status text
//!
//! "Eating" and "Hiding" grow a dot suffix over time. Each keeps its own dot
//! counter so switching between them does not reset the other.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_DOTS;

/// What the HUD should say
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextStatus {
    Default,
    Eating,
    Hiding,
    Hidden,
}

/// Dot animation counter, advanced by elapsed time
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DotCycle {
    pub dots: u8,
    pub cool_down: f32,
}

impl DotCycle {
    /// Advance by `dt`; one step per `interval`, wrapping after `MAX_DOTS`
    pub fn advance(&mut self, dt: f32, interval: f32) -> u8 {
        self.cool_down += dt;
        if self.cool_down >= interval {
            self.cool_down = 0.0;
            self.dots = if self.dots >= MAX_DOTS { 0 } else { self.dots + 1 };
        }
        self.dots
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusText {
    text: String,
    eating: DotCycle,
    hiding: DotCycle,
}

impl StatusText {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Replace the text with a fixed message
    pub fn set(&mut self, message: &str) {
        self.text.clear();
        self.text.push_str(message);
    }

    /// Show `status`, advancing its dot animation by `dt`
    pub fn show(&mut self, status: TextStatus, dt: f32, interval: f32) {
        match status {
            TextStatus::Default => self.text.clear(),
            TextStatus::Hidden => self.set("Hidden"),
            TextStatus::Eating => {
                let dots = self.eating.advance(dt, interval);
                self.set_dotted("Eating", dots);
            }
            TextStatus::Hiding => {
                let dots = self.hiding.advance(dt, interval);
                self.set_dotted("Hiding", dots);
            }
        }
    }

    fn set_dotted(&mut self, word: &str, dots: u8) {
        self.set(word);
        for _ in 0..dots {
            self.text.push_str(" .");
        }
    }
}
