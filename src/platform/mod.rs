//! Platform abstraction layer
//!
//! Window and event plumbing stays outside the crate; this layer only turns
//! discrete key events into per-action button state.

pub mod input;

pub use input::{Action, Button, InputLatch, Key};
