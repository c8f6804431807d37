//! Terminal input module.
//!
//! Maps `crossterm` key events to [`crate::types::GameAction`] intents. Only
//! key presses produce intents; repeats and releases are dropped so every
//! intent is edge-triggered.

pub mod map;

pub use block_stack_types as types;

pub use map::{handle_key_event, should_quit, CONTROLS_HINT};
