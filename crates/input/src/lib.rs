//! Terminal input module (engine-facing).
//!
//! This module is independent of any rendering code. It maps `crossterm` key
//! events into [`crate::types::GameAction`]. Moves are discrete, so there is no
//! key-repeat handling: each press is one command.

pub mod map;

pub use tui_2048_types as types;

pub use map::{handle_key_event, should_quit};
