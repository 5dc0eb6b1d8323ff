//! TUI 2048 (workspace facade crate).
//!
//! Re-exports the engine and presentation crates under `tui_2048::{core,input,term,types}`
//! and holds the pieces the terminal binary needs around them: environment
//! configuration and the persisted best score.

pub mod best_score;
pub mod config;

pub use tui_2048_core as core;
pub use tui_2048_input as input;
pub use tui_2048_term as term;
pub use tui_2048_types as types;
