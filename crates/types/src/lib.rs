//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no engine behaviour attached, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Grid Dimensions
//!
//! The playfield is a square grid of [`GRID_SIZE`] × [`GRID_SIZE`] cells:
//!
//! - **Columns**: indexed `0..GRID_SIZE` (left to right)
//! - **Rows**: indexed `0..GRID_SIZE` (top to bottom)
//! - **Tiles**: `0` is an empty cell, any other value is a power of two
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds and only concern the presentation layer:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval (~60 FPS) |
//! | `SLIDE_MIN_MS` | 110 | Shortest slide animation |
//! | `SPAWN_DELAY_MS` | 320 | Pause between a slide and the new tile appearing |
//!
//! # Examples
//!
//! ```
//! use tui_2048_types::{Direction, GameAction, Position, GRID_SIZE};
//!
//! // Parse a direction (case-insensitive)
//! let dir: Direction = "Left".parse().unwrap();
//! assert_eq!(dir, Direction::Left);
//! assert!(dir.is_horizontal());
//!
//! // Parse a game action
//! let action: GameAction = "undo".parse().unwrap();
//! assert_eq!(action, GameAction::Undo);
//!
//! // Positions are (column, row)
//! let pos = Position::new(3, 0);
//! assert_eq!(pos.index(), 3);
//! assert_eq!(GRID_SIZE, 4);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Grid side length in cells.
pub const GRID_SIZE: usize = 4;

/// Total number of cells on the grid.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Most tiles a single line can move in one turn (the leading cell never moves).
pub const MAX_LINE_MOVES: usize = GRID_SIZE - 1;

/// Most movement records a single move can produce across all lines.
pub const MAX_MOVES: usize = GRID_SIZE * MAX_LINE_MOVES;

/// First winning tile of a fresh game. Doubles each time the player continues.
pub const WINNING_TILE: u32 = 2048;

/// Tiles spawned by a new game.
pub const STARTING_TILES: usize = 2;

/// Values a spawned tile can take, drawn with equal probability.
pub const SPAWN_VALUES: [u32; 2] = [2, 4];

/// Frame interval in milliseconds (16ms ≈ 60 FPS).
pub const TICK_MS: u32 = 16;

/// Shortest slide animation in milliseconds.
pub const SLIDE_MIN_MS: u32 = 110;

/// Delay before the spawned tile appears after a committed move.
pub const SPAWN_DELAY_MS: u32 = 320;


/// The four directions tiles can be pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All directions, in the order game-over probing tries them.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Rows move for left/right, columns for up/down.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// True when tiles compact toward index 0 of their line (left/up).
    pub fn toward_start(&self) -> bool {
        matches!(self, Direction::Left | Direction::Up)
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl FromStr for Direction {
    type Err = GameError;

    /// Accepts full names or single letters (case-insensitive):
    /// "left" | "l", "right" | "r", "up" | "u", "down" | "d"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" | "l" => Ok(Direction::Left),
            "right" | "r" => Ok(Direction::Right),
            "up" | "u" => Ok(Direction::Up),
            "down" | "d" => Ok(Direction::Down),
            _ => Err(GameError::InvalidDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cell coordinate: `col` left to right, `row` top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub col: u8,
    pub row: u8,
}

impl Position {
    /// Create a position. Callers must stay inside the grid.
    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }

    /// Create a position, returning `None` when it falls outside the grid.
    pub fn try_new(col: usize, row: usize) -> Option<Self> {
        if col >= GRID_SIZE || row >= GRID_SIZE {
            return None;
        }
        Some(Self::new(col as u8, row as u8))
    }

    /// Flat row-major index.
    pub fn index(&self) -> usize {
        self.row as usize * GRID_SIZE + self.col as usize
    }

    /// Inverse of [`Position::index`].
    pub fn from_index(index: usize) -> Self {
        Self::new((index % GRID_SIZE) as u8, (index / GRID_SIZE) as u8)
    }
}

/// Player commands understood by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    Move(Direction),
    Undo,
    NewGame,
    Continue,
}

impl FromStr for GameAction {
    type Err = GameError;

    /// Parse from camelCase or snake_case names. Directions parse as moves.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "undo" => Ok(GameAction::Undo),
            "newGame" | "new_game" | "new" => Ok(GameAction::NewGame),
            "continue" | "continueGame" | "continue_game" => Ok(GameAction::Continue),
            other => other.parse().map(GameAction::Move),
        }
    }
}

/// Errors surfaced by session operations.
///
/// All variants are local, recoverable conditions. A full board is a queryable
/// state, never an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid direction: {0:?}")]
    InvalidDirection(String),
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),
}

/// True for `0` (empty) and any power of two greater than one.
pub fn is_valid_tile(value: u32) -> bool {
    value == 0 || (value > 1 && value.is_power_of_two())
}
