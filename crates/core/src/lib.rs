//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the move-resolution engine and session state for a
//! sliding-tile merge puzzle (2048). It has **zero dependencies** on UI,
//! terminal, or file I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Every rule is a plain function over a copyable grid
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//! - **Fast**: Moves are resolved on the stack without allocating
//!
//! # Module Structure
//!
//! - [`grid`]: the tile matrix and its row/column views
//! - [`line`]: compaction and merging of a single row or column
//! - [`resolver`]: applies a direction to every line and records movements
//! - [`session`]: score, undo, tile spawning and the winning-tile threshold
//! - [`rng`]: pluggable random source with a seeded LCG
//! - [`snapshot`]: copyable view of a session for renderers
//!
//! # Game Rules
//!
//! - Tiles slide toward the pushed edge; equal tiles meeting merge into their sum
//! - A tile merges at most once per move, the pair nearest the edge first
//! - The turn score is the sum of all merged values
//! - Every move that changes the grid spawns a 2 or a 4 on a random empty cell
//! - Reaching the winning tile (2048, then doubling) pauses play until the
//!   player continues or starts over
//! - One level of undo
//!
//! # Example
//!
//! ```
//! use tui_2048_core::{Grid, Session, SimpleRng};
//! use tui_2048_types::Direction;
//!
//! let grid = Grid::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
//! let mut game = Session::from_grid(grid, SimpleRng::new(12345));
//!
//! let turn = game.apply_move(Direction::Left).unwrap();
//! assert!(turn.result.changed);
//! assert_eq!(turn.result.turn_score, 4);
//! assert_eq!(game.score(), 4);
//!
//! game.undo().unwrap();
//! assert_eq!(game.score(), 0);
//! ```

pub mod grid;
pub mod line;
pub mod resolver;
pub mod rng;
pub mod session;
pub mod snapshot;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience
pub use grid::{Grid, Line, LineRef};
pub use line::{compact_line, LeadingEdge, LineMove, LineOutcome};
pub use resolver::{can_move, has_any_move, resolve_move, MoveResult, MovementRecord};
pub use rng::{SimpleRng, TileRng};
pub use session::{FinishedMove, Session, SessionConfig, SessionState, SpawnedTile, TurnOutcome};
pub use snapshot::GameSnapshot;
