use crate::grid::Line;
use crate::session::{SessionState, SpawnedTile};
use crate::types::{GRID_SIZE, WINNING_TILE};

/// Plain copy of everything the presentation layer draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Tile values, `grid[row][col]`.
    pub grid: [Line; GRID_SIZE],
    pub score: u32,
    pub best_score: u32,
    pub winning_tile: u32,
    pub state: SessionState,
    pub can_undo: bool,
    pub game_over: bool,
    pub last_spawn: Option<SpawnedTile>,
    pub moves: u32,
    pub episode_id: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when a move command would be accepted.
    pub fn playable(&self) -> bool {
        self.state == SessionState::Idle && !self.game_over
    }

    pub fn won(&self) -> bool {
        self.state == SessionState::Won
    }

    pub fn max_tile(&self) -> u32 {
        self.grid.iter().flatten().copied().max().unwrap_or(0)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: [[0; GRID_SIZE]; GRID_SIZE],
            score: 0,
            best_score: 0,
            winning_tile: WINNING_TILE,
            state: SessionState::Idle,
            can_undo: false,
            game_over: false,
            last_spawn: None,
            moves: 0,
            episode_id: 0,
        }
    }
}
