//! Game session - owns the grid and sequences every mutation
//!
//! This module ties together the grid, move resolver, RNG and scoring.
//! It handles new games, committed moves, tile spawning, one-level undo and the
//! winning-tile threshold.
//!
//! # States
//!
//! - `Idle`: waiting for a command
//! - `Resolving`: a move was committed and its tile spawn is pending
//! - `Won`: the last move created the winning tile; moves wait for `continue_game`,
//!   `new_game` or `undo`
//!
//! [`Session::apply_move`] runs a whole turn. Callers that animate between the
//! slide and the spawn use [`Session::begin_move`] and [`Session::finish_move`].

use log::{debug, info, trace};

use crate::grid::Grid;
use crate::resolver::{has_any_move, resolve_move, MoveResult};
use crate::rng::{draw_spawn_value, SimpleRng, TileRng};
use crate::snapshot::GameSnapshot;
use crate::types::{Direction, GameAction, GameError, Position, STARTING_TILES, WINNING_TILE};

/// Session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Resolving,
    Won,
}

/// Tunables for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// First winning tile of each new game.
    pub winning_tile: u32,
    /// Tiles spawned by `new_game`.
    pub starting_tiles: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            winning_tile: WINNING_TILE,
            starting_tiles: STARTING_TILES,
        }
    }
}

/// A tile placed by the spawner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpawnedTile {
    pub position: Position,
    pub value: u32,
}

/// Completion of a pending move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FinishedMove {
    /// `None` when no move was pending or the grid had no empty cell.
    pub spawned: Option<SpawnedTile>,
    /// The winning tile value, when this move reached it.
    pub won: Option<u32>,
}

/// Everything one full turn produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub result: MoveResult,
    pub spawned: Option<SpawnedTile>,
    pub won: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct UndoSlot {
    grid: Grid,
    score: u32,
}

/// A single game in progress.
#[derive(Debug, Clone)]
pub struct Session<R: TileRng = SimpleRng> {
    grid: Grid,
    /// Pre-move grid and score. Overwritten by every committed move, consumed by undo.
    undo: Option<UndoSlot>,
    score: u32,
    best_score: u32,
    winning_tile: u32,
    state: SessionState,
    /// Set by `begin_move` when the committed grid reached `winning_tile`.
    pending_win: bool,
    last_spawn: Option<SpawnedTile>,
    /// Committed moves in the current game.
    moves: u32,
    /// Monotonic game id (increments on every new game).
    episode_id: u32,
    config: SessionConfig,
    rng: R,
}

impl Session<SimpleRng> {
    /// Start a new game with the built-in LCG seeded by `seed`.
    pub fn new(seed: u32) -> Self {
        Self::with_config(SimpleRng::new(seed), SessionConfig::default())
    }
}

impl<R: TileRng> Session<R> {
    /// Start a new game drawing spawns from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self::with_config(rng, SessionConfig::default())
    }

    /// Start a new game with explicit settings.
    pub fn with_config(rng: R, config: SessionConfig) -> Self {
        let mut session = Self::blank(rng, config);
        session.new_game();
        session
    }

    /// Resume play from an existing grid. Nothing is spawned.
    pub fn from_grid(grid: Grid, rng: R) -> Self {
        let mut session = Self::blank(rng, SessionConfig::default());
        session.grid = grid;
        session.episode_id = 1;
        session
    }

    fn blank(rng: R, config: SessionConfig) -> Self {
        Self {
            grid: Grid::new(),
            undo: None,
            score: 0,
            best_score: 0,
            winning_tile: config.winning_tile,
            state: SessionState::Idle,
            pending_win: false,
            last_spawn: None,
            moves: 0,
            episode_id: 0,
            config,
            rng,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Load a persisted best score. Never lowers the current one.
    pub fn set_best_score(&mut self, best: u32) {
        self.best_score = self.best_score.max(best);
    }

    pub fn winning_tile(&self) -> u32 {
        self.winning_tile
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn can_undo(&self) -> bool {
        self.undo.is_some()
    }

    pub fn last_spawn(&self) -> Option<SpawnedTile> {
        self.last_spawn
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// True when no direction would change the grid.
    ///
    /// Probes all four directions without committing anything.
    pub fn is_game_over(&self) -> bool {
        !has_any_move(&self.grid)
    }

    /// Reset to an empty grid and spawn the starting tiles.
    ///
    /// Valid from any state. The best score carries over.
    pub fn new_game(&mut self) {
        self.grid.clear();
        self.undo = None;
        self.score = 0;
        self.winning_tile = self.config.winning_tile;
        self.state = SessionState::Idle;
        self.pending_win = false;
        self.last_spawn = None;
        self.moves = 0;
        self.episode_id = self.episode_id.wrapping_add(1);

        for _ in 0..self.config.starting_tiles {
            self.spawn_tile();
        }
        info!(
            "new game #{} (winning tile {})",
            self.episode_id, self.winning_tile
        );
    }

    /// Resolve and commit a move, leaving its tile spawn pending.
    ///
    /// A move that changes nothing has no side effects at all. Otherwise the
    /// pre-move grid and score go to the undo buffer, the new grid and score are
    /// committed and the session enters `Resolving` until [`Session::finish_move`].
    pub fn begin_move(&mut self, direction: Direction) -> Result<MoveResult, GameError> {
        match self.state {
            SessionState::Idle => {}
            SessionState::Resolving => {
                return Err(GameError::InvalidOperation("previous move is still resolving"))
            }
            SessionState::Won => {
                return Err(GameError::InvalidOperation(
                    "game is won; continue or start a new game",
                ))
            }
        }

        let result = resolve_move(&self.grid, direction);
        if !result.changed {
            trace!("move {} changed nothing", direction);
            return Ok(result);
        }

        self.undo = Some(UndoSlot {
            grid: self.grid,
            score: self.score,
        });
        self.grid = result.grid;
        self.score = self.score.saturating_add(result.turn_score);
        self.best_score = self.best_score.max(self.score);
        self.moves = self.moves.wrapping_add(1);
        self.pending_win = result.max_merged() == Some(self.winning_tile);
        self.state = SessionState::Resolving;

        debug!(
            "move {} committed: {} movements, +{} (score {})",
            direction,
            result.movements.len(),
            result.turn_score,
            self.score
        );
        Ok(result)
    }

    /// Spawn the pending tile and leave `Resolving`.
    ///
    /// Does nothing unless a move is pending.
    pub fn finish_move(&mut self) -> FinishedMove {
        if self.state != SessionState::Resolving {
            return FinishedMove::default();
        }

        let spawned = self.spawn_tile();
        let won = if std::mem::take(&mut self.pending_win) {
            self.state = SessionState::Won;
            info!("reached {}", self.winning_tile);
            Some(self.winning_tile)
        } else {
            self.state = SessionState::Idle;
            None
        };

        FinishedMove { spawned, won }
    }

    /// Run a whole turn: resolve, commit and spawn.
    pub fn apply_move(&mut self, direction: Direction) -> Result<TurnOutcome, GameError> {
        let result = self.begin_move(direction)?;
        if !result.changed {
            return Ok(TurnOutcome {
                result,
                spawned: None,
                won: None,
            });
        }

        let finished = self.finish_move();
        Ok(TurnOutcome {
            result,
            spawned: finished.spawned,
            won: finished.won,
        })
    }

    /// Restore the grid and score from before the last committed move.
    ///
    /// Consumes the undo buffer, so a second consecutive undo fails. The best
    /// score is not rolled back. Undoing the winning move returns to `Idle`
    /// with the same winning tile.
    pub fn undo(&mut self) -> Result<(), GameError> {
        if self.state == SessionState::Resolving {
            return Err(GameError::InvalidOperation("previous move is still resolving"));
        }

        let slot = self
            .undo
            .take()
            .ok_or(GameError::InvalidOperation("nothing to undo"))?;
        self.grid = slot.grid;
        self.score = slot.score;
        self.state = SessionState::Idle;
        self.last_spawn = None;
        self.moves = self.moves.saturating_sub(1);
        info!("undo (score {})", self.score);
        Ok(())
    }

    /// Keep playing past the winning tile. Doubles the threshold.
    pub fn continue_game(&mut self) -> Result<u32, GameError> {
        if self.state != SessionState::Won {
            return Err(GameError::InvalidOperation("continue is only valid after a win"));
        }
        self.winning_tile = self.winning_tile.saturating_mul(2);
        self.state = SessionState::Idle;
        info!("continuing, next goal {}", self.winning_tile);
        Ok(self.winning_tile)
    }

    /// Apply a game action. Returns true if the session changed.
    pub fn apply_action(&mut self, action: GameAction) -> Result<bool, GameError> {
        match action {
            GameAction::Move(direction) => Ok(self.apply_move(direction)?.result.changed),
            GameAction::Undo => self.undo().map(|()| true),
            GameAction::NewGame => {
                self.new_game();
                Ok(true)
            }
            GameAction::Continue => self.continue_game().map(|_| true),
        }
    }

    /// Place a 2 or 4 on a uniformly chosen empty cell.
    fn spawn_tile(&mut self) -> Option<SpawnedTile> {
        let empty = self.grid.empty_cells();
        if empty.is_empty() {
            return None;
        }

        let value = draw_spawn_value(&mut self.rng);
        let position = empty[self.rng.next_range(empty.len() as u32) as usize];
        self.grid.set(position, value);

        let tile = SpawnedTile { position, value };
        self.last_spawn = Some(tile);
        trace!("spawned {} at ({}, {})", value, position.col, position.row);
        Some(tile)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.grid = self.grid.rows();
        out.score = self.score;
        out.best_score = self.best_score;
        out.winning_tile = self.winning_tile;
        out.state = self.state;
        out.can_undo = self.can_undo();
        out.game_over = self.is_game_over();
        out.last_spawn = self.last_spawn;
        out.moves = self.moves;
        out.episode_id = self.episode_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Session<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}
