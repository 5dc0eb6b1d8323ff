//! Move resolution - applies a direction to the whole grid
//!
//! A move is `GRID_SIZE` independent line compactions: rows for left/right,
//! columns for up/down, scanned from the far end for right/down. Line-local
//! moves are translated back into grid positions so the presentation layer can
//! replay them without re-deriving anything.
//!
//! Resolution is pure: it never touches the session, score, or RNG.

use arrayvec::ArrayVec;

use crate::grid::{Grid, LineRef};
use crate::line::{compact_line, line_can_move, LeadingEdge};
use crate::types::{Direction, Position, GRID_SIZE, MAX_MOVES};

/// One tile displacement produced by a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MovementRecord {
    pub start: Position,
    pub end: Position,
    /// Tile value before the move.
    pub start_value: u32,
    pub direction: Direction,
    /// Signed distance in cells along the move axis. Right and down are positive.
    pub offset: i8,
    /// True when the tile merged into the tile at `end`.
    pub merged: bool,
}

impl MovementRecord {
    /// Offset scaled by the distance between neighbouring cells in some
    /// presentation unit (pixels, terminal columns).
    pub fn scaled_offset(&self, spacing: i32) -> i32 {
        self.offset as i32 * spacing
    }

    /// Number of cells travelled.
    pub fn distance(&self) -> u8 {
        self.offset.unsigned_abs()
    }
}

/// Outcome of resolving a direction against a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub grid: Grid,
    /// Movement records, line by line in row/column order.
    pub movements: ArrayVec<MovementRecord, MAX_MOVES>,
    /// Sum of merged tile values.
    pub turn_score: u32,
    /// True iff at least one tile moved or merged.
    pub changed: bool,
}

impl MoveResult {
    /// Largest value created by a merge this move, if any.
    pub fn max_merged(&self) -> Option<u32> {
        self.movements
            .iter()
            .filter(|m| m.merged)
            .filter_map(|m| self.grid.get(m.end))
            .max()
    }

    pub fn merge_count(&self) -> usize {
        self.movements.iter().filter(|m| m.merged).count()
    }
}

fn line_ref(direction: Direction, index: usize) -> LineRef {
    if direction.is_horizontal() {
        LineRef::Row(index)
    } else {
        LineRef::Col(index)
    }
}

fn leading_edge(direction: Direction) -> LeadingEdge {
    if direction.toward_start() {
        LeadingEdge::Start
    } else {
        LeadingEdge::End
    }
}

/// Resolve `direction` against `grid` without mutating it.
pub fn resolve_move(grid: &Grid, direction: Direction) -> MoveResult {
    let edge = leading_edge(direction);
    let mut next = *grid;
    let mut movements = ArrayVec::new();
    let mut turn_score: u32 = 0;

    for index in 0..GRID_SIZE {
        let line = line_ref(direction, index);
        let outcome = compact_line(grid.line(line), edge);
        if !outcome.changed() {
            continue;
        }

        next.set_line(line, &outcome.cells);
        turn_score = turn_score.saturating_add(outcome.score);
        for mv in &outcome.moves {
            movements.push(MovementRecord {
                start: line.position(mv.from),
                end: line.position(mv.to),
                start_value: mv.value,
                direction,
                offset: mv.offset(),
                merged: mv.merged,
            });
        }
    }

    let changed = !movements.is_empty();
    MoveResult {
        grid: next,
        movements,
        turn_score,
        changed,
    }
}

/// True if moving `direction` would change `grid`.
pub fn can_move(grid: &Grid, direction: Direction) -> bool {
    let edge = leading_edge(direction);
    (0..GRID_SIZE).any(|index| line_can_move(&grid.line(line_ref(direction, index)), edge))
}

/// True if any direction would change `grid`.
pub fn has_any_move(grid: &Grid) -> bool {
    Direction::ALL.iter().any(|&d| can_move(grid, d))
}
