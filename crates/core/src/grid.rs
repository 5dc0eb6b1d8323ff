//! Grid module - the tile matrix
//!
//! The grid is a square of `GRID_SIZE` × `GRID_SIZE` cells holding tile values.
//! `0` is an empty cell; every other value is a power of two.
//! Uses a flat array for cache locality and zero-allocation moves.
//! Coordinates: (col, row) where col runs left to right and row top to bottom.

use arrayvec::ArrayVec;

use crate::types::{is_valid_tile, Position, CELL_COUNT, GRID_SIZE};

/// One row or column, ordered by increasing column/row index.
pub type Line = [u32; GRID_SIZE];

/// Selects a row or column of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineRef {
    Row(usize),
    Col(usize),
}

impl LineRef {
    /// Grid position of the `i`-th cell along this line.
    pub fn position(&self, i: usize) -> Position {
        match *self {
            LineRef::Row(row) => Position::new(i as u8, row as u8),
            LineRef::Col(col) => Position::new(col as u8, i as u8),
        }
    }
}

/// The tile matrix, stored row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: [u32; CELL_COUNT],
}

impl Grid {
    /// Create an empty grid
    pub fn new() -> Self {
        Self {
            cells: [0; CELL_COUNT],
        }
    }

    /// Build a grid from rows (top to bottom).
    ///
    /// # Panics
    ///
    /// Panics if any value is not `0` or a power of two greater than one.
    pub fn from_rows(rows: [Line; GRID_SIZE]) -> Self {
        let mut grid = Self::new();
        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                assert!(
                    is_valid_tile(value),
                    "invalid tile value {value} at ({col}, {row})"
                );
                grid.cells[row * GRID_SIZE + col] = value;
            }
        }
        grid
    }

    /// Rows top to bottom.
    pub fn rows(&self) -> [Line; GRID_SIZE] {
        let mut rows = [[0; GRID_SIZE]; GRID_SIZE];
        for (row, out) in rows.iter_mut().enumerate() {
            out.copy_from_slice(&self.cells[row * GRID_SIZE..(row + 1) * GRID_SIZE]);
        }
        rows
    }

    /// Grid side length.
    pub fn size(&self) -> usize {
        GRID_SIZE
    }

    /// Tile value at `pos`, `None` if out of bounds.
    pub fn get(&self, pos: Position) -> Option<u32> {
        Self::index(pos).map(|idx| self.cells[idx])
    }

    /// Set the tile at `pos`. Returns false if out of bounds.
    pub fn set(&mut self, pos: Position, value: u32) -> bool {
        debug_assert!(is_valid_tile(value), "invalid tile value {value}");
        match Self::index(pos) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    #[inline(always)]
    fn index(pos: Position) -> Option<usize> {
        if pos.col as usize >= GRID_SIZE || pos.row as usize >= GRID_SIZE {
            return None;
        }
        Some(pos.index())
    }

    /// Check if position holds a tile
    pub fn is_occupied(&self, pos: Position) -> bool {
        matches!(self.get(pos), Some(v) if v > 0)
    }

    /// Copy out a row or column.
    pub fn line(&self, line: LineRef) -> Line {
        let mut out = [0; GRID_SIZE];
        for (i, cell) in out.iter_mut().enumerate() {
            *cell = self.cells[line.position(i).index()];
        }
        out
    }

    /// Overwrite a row or column.
    pub fn set_line(&mut self, line: LineRef, values: &Line) {
        for (i, &value) in values.iter().enumerate() {
            self.cells[line.position(i).index()] = value;
        }
    }

    /// Empty positions in row-major order.
    pub fn empty_cells(&self) -> ArrayVec<Position, CELL_COUNT> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == 0)
            .map(|(i, _)| Position::from_index(i))
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&v| v > 0)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&v| v == 0)
    }

    /// Largest tile on the grid (0 when empty).
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Number of occupied cells.
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v > 0).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[u32; CELL_COUNT] {
        &self.cells
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells = [0; CELL_COUNT];
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[Line; GRID_SIZE]> for Grid {
    fn from(rows: [Line; GRID_SIZE]) -> Self {
        Self::from_rows(rows)
    }
}
