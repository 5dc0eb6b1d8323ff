//! Slide animation driven by a committed move's movement records.
//!
//! The session has already committed the move; this only replays it. Tiles that
//! did not move are drawn from the pre-move grid, moving tiles are drawn at
//! `start + offset × progress`.

use crate::core::{Grid, MoveResult, MovementRecord};
use crate::types::SLIDE_MIN_MS;

/// Milliseconds per cell travelled.
const MS_PER_CELL: u32 = 60;

#[derive(Debug, Clone)]
pub struct SlideAnimation {
    from: Grid,
    movements: Vec<MovementRecord>,
    elapsed_ms: u32,
    duration_ms: u32,
}

impl SlideAnimation {
    /// `from` is the grid before the move, `result` what resolving it produced.
    pub fn new(from: Grid, result: &MoveResult) -> Self {
        let longest = result
            .movements
            .iter()
            .map(|m| m.distance() as u32)
            .max()
            .unwrap_or(0);
        Self {
            from,
            movements: result.movements.to_vec(),
            elapsed_ms: 0,
            duration_ms: (longest * MS_PER_CELL).max(SLIDE_MIN_MS),
        }
    }

    pub fn from_grid(&self) -> &Grid {
        &self.from
    }

    pub fn movements(&self) -> &[MovementRecord] {
        &self.movements
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn advance(&mut self, elapsed_ms: u32) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms).min(self.duration_ms);
    }

    pub fn is_done(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    /// Progress in thousandths, 0..=1000.
    pub fn progress_permille(&self) -> u32 {
        if self.duration_ms == 0 {
            return 1000;
        }
        self.elapsed_ms * 1000 / self.duration_ms
    }

    /// Displacement of `movement` so far, given the spacing between cells.
    pub fn shift(&self, movement: &MovementRecord, spacing: i32) -> i32 {
        movement.scaled_offset(spacing) * self.progress_permille() as i32 / 1000
    }

    /// True when a tile starts at `col`, `row` and is therefore drawn in motion.
    pub fn is_moving(&self, col: u8, row: u8) -> bool {
        self.movements
            .iter()
            .any(|m| m.start.col == col && m.start.row == row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolve_move;
    use crate::types::Direction;

    #[test]
    fn duration_scales_with_distance() {
        let from = Grid::from_rows([[0, 0, 0, 2], [0; 4], [0; 4], [0; 4]]);
        let result = resolve_move(&from, Direction::Left);
        let anim = SlideAnimation::new(from, &result);
        assert_eq!(anim.duration_ms(), 3 * MS_PER_CELL);

        let from = Grid::from_rows([[0, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let result = resolve_move(&from, Direction::Left);
        assert_eq!(SlideAnimation::new(from, &result).duration_ms(), SLIDE_MIN_MS);
    }

    #[test]
    fn shift_interpolates_offset() {
        let from = Grid::from_rows([[0, 0, 0, 2], [0; 4], [0; 4], [0; 4]]);
        let result = resolve_move(&from, Direction::Left);
        let mut anim = SlideAnimation::new(from, &result);
        let m = anim.movements()[0];

        assert_eq!(anim.shift(&m, 8), 0);
        anim.advance(anim.duration_ms() / 2);
        assert_eq!(anim.shift(&m, 8), -12);
        anim.advance(10_000);
        assert!(anim.is_done());
        assert_eq!(anim.shift(&m, 8), -24);
    }

    #[test]
    fn moving_tiles_are_flagged() {
        let from = Grid::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let result = resolve_move(&from, Direction::Left);
        let anim = SlideAnimation::new(from, &result);
        assert!(anim.is_moving(1, 0));
        assert!(!anim.is_moving(0, 0));
    }
}
