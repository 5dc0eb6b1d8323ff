//! Line compaction - slides and merges a single row or column
//!
//! Tiles compact toward the leading edge. A cursor starts at the leading cell
//! and walks away from it:
//!
//! - Find the nearest occupied cell beyond the cursor. If there is none the
//!   line is done.
//! - Cursor cell empty: pull that tile into it and look at the same cell again,
//!   since the arrival may still merge with the tile behind it.
//! - Cursor cell equal to that tile: double the cursor cell, clear the source,
//!   score the doubled value and advance. A tile merges at most once per move.
//! - Otherwise: advance.
//!
//! This is a single greedy pass, so `2,2,2,0` compacting left becomes
//! `4,2,0,0`, not `4,4,0,0` or `2,4,0,0`.

use arrayvec::ArrayVec;

use crate::grid::Line;
use crate::types::{GRID_SIZE, MAX_LINE_MOVES};

/// Which end of the line tiles compact toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeadingEdge {
    /// Toward index 0 (left / up).
    Start,
    /// Toward the last index (right / down).
    End,
}

impl LeadingEdge {
    /// Physical index of the `k`-th cell counted from the leading edge.
    #[inline(always)]
    fn cell(self, k: usize) -> usize {
        match self {
            LeadingEdge::Start => k,
            LeadingEdge::End => GRID_SIZE - 1 - k,
        }
    }
}

/// A single tile displacement within a line. Indices are physical line indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineMove {
    pub from: usize,
    pub to: usize,
    /// Value of the tile before it moved.
    pub value: u32,
    /// True when the tile merged into the destination.
    pub merged: bool,
}

impl LineMove {
    /// Signed displacement in cells; positive toward the end of the line.
    pub fn offset(&self) -> i8 {
        self.to as i8 - self.from as i8
    }
}

/// Result of compacting one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOutcome {
    pub cells: Line,
    pub score: u32,
    pub moves: ArrayVec<LineMove, MAX_LINE_MOVES>,
}

impl LineOutcome {
    pub fn changed(&self) -> bool {
        !self.moves.is_empty()
    }
}

/// Compact and merge `cells` toward `edge`.
pub fn compact_line(mut cells: Line, edge: LeadingEdge) -> LineOutcome {
    let mut score: u32 = 0;
    let mut moves = ArrayVec::new();

    let mut cursor = 0;
    while cursor < GRID_SIZE {
        let Some(next) = (cursor + 1..GRID_SIZE).find(|&k| cells[edge.cell(k)] != 0) else {
            break;
        };

        let dst = edge.cell(cursor);
        let src = edge.cell(next);
        let value = cells[src];

        if cells[dst] == 0 {
            cells[dst] = value;
            cells[src] = 0;
            moves.push(LineMove {
                from: src,
                to: dst,
                value,
                merged: false,
            });
            // Re-examine the same cell: the arrival may merge with what follows.
            continue;
        }

        // The largest tile has no representable double and never merges.
        let doubled = if cells[dst] == value {
            value.checked_mul(2)
        } else {
            None
        };
        if let Some(doubled) = doubled {
            cells[dst] = doubled;
            cells[src] = 0;
            score = score.saturating_add(doubled);
            moves.push(LineMove {
                from: src,
                to: dst,
                value,
                merged: true,
            });
        }

        cursor += 1;
    }

    LineOutcome {
        cells,
        score,
        moves,
    }
}

/// True if compacting `cells` toward `edge` would change anything.
///
/// Cheaper than [`compact_line`]: a line can move iff it has a gap before an
/// occupied cell or two equal tiles with only empty cells between them.
pub fn line_can_move(cells: &Line, edge: LeadingEdge) -> bool {
    let mut prev = 0;
    let mut seen_gap = false;
    for k in 0..GRID_SIZE {
        let value = cells[edge.cell(k)];
        if value == 0 {
            seen_gap = true;
            continue;
        }
        if seen_gap || (value == prev && value.checked_mul(2).is_some()) {
            return true;
        }
        prev = value;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moves(outcome: &LineOutcome) -> Vec<(usize, usize, bool)> {
        outcome
            .moves
            .iter()
            .map(|m| (m.from, m.to, m.merged))
            .collect()
    }

    #[test]
    fn test_largest_tiles_do_not_merge() {
        let top = 1u32 << 31;
        let out = compact_line([top, top, 0, 0], LeadingEdge::Start);
        assert_eq!(out.cells, [top, top, 0, 0]);
        assert_eq!(out.score, 0);
        assert!(!out.changed());
        assert!(!line_can_move(&[top, top, 0, 0], LeadingEdge::Start));

        let half = 1u32 << 30;
        let out = compact_line([half; 4], LeadingEdge::Start);
        assert_eq!(out.cells, [top, top, 0, 0]);
        assert_eq!(out.score, u32::MAX);
    }

    #[test]
    fn test_pair_merges_left() {
        let out = compact_line([2, 2, 0, 0], LeadingEdge::Start);
        assert_eq!(out.cells, [4, 0, 0, 0]);
        assert_eq!(out.score, 4);
        assert_eq!(moves(&out), vec![(1, 0, true)]);
    }

    #[test]
    fn test_first_pair_wins_then_slide() {
        let out = compact_line([2, 0, 2, 2], LeadingEdge::Start);
        assert_eq!(out.cells, [4, 2, 0, 0]);
        assert_eq!(out.score, 4);
        assert_eq!(moves(&out), vec![(2, 0, true), (3, 1, false)]);
    }

    #[test]
    fn test_three_equal_merges_only_first_pair() {
        let out = compact_line([2, 2, 2, 0], LeadingEdge::Start);
        assert_eq!(out.cells, [4, 2, 0, 0]);
        assert_eq!(out.score, 4);
    }

    #[test]
    fn test_four_equal_merge_into_two_pairs() {
        let out = compact_line([2, 2, 2, 2], LeadingEdge::Start);
        assert_eq!(out.cells, [4, 4, 0, 0]);
        assert_eq!(out.score, 8);
        assert_eq!(moves(&out), vec![(1, 0, true), (2, 1, false), (3, 1, true)]);
    }

    #[test]
    fn test_merged_tile_does_not_merge_again() {
        let out = compact_line([2, 2, 4, 0], LeadingEdge::Start);
        assert_eq!(out.cells, [4, 4, 0, 0]);
        assert_eq!(out.score, 4);
    }

    #[test]
    fn test_arrival_merges_with_follower() {
        let out = compact_line([0, 2, 2, 0], LeadingEdge::Start);
        assert_eq!(out.cells, [4, 0, 0, 0]);
        assert_eq!(moves(&out), vec![(1, 0, false), (2, 0, true)]);
    }

    #[test]
    fn test_merge_across_gap() {
        let out = compact_line([4, 0, 0, 4], LeadingEdge::Start);
        assert_eq!(out.cells, [8, 0, 0, 0]);
        assert_eq!(out.score, 8);
        assert_eq!(moves(&out), vec![(3, 0, true)]);
    }

    #[test]
    fn test_compact_toward_end() {
        let out = compact_line([2, 2, 2, 0], LeadingEdge::End);
        assert_eq!(out.cells, [0, 0, 2, 4]);
        assert_eq!(out.score, 4);
        assert_eq!(moves(&out), vec![(2, 3, false), (1, 3, true), (0, 2, false)]);
    }

    #[test]
    fn test_empty_line_unchanged() {
        for edge in [LeadingEdge::Start, LeadingEdge::End] {
            let out = compact_line([0, 0, 0, 0], edge);
            assert_eq!(out.cells, [0, 0, 0, 0]);
            assert_eq!(out.score, 0);
            assert!(!out.changed());
        }
    }

    #[test]
    fn test_compacted_line_without_pairs_unchanged() {
        let out = compact_line([2, 4, 8, 0], LeadingEdge::Start);
        assert_eq!(out.cells, [2, 4, 8, 0]);
        assert!(!out.changed());

        let out = compact_line([0, 2, 4, 8], LeadingEdge::End);
        assert!(!out.changed());
    }

    #[test]
    fn test_offsets_are_signed() {
        let out = compact_line([0, 0, 0, 2], LeadingEdge::Start);
        assert_eq!(out.moves[0].offset(), -3);

        let out = compact_line([2, 0, 0, 0], LeadingEdge::End);
        assert_eq!(out.moves[0].offset(), 3);
    }

    #[test]
    fn test_line_can_move_agrees_with_compaction() {
        let samples: [Line; 10] = [
            [0, 0, 0, 0],
            [2, 0, 0, 0],
            [0, 0, 0, 2],
            [2, 2, 0, 0],
            [2, 4, 8, 16],
            [2, 4, 4, 16],
            [2, 0, 4, 0],
            [4, 0, 0, 4],
            [2, 4, 2, 4],
            [0, 2, 4, 8],
        ];
        for cells in samples {
            for edge in [LeadingEdge::Start, LeadingEdge::End] {
                assert_eq!(
                    line_can_move(&cells, edge),
                    compact_line(cells, edge).changed(),
                    "{cells:?} {edge:?}"
                );
            }
        }
    }
}
