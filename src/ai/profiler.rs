//! Tracks the human's column choices and derives traps and counter-moves.

use crate::game::{Board, Side, COLS};

use super::evaluator::evaluate;
use super::threat::winning_moves;

/// A column counts as favored once it has been played this often.
pub const FAVORED_MIN_USES: usize = 3;
/// At most this many favored columns are reported.
pub const MAX_FAVORED: usize = 3;
/// Moves needed before frequency analysis is meaningful.
pub const MIN_MOVES_FOR_FAVORED: usize = 4;
/// Moves needed before sequence repetition is checked.
pub const MIN_MOVES_FOR_PATTERN: usize = 8;
/// A counter-move must improve the position by more than this.
pub const COUNTER_MIN_SCORE: i32 = 2;

const SEQUENCE_LEN: usize = 6;
const PAIRS_COMPARED: usize = 3;
const CLOSE_PAIRS_NEEDED: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpponentProfiler {
    moves: Vec<usize>,
}

impl OpponentProfiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, column: usize) {
        debug_assert!(column < COLS);
        self.moves.push(column);
    }

    pub fn moves(&self) -> &[usize] {
        &self.moves
    }

    /// Columns played at least [`FAVORED_MIN_USES`] times, most used first
    /// (lower column on ties), capped at [`MAX_FAVORED`]. Empty until
    /// [`MIN_MOVES_FOR_FAVORED`] moves are known.
    pub fn favored_columns(&self) -> Vec<usize> {
        if self.moves.len() < MIN_MOVES_FOR_FAVORED {
            return Vec::new();
        }
        let mut counts = [0usize; COLS];
        for &col in &self.moves {
            counts[col] += 1;
        }
        let mut favored: Vec<usize> = (0..COLS)
            .filter(|&col| counts[col] >= FAVORED_MIN_USES)
            .collect();
        favored.sort_by(|a, b| counts[*b].cmp(&counts[*a]).then(a.cmp(b)));
        favored.truncate(MAX_FAVORED);
        favored
    }

    /// Compare the last six moves with the six before them: the opponent is
    /// repeating itself when at least two of the first three pairs land
    /// within one column of each other.
    pub fn has_repeated_pattern(&self) -> bool {
        let n = self.moves.len();
        if n < MIN_MOVES_FOR_PATTERN {
            return false;
        }
        let recent = &self.moves[n - SEQUENCE_LEN..];
        let earlier = &self.moves[n.saturating_sub(2 * SEQUENCE_LEN)..n - SEQUENCE_LEN];

        let close = recent
            .iter()
            .zip(earlier)
            .take(PAIRS_COMPARED)
            .filter(|(a, b)| a.abs_diff(**b) <= 1)
            .count();
        close >= CLOSE_PAIRS_NEEDED
    }
}

/// First column (left to right) after which `side` has two or more distinct
/// winning follow-ups.
pub fn find_fork_move(board: &Board, side: Side) -> Option<usize> {
    board.available_columns().into_iter().find(|&col| {
        board
            .with_drop(col, side)
            .is_ok_and(|next| winning_moves(&next, side).len() >= 2)
    })
}

/// Best space-denying move next to the opponent's favored columns, taken
/// only if it scores above [`COUNTER_MIN_SCORE`] for `side`.
pub fn counter_move(board: &Board, side: Side, favored: &[usize]) -> Option<usize> {
    for &fav in favored {
        let lo = fav.saturating_sub(1);
        let hi = (fav + 1).min(COLS - 1);
        let best = (lo..=hi)
            .filter_map(|col| board.with_drop(col, side).ok().map(|b| (col, evaluate(&b, side))))
            .filter(|&(_, score)| score > COUNTER_MIN_SCORE)
            .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)));
        if let Some((col, _)) = best {
            return Some(col);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profiler_with(moves: &[usize]) -> OpponentProfiler {
        let mut p = OpponentProfiler::new();
        for &m in moves {
            p.record(m);
        }
        p
    }

    #[test]
    fn no_favored_columns_with_few_moves() {
        let p = profiler_with(&[3, 3, 3]);
        assert!(p.favored_columns().is_empty());
    }

    #[test]
    fn favored_columns_sorted_by_frequency() {
        let p = profiler_with(&[2, 5, 5, 2, 5, 2, 5, 0, 0, 0, 6, 6, 6, 6, 6]);
        // 6 x5, 5 x4, then 0 and 2 tie at 3: lower column wins the last slot
        assert_eq!(p.favored_columns(), vec![6, 5, 0]);
    }

    #[test]
    fn repeated_pattern_detected() {
        let p = profiler_with(&[3, 4, 2, 3, 4, 2, 3, 4, 2, 3, 4, 2]);
        assert!(p.has_repeated_pattern());
    }

    #[test]
    fn near_repetition_counts() {
        // Pairs (2,3) and (5,4) are within one column; (0,6) is not
        let p = profiler_with(&[3, 4, 6, 1, 1, 1, 2, 5, 0, 1, 1, 1]);
        assert!(p.has_repeated_pattern());
    }

    #[test]
    fn varied_sequence_not_flagged() {
        let p = profiler_with(&[0, 6, 0, 6, 0, 6, 3, 3, 3, 3, 3, 3]);
        assert!(!p.has_repeated_pattern());
    }

    #[test]
    fn pattern_needs_enough_history() {
        let p = profiler_with(&[3, 3, 3, 3, 3, 3, 3]);
        assert!(!p.has_repeated_pattern());
    }

    #[test]
    fn pattern_with_short_history_compares_available_pairs() {
        // Eight moves: the two oldest are compared with moves 2 and 3
        let p = profiler_with(&[1, 5, 1, 5, 0, 0, 0, 0]);
        assert!(p.has_repeated_pattern());
    }

    #[test]
    fn fork_found_on_open_row() {
        let board = Board::from_rows([
            ".......",
            ".......",
            ".......",
            ".......",
            ".X..X.X",
            ".O..O.O",
        ]);
        assert_eq!(find_fork_move(&board, Side::Ai), Some(3));
        assert_eq!(find_fork_move(&board, Side::Human), None);
    }

    #[test]
    fn no_fork_on_empty_board() {
        assert_eq!(find_fork_move(&Board::new(), Side::Ai), None);
    }

    #[test]
    fn counter_move_requires_real_gain() {
        // A lone piece scores nothing anywhere
        assert_eq!(counter_move(&Board::new(), Side::Ai, &[3]), None);

        let board = Board::from_rows([
            ".......",
            ".......",
            ".......",
            ".......",
            ".......",
            "..OO...",
        ]);
        // Column 4 makes three in a row with room on both sides
        assert_eq!(counter_move(&board, Side::Ai, &[4]), Some(4));
    }
}
