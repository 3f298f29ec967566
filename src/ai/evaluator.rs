use crate::game::{Board, Side, WINDOWS};

/// Trait for evaluating a board position from a side's perspective.
pub trait Heuristic: Send {
    fn evaluate(&self, board: &Board, side: Side) -> i32;
}

/// Additive line-window heuristic. Mixed windows score nothing; the
/// opponent's three-with-a-gap costs slightly less than our own is worth.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowHeuristic;

impl WindowHeuristic {
    pub const OWN_THREE: i32 = 5;
    pub const OWN_TWO: i32 = 2;
    pub const OPP_THREE: i32 = -4;

    fn score_window(own: usize, opp: usize, empty: usize) -> i32 {
        match (own, opp, empty) {
            (3, 0, 1) => Self::OWN_THREE,
            (2, 0, 2) => Self::OWN_TWO,
            (0, 3, 1) => Self::OPP_THREE,
            _ => 0,
        }
    }
}

impl Heuristic for WindowHeuristic {
    fn evaluate(&self, board: &Board, side: Side) -> i32 {
        WINDOWS
            .iter()
            .map(|window| {
                let (own, opp, empty) = board.window_counts(window, side);
                Self::score_window(own, opp, empty)
            })
            .sum()
    }
}

/// Static score of `board` for `side`.
pub fn evaluate(board: &Board, side: Side) -> i32 {
    WindowHeuristic.evaluate(board, side)
}
