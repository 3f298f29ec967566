use log::trace;

use crate::game::{Board, Side};

use super::evaluator::{Heuristic, WindowHeuristic};

/// Score of a line completed inside the search horizon.
pub const WIN_SCORE: i32 = 100_000;

/// Root result of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub score: i32,
    /// `None` only when the root has no legal column.
    pub column: Option<usize>,
}

/// Fixed-depth minimax with alpha-beta pruning. The searching side always
/// maximises; children are generated left to right.
pub struct Searcher {
    depth: usize,
    heuristic: Box<dyn Heuristic>,
    nodes: u64,
}

impl Searcher {
    pub fn new(depth: usize) -> Self {
        Searcher {
            depth,
            heuristic: Box::new(WindowHeuristic),
            nodes: 0,
        }
    }

    /// Search with a caller-supplied leaf evaluation in place of
    /// [`WindowHeuristic`]. Terminal wins and draws are still scored by
    /// the searcher itself.
    pub fn with_heuristic(depth: usize, heuristic: Box<dyn Heuristic>) -> Self {
        Searcher {
            depth,
            heuristic,
            nodes: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Nodes visited by the last call to [`Searcher::search`].
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Search `board` for the best column for `me`.
    pub fn search(&mut self, board: &Board, me: Side) -> SearchResult {
        self.nodes = 0;
        let mut best = SearchResult {
            score: i32::MIN,
            column: None,
        };
        let mut alpha = i32::MIN;
        let beta = i32::MAX;

        for col in board.available_columns() {
            let Ok(child) = board.with_drop(col, me) else {
                continue;
            };
            let score = self.alpha_beta(&child, self.depth.saturating_sub(1), alpha, beta, false, me);
            if best.column.is_none() || score > best.score {
                best = SearchResult {
                    score,
                    column: Some(col),
                };
            }
            alpha = alpha.max(best.score);
        }

        if best.column.is_none() {
            best.score = 0;
        }
        trace!(
            "depth {} search: column {:?} score {} ({} nodes)",
            self.depth,
            best.column,
            best.score,
            self.nodes
        );
        best
    }

    fn alpha_beta(
        &mut self,
        board: &Board,
        depth: usize,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        me: Side,
    ) -> i32 {
        self.nodes += 1;

        if board.has_won(me) {
            return WIN_SCORE;
        }
        if board.has_won(me.other()) {
            return -WIN_SCORE;
        }
        if board.is_full() {
            return 0;
        }
        if depth == 0 {
            return self.heuristic.evaluate(board, me);
        }

        let mover = if maximizing { me } else { me.other() };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for col in board.available_columns() {
            let Ok(child) = board.with_drop(col, mover) else {
                continue;
            };
            let score = self.alpha_beta(&child, depth - 1, alpha, beta, !maximizing, me);
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if beta <= alpha {
                break;
            }
        }

        best
    }
}
