use super::{Board, BoardOutcome, Side, COLS};
use crate::error::MoveError;

/// How a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Side),
    Draw,
    /// The named side abandoned the match.
    Forfeit(Side),
}

impl GameOutcome {
    /// The side credited with the win, if any.
    pub fn winner(self) -> Option<Side> {
        match self {
            GameOutcome::Winner(side) => Some(side),
            GameOutcome::Forfeit(loser) => Some(loser.other()),
            GameOutcome::Draw => None,
        }
    }
}

/// Match-level state owned by whoever runs the match, not by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameState {
    board: Board,
    current_side: Side,
    outcome: Option<GameOutcome>,
    last_move: Option<(Side, usize)>,
    move_count: usize,
}

impl GameState {
    /// Empty board with `first` to move.
    pub fn initial(first: Side) -> Self {
        GameState {
            board: Board::new(),
            current_side: first,
            outcome: None,
            last_move: None,
            move_count: 0,
        }
    }

    pub fn current_side(&self) -> Side {
        self.current_side
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// `None` while the match is still running.
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// The most recent move and who made it.
    pub fn last_move(&self) -> Option<(Side, usize)> {
        self.last_move
    }

    /// Number of pieces played so far.
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Open columns, or none once the match has ended.
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }

        (0..COLS)
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    /// Copying variant of [`GameState::apply_move_mut`].
    pub fn apply_move(&self, column: usize) -> Result<GameState, MoveError> {
        let mut next = *self;
        next.apply_move_mut(column)?;
        Ok(next)
    }

    /// Drop a piece for the side to move, then update the outcome and turn.
    pub fn apply_move_mut(&mut self, column: usize) -> Result<(), MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        self.board.drop_piece(column, self.current_side)?;
        self.last_move = Some((self.current_side, column));
        self.move_count += 1;

        self.outcome = match self.board.evaluate_outcome() {
            BoardOutcome::Winner { side, .. } => Some(GameOutcome::Winner(side)),
            BoardOutcome::Draw => Some(GameOutcome::Draw),
            BoardOutcome::InProgress => None,
        };

        self.current_side = self.current_side.other();

        Ok(())
    }

    /// End the match with `side` abandoning it. No effect once terminal.
    pub fn forfeit(&mut self, side: Side) {
        if self.outcome.is_none() {
            self.outcome = Some(GameOutcome::Forfeit(side));
        }
    }

    /// End the match as a draw, e.g. when the mover reports no legal move.
    pub fn declare_draw(&mut self) {
        if self.outcome.is_none() {
            self.outcome = Some(GameOutcome::Draw);
        }
    }
}
