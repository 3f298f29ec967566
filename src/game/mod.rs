//! Core Connect Four game logic: copy-on-write board with exhaustive window
//! scanning, sides, and the match-level state machine.

mod board;
mod side;
mod state;

pub use board::{Board, BoardOutcome, Cell, Window, WinningLine, COLS, ROWS, WINDOWS, WINDOW_COUNT};
pub use side::Side;
pub use state::{GameOutcome, GameState};
