use std::fmt;

use super::side::Side;
use crate::error::MoveError;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Number of 4-cell line windows on a 7x6 board.
pub const WINDOW_COUNT: usize = 69;

/// Four `(row, col)` coordinates forming one line of a possible connection.
pub type Window = [(usize, usize); 4];

/// The four cells of a completed connection.
pub type WinningLine = Window;

/// Every horizontal, vertical and diagonal window, in that order.
pub static WINDOWS: [Window; WINDOW_COUNT] = build_windows();

const fn build_windows() -> [Window; WINDOW_COUNT] {
    let mut out = [[(0, 0); 4]; WINDOW_COUNT];
    let mut n = 0;

    // Horizontal
    let mut row = 0;
    while row < ROWS {
        let mut col = 0;
        while col + 3 < COLS {
            out[n] = [(row, col), (row, col + 1), (row, col + 2), (row, col + 3)];
            n += 1;
            col += 1;
        }
        row += 1;
    }

    // Vertical
    let mut col = 0;
    while col < COLS {
        let mut row = 0;
        while row + 3 < ROWS {
            out[n] = [(row, col), (row + 1, col), (row + 2, col), (row + 3, col)];
            n += 1;
            row += 1;
        }
        col += 1;
    }

    // Diagonal (top-left to bottom-right, \)
    let mut row = 0;
    while row + 3 < ROWS {
        let mut col = 0;
        while col + 3 < COLS {
            out[n] = [
                (row, col),
                (row + 1, col + 1),
                (row + 2, col + 2),
                (row + 3, col + 3),
            ];
            n += 1;
            col += 1;
        }
        row += 1;
    }

    // Diagonal (bottom-left to top-right, /)
    let mut row = 3;
    while row < ROWS {
        let mut col = 0;
        while col + 3 < COLS {
            out[n] = [
                (row, col),
                (row - 1, col + 1),
                (row - 2, col + 2),
                (row - 3, col + 3),
            ];
            n += 1;
            col += 1;
        }
        row += 1;
    }

    assert!(n == WINDOW_COUNT);
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Human,
    Ai,
}

impl Cell {
    /// The side owning this cell, if any.
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Human => Some(Side::Human),
            Cell::Ai => Some(Side::Ai),
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Human => 'X',
            Cell::Ai => 'O',
        }
    }
}

/// Result of scanning a board for a completed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardOutcome {
    Winner { side: Side, line: WinningLine },
    Draw,
    InProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Build a board from six text rows, top row first. `X` is the human,
    /// `O` the AI and `.` an empty cell.
    ///
    /// Panics on malformed rows or floating pieces: a bad fixture is a bug.
    pub fn from_rows(rows: [&str; ROWS]) -> Self {
        let mut cells = [[Cell::Empty; COLS]; ROWS];
        for (row, line) in rows.iter().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            assert_eq!(chars.len(), COLS, "row {row} must have {COLS} cells");
            for (col, ch) in chars.into_iter().enumerate() {
                cells[row][col] = match ch {
                    'X' | 'x' => Cell::Human,
                    'O' | 'o' => Cell::Ai,
                    '.' => Cell::Empty,
                    other => panic!("unexpected cell symbol '{other}'"),
                };
            }
        }
        let board = Board { cells };
        assert!(board.respects_gravity(), "board has floating pieces");
        board
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Row a piece dropped in `col` would land on, if the column has room.
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, side: Side) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::ColumnOutOfRange(col));
        }
        let row = self.landing_row(col).ok_or(MoveError::ColumnFull(col))?;
        self.cells[row][col] = side.to_cell();
        debug_assert!(self.respects_gravity());
        Ok(row)
    }

    /// Copy-on-write drop: the receiver is left untouched.
    pub fn with_drop(&self, col: usize, side: Side) -> Result<Board, MoveError> {
        let mut next = *self;
        next.drop_piece(col, side)?;
        Ok(next)
    }

    /// Columns with at least one empty cell, left to right.
    pub fn available_columns(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Number of pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    /// Scan every window for four identical pieces. No incremental state is
    /// kept, so the answer never depends on move order.
    pub fn evaluate_outcome(&self) -> BoardOutcome {
        for window in WINDOWS.iter() {
            let first = self.get(window[0].0, window[0].1);
            let Some(side) = first.side() else {
                continue;
            };
            if window[1..].iter().all(|&(r, c)| self.cells[r][c] == first) {
                return BoardOutcome::Winner {
                    side,
                    line: *window,
                };
            }
        }

        if self.is_full() {
            BoardOutcome::Draw
        } else {
            BoardOutcome::InProgress
        }
    }

    /// Whether `side` has four in a row anywhere.
    pub fn has_won(&self, side: Side) -> bool {
        let cell = side.to_cell();
        WINDOWS
            .iter()
            .any(|window| window.iter().all(|&(r, c)| self.cells[r][c] == cell))
    }

    /// Counts of `(own, opponent, empty)` cells in a window.
    pub fn window_counts(&self, window: &Window, side: Side) -> (usize, usize, usize) {
        let own_cell = side.to_cell();
        let mut own = 0;
        let mut opp = 0;
        let mut empty = 0;
        for &(row, col) in window {
            match self.cells[row][col] {
                Cell::Empty => empty += 1,
                c if c == own_cell => own += 1,
                _ => opp += 1,
            }
        }
        (own, opp, empty)
    }

    fn respects_gravity(&self) -> bool {
        (0..COLS).all(|col| {
            let mut seen_empty_below = false;
            for row in (0..ROWS).rev() {
                match self.cells[row][col] {
                    Cell::Empty => seen_empty_below = true,
                    _ if seen_empty_below => return false,
                    _ => {}
                }
            }
            true
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row.iter().map(|c| c.symbol()).collect();
            writeln!(f, "{line}")?;
        }
        let footer: String = (0..COLS).map(|c| char::from(b'0' + c as u8)).collect();
        write!(f, "{footer}")
    }
}
