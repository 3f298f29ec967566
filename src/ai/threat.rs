//! Immediate-win lookups and severity-ranked blocking candidates.

use crate::game::{Board, Cell, Side, WINDOWS};

/// Opponent holds three of the window with the fourth cell open.
pub const SEVERITY_WIN: u32 = 100;
/// Opponent holds two with two open.
pub const SEVERITY_BUILDING: u32 = 50;
/// Opponent holds a single piece.
pub const SEVERITY_NEGLIGIBLE: u32 = 10;

/// How much of an opponent line a drop in `column` would cut off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreatRecord {
    pub column: usize,
    pub severity: u32,
}

fn severity_for(opponent_pieces: usize) -> u32 {
    match opponent_pieces {
        3 => SEVERITY_WIN,
        2 => SEVERITY_BUILDING,
        1 => SEVERITY_NEGLIGIBLE,
        _ => 0,
    }
}

/// Columns where `side` completes four in a row with one drop, left to right.
pub fn winning_moves(board: &Board, side: Side) -> Vec<usize> {
    board
        .available_columns()
        .into_iter()
        .filter(|&col| {
            board
                .with_drop(col, side)
                .is_ok_and(|next| next.has_won(side))
        })
        .collect()
}

/// Leftmost column that wins on the spot for `side`.
pub fn find_winning_move(board: &Board, side: Side) -> Option<usize> {
    winning_moves(board, side).into_iter().next()
}

/// Highest severity of the opponent windows that dropping `side`'s piece in
/// `column` would newly block. `None` when the column is not playable.
pub fn block_severity(board: &Board, column: usize, side: Side) -> Option<u32> {
    let row = board.landing_row(column)?;
    let own = side.to_cell();
    let opp = side.other().to_cell();

    let severity = WINDOWS
        .iter()
        .filter(|window| window.contains(&(row, column)))
        .filter(|window| window.iter().all(|&(r, c)| board.get(r, c) != own))
        .map(|window| {
            // Before the drop the window is open for the opponent; after it,
            // the landing cell is ours and the line is dead.
            let before = window
                .iter()
                .filter(|&&(r, c)| board.get(r, c) == opp)
                .count();
            debug_assert_eq!(board.get(row, column), Cell::Empty);
            severity_for(before)
        })
        .max()
        .unwrap_or(0);

    Some(severity)
}

/// Every playable column with the severity it blocks for `side`, highest
/// first. Equal severities keep left-to-right order.
pub fn rank_threats(board: &Board, side: Side) -> Vec<ThreatRecord> {
    let mut ranked: Vec<ThreatRecord> = board
        .available_columns()
        .into_iter()
        .filter_map(|column| {
            block_severity(board, column, side).map(|severity| ThreatRecord { column, severity })
        })
        .collect();
    ranked.sort_by(|a, b| b.severity.cmp(&a.severity));
    ranked
}

/// The top-ranked blocking candidate, if it blocks anything at all.
pub fn top_threat(board: &Board, side: Side) -> Option<ThreatRecord> {
    rank_threats(board, side)
        .into_iter()
        .next()
        .filter(|record| record.severity > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_horizontal_win() {
        let board = Board::from_rows([
            ".......",
            ".......",
            ".......",
            ".......",
            "XXX....",
            "OOO....",
        ]);
        assert_eq!(find_winning_move(&board, Side::Ai), Some(3));
        // Human's row-4 line is not supported at column 3 yet
        assert_eq!(find_winning_move(&board, Side::Human), None);
    }

    #[test]
    fn lists_both_ends_of_open_three() {
        let board = Board::from_rows([
            ".......",
            ".......",
            ".......",
            ".......",
            ".......",
            ".XXX...",
        ]);
        assert_eq!(winning_moves(&board, Side::Human), vec![0, 4]);
        assert!(winning_moves(&board, Side::Ai).is_empty());
    }

    #[test]
    fn no_winning_move_on_empty_board() {
        assert_eq!(find_winning_move(&Board::new(), Side::Ai), None);
    }

    #[test]
    fn ranks_immediate_block_first() {
        let board = Board::from_rows([
            ".......",
            ".......",
            ".......",
            ".......",
            ".......",
            ".XXX...",
        ]);
        let ranked = rank_threats(&board, Side::Ai);
        assert_eq!(ranked.len(), 7);
        assert_eq!(
            ranked[0],
            ThreatRecord {
                column: 0,
                severity: SEVERITY_WIN
            }
        );
        assert_eq!(
            ranked[1],
            ThreatRecord {
                column: 4,
                severity: SEVERITY_WIN
            }
        );
        assert!(ranked.windows(2).all(|w| w[0].severity >= w[1].severity));
    }

    #[test]
    fn already_blocked_window_is_ignored() {
        let board = Board::from_rows([
            ".......",
            ".......",
            ".......",
            ".......",
            ".......",
            "OXX....",
        ]);
        let sev = block_severity(&board, 3, Side::Ai).unwrap();
        // Windows 1..=4 (X X _ _) is open: severity 50
        assert_eq!(sev, SEVERITY_BUILDING);
        // Column 0 lands on row 4, where no open window holds an X
        assert_eq!(block_severity(&board, 0, Side::Ai), Some(0));
    }

    #[test]
    fn full_column_has_no_severity() {
        let mut board = Board::new();
        for i in 0..6 {
            let side = if i % 2 == 0 { Side::Human } else { Side::Ai };
            board.drop_piece(2, side).unwrap();
        }
        assert_eq!(block_severity(&board, 2, Side::Ai), None);
        assert!(rank_threats(&board, Side::Ai).iter().all(|r| r.column != 2));
    }

    #[test]
    fn top_threat_none_on_empty_board() {
        assert_eq!(top_threat(&Board::new(), Side::Ai), None);
    }
}
