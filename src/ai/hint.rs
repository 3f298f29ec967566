use std::fmt;

/// Why a coaching hint suggests its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintReason {
    Win,
    Block,
    Improve,
    Center,
}

/// A suggested column for the human, with a short justification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoachingHint {
    pub column: usize,
    pub reason: HintReason,
}

impl CoachingHint {
    pub fn new(column: usize, reason: HintReason) -> Self {
        CoachingHint { column, reason }
    }

    pub fn text(&self) -> String {
        let col = self.column;
        match self.reason {
            HintReason::Win => format!("Play column {col} to connect four and win!"),
            HintReason::Block => {
                format!("Block column {col}: your opponent wins there next turn.")
            }
            HintReason::Improve => format!("Column {col} builds toward a connection."),
            HintReason::Center => {
                format!("Take column {col}: central pieces join the most lines.")
            }
        }
    }
}

impl fmt::Display for CoachingHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}
