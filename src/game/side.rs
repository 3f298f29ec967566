use super::board::Cell;

/// One of the two participants in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Human,
    Ai,
}

impl Side {
    /// Get the other side
    pub fn other(self) -> Side {
        match self {
            Side::Human => Side::Ai,
            Side::Ai => Side::Human,
        }
    }

    /// Convert side to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Side::Human => Cell::Human,
            Side::Ai => Cell::Ai,
        }
    }

    /// Get side name for display
    pub fn name(self) -> &'static str {
        match self {
            Side::Human => "Human",
            Side::Ai => "AI",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_side() {
        assert_eq!(Side::Human.other(), Side::Ai);
        assert_eq!(Side::Ai.other(), Side::Human);
    }

    #[test]
    fn test_side_cell_roundtrip() {
        assert_eq!(Side::Human.to_cell().side(), Some(Side::Human));
        assert_eq!(Side::Ai.to_cell().side(), Some(Side::Ai));
    }

    #[test]
    fn test_side_name() {
        assert_eq!(Side::Human.name(), "Human");
        assert_eq!(Side::Ai.name(), "AI");
    }
}
