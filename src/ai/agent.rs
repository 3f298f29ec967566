use crate::game::GameState;

/// Anything that can pick a column for the side to move.
pub trait Agent {
    /// Select a column given the current game state. `None` means no legal
    /// column exists, which callers treat as a draw.
    fn select_action(&mut self, state: &GameState) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
