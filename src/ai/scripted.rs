use crate::game::GameState;

use super::agent::Agent;

/// Replays a fixed column sequence on a loop, skipping full columns. Useful
/// as a predictable opponent for the profiler.
pub struct ScriptedAgent {
    script: Vec<usize>,
    cursor: usize,
}

impl ScriptedAgent {
    pub fn new(script: Vec<usize>) -> Self {
        assert!(!script.is_empty(), "script must not be empty");
        ScriptedAgent { script, cursor: 0 }
    }
}

impl Agent for ScriptedAgent {
    fn select_action(&mut self, state: &GameState) -> Option<usize> {
        let legal = state.legal_actions();
        for _ in 0..self.script.len() {
            let col = self.script[self.cursor % self.script.len()];
            self.cursor += 1;
            if legal.contains(&col) {
                return Some(col);
            }
        }
        legal.first().copied()
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Side;

    #[test]
    fn replays_script_in_order() {
        let mut agent = ScriptedAgent::new(vec![3, 4]);
        let state = GameState::initial(Side::Human);
        let picks: Vec<usize> = (0..4).filter_map(|_| agent.select_action(&state)).collect();
        assert_eq!(picks, vec![3, 4, 3, 4]);
    }

    #[test]
    fn skips_full_columns() {
        let mut agent = ScriptedAgent::new(vec![0, 5]);
        let mut state = GameState::initial(Side::Human);
        for _ in 0..6 {
            state.apply_move_mut(0).unwrap();
        }
        assert_eq!(agent.select_action(&state), Some(5));
        assert_eq!(agent.select_action(&state), Some(5));
    }

    #[test]
    fn falls_back_when_script_exhausted() {
        let mut agent = ScriptedAgent::new(vec![0]);
        let mut state = GameState::initial(Side::Human);
        for _ in 0..6 {
            state.apply_move_mut(0).unwrap();
        }
        assert_eq!(agent.select_action(&state), Some(1));
    }
}
