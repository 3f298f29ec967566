//! The turn policy as an ordered table. Each step is gated by difficulty and
//! the first step that yields a column decides the turn.

use std::fmt;

use super::difficulty::Difficulty;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyStep {
    /// Style-biased first move.
    Opening,
    /// Complete four in a row.
    ImmediateWin,
    /// Stop a one-move loss, subject to the per-tier block chance.
    ImmediateBlock,
    /// Cut off the most severe opponent line.
    ThreatBlock,
    /// Alpha-beta search, occasionally discarded.
    Search,
    /// Fork trap or space-denying counter from the opponent profile.
    PatternCounter,
    /// Highest static evaluation, sometimes swapped for a near-best move.
    Strategic,
    /// Center-leaning random move.
    Fallback,
}

/// Precedence order of a normal turn. The thinking delay happens before
/// any of these run.
pub const TURN_POLICY: [PolicyStep; 8] = [
    PolicyStep::Opening,
    PolicyStep::ImmediateWin,
    PolicyStep::ImmediateBlock,
    PolicyStep::ThreatBlock,
    PolicyStep::Search,
    PolicyStep::PatternCounter,
    PolicyStep::Strategic,
    PolicyStep::Fallback,
];

impl PolicyStep {
    /// Whether the step is consulted at all at `difficulty`.
    pub fn enabled_at(self, difficulty: Difficulty) -> bool {
        let level = difficulty.level();
        match self {
            PolicyStep::Opening => level >= 3,
            PolicyStep::ThreatBlock => level >= 5,
            PolicyStep::PatternCounter => level >= 7,
            PolicyStep::Search => difficulty.search_depth().is_some(),
            PolicyStep::ImmediateWin
            | PolicyStep::ImmediateBlock
            | PolicyStep::Strategic
            | PolicyStep::Fallback => true,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PolicyStep::Opening => "opening",
            PolicyStep::ImmediateWin => "immediate-win",
            PolicyStep::ImmediateBlock => "immediate-block",
            PolicyStep::ThreatBlock => "threat-block",
            PolicyStep::Search => "search",
            PolicyStep::PatternCounter => "pattern-counter",
            PolicyStep::Strategic => "strategic",
            PolicyStep::Fallback => "fallback",
        }
    }
}

impl fmt::Display for PolicyStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled(level: u8) -> Vec<PolicyStep> {
        TURN_POLICY
            .iter()
            .copied()
            .filter(|step| step.enabled_at(Difficulty::new(level)))
            .collect()
    }

    #[test]
    fn lowest_tier_uses_core_steps_only() {
        assert_eq!(
            enabled(1),
            vec![
                PolicyStep::ImmediateWin,
                PolicyStep::ImmediateBlock,
                PolicyStep::Strategic,
                PolicyStep::Fallback,
            ]
        );
    }

    #[test]
    fn top_tier_uses_every_step() {
        assert_eq!(enabled(10), TURN_POLICY.to_vec());
    }

    #[test]
    fn gates_open_at_documented_levels() {
        assert!(!PolicyStep::Opening.enabled_at(Difficulty::new(2)));
        assert!(PolicyStep::Opening.enabled_at(Difficulty::new(3)));
        assert!(!PolicyStep::ThreatBlock.enabled_at(Difficulty::new(4)));
        assert!(PolicyStep::ThreatBlock.enabled_at(Difficulty::new(5)));
        assert!(!PolicyStep::PatternCounter.enabled_at(Difficulty::new(6)));
        assert!(PolicyStep::PatternCounter.enabled_at(Difficulty::new(7)));
        assert!(!PolicyStep::Search.enabled_at(Difficulty::new(7)));
        assert!(PolicyStep::Search.enabled_at(Difficulty::new(8)));
    }

    #[test]
    fn win_precedes_every_block() {
        let pos = |s: PolicyStep| TURN_POLICY.iter().position(|&p| p == s).unwrap();
        assert!(pos(PolicyStep::ImmediateWin) < pos(PolicyStep::ImmediateBlock));
        assert!(pos(PolicyStep::ImmediateBlock) < pos(PolicyStep::ThreatBlock));
        assert!(pos(PolicyStep::ThreatBlock) < pos(PolicyStep::Search));
        assert_eq!(TURN_POLICY.last(), Some(&PolicyStep::Fallback));
    }
}
