use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use log::{info, warn};
use rand::Rng;

use crate::ai::{Agent, DecisionEngine};
use crate::arena::metrics::MatchResult;
use crate::game::{GameOutcome, GameState, Side};

/// Full record of one engine-vs-agent match.
#[derive(Debug, Clone)]
pub struct MatchRecord {
    pub outcome: GameOutcome,
    pub moves: Vec<(Side, usize)>,
    pub decision_times: Vec<Duration>,
}

impl MatchRecord {
    pub fn result(&self) -> MatchResult {
        MatchResult {
            winner: self.outcome.winner(),
            length: self.moves.len(),
        }
    }
}

/// Play one match between the engine (AI side) and `opponent` (human side).
///
/// Raising `abandon` ends the match as a human forfeit. A column the engine
/// settles on after the match has ended is discarded, never applied.
pub fn play_match<R: Rng>(
    engine: &mut DecisionEngine<R>,
    opponent: &mut dyn Agent,
    engine_first: bool,
    abandon: &AtomicBool,
) -> MatchRecord {
    let first = if engine_first { Side::Ai } else { Side::Human };
    let mut state = GameState::initial(first);
    let mut moves = Vec::new();
    let mut decision_times = Vec::new();

    while !state.is_terminal() {
        if abandon.load(Ordering::Acquire) {
            state.forfeit(Side::Human);
            break;
        }

        let side = state.current_side();
        let choice = match side {
            Side::Ai => {
                let is_first_move = engine.own_moves().is_empty();
                let last_opponent_move = state
                    .last_move()
                    .filter(|&(s, _)| s == Side::Human)
                    .map(|(_, col)| col);
                let started = Instant::now();
                let choice = engine.choose_move_cancellable(
                    state.board(),
                    is_first_move,
                    last_opponent_move,
                    abandon,
                );
                decision_times.push(started.elapsed());
                choice
            }
            Side::Human => opponent.select_action(&state),
        };

        // The match may have been ended while the engine was thinking.
        if state.is_terminal() || abandon.load(Ordering::Acquire) {
            continue;
        }

        let Some(col) = choice else {
            state.declare_draw();
            break;
        };

        if let Err(err) = state.apply_move_mut(col) {
            warn!("{} chose column {col}: {err}", side.name());
            state.forfeit(side);
            break;
        }
        moves.push((side, col));
    }

    let outcome = state.outcome().unwrap_or(GameOutcome::Draw);
    info!(
        "difficulty {} vs {}: {:?} after {} moves",
        engine.difficulty(),
        opponent.name(),
        outcome,
        moves.len()
    );

    MatchRecord {
        outcome,
        moves,
        decision_times,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{DifficultySource, RandomAgent, ScriptedAgent};
    use crate::config::EngineConfig;

    fn engine(level: u8, seed: u64) -> DecisionEngine {
        DecisionEngine::new(DifficultySource::Level(level), &EngineConfig::instant(seed))
    }

    #[test]
    fn match_runs_to_completion() {
        let mut e = engine(5, 1);
        let mut opponent = RandomAgent::with_seed(1);
        let record = play_match(&mut e, &mut opponent, true, &AtomicBool::new(false));
        assert!(!record.moves.is_empty());
        assert!(record.moves.len() <= 42);
        assert_eq!(record.moves[0].0, Side::Ai);
        assert_eq!(record.decision_times.len(), e.own_moves().len());
    }

    #[test]
    fn moves_alternate_sides() {
        let mut e = engine(3, 2);
        let mut opponent = RandomAgent::with_seed(2);
        let record = play_match(&mut e, &mut opponent, false, &AtomicBool::new(false));
        assert_eq!(record.moves[0].0, Side::Human);
        assert!(record.moves.windows(2).all(|w| w[0].0 != w[1].0));
    }

    #[test]
    fn abandoned_match_is_human_forfeit() {
        let mut e = engine(10, 3);
        let mut opponent = RandomAgent::with_seed(3);
        let record = play_match(&mut e, &mut opponent, true, &AtomicBool::new(true));
        assert_eq!(record.outcome, GameOutcome::Forfeit(Side::Human));
        assert!(record.moves.is_empty());
        assert!(e.own_moves().is_empty());
    }

    #[test]
    fn top_tier_beats_random_opponent() {
        let mut wins = 0;
        let total = 10;
        for seed in 0..total {
            let mut e = engine(8, seed);
            let mut opponent = RandomAgent::with_seed(seed + 100);
            let record = play_match(&mut e, &mut opponent, seed % 2 == 0, &AtomicBool::new(false));
            if record.result().winner == Some(Side::Ai) {
                wins += 1;
            }
        }
        assert!(wins >= 8, "engine won only {wins}/{total}");
    }

    #[test]
    fn scripted_opponent_is_profiled() {
        let mut e = engine(8, 4);
        let mut opponent = ScriptedAgent::new(vec![0, 6, 1, 5]);
        let record = play_match(&mut e, &mut opponent, false, &AtomicBool::new(false));
        let human: Vec<usize> = record
            .moves
            .iter()
            .filter(|(side, _)| *side == Side::Human)
            .map(|&(_, col)| col)
            .collect();
        // A human move that ends the match is never shown to the engine
        assert!(human.starts_with(e.opponent_moves()));
        assert!(e.opponent_moves().len() + 1 >= human.len());
    }
}
