//! Measures how often each tier stops a one-move loss.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::ai::{DecisionEngine, Difficulty, DifficultySource, PolicyStep};
use crate::config::EngineConfig;
use crate::game::Board;

/// Three human pieces on the bottom row; columns 0 and 4 both block.
pub fn forced_block_board() -> Board {
    Board::from_rows([
        ".......",
        ".......",
        ".......",
        ".......",
        ".......",
        ".XXX...",
    ])
}

/// Fraction of `trials` in which the one-move block step fires at
/// `difficulty` on [`forced_block_board`].
pub fn measure_block_rate(difficulty: Difficulty, trials: usize, seed: u64) -> f64 {
    if trials == 0 {
        return 0.0;
    }
    let board = forced_block_board();
    let config = EngineConfig::instant(seed);
    let mut engine = DecisionEngine::with_rng(
        DifficultySource::Level(difficulty.level()),
        &config,
        StdRng::seed_from_u64(seed),
    );
    let blocked = (0..trials)
        .filter(|_| {
            matches!(
                engine.run_step(PolicyStep::ImmediateBlock, &board, false),
                Some(0) | Some(4)
            )
        })
        .count();
    blocked as f64 / trials as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_rate_tracks_each_tier() {
        let trials = 10_000;
        let rates: Vec<f64> = (1..=10)
            .map(|level| {
                let d = Difficulty::new(level);
                let rate = measure_block_rate(d, trials, 1234 + u64::from(level));
                // Four standard deviations at the widest band is under 0.02
                assert!(
                    (rate - d.block_chance()).abs() < 0.02,
                    "level {level}: measured {rate}, expected {}",
                    d.block_chance()
                );
                rate
            })
            .collect();
        // One representative per band: 1..=3, 4..=6, 7..=8, 9..=10
        assert!(rates[2] < rates[3]);
        assert!(rates[5] < rates[6]);
        assert!(rates[7] < rates[8]);
    }

    #[test]
    fn zero_trials_is_zero() {
        assert_eq!(measure_block_rate(Difficulty::MAX, 0, 0), 0.0);
    }
}
