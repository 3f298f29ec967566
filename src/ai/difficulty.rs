//! Difficulty tiers, rating bands, play styles and the per-tier calibration
//! tables that drive the turn policy.

use std::fmt;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ThinkingDelayConfig;

/// Engine strength on a 1..=10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: Difficulty = Difficulty(1);
    pub const MAX: Difficulty = Difficulty(10);

    /// Clamp `level` into 1..=10.
    pub fn new(level: u8) -> Self {
        Difficulty(level.clamp(Self::MIN.0, Self::MAX.0))
    }

    pub fn level(self) -> u8 {
        self.0
    }

    /// Map a skill rating to a tier: one plus the number of band thresholds
    /// the rating reaches. Non-decreasing in `rating` for ascending bands.
    pub fn from_rating(rating: u32, bands: &RatingBands) -> Self {
        let reached = bands.0.iter().filter(|&&threshold| rating >= threshold).count();
        Difficulty::new(u8::try_from(reached).unwrap_or(u8::MAX).saturating_add(1))
    }

    /// Chance the one-move block is attempted this turn.
    pub fn block_chance(self) -> f64 {
        match self.0 {
            0..=3 => 0.67,
            4..=6 => 0.80,
            7..=8 => 0.95,
            _ => 0.99,
        }
    }

    /// Search depth in plies, or `None` below the search tiers.
    pub fn search_depth(self) -> Option<usize> {
        match self.0 {
            8 => Some(3),
            9 => Some(4),
            10 => Some(5),
            _ => None,
        }
    }

    /// Chance the search result is thrown away to keep top tiers unpredictable.
    pub fn search_discard_chance(self) -> f64 {
        match self.0 {
            10 => 0.03,
            9 => 0.08,
            8 => 0.12,
            _ => 1.0,
        }
    }

    /// Chance the strategic move is swapped for a near-best alternative.
    pub fn alternative_move_chance(self) -> f64 {
        if self.0 >= 8 {
            0.12
        } else {
            0.15
        }
    }

    /// Whether opponent moves are worth recording at this tier.
    pub fn records_history(self) -> bool {
        self.0 >= 6
    }

    /// Simulated thinking time. Lower tiers think longer and vary more.
    pub fn thinking_delay<R: Rng + ?Sized>(self, config: &ThinkingDelayConfig, rng: &mut R) -> Duration {
        if !config.enabled {
            return Duration::ZERO;
        }
        let slack = u64::from(Self::MAX.0 - self.0);
        let fixed = config.base_ms + slack * config.per_level_ms;
        let jitter_cap = config.jitter_ms + slack * config.per_level_ms / 2;
        let jitter = if jitter_cap == 0 {
            0
        } else {
            rng.random_range(0..=jitter_cap)
        };
        Duration::from_millis(fixed + jitter)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Named practice-mode tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PracticeTier {
    Noob,
    Average,
    Good,
    Professional,
}

impl PracticeTier {
    pub fn difficulty(self) -> Difficulty {
        match self {
            PracticeTier::Noob => Difficulty(1),
            PracticeTier::Average => Difficulty(4),
            PracticeTier::Good => Difficulty(7),
            PracticeTier::Professional => Difficulty(10),
        }
    }
}

/// Ascending rating thresholds for tiers 2..=10.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingBands(pub Vec<u32>);

impl RatingBands {
    pub fn is_ascending(&self) -> bool {
        self.0.windows(2).all(|pair| pair[0] < pair[1])
    }
}

impl Default for RatingBands {
    fn default() -> Self {
        RatingBands(vec![800, 1000, 1200, 1400, 1600, 1800, 2000, 2200, 2400])
    }
}

/// Where an engine's difficulty comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifficultySource {
    Tier(PracticeTier),
    Rating(u32),
    Level(u8),
}

impl DifficultySource {
    pub fn resolve(self, bands: &RatingBands) -> Difficulty {
        match self {
            DifficultySource::Tier(tier) => tier.difficulty(),
            DifficultySource::Rating(rating) => Difficulty::from_rating(rating, bands),
            DifficultySource::Level(level) => Difficulty::new(level),
        }
    }
}

/// Opening temperament, picked once per engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayStyle {
    Aggressive,
    Defensive,
    Balanced,
    Opportunistic,
}

impl PlayStyle {
    pub const ALL: [PlayStyle; 4] = [
        PlayStyle::Aggressive,
        PlayStyle::Defensive,
        PlayStyle::Balanced,
        PlayStyle::Opportunistic,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Probability the opening override fires, and the columns it picks from.
    pub fn opening_bias(self) -> (f64, &'static [usize]) {
        match self {
            PlayStyle::Aggressive => (0.8, &[3]),
            PlayStyle::Balanced => (0.6, &[3]),
            PlayStyle::Defensive => (0.6, &[2, 4]),
            PlayStyle::Opportunistic => (0.5, &[1, 2, 3, 4, 5]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn new_clamps_into_range() {
        assert_eq!(Difficulty::new(0).level(), 1);
        assert_eq!(Difficulty::new(5).level(), 5);
        assert_eq!(Difficulty::new(42).level(), 10);
    }

    #[test]
    fn practice_tiers_map_to_levels() {
        assert_eq!(PracticeTier::Noob.difficulty().level(), 1);
        assert_eq!(PracticeTier::Average.difficulty().level(), 4);
        assert_eq!(PracticeTier::Good.difficulty().level(), 7);
        assert_eq!(PracticeTier::Professional.difficulty().level(), 10);
    }

    #[test]
    fn rating_mapping_is_monotonic() {
        let bands = RatingBands::default();
        let mut last = Difficulty::MIN;
        for rating in (0..3000).step_by(25) {
            let d = Difficulty::from_rating(rating, &bands);
            assert!(d >= last, "rating {rating} dropped to {d}");
            last = d;
        }
        assert_eq!(Difficulty::from_rating(0, &bands).level(), 1);
        assert_eq!(Difficulty::from_rating(1000, &bands).level(), 3);
        assert_eq!(Difficulty::from_rating(5000, &bands).level(), 10);
    }

    #[test]
    fn oversized_band_list_saturates_at_top_tier() {
        let bands = RatingBands((0..300).collect());
        assert_eq!(Difficulty::from_rating(5_000, &bands), Difficulty::MAX);
        assert_eq!(Difficulty::from_rating(3, &bands).level(), 5);
    }

    #[test]
    fn block_chance_is_non_decreasing() {
        let chances: Vec<f64> = (1..=10).map(|l| Difficulty::new(l).block_chance()).collect();
        assert!(chances.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(chances[0], 0.67);
        assert_eq!(chances[9], 0.99);
    }

    #[test]
    fn search_only_at_top_tiers() {
        assert_eq!(Difficulty::new(7).search_depth(), None);
        assert_eq!(Difficulty::new(8).search_depth(), Some(3));
        assert_eq!(Difficulty::new(9).search_depth(), Some(4));
        assert_eq!(Difficulty::new(10).search_depth(), Some(5));
    }

    #[test]
    fn lower_tiers_think_longer() {
        let config = ThinkingDelayConfig {
            enabled: true,
            base_ms: 400,
            per_level_ms: 100,
            jitter_ms: 0,
        };
        let mut rng = StdRng::seed_from_u64(1);
        let low = Difficulty::new(1).thinking_delay(&config, &mut rng);
        let high = Difficulty::new(10).thinking_delay(&config, &mut rng);
        // Slack jitter still applies to the low tier, so compare the floor
        assert!(low >= Duration::from_millis(400 + 900));
        assert_eq!(high, Duration::from_millis(400));
    }

    #[test]
    fn disabled_delay_is_zero() {
        let config = ThinkingDelayConfig {
            enabled: false,
            ..ThinkingDelayConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Difficulty::new(1).thinking_delay(&config, &mut rng), Duration::ZERO);
    }

    #[test]
    fn every_style_is_reachable() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(PlayStyle::random(&mut rng));
        }
        assert_eq!(seen.len(), PlayStyle::ALL.len());
    }
}
