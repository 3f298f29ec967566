use std::collections::VecDeque;
use std::time::Duration;

use crate::game::Side;

/// Result of a single match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub winner: Option<Side>,
    pub length: usize,
}

/// Rolling match statistics from the engine's point of view.
pub struct ArenaMetrics {
    results: VecDeque<MatchResult>,
    decision_micros: VecDeque<u64>,
    capacity: usize,
    total_matches: usize, // lifetime count, never capped
}

impl ArenaMetrics {
    pub fn with_capacity(capacity: usize) -> Self {
        ArenaMetrics {
            results: VecDeque::with_capacity(capacity),
            decision_micros: VecDeque::with_capacity(capacity),
            capacity,
            total_matches: 0,
        }
    }

    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn record_match(&mut self, result: MatchResult) {
        self.total_matches += 1;
        self.results.push_back(result);
        if self.results.len() > self.capacity {
            self.results.pop_front();
        }
    }

    pub fn record_decision_time(&mut self, d: Duration) {
        self.decision_micros.push_back(d.as_micros() as u64);
        if self.decision_micros.len() > self.capacity {
            self.decision_micros.pop_front();
        }
    }

    pub fn total_matches(&self) -> usize {
        self.total_matches
    }

    fn rate_of(&self, last_n: usize, pred: impl Fn(&MatchResult) -> bool) -> f32 {
        let n = self.results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let hits = self.results.iter().rev().take(n).filter(|r| pred(r)).count();
        hits as f32 / n as f32
    }

    /// Engine win rate over the last N matches.
    pub fn win_rate(&self, last_n: usize) -> f32 {
        self.rate_of(last_n, |r| r.winner == Some(Side::Ai))
    }

    /// Engine loss rate over the last N matches.
    pub fn loss_rate(&self, last_n: usize) -> f32 {
        self.rate_of(last_n, |r| r.winner == Some(Side::Human))
    }

    /// Draw rate over the last N matches.
    pub fn draw_rate(&self, last_n: usize) -> f32 {
        self.rate_of(last_n, |r| r.winner.is_none())
    }

    /// Average match length (in moves) over the last N matches.
    pub fn average_length(&self, last_n: usize) -> f32 {
        let n = self.results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let total: usize = self.results.iter().rev().take(n).map(|r| r.length).sum();
        total as f32 / n as f32
    }

    /// Mean engine decision time in milliseconds over the last N decisions.
    pub fn avg_decision_ms(&self, last_n: usize) -> f32 {
        let n = self.decision_micros.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let mean = self
            .decision_micros
            .iter()
            .rev()
            .take(n)
            .map(|&v| v as f64)
            .sum::<f64>()
            / n as f64;
        (mean / 1000.0) as f32
    }
}

impl Default for ArenaMetrics {
    fn default() -> Self {
        Self::new()
    }
}
