//! The per-match decision engine: owns difficulty, play style, move
//! histories and the random source, and walks [`TURN_POLICY`] each turn.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{EngineConfig, ThinkingDelayConfig};
use crate::game::{Board, Side, COLS};

use super::difficulty::{Difficulty, DifficultySource, PlayStyle};
use super::evaluator::evaluate;
use super::hint::{CoachingHint, HintReason};
use super::policy::{PolicyStep, TURN_POLICY};
use super::profiler::{counter_move, find_fork_move, OpponentProfiler};
use super::search::Searcher;
use super::threat::{find_winning_move, top_threat, SEVERITY_BUILDING, SEVERITY_WIN};

const ME: Side = Side::Ai;
const CENTER: usize = COLS / 2;
const CENTER_COLUMNS: [usize; 3] = [2, 3, 4];

const THREAT_BUILDING_CHANCE: f64 = 0.7;
const COUNTER_MOVE_CHANCE: f64 = 0.4;
const CENTER_FALLBACK_CHANCE: f64 = 0.7;
/// Alternatives may trail the best strategic score by at most
/// `1 - ALTERNATIVE_SCORE_RATIO` of its magnitude.
const ALTERNATIVE_SCORE_RATIO: f64 = 0.7;
/// Coaching only recommends positional moves above this score.
const HINT_MIN_SCORE: i32 = 3;

/// Computer opponent for one match. Not shared between matches.
pub struct DecisionEngine<R = StdRng> {
    difficulty: Difficulty,
    style: PlayStyle,
    delay: ThinkingDelayConfig,
    rng: R,
    own_moves: Vec<usize>,
    profiler: OpponentProfiler,
}

impl DecisionEngine<StdRng> {
    /// Build an engine seeded from `config.seed`, or from OS entropy.
    pub fn new(source: DifficultySource, config: &EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(source, config, rng)
    }
}

impl<R: Rng> DecisionEngine<R> {
    pub fn with_rng(source: DifficultySource, config: &EngineConfig, mut rng: R) -> Self {
        let difficulty = source.resolve(&config.rating_bands);
        let style = PlayStyle::random(&mut rng);
        debug!("new engine: difficulty {difficulty}, style {style:?}");
        DecisionEngine {
            difficulty,
            style,
            delay: config.thinking_delay.clone(),
            rng,
            own_moves: Vec::new(),
            profiler: OpponentProfiler::new(),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn play_style(&self) -> PlayStyle {
        self.style
    }

    pub fn own_moves(&self) -> &[usize] {
        &self.own_moves
    }

    pub fn opponent_moves(&self) -> &[usize] {
        self.profiler.moves()
    }

    /// Draw this turn's simulated thinking time.
    pub fn thinking_delay(&mut self) -> Duration {
        self.difficulty.thinking_delay(&self.delay, &mut self.rng)
    }

    /// Feed the profiler with a human move. Ignored below the tiers that
    /// profile the opponent.
    pub fn observe_opponent_move(&mut self, column: usize) {
        if self.difficulty.records_history() && column < COLS {
            self.profiler.record(column);
        }
    }

    /// Wait out the thinking delay, then decide. `None` means no legal
    /// column exists and the match is a draw.
    pub fn choose_move(
        &mut self,
        board: &Board,
        is_first_move: bool,
        last_opponent_move: Option<usize>,
    ) -> Option<usize> {
        let delay = self.thinking_delay();
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        self.decide(board, is_first_move, last_opponent_move)
    }

    /// Like [`DecisionEngine::choose_move`], but gives up without deciding
    /// if `cancelled` is raised while thinking.
    pub fn choose_move_cancellable(
        &mut self,
        board: &Board,
        is_first_move: bool,
        last_opponent_move: Option<usize>,
        cancelled: &AtomicBool,
    ) -> Option<usize> {
        let delay = self.thinking_delay();
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        if cancelled.load(Ordering::Acquire) {
            debug!("decision cancelled after {delay:?}");
            return None;
        }
        self.decide(board, is_first_move, last_opponent_move)
    }

    /// Run the turn policy against `board` with no delay.
    pub fn decide(
        &mut self,
        board: &Board,
        is_first_move: bool,
        last_opponent_move: Option<usize>,
    ) -> Option<usize> {
        if let Some(col) = last_opponent_move {
            self.observe_opponent_move(col);
        }
        if board.is_full() {
            return None;
        }

        for step in TURN_POLICY {
            if !step.enabled_at(self.difficulty) {
                continue;
            }
            if let Some(col) = self.run_step(step, board, is_first_move) {
                debug!("difficulty {}: {step} chose column {col}", self.difficulty);
                self.own_moves.push(col);
                return Some(col);
            }
        }
        None
    }

    /// Evaluate a single policy step, ignoring its difficulty gate.
    pub fn run_step(&mut self, step: PolicyStep, board: &Board, is_first_move: bool) -> Option<usize> {
        match step {
            PolicyStep::Opening => self.opening_move(board, is_first_move),
            PolicyStep::ImmediateWin => find_winning_move(board, ME),
            PolicyStep::ImmediateBlock => self.immediate_block(board),
            PolicyStep::ThreatBlock => self.threat_block(board),
            PolicyStep::Search => self.search_move(board),
            PolicyStep::PatternCounter => self.pattern_counter(board),
            PolicyStep::Strategic => self.strategic_move(board),
            PolicyStep::Fallback => self.fallback_move(board),
        }
    }

    fn opening_move(&mut self, board: &Board, is_first_move: bool) -> Option<usize> {
        if !is_first_move {
            return None;
        }
        let (chance, columns) = self.style.opening_bias();
        if !self.rng.random_bool(chance) {
            return None;
        }
        let legal: Vec<usize> = columns
            .iter()
            .copied()
            .filter(|&col| !board.is_column_full(col))
            .collect();
        self.pick(&legal)
    }

    fn immediate_block(&mut self, board: &Board) -> Option<usize> {
        let col = find_winning_move(board, ME.other())?;
        if self.rng.random_bool(self.difficulty.block_chance()) {
            Some(col)
        } else {
            debug!("difficulty {}: missed block at column {col}", self.difficulty);
            None
        }
    }

    fn threat_block(&mut self, board: &Board) -> Option<usize> {
        let threat = top_threat(board, ME)?;
        let level = self.difficulty.level();
        let act = if level >= 7 {
            threat.severity >= SEVERITY_BUILDING
        } else if threat.severity >= SEVERITY_WIN {
            true
        } else {
            threat.severity >= SEVERITY_BUILDING && self.rng.random_bool(THREAT_BUILDING_CHANCE)
        };
        act.then_some(threat.column)
    }

    fn search_move(&mut self, board: &Board) -> Option<usize> {
        let depth = self.difficulty.search_depth()?;
        if self.rng.random_bool(self.difficulty.search_discard_chance()) {
            debug!("difficulty {}: search result discarded", self.difficulty);
            return None;
        }
        Searcher::new(depth).search(board, ME).column
    }

    fn pattern_counter(&mut self, board: &Board) -> Option<usize> {
        if self.difficulty.level() >= 8 && self.profiler.has_repeated_pattern() {
            if let Some(col) = find_fork_move(board, ME) {
                debug!("repeated opponent pattern: setting fork at column {col}");
                return Some(col);
            }
        }
        let favored = self.profiler.favored_columns();
        if favored.is_empty() || !self.rng.random_bool(COUNTER_MOVE_CHANCE) {
            return None;
        }
        counter_move(board, ME, &favored)
    }

    fn strategic_move(&mut self, board: &Board) -> Option<usize> {
        let scored = scored_columns(board, ME);
        let (best_col, best_score) = clear_best(&scored)?;
        if self.rng.random_bool(self.difficulty.alternative_move_chance()) {
            let slack = f64::from(best_score.abs()) * (1.0 - ALTERNATIVE_SCORE_RATIO);
            let floor = f64::from(best_score) - slack;
            let alternatives: Vec<usize> = scored
                .iter()
                .filter(|&&(col, score)| col != best_col && f64::from(score) >= floor)
                .map(|&(col, _)| col)
                .collect();
            if let Some(col) = self.pick(&alternatives) {
                return Some(col);
            }
        }
        Some(best_col)
    }

    fn fallback_move(&mut self, board: &Board) -> Option<usize> {
        let legal = board.available_columns();
        if self.difficulty.level() >= 3 && self.rng.random_bool(CENTER_FALLBACK_CHANCE) {
            let centers: Vec<usize> = legal
                .iter()
                .copied()
                .filter(|col| CENTER_COLUMNS.contains(col))
                .collect();
            if let Some(col) = self.pick(&centers) {
                return Some(col);
            }
        }
        self.pick(&legal)
    }

    fn pick(&mut self, columns: &[usize]) -> Option<usize> {
        if columns.is_empty() {
            return None;
        }
        Some(columns[self.rng.random_range(0..columns.len())])
    }
}

impl<R> DecisionEngine<R> {
    /// Deterministic best column for the engine's side: win, block, best
    /// static score unless all columns tie, then the column nearest the center.
    pub fn best_move(&self, board: &Board) -> Option<usize> {
        find_winning_move(board, ME)
            .or_else(|| find_winning_move(board, ME.other()))
            .or_else(|| {
                clear_best(&scored_columns(board, ME)).map(|(col, _)| col)
            })
            .or_else(|| center_most(board))
    }

    /// A suggestion for the human side of the match.
    pub fn coaching_hint(&self, board: &Board) -> Option<CoachingHint> {
        let human = ME.other();
        if let Some(col) = find_winning_move(board, human) {
            return Some(CoachingHint::new(col, HintReason::Win));
        }
        if let Some(col) = find_winning_move(board, ME) {
            return Some(CoachingHint::new(col, HintReason::Block));
        }
        if let Some((col, _)) =
            best_scored(&scored_columns(board, human)).filter(|&(_, score)| score > HINT_MIN_SCORE)
        {
            return Some(CoachingHint::new(col, HintReason::Improve));
        }
        center_most(board).map(|col| CoachingHint::new(col, HintReason::Center))
    }
}

/// Static score for `side` after dropping in each legal column.
fn scored_columns(board: &Board, side: Side) -> Vec<(usize, i32)> {
    board
        .available_columns()
        .into_iter()
        .filter_map(|col| board.with_drop(col, side).ok().map(|next| (col, evaluate(&next, side))))
        .collect()
}

/// Highest score, leftmost column on ties.
fn best_scored(scored: &[(usize, i32)]) -> Option<(usize, i32)> {
    scored
        .iter()
        .copied()
        .fold(None, |best: Option<(usize, i32)>, item| match best {
            Some(b) if b.1 >= item.1 => Some(b),
            _ => Some(item),
        })
}

/// Best entry, or `None` on a quiet board where every column scores the same.
fn clear_best(scored: &[(usize, i32)]) -> Option<(usize, i32)> {
    let best = best_scored(scored)?;
    scored.iter().any(|&(_, score)| score != best.1).then_some(best)
}

fn center_most(board: &Board) -> Option<usize> {
    board
        .available_columns()
        .into_iter()
        .min_by_key(|&col| (col.abs_diff(CENTER), col))
}
