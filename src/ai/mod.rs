//! The adaptive opponent: static evaluation, threat detection, alpha-beta
//! search, opponent profiling and the tiered decision engine that composes
//! them.

mod agent;
mod difficulty;
mod engine;
pub mod evaluator;
mod hint;
pub mod policy;
pub mod profiler;
mod random;
mod scripted;
pub mod search;
pub mod threat;

pub use agent::Agent;
pub use difficulty::{Difficulty, DifficultySource, PlayStyle, PracticeTier, RatingBands};
pub use engine::DecisionEngine;
pub use evaluator::{evaluate, Heuristic, WindowHeuristic};
pub use hint::{CoachingHint, HintReason};
pub use policy::{PolicyStep, TURN_POLICY};
pub use profiler::OpponentProfiler;
pub use random::RandomAgent;
pub use scripted::ScriptedAgent;
pub use search::{SearchResult, Searcher};
pub use threat::ThreatRecord;
