//! Headless match running: engine-vs-agent games, rolling metrics, and the
//! block-rate calibration harness.

pub mod calibration;
pub mod game;
pub mod metrics;

pub use calibration::{forced_block_board, measure_block_rate};
pub use game::{play_match, MatchRecord};
pub use metrics::{ArenaMetrics, MatchResult};
