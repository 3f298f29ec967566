//! # Adaptive Connect Four
//!
//! A computer opponent for Connect Four that scales across ten difficulty
//! tiers: deliberate fallibility at the bottom, alpha-beta search and
//! opponent profiling at the top.
//!
//! ## Modules
//!
//! - [`game`] — Board model, sides, and the match state machine
//! - [`ai`] — Evaluator, threat detector, search, profiler, decision engine
//! - [`arena`] — Headless matches, rolling metrics, block-rate calibration
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod arena;
pub mod config;
pub mod error;
pub mod game;
