//! # Connect Four AI
//!
//! A Connect Four engine with an incrementally maintained line registry and an
//! iterative-deepening alpha-beta search under a wall-clock budget. Ships a
//! terminal UI built with Ratatui and a headless self-play runner.
//!
//! ## Modules
//!
//! - [`game`]: board, players, line registry, position hashing
//! - [`ai`]: evaluator, search tree, alpha-beta search, agents
//! - [`ui`]: terminal game view
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod ui;
