//! # Minimax Connect Four
//!
//! Connect Four against a depth-limited minimax opponent. The engine searches
//! every line of play to a fixed ply budget without pruning and scores the
//! horizon with a window-counting heuristic. A terminal UI built with Ratatui
//! and a headless match runner sit on top.
//!
//! ## Modules
//!
//! - [`game`]: Board, scoring, player, and the game session
//! - [`ai`]: Minimax search, depth policies, agents, background worker
//! - [`ui`]: Terminal UI for playing against the computer
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod ui;
