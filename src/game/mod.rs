//! Core game logic module for Snake
//!
//! This module contains all the game rules without any I/O, timing or rendering
//! dependencies. Callers drive it by sending commands and calling `step` once
//! per tick, then read a [`Snapshot`] for display.

pub mod action;
pub mod config;
pub mod difficulty;
pub mod snake;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use config::GameConfig;
pub use difficulty::{Difficulty, MAX_SPEED, MIN_SPEED};
pub use snake::{Position, Snake};
pub use state::{ClockCommand, EndReason, GameState, GameStatus, Snapshot, StepResult};
