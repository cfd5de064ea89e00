//! Grid Snake - a terminal snake game with difficulty levels and a persistent high score
//!
//! This library provides:
//! - Core game rules and state (game module)
//! - Tick scheduling decoupled from the rules (clock module)
//! - A session tying state, clock and high score storage together (session module)
//! - High score persistence (persistence module)
//! - TUI rendering, keyboard input and the interactive mode (render, input, modes)

pub mod clock;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod persistence;
pub mod render;
pub mod session;
