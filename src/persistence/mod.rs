//! High score persistence
//!
//! The game reads the stored value once at startup and writes it back
//! whenever a finished game sets a new record.

pub mod high_score;

pub use high_score::{HighScoreRecord, HighScoreStore, JsonFileStore, MemoryStore};
