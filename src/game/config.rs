use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::difficulty::Difficulty;
use super::snake::Position;

/// Configuration for the game
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// End the game on hitting the border instead of wrapping around
    pub wall_collision: bool,
    /// Difficulty selected before the first game
    pub difficulty: Difficulty,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 30,
            grid_height: 20,
            initial_snake_length: 3,
            wall_collision: true,
            difficulty: Difficulty::default(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig =
            serde_json::from_str(&json).with_context(|| format!("Invalid config in {:?}", path))?;
        Ok(config)
    }

    /// Reject configurations the game cannot be played on
    pub fn validate(&self) -> Result<()> {
        ensure!(self.initial_snake_length >= 1, "initial snake length must be at least 1");
        ensure!(
            self.grid_width >= self.initial_snake_length,
            "grid width {} cannot fit a snake of length {}",
            self.grid_width,
            self.initial_snake_length
        );
        ensure!(self.grid_height >= 1, "grid height must be at least 1");
        ensure!(
            self.cell_count() > self.initial_snake_length,
            "grid {}x{} leaves no room for food",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.grid_width <= i32::MAX as usize && self.grid_height <= i32::MAX as usize,
            "grid is too large"
        );
        Ok(())
    }

    pub fn cell_count(&self) -> usize {
        self.grid_width * self.grid_height
    }

    /// Head of the canonical starting snake
    ///
    /// The body trails to the left, so the head sits far enough right to fit it.
    pub fn initial_head(&self) -> Position {
        let x = (self.initial_snake_length + 3).min(self.grid_width.saturating_sub(1));
        Position::new(x as i32, (self.grid_height / 2) as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 30);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.initial_snake_length, 3);
        assert!(config.wall_collision);
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_initial_head() {
        assert_eq!(GameConfig::default().initial_head(), Position::new(6, 10));
        assert_eq!(GameConfig::small().initial_head(), Position::new(6, 5));
        assert_eq!(GameConfig::new(4, 3).initial_head(), Position::new(3, 1));
    }

    #[test]
    fn test_validation() {
        assert!(GameConfig::new(2, 10).validate().is_err());
        assert!(GameConfig::new(3, 1).validate().is_err());
        assert!(GameConfig::new(4, 1).validate().is_ok());

        let mut config = GameConfig::small();
        config.initial_snake_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snake.json");
        std::fs::write(&path, r#"{ "grid_width": 15, "difficulty": "hard" }"#).unwrap();

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(GameConfig::load(&dir.path().join("missing.json")).is_err());
    }
}
