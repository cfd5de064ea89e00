use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::game::{Difficulty, GameConfig};
use grid_snake::modes::HumanMode;
use grid_snake::persistence::JsonFileStore;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake in the terminal with difficulty levels and a saved high score")]
struct Cli {
    /// JSON file with base game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Starting difficulty
    #[arg(long, value_enum)]
    difficulty: Option<DifficultyArg>,

    /// Wrap around the edges instead of dying at the walls
    #[arg(long)]
    no_walls: bool,

    /// Where the high score is kept
    #[arg(long, default_value = "snake_high_score.json")]
    high_score_file: PathBuf,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
    Extreme,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
            DifficultyArg::Extreme => Difficulty::Extreme,
        }
    }
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty.into();
        }
        if self.no_walls {
            config.wall_collision = false;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.game_config()?;
    let store = JsonFileStore::new(cli.high_score_file.clone());
    log::info!(
        "Starting {}x{} game, high score file {:?}",
        config.grid_width,
        config.grid_height,
        store.path()
    );

    let mut human_mode = HumanMode::new(config, store, cli.seed);
    human_mode.run().await?;

    Ok(())
}
