use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::GameConfig;
use grid_snake::logging;
use grid_snake::modes::HumanMode;
use grid_snake::storage::FileHighScoreStore;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// Grid width (default: fit the terminal)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height (default: fit the terminal)
    #[arg(long)]
    height: Option<usize>,

    /// Milliseconds between two moves
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Length of the snake at the start of a game
    #[arg(long)]
    initial_length: Option<usize>,

    /// JSON file with game settings; command line flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where the best score is kept between runs
    #[arg(long, default_value = "snake_high_score.json")]
    high_score_file: PathBuf,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level filter (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    /// Defaults, then the config file, then command line flags
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if let Some(length) = self.initial_length {
            config.initial_snake_length = length;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }

    /// Without an explicit size or config file, the grid follows the terminal
    fn fit_to_terminal(&self) -> bool {
        self.width.is_none() && self.height.is_none() && self.config.is_none()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.log_file.as_deref(), &cli.log_level)?;

    let config = cli.game_config()?;
    let store = FileHighScoreStore::new(&cli.high_score_file);

    let mut human_mode = HumanMode::new(config, store, cli.fit_to_terminal());
    human_mode.run().await?;

    Ok(())
}
