//! Command-line configuration and logger setup.

use std::fs::File;
use std::path::PathBuf;

use clap::Parser;

use crate::consts::MOUSE_SENSITIVITY;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Parser)]
#[command(name = "cube_shooter", version, about = "First-person cube shooter for the terminal")]
pub struct Config {
    /// Seed for enemy placement and timers; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Mouse-look radians per virtual pixel.
    #[arg(long, default_value_t = MOUSE_SENSITIVITY)]
    pub sensitivity: f32,

    /// Arrow-key look speed in radians per second.
    #[arg(long, default_value_t = 1.5)]
    pub look_speed: f32,

    /// Write logs here (filtered by RUST_LOG). The terminal is the game
    /// screen, so without this flag nothing is logged.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Route `log` output to the configured file, if any.
pub fn init_logging(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path).map_err(|source| Error::LogFile {
        path: path.display().to_string(),
        source,
    })?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}
