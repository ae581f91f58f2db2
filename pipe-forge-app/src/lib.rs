//! Pipe Forge Application Library
//!
//! Configuration, batch execution, rendering and file output for the
//! `pipe-forge` command line tool.

pub mod config;
pub mod error;
pub mod execution;
pub mod logging;
pub mod output;
pub mod visualization;

pub use config::{AppConfig, PuzzleSettings};
pub use error::AppError;

use anyhow::Result;
use clap::Parser;

/// Entry point shared by the `pipe-forge` binary and the workspace root binary.
pub fn main() -> Result<()> {
    let config = AppConfig::parse();
    logging::init_logger(&config);

    log::info!("Pipe Forge App Starting");
    log::debug!("Loaded Config: {:?}", config);

    let settings = PuzzleSettings::load(&config)?;
    log::debug!("Puzzle settings: {:?}", settings);

    execution::run(&config, &settings)
}
