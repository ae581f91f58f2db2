use pipe_core::PuzzleError;
use thiserror::Error;

/// Errors surfaced by the application layer.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Settings Error: {0}")]
    Figment(#[from] figment::Error),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Puzzle Error: {0}")]
    Puzzle(#[from] PuzzleError),

    #[error("Serialization Error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),
}
