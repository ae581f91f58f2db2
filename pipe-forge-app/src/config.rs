use crate::error::AppError;
use clap::{Parser, ValueEnum};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use pipe_core::DEFAULT_EPSILON;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix of environment variables that override file settings.
pub const ENV_PREFIX: &str = "PIPE_FORGE_";

/// Represents the different visualization modes available.
#[derive(ValueEnum, Clone, Debug, Default, PartialEq)]
pub enum VisualizationMode {
    None,
    #[default]
    Terminal, // Box-drawing board on stdout
}

/// Log level applied to every module unless RUST_LOG says otherwise.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GlobalLogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

/// Command line configuration for the Pipe Forge application.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct AppConfig {
    /// Optional TOML file with puzzle settings (rows, cols, seed, epsilon).
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of grid rows. Overrides the config file.
    #[arg(long)]
    pub rows: Option<usize>,

    /// Number of grid columns. Overrides the config file.
    #[arg(long)]
    pub cols: Option<usize>,

    /// Seed for the random number generator. Puzzle `i` of a batch uses `seed + i`.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Angular tolerance in degrees when checking `--angles`.
    #[arg(long)]
    pub epsilon: Option<f32>,

    /// Number of puzzles to generate.
    #[arg(long, default_value_t = 1)]
    pub count: usize,

    /// Path to save the generated puzzles as JSON.
    #[arg(short, long, value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Path to save the scrambled boards as plain text.
    #[arg(long, value_name = "FILE")]
    pub text_output: Option<PathBuf>,

    /// Choose the visualization mode.
    #[arg(long, value_enum, default_value_t = VisualizationMode::Terminal)]
    pub visualization_mode: VisualizationMode,

    /// Also draw each puzzle in its solved orientation.
    #[arg(long, default_value_t = false)]
    pub show_solution: bool,

    /// Optional: Path to save per-puzzle statistics as a CSV file.
    #[arg(long, value_name = "CSV_FILE")]
    pub stats_csv: Option<PathBuf>,

    /// Piece angles in degrees, in path order, to check against the first puzzle.
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub angles: Option<Vec<f32>>,

    /// Disable colored terminal output.
    #[arg(long, default_value_t = false)]
    pub no_color: bool,

    /// Global log level.
    #[arg(long, value_enum, default_value_t = GlobalLogLevel::Info)]
    pub log_level: GlobalLogLevel,
}

/// Puzzle parameters after merging defaults, config file, environment and flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleSettings {
    pub rows: usize,
    pub cols: usize,
    pub seed: Option<u64>,
    pub epsilon: f32,
}

impl Default for PuzzleSettings {
    fn default() -> Self {
        Self {
            rows: 6,
            cols: 6,
            seed: None,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl PuzzleSettings {
    /// Layers defaults, the optional TOML file and `PIPE_FORGE_*` variables,
    /// then applies explicit command line flags on top.
    pub fn load(config: &AppConfig) -> Result<Self, AppError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = &config.config {
            if !path.is_file() {
                return Err(AppError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            figment = figment.merge(Toml::file(path));
        }
        let mut settings: Self = figment.merge(Env::prefixed(ENV_PREFIX)).extract()?;

        if let Some(rows) = config.rows {
            settings.rows = rows;
        }
        if let Some(cols) = config.cols {
            settings.cols = cols;
        }
        if config.seed.is_some() {
            settings.seed = config.seed;
        }
        if let Some(epsilon) = config.epsilon {
            settings.epsilon = epsilon;
        }

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(AppError::Config(format!(
                "Grid must be at least 1x1, got {}x{}",
                self.rows, self.cols
            )));
        }
        // Past 45 degrees neighbouring buckets overlap.
        if !self.epsilon.is_finite() || self.epsilon < 0.0 || self.epsilon >= 45.0 {
            return Err(AppError::Config(format!(
                "Epsilon must be in [0, 45), got {}",
                self.epsilon
            )));
        }
        Ok(())
    }
}
