//! Logging setup for the application.

use crate::config::{AppConfig, GlobalLogLevel};
use env_logger::{Builder, Env};
use log::LevelFilter;

impl From<GlobalLogLevel> for LevelFilter {
    fn from(level: GlobalLogLevel) -> Self {
        match level {
            GlobalLogLevel::Trace => Self::Trace,
            GlobalLogLevel::Debug => Self::Debug,
            GlobalLogLevel::Info => Self::Info,
            GlobalLogLevel::Warn => Self::Warn,
            GlobalLogLevel::Error => Self::Error,
        }
    }
}

/// Initializes the logger from the application settings.
///
/// The `--log-level` flag sets the default for every module. If RUST_LOG is
/// set, its directives are applied on top, so e.g. `RUST_LOG=pipe_core=trace`
/// shows the search steps while everything else stays at the flag's level.
///
/// # Arguments
///
/// * `config` - The application configuration containing the log level setting
pub fn init_logger(config: &AppConfig) {
    let mut builder = Builder::new();
    builder.filter_level(config.log_level.into());

    // Layer RUST_LOG directives over the flag's default
    builder.parse_env(Env::default());

    // Another logger (e.g. in tests) may already be installed
    if builder.try_init().is_err() {
        log::debug!("Logger already initialized; keeping the existing one");
        return;
    }

    log::debug!("Logger initialized with global log level: {:?}", config.log_level);
}
