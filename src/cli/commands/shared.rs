//! Shared components for CLI commands
//!
//! This module contains logging setup, configuration loading and progress
//! helpers used by every command implementation.

use crate::cli::args::CommonArgs;
use crate::config::Config;
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// How a command finished when it did not fail outright
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Everything checked was valid
    Success,
    /// The command ran but some input was rejected
    Rejected,
}

impl CommandOutcome {
    pub fn exit_code(self) -> i32 {
        match self {
            CommandOutcome::Success => 0,
            CommandOutcome::Rejected => 2,
        }
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("openflights_ingest={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration from the explicit file, the user file, or defaults
pub fn load_configuration(args: &CommonArgs) -> Result<Config> {
    match &args.config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => debug!("No config file given, checking the user configuration directory"),
    }
    Config::load_or_default(args.config_file.as_deref())
}

/// Expand glob patterns into a sorted, de-duplicated list of files
pub fn expand_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let paths = glob::glob(pattern).map_err(|e| {
            Error::configuration(format!("Invalid file pattern '{}': {}", pattern, e))
        })?;

        let before = files.len();
        for entry in paths {
            let path = entry.map_err(|e| {
                Error::io(
                    format!("Failed to read {}", e.path().display()),
                    e.into_error(),
                )
            })?;
            if path.is_file() {
                files.push(path);
            }
        }

        if files.len() == before {
            return Err(Error::configuration(format!(
                "No files match pattern '{}'",
                pattern
            )));
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Create a spinner for a single file, hidden when progress is off
pub fn create_spinner(message: String, show_progress: bool) -> ProgressBar {
    if !show_progress {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
