//! Command-line argument definitions for the OpenFlights ingest tool
//!
//! This module defines the CLI interface using the clap derive API.

use crate::app::models::RecordKind;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the OpenFlights ingest tool
///
/// Validates OpenFlights airline, airport, route and flight path data files
/// and computes route distances and carbon offsets.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "openflights-ingest",
    version,
    about = "Validate OpenFlights data files and compute route carbon offsets",
    long_about = "Validates OpenFlights-style airline, airport, route and flight path records \
                  line by line, reporting every rejected line with the reason it was rejected, \
                  and computes great-circle route distances with their CO2 emissions, offset \
                  cost and tree equivalent."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Ingest data files and report rejected lines
    Ingest(IngestArgs),
    /// Validate a single data line
    Check(CheckArgs),
    /// Compute distance and emissions between two airports
    Emissions(EmissionsArgs),
}

/// Flags shared by every subcommand
#[derive(Debug, Clone, Parser)]
pub struct CommonArgs {
    /// Path to configuration file
    ///
    /// TOML configuration file for ingestion settings and the route column
    /// layout. If not specified, looks for openflights-ingest/config.toml in
    /// the user configuration directory.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings and hides progress.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for results
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the ingest command
#[derive(Debug, Clone, Parser)]
pub struct IngestArgs {
    /// Kind of record every file holds: airline, airport, route or flightpath
    #[arg(value_name = "KIND")]
    pub kind: RecordKind,

    /// Data files or glob patterns, e.g. "data/*.dat"
    #[arg(value_name = "PATTERN", required = true)]
    pub patterns: Vec<String>,

    /// Name of the upload set the records join
    ///
    /// Defaults to the file name of each input file.
    #[arg(long = "set", value_name = "NAME", help = "Upload set name")]
    pub set_name: Option<String>,

    /// Keep reading past blank lines instead of stopping at the first one
    #[arg(long = "skip-blank-lines", help = "Skip blank lines instead of ending the input")]
    pub skip_blank_lines: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the check command
#[derive(Debug, Clone, Parser)]
pub struct CheckArgs {
    /// Kind of record the line holds
    #[arg(value_name = "KIND")]
    pub kind: RecordKind,

    /// Raw data line, quoted as one shell argument
    #[arg(value_name = "LINE", allow_hyphen_values = true)]
    pub line: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the emissions command
#[derive(Debug, Clone, Parser)]
pub struct EmissionsArgs {
    /// Airports data file used to resolve airport codes
    #[arg(
        short = 'a',
        long = "airports",
        value_name = "FILE",
        help = "Airports data file (airports.dat format)"
    )]
    pub airports_file: PathBuf,

    /// Source airport IATA or ICAO code
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Destination airport IATA or ICAO code
    #[arg(value_name = "DESTINATION")]
    pub destination: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Output format options for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl CommonArgs {
    /// Validate the shared arguments
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }
        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress (not in quiet mode, not JSON)
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.output_format == OutputFormat::Human
    }
}

impl IngestArgs {
    /// Validate the ingest command arguments
    pub fn validate(&self) -> Result<()> {
        self.common.validate()?;

        if let Some(set_name) = &self.set_name {
            if set_name.trim().is_empty() {
                return Err(Error::configuration("Set name cannot be empty"));
            }
        }

        Ok(())
    }
}

impl EmissionsArgs {
    /// Validate the emissions command arguments
    pub fn validate(&self) -> Result<()> {
        self.common.validate()?;

        if !self.airports_file.is_file() {
            return Err(Error::configuration(format!(
                "Airports file does not exist: {}",
                self.airports_file.display()
            )));
        }

        for code in [&self.source, &self.destination] {
            if code.trim().is_empty() {
                return Err(Error::configuration("Airport code cannot be empty"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ingest_command() {
        let args = Args::try_parse_from([
            "openflights-ingest",
            "ingest",
            "airports",
            "data/airports.dat",
            "extra/*.dat",
            "--set",
            "Airports 2020",
            "-vv",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Ingest(ingest)) => {
                assert_eq!(ingest.kind, RecordKind::Airport);
                assert_eq!(ingest.patterns.len(), 2);
                assert_eq!(ingest.set_name.as_deref(), Some("Airports 2020"));
                assert_eq!(ingest.common.get_log_level(), "debug");
                assert!(ingest.validate().is_ok());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_check_command_with_json_output() {
        let args = Args::try_parse_from([
            "openflights-ingest",
            "check",
            "route",
            "BA,1355,SIN,3316,MEL,3339,Y,0,744",
            "--output-format",
            "json",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Check(check)) => {
                assert_eq!(check.kind, RecordKind::Route);
                assert_eq!(check.common.output_format, OutputFormat::Json);
                assert!(!check.common.show_progress());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let result = Args::try_parse_from(["openflights-ingest", "check", "runway", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Args::try_parse_from([
            "openflights-ingest",
            "ingest",
            "route",
            "routes.dat",
            "-q",
            "-v",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_levels() {
        let common = CommonArgs {
            config_file: None,
            verbose: 0,
            quiet: true,
            output_format: OutputFormat::Human,
        };
        assert_eq!(common.get_log_level(), "error");
        assert!(!common.show_progress());

        let verbose = CommonArgs {
            verbose: 3,
            quiet: false,
            ..common
        };
        assert_eq!(verbose.get_log_level(), "trace");
    }

    #[test]
    fn test_emissions_requires_existing_airports_file() {
        let args = Args::try_parse_from([
            "openflights-ingest",
            "emissions",
            "--airports",
            "/definitely/not/airports.dat",
            "GKA",
            "MAG",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Emissions(emissions)) => assert!(emissions.validate().is_err()),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_missing_config_file_fails_validation() {
        let common = CommonArgs {
            config_file: Some(PathBuf::from("/definitely/not/config.toml")),
            verbose: 0,
            quiet: false,
            output_format: OutputFormat::Human,
        };
        assert!(common.validate().is_err());
    }
}
