//! Command implementations for the OpenFlights ingest CLI
//!
//! Each command is implemented in its own module:
//! - `ingest`: Batch ingestion of data files with rejected-line reporting
//! - `check`: Validation of a single line
//! - `emissions`: Distance and carbon offset between two airports

pub mod check;
pub mod emissions;
pub mod ingest;
pub mod shared;

pub use shared::CommandOutcome;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Main command runner
///
/// Returns `Ok(None)` when no subcommand was given.
pub async fn run(args: Args) -> Result<Option<CommandOutcome>> {
    let outcome = match args.command {
        Some(Commands::Ingest(ingest_args)) => ingest::run_ingest(ingest_args).await?,
        Some(Commands::Check(check_args)) => check::run_check(check_args).await?,
        Some(Commands::Emissions(emissions_args)) => {
            emissions::run_emissions(emissions_args).await?
        }
        None => return Ok(None),
    };
    Ok(Some(outcome))
}
