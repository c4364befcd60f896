//! Emissions command: distance and carbon offset between two airports

use super::shared::{CommandOutcome, create_spinner, load_configuration, setup_logging};
use crate::app::models::RecordKind;
use crate::app::services::airport_registry::{AirportRegistry, CoordinateLookup};
use crate::app::services::batch_ingestor::BatchIngestor;
use crate::app::services::emissions::RouteMetrics;
use crate::cli::args::{EmissionsArgs, OutputFormat};
use crate::{Error, Result};
use colored::*;
use serde_json::json;
use tracing::{info, warn};

/// Run the emissions command
pub async fn run_emissions(args: EmissionsArgs) -> Result<CommandOutcome> {
    setup_logging(&args.common)?;
    args.validate()?;

    let config = load_configuration(&args.common)?;
    let spinner = create_spinner(
        format!("Loading airports from {}", args.airports_file.display()),
        args.common.show_progress(),
    );

    let bytes = tokio::fs::read(&args.airports_file).await.map_err(|e| {
        Error::io(
            format!("Failed to read {}", args.airports_file.display()),
            e,
        )
    })?;
    let report = BatchIngestor::new(&config).ingest_reader(bytes.as_slice(), RecordKind::Airport)?;
    spinner.finish_and_clear();

    if report.invalid_count() > 0 {
        warn!(
            "{} airport lines were rejected and cannot be resolved",
            report.invalid_count()
        );
    }

    let registry = AirportRegistry::from_records(&report.records);
    info!("Loaded {} airports", registry.airport_count());
    let ambiguous = registry.ambiguous_codes();
    if !ambiguous.is_empty() {
        warn!("{} airport codes are ambiguous: {}", ambiguous.len(), ambiguous.join(", "));
    }

    let source = registry.lookup(&args.source)?;
    let destination = registry.lookup(&args.destination)?;
    let metrics = RouteMetrics::between(&source, &destination);

    match args.common.output_format {
        OutputFormat::Human => {
            println!(
                "{} {} ({}) → {} ({})",
                "Route".bright_green().bold(),
                args.source.to_uppercase(),
                source.name,
                args.destination.to_uppercase(),
                destination.name
            );
            println!("  Distance:        {:.2} km", metrics.distance_km);
            println!("  CO2 emissions:   {:.2} kg per passenger", metrics.chain.emissions_kg);
            println!("  Offset cost:     ${:.2} NZD", metrics.chain.dollar_offset);
            println!(
                "  Tree equivalent: {}",
                metrics.chain.trees.to_string().bright_white().bold()
            );
        }
        OutputFormat::Json => {
            let output = json!({
                "source": { "code": args.source, "location": source },
                "destination": { "code": args.destination, "location": destination },
                "metrics": metrics,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(CommandOutcome::Success)
}
