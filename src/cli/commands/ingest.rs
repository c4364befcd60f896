//! Ingest command: validate data files and report rejected lines

use super::shared::{CommandOutcome, create_spinner, expand_patterns, load_configuration, setup_logging};
use crate::app::adapters::persistence::MemoryStore;
use crate::app::services::batch_ingestor::{BatchIngestor, IngestReport};
use crate::cli::args::{IngestArgs, OutputFormat};
use crate::{Error, Result};
use colored::*;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;

/// Run the ingest command
pub async fn run_ingest(args: IngestArgs) -> Result<CommandOutcome> {
    setup_logging(&args.common)?;
    args.validate()?;

    let mut config = load_configuration(&args.common)?;
    if args.skip_blank_lines {
        config = config.without_blank_line_termination();
    }

    let files = expand_patterns(&args.patterns)?;
    info!("Ingesting {} {} file(s)", files.len(), args.kind);

    let ingestor = BatchIngestor::new(&config);
    let mut store = MemoryStore::new();
    let mut reports: Vec<(PathBuf, IngestReport)> = Vec::with_capacity(files.len());

    for file in files {
        let spinner = create_spinner(
            format!("Ingesting {}", file.display()),
            args.common.show_progress(),
        );

        let bytes = tokio::fs::read(&file)
            .await
            .map_err(|e| Error::io(format!("Failed to read {}", file.display()), e))?;
        let content = String::from_utf8_lossy(&bytes);
        let set_name = args.set_name.clone().unwrap_or_else(|| default_set_name(&file));
        let report = ingestor.upload(content.lines(), args.kind, &set_name, &mut store)?;

        spinner.finish_and_clear();
        if args.common.output_format == OutputFormat::Human {
            print_file_report(&file, &report);
        }
        reports.push((file, report));
    }

    let mut total = IngestReport::new(args.kind);
    for (_, report) in &reports {
        total.merge(report.clone());
    }

    match args.common.output_format {
        OutputFormat::Human => print_summary(&total),
        OutputFormat::Json => print_json(&reports, &total)?,
    }

    if total.invalid_count() == 0 {
        Ok(CommandOutcome::Success)
    } else {
        Ok(CommandOutcome::Rejected)
    }
}

fn default_set_name(file: &Path) -> String {
    file.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string())
}

fn print_file_report(file: &Path, report: &IngestReport) {
    let marker = if report.invalid_count() == 0 {
        "✓".bright_green().bold()
    } else {
        "✗".bright_red().bold()
    };

    println!(
        "{} {}: {} records, {} invalid lines",
        marker,
        file.display(),
        report.valid_count().to_string().bright_white().bold(),
        report.invalid_count().to_string().bright_white().bold()
    );

    for invalid in &report.invalid_lines {
        println!(
            "  {} {}",
            format!("line {}:", invalid.line_number).dimmed(),
            invalid.to_string().yellow()
        );
    }

    if let Some(line) = report.stats.stopped_at_line {
        println!("  {}", format!("stopped at blank line {}", line).dimmed());
    }
}

fn print_summary(total: &IngestReport) {
    let stats = &total.stats;
    println!("\n{}", "Ingestion Summary".bright_green().bold());
    println!("  Lines read:     {}", stats.lines_read);
    println!("  Records parsed: {}", stats.records_parsed);
    println!("  Lines rejected: {}", stats.lines_rejected);

    let rate = format!("{:.1}%", stats.success_rate());
    let rate = if stats.is_successful() {
        rate.bright_green()
    } else {
        rate.bright_yellow()
    };
    println!("  Success rate:   {}", rate);
}

fn print_json(reports: &[(PathBuf, IngestReport)], total: &IngestReport) -> Result<()> {
    let files: Vec<_> = reports
        .iter()
        .map(|(path, report)| {
            json!({
                "path": path.display().to_string(),
                "stats": report.stats,
                "invalid_lines": report.invalid_lines,
            })
        })
        .collect();

    let output = json!({
        "kind": total.kind,
        "files": files,
        "stats": total.stats,
        "success_rate": total.stats.success_rate(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
