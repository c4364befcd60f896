//! Check command: validate a single data line

use super::shared::{CommandOutcome, load_configuration, setup_logging};
use crate::app::services::record_parser::RecordParser;
use crate::cli::args::{CheckArgs, OutputFormat};
use crate::Result;
use colored::*;
use serde_json::json;

/// Run the check command
pub async fn run_check(args: CheckArgs) -> Result<CommandOutcome> {
    setup_logging(&args.common)?;
    args.common.validate()?;

    let config = load_configuration(&args.common)?;
    let parser = RecordParser::new(&config);
    let result = parser.parse_line(args.kind, &args.line);

    match (&result, args.common.output_format) {
        (Ok(record), OutputFormat::Human) => {
            println!("{} {}", "✓ Valid".bright_green().bold(), args.kind);
            for (column, value) in record.field_map().iter() {
                println!("  {:<20} {}", column, value);
            }
        }
        (Err(errors), OutputFormat::Human) => {
            println!("{} {}", "✗ Invalid".bright_red().bold(), args.kind);
            for message in errors.messages() {
                println!("  {}", message.yellow());
            }
        }
        (Ok(record), OutputFormat::Json) => {
            let output = json!({
                "valid": true,
                "kind": args.kind,
                "fields": record.field_map(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        (Err(errors), OutputFormat::Json) => {
            let output = json!({
                "valid": false,
                "kind": args.kind,
                "errors": errors.messages(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(match result {
        Ok(_) => CommandOutcome::Success,
        Err(_) => CommandOutcome::Rejected,
    })
}
