use anyhow::Context;
use clap::{CommandFactory, Parser};
use openflights_ingest::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and exit
    if args.command.is_none() {
        let _ = Args::command().print_help();
        println!();
        process::exit(0);
    }

    match run(args) {
        Ok(code) => process::exit(code),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

fn run(args: Args) -> anyhow::Result<i32> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;

    let outcome = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            Ok(()) = tokio::signal::ctrl_c() => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(openflights_ingest::Error::processing_interrupted(
                    "Processing interrupted by user",
                ))
            }
        }
    })?;

    Ok(outcome.map_or(0, |outcome| outcome.exit_code()))
}
