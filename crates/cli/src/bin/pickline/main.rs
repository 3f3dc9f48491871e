//! Command-line entry point for the pickline headless picker host.
//!
//! Reads items from stdin, applies an optional initial query, and prints the
//! session result. Interactive rendering belongs to richer hosts; this one
//! exists for scripting and for exercising the engine end to end.

mod args;
mod settings;
mod workflow;

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use args::{CliArgs, OutputFormat};
use pickline_engine::SessionOutcome;
use workflow::PickSession;

/// Exit status for a fatal ingestion error, distinct from ordinary failure.
const EXIT_FATAL_INGESTION: u8 = 2;

fn main() -> ExitCode {
	let cli = CliArgs::parse();
	init_tracing(cli.verbose);

	match run(&cli) {
		Ok(code) => code,
		Err(err) => {
			eprintln!("pickline: {err:#}");
			ExitCode::FAILURE
		}
	}
}

fn run(cli: &CliArgs) -> Result<ExitCode> {
	let resolved = settings::load(cli)?;
	let session = PickSession::new(resolved.engine, cli.query.as_deref());

	let stdin = io::stdin();
	let report = session.run(&mut stdin.lock())?;

	if let SessionOutcome::FatalIngestion { capacity } = report.outcome {
		eprintln!("pickline: item exceeds the ingestion buffer capacity ({capacity} bytes)");
		return Ok(ExitCode::from(EXIT_FATAL_INGESTION));
	}

	match cli.output {
		OutputFormat::Plain => workflow::print_plain(&report, cli.list_matches),
		OutputFormat::Json => workflow::print_json(&report)?,
	}

	Ok(ExitCode::SUCCESS)
}

fn init_tracing(verbose: bool) {
	let subscriber = tracing_subscriber::fmt()
		.with_max_level(if verbose {
			tracing::Level::DEBUG
		} else {
			tracing::Level::WARN
		})
		.with_writer(io::stderr)
		.finish();
	let _ = tracing::subscriber::set_global_default(subscriber);
}
