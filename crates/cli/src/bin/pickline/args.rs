use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

/// Output rendering for the finished session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
	/// Print the submitted query text (or the visible items).
	Plain,
	/// Print a JSON document with the outcome, query and visible items.
	Json,
}

/// Command-line arguments accepted by the `pickline` binary.
#[derive(Parser, Debug)]
#[command(
	name = "pickline",
	version,
	about = "Filter and complete items streamed on stdin"
)]
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "PICKLINE_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'q',
		long = "query",
		value_name = "TEXT",
		help = "Type TEXT into the query before reading input"
	)]
	pub(crate) query: Option<String>,
	#[arg(
		short = 'i',
		long = "input-separator",
		value_name = "SEP",
		help = "Separator between items on stdin"
	)]
	pub(crate) input_separator: Option<String>,
	#[arg(
		short = 'o',
		long = "output-separator",
		value_name = "SEP",
		help = "Separator between chosen items in the query; enables multi-select merging"
	)]
	pub(crate) output_separator: Option<String>,
	#[arg(
		long = "debounce-ms",
		value_name = "MS",
		help = "Quiet interval before a filter pass"
	)]
	pub(crate) debounce_ms: Option<u64>,
	#[arg(
		long = "buffer-capacity",
		value_name = "BYTES",
		help = "Ingestion buffer capacity; a longer single item is fatal"
	)]
	pub(crate) buffer_capacity: Option<usize>,
	#[arg(
		long = "batch-bytes",
		value_name = "BYTES",
		help = "Bytes handed to the engine per feed call"
	)]
	pub(crate) batch_bytes: Option<usize>,
	#[arg(
		long = "batch-items",
		value_name = "COUNT",
		help = "Items handed to the engine per feed call"
	)]
	pub(crate) batch_items: Option<usize>,
	#[arg(long = "no-prefill", help = "Do not seed the query from the first item")]
	pub(crate) no_prefill: bool,
	#[arg(
		long = "list-matches",
		help = "Print the visible items instead of the query"
	)]
	pub(crate) list_matches: bool,
	#[arg(long, value_enum, default_value = "plain", help = "Output format")]
	pub(crate) output: OutputFormat,
	#[arg(short = 'v', long, help = "Enable debug logging on stderr")]
	pub(crate) verbose: bool,
}
