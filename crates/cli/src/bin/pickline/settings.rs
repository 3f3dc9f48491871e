use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow, ensure};
use config::{Config, ConfigError, File};
use serde::Deserialize;

use pickline_engine::EngineConfig;

use crate::args::CliArgs;

/// Raw on-disk configuration; every field is optional so files can stay
/// sparse and later sources only override what they mention.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
	engine: EngineSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct EngineSection {
	input_separator: Option<String>,
	output_separator: Option<String>,
	debounce_ms: Option<u64>,
	batch_max_items: Option<usize>,
	batch_max_bytes: Option<usize>,
	buffer_capacity: Option<usize>,
	prefill_first_item: Option<bool>,
}

/// Fully resolved settings for one run.
#[derive(Debug)]
pub(crate) struct ResolvedSettings {
	pub(crate) engine: EngineConfig,
}

pub(crate) fn load(cli: &CliArgs) -> Result<ResolvedSettings> {
	let builder = build_config(cli)?;
	let mut raw: RawConfig = builder
		.try_deserialize()
		.map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
	raw.apply_cli_overrides(cli);
	raw.resolve()
}

fn build_config(cli: &CliArgs) -> Result<Config> {
	let mut builder = Config::builder();

	if !cli.no_config {
		for path in default_config_files() {
			builder = builder.add_source(File::from(path).required(false));
		}
	}

	for path in &cli.config {
		builder = builder.add_source(File::from(path.clone()).required(true));
	}

	builder = builder.add_source(
		config::Environment::with_prefix("pickline")
			.separator("__")
			.try_parsing(true),
	);

	builder.build().map_err(|err| match err {
		ConfigError::Frozen => anyhow!("configuration builder is frozen"),
		other => other.into(),
	})
}

fn default_config_files() -> Vec<PathBuf> {
	let mut files = Vec::new();

	if let Some(dir) = dirs::config_dir() {
		files.push(dir.join("pickline").join("config.toml"));
	}

	if let Ok(current_dir) = env::current_dir() {
		files.push(current_dir.join(".pickline.toml"));
		files.push(current_dir.join("pickline.toml"));
	}

	files
}

impl RawConfig {
	fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if cli.input_separator.is_some() {
			self.engine.input_separator = cli.input_separator.clone();
		}
		if cli.output_separator.is_some() {
			self.engine.output_separator = cli.output_separator.clone();
		}
		if cli.debounce_ms.is_some() {
			self.engine.debounce_ms = cli.debounce_ms;
		}
		if cli.buffer_capacity.is_some() {
			self.engine.buffer_capacity = cli.buffer_capacity;
		}
		if cli.batch_bytes.is_some() {
			self.engine.batch_max_bytes = cli.batch_bytes;
		}
		if cli.batch_items.is_some() {
			self.engine.batch_max_items = cli.batch_items;
		}
		if cli.no_prefill {
			self.engine.prefill_first_item = Some(false);
		}
	}

	fn resolve(self) -> Result<ResolvedSettings> {
		let defaults = EngineConfig::default();
		let engine = EngineConfig {
			input_separator: self
				.engine
				.input_separator
				.unwrap_or(defaults.input_separator),
			output_separator: self.engine.output_separator,
			debounce_ms: self.engine.debounce_ms.unwrap_or(defaults.debounce_ms),
			batch_max_items: self
				.engine
				.batch_max_items
				.unwrap_or(defaults.batch_max_items),
			batch_max_bytes: self
				.engine
				.batch_max_bytes
				.unwrap_or(defaults.batch_max_bytes),
			buffer_capacity: self
				.engine
				.buffer_capacity
				.unwrap_or(defaults.buffer_capacity),
			prefill_first_item: self
				.engine
				.prefill_first_item
				.unwrap_or(defaults.prefill_first_item),
		};

		ensure!(
			!engine.input_separator.is_empty(),
			"input separator must not be empty"
		);
		if let Some(sep) = &engine.output_separator {
			ensure!(!sep.is_empty(), "output separator must not be empty");
		}
		ensure!(
			engine.buffer_capacity > 0,
			"buffer capacity must be greater than zero"
		);
		ensure!(
			engine.batch_max_bytes > 0,
			"batch byte budget must be greater than zero"
		);
		ensure!(
			engine.batch_max_items > 0,
			"batch item budget must be greater than zero"
		);

		Ok(ResolvedSettings { engine })
	}
}
