use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use charlm_core::io::open_corpus;
use charlm_core::{FrequencyTable, LanguageModel, ModelConfig};
use clap::{ArgAction, Parser, ValueEnum};
use env_logger::Env;
use log::info;

/// Seed used by `fixed` mode when `--seed` is not given.
const FIXED_SEED: u64 = 20;

#[derive(Parser, Debug)]
#[command(author, version, about = "Character-level Markov text generator", long_about = None)]
struct Cli {
	/// Number of characters forming a context
	window_length: usize,

	/// Text to start generating from
	initial_text: String,

	/// Number of characters to generate
	length: usize,

	/// `random` seeds from entropy, `fixed` gives reproducible output
	#[arg(value_enum)]
	mode: Mode,

	/// Corpus to train on
	corpus: PathBuf,

	/// Seed used in `fixed` mode
	#[arg(long, value_name = "SEED")]
	seed: Option<u64>,

	/// Print the trained tables before generating
	#[arg(long)]
	dump: bool,

	/// Print the trained tables as JSON before generating
	#[arg(long, conflicts_with = "dump")]
	dump_json: bool,

	/// Increase verbosity (-v, -vv)
	#[arg(short = 'v', long, action = ArgAction::Count)]
	verbose: u8,

	/// Decrease verbosity (-q, -qq)
	#[arg(short = 'q', long, action = ArgAction::Count)]
	quiet: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
	Random,
	Fixed,
}

fn main() -> Result<()> {
	let cli = Cli::parse();
	init_logging(cli.verbose, cli.quiet);

	let seed = match cli.mode {
		Mode::Random => None,
		Mode::Fixed => Some(cli.seed.unwrap_or(FIXED_SEED)),
	};
	let config = ModelConfig { window_length: cli.window_length, seed };
	let mut model = LanguageModel::from_config(&config).context("invalid model configuration")?;

	let reader = open_corpus(&cli.corpus)?;
	model
		.train_reader(reader)
		.with_context(|| format!("failed to train on {}", cli.corpus.display()))?;

	if cli.dump {
		print!("{model}");
	} else if cli.dump_json {
		let tables: BTreeMap<&str, &FrequencyTable> = model.contexts().collect();
		println!("{}", serde_json::to_string_pretty(&tables)?);
	}

	let text = model.generate(&cli.initial_text, cli.length);
	info!(
		"generated {} characters",
		text.chars().count() - cli.initial_text.chars().count()
	);
	println!("{text}");

	Ok(())
}

fn init_logging(verbose: u8, quiet: u8) {
	use log::LevelFilter;

	let level = if quiet > 0 {
		match quiet {
			1 => LevelFilter::Warn,
			_ => LevelFilter::Error,
		}
	} else {
		match verbose {
			0 => LevelFilter::Info,
			1 => LevelFilter::Debug,
			_ => LevelFilter::Trace,
		}
	};

	let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
	builder.format_timestamp_millis();
	builder.filter_level(level);
	let _ = builder.try_init();
}
