mod tools;

use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

/// Renders a pyramid of vector tiles below one root tile into <z>/<x>/<y>.pbf files
#[derive(Parser, Debug)]
#[command(
	author,
	version,
	about,
	long_about = None,
)]
struct Cli {
	#[command(flatten)]
	arguments: tools::create::Arguments,

	#[command(flatten)]
	verbose: Verbosity<InfoLevel>,
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	env_logger::Builder::new()
		.filter_level(cli.verbose.log_level_filter())
		.format_timestamp(None)
		.init();

	tools::create::run(&cli.arguments)
}
