use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "shline")]
#[command(about = "An interactive line editor for shell prompts")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Config file (defaults to `$XDG_CONFIG_HOME/shline/config.toml`)
	#[arg(long, short = 'c')]
	pub config: Option<PathBuf>,

	/// Lines the editor may use, overriding the config file
	#[arg(long)]
	pub max_height: Option<usize>,

	/// Fixed left prompt instead of the working directory
	#[arg(long, short = 'p')]
	pub prompt: Option<String>,

	/// Write logs to this file (filtered by `SHLINE_LOG`)
	#[arg(long)]
	pub log_file: Option<PathBuf>,

	/// Read a single line and exit
	#[arg(long)]
	pub once: bool,
}
