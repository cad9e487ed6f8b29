mod cli;
mod config;
mod shell;
mod signals;
mod terminal;

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use cli::Cli;
use config::FileConfig;
use parking_lot::Mutex;
use shline_editor::{App, ConstPrompt, Prompt, ReadError};
use shline_primitives::{Color, Style, StyledText};
use signals::UnixSignals;
use terminal::CrosstermTty;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	if let Some(path) = &cli.log_file {
		setup_tracing(path)?;
	}

	let file = FileConfig::load(cli.config.as_deref())?;
	let bindings = file.binding_table()?;
	let mut editor_config = file.editor;
	if let Some(height) = cli.max_height {
		editor_config.max_height = Some(height);
	}

	let history = Arc::new(Mutex::new(shell::History::default()));
	let prompt: Arc<dyn Prompt> = match &cli.prompt {
		Some(text) => Arc::new(ConstPrompt::new(text.as_str())),
		None => Arc::new(shell::cwd_prompt()),
	};
	let app = App::new(Arc::new(CrosstermTty::new()))
		.with_signals(Arc::new(UnixSignals))
		.with_config(editor_config)
		.with_highlighter(Arc::new(shell::highlighter()))
		.with_prompt(prompt)
		.with_rprompt(Arc::new(ConstPrompt::new(StyledText::styled("shline", Style::new().fg(Color::BrightBlack)))))
		.with_default_mode(Arc::new(shell::insert_mode(bindings, Arc::clone(&history))));

	let recorded = Arc::clone(&history);
	app.add_after_read(move |code| {
		let mut history = recorded.lock();
		history.add_command(code);
		if let Ok(cwd) = std::env::current_dir() {
			history.visit(&cwd);
		}
	});

	tracing::debug!(once = cli.once, "shline.start");
	loop {
		match app.read_code().await {
			Ok(code) => {
				println!("{code}");
				if cli.once || code.trim() == "exit" {
					break;
				}
			}
			Err(ReadError::Eof) => break,
			Err(err) => return Err(err.into()),
		}
	}
	Ok(())
}

/// Logs go to a file; the terminal belongs to the editor.
fn setup_tracing(path: &Path) -> anyhow::Result<()> {
	use tracing_subscriber::EnvFilter;
	use tracing_subscriber::prelude::*;

	let file = OpenOptions::new().create(true).append(true).open(path)?;
	let filter = EnvFilter::try_from_env("SHLINE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
	let file_layer = tracing_subscriber::fmt::layer().with_writer(file).with_ansi(false).with_target(true);
	tracing_subscriber::registry().with(filter).with(file_layer).init();
	tracing::info!(path = %path.display(), "tracing initialized");
	Ok(())
}
