//! The demo shell around the editor: highlighting, prompts, history and the
//! insert-mode bindings.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use shline_editor::binding::{BindingError, binding, builtins};
use shline_editor::highlight::Highlighted;
use shline_editor::pickers::location::Dir;
use shline_editor::pickers::{lastcmd, location};
use shline_editor::{AsyncHighlighter, BindingMode, BindingTable, ComputedPrompt, Dispatcher, SharedBindings};
use shline_primitives::{Color, Key, KeyCode, Modifier, Style, StyledText};

/// Commands the highlighter knows.
const KNOWN: &[&str] = &["cd", "echo", "exit", "ls", "pwd", "cat", "grep"];

/// Highlights the command word green when known and red otherwise, and
/// reports unbalanced quotes.
pub fn highlight(code: &str) -> Highlighted {
	let mut text = StyledText::new();
	let trimmed = code.trim_start();
	let lead = &code[..code.len() - trimmed.len()];
	let head_len = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
	let (head, rest) = trimmed.split_at(head_len);

	text.push_str(lead, Style::new());
	if !head.is_empty() {
		let color = if KNOWN.contains(&head) { Color::Green } else { Color::Red };
		text.push_str(head, Style::new().fg(color));
	}
	text.push_str(rest, Style::new());

	let mut errors = Vec::new();
	if code.matches('\'').count() % 2 == 1 || code.matches('"').count() % 2 == 1 {
		errors.push("unterminated quote".to_string());
	}
	(text, errors)
}

pub fn highlighter() -> AsyncHighlighter {
	AsyncHighlighter::new(highlight)
}

/// `~/dir> `, computed in the background.
pub fn cwd_prompt() -> ComputedPrompt {
	ComputedPrompt::new("> ", || {
		let cwd = std::env::current_dir().map(|dir| tilde(&dir)).unwrap_or_else(|_| "?".into());
		let mut text = StyledText::styled(cwd, Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD));
		text.push_str("> ", Style::new());
		text
	})
}

fn tilde(dir: &Path) -> String {
	match dirs::home_dir().and_then(|home| dir.strip_prefix(home).ok().map(Path::to_path_buf)) {
		Some(rel) if rel.as_os_str().is_empty() => "~".into(),
		Some(rel) => format!("~/{}", rel.display()),
		None => dir.display().to_string(),
	}
}

/// Committed commands and visited directories.
#[derive(Debug, Default)]
pub struct History {
	commands: Vec<String>,
	dirs: Vec<(PathBuf, f64)>,
}

impl History {
	pub fn add_command(&mut self, code: &str) {
		if !code.trim().is_empty() {
			self.commands.push(code.to_string());
		}
	}

	pub fn last_command(&self) -> Option<&str> {
		self.commands.last().map(String::as_str)
	}

	/// Bumps the score of `dir`, adding it when new.
	pub fn visit(&mut self, dir: &Path) {
		match self.dirs.iter_mut().find(|(path, _)| path == dir) {
			Some((_, score)) => *score += 1.0,
			None => self.dirs.push((dir.to_path_buf(), 1.0)),
		}
	}

	/// Directories by descending score.
	pub fn dirs(&self) -> Vec<Dir> {
		let mut dirs: Vec<Dir> = self.dirs.iter().map(|(path, score)| Dir::new(path.display().to_string(), *score)).collect();
		dirs.sort_by(|a, b| b.score.total_cmp(&a.score));
		dirs
	}
}

/// The insert mode: user bindings over the builtin table.
pub fn insert_mode(user: BindingTable, history: Arc<Mutex<History>>) -> BindingMode {
	let user: SharedBindings = Arc::new(RwLock::new(user));
	let base: SharedBindings = Arc::new(RwLock::new(base_bindings(history)));
	BindingMode::new(Dispatcher::new(vec![user, base]))
}

fn base_bindings(history: Arc<Mutex<History>>) -> BindingTable {
	let mut table = BindingTable::new();
	table.bind_default(builtins::insert_key());
	table.bind(Key::new(KeyCode::Enter), builtins::commit_code());
	table.bind(Key::new(KeyCode::Backspace), builtins::backspace());
	table.bind(Key::new(KeyCode::Left), builtins::move_dot_left());
	table.bind(Key::new(KeyCode::Right), builtins::move_dot_right());

	let commands = Arc::clone(&history);
	table.bind(
		Key::alt(','),
		binding(move |ctx| {
			let cmd = commands.lock().last_command().map(str::to_string);
			match cmd {
				Some(cmd) => {
					lastcmd::start(ctx.state(), &cmd);
					Ok(())
				}
				None => Err(BindingError::failed("no history")),
			}
		}),
	);

	table.bind(
		Key::ctrl('L'),
		binding(move |ctx| {
			let dirs = history.lock().dirs();
			location::start(
				ctx.state(),
				dirs,
				Arc::new(|path: &str| {
					std::env::set_current_dir(path)?;
					Ok(())
				}),
			);
			Ok(())
		}),
	);
	table
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rstest::rstest;
	use shline_editor::{Mode, State, TtyEvent};

	use super::*;

	fn colored(text: &StyledText) -> Vec<(String, Option<Color>)> {
		text.spans.iter().filter(|s| !s.text.is_empty()).map(|s| (s.text.clone(), s.style.fg)).collect()
	}

	#[rstest]
	#[case::known("ls -l", vec![("ls", Some(Color::Green)), (" -l", None)])]
	#[case::unknown("frob x", vec![("frob", Some(Color::Red)), (" x", None)])]
	#[case::leading_space("  pwd", vec![("  ", None), ("pwd", Some(Color::Green))])]
	#[case::empty("", vec![])]
	fn highlights_command_word(#[case] code: &str, #[case] expected: Vec<(&str, Option<Color>)>) {
		let (text, errors) = highlight(code);
		let expected: Vec<(String, Option<Color>)> = expected.into_iter().map(|(t, c)| (t.to_string(), c)).collect();
		assert_eq!(colored(&text), expected);
		assert_eq!(text.to_plain(), code);
		assert!(errors.is_empty());
	}

	#[test]
	fn unbalanced_quote_is_an_error() {
		let (_, errors) = highlight("echo 'hi");
		assert_eq!(errors, vec!["unterminated quote"]);
	}

	#[test]
	fn dirs_sorted_by_visits() {
		let mut history = History::default();
		history.visit(Path::new("/a"));
		history.visit(Path::new("/b"));
		history.visit(Path::new("/b"));
		let paths: Vec<String> = history.dirs().into_iter().map(|d| d.path).collect();
		assert_eq!(paths, vec!["/b", "/a"]);
	}

	#[test]
	fn blank_commands_are_not_recorded() {
		let mut history = History::default();
		history.add_command("ls");
		history.add_command("   ");
		assert_eq!(history.last_command(), Some("ls"));
	}

	#[test]
	fn alt_comma_opens_lastcmd() {
		let history = Arc::new(Mutex::new(History::default()));
		history.lock().add_command("echo hello");
		let mode = insert_mode(BindingTable::new(), history);
		let state = State::new();

		mode.handle_event(&TtyEvent::Key(Key::alt(',')), &state);

		assert!(state.mode().is_some());
	}

	#[test]
	fn alt_comma_without_history_is_a_notice() {
		let mode = insert_mode(BindingTable::new(), Arc::new(Mutex::new(History::default())));
		let state = State::new();

		mode.handle_event(&TtyEvent::Key(Key::alt(',')), &state);

		assert!(state.mode().is_none());
		assert_eq!(state.notes(), vec!["[binding error] no history"]);
	}

	#[test]
	fn user_bindings_win() {
		let mut user = BindingTable::new();
		user.bind(Key::char('x'), builtins::commit_code());
		let mode = insert_mode(user, Arc::new(Mutex::new(History::default())));
		let state = State::new();

		let action = mode.handle_event(&TtyEvent::Key(Key::char('x')), &state);

		assert_eq!(action, shline_editor::HandlerAction::CommitCode);
		assert_eq!(state.code(), "");
	}
}
