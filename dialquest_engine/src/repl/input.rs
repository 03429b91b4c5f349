//! Terminal input handling for the Dialquest REPL.
//!
//! Wraps rustyline configuration and completion for the engine's small
//! command set, falling back to plain stdin when no terminal is attached.

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use log::{info, warn};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::paginate::Pager;

/// Outcome of reading a line from the REPL input.
pub enum InputEvent {
    Line(String),
    Eof,
    Interrupted,
}

const COMMAND_WORDS: &[&str] = &[
    "north", "east", "south", "west", "go", "dial", "page", "look", "inventory", "help", "quit",
];

lazy_static! {
    static ref COMMAND_TERMS: Vec<String> = {
        let mut terms: Vec<String> = COMMAND_WORDS.iter().map(ToString::to_string).collect();
        terms.sort_unstable();
        terms
    };
}

/// Values offered when completing `dial` and `page` arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialTargets {
    /// Lowest dial position of each screen, in screen order.
    pub screen_starts: Vec<u16>,
}

impl DialTargets {
    pub fn from_pager(pager: &Pager) -> Self {
        Self {
            screen_starts: (1..=pager.screen_count())
                .map(|screen| pager.position_for_screen(screen))
                .collect(),
        }
    }
}

type ReplEditor = rustyline::Editor<DialquestHelper, DefaultHistory>;

#[derive(Default)]
struct DialquestHelper {
    targets: DialTargets,
}

impl Helper for DialquestHelper {}

impl Completer for DialquestHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let (start, prefix) = current_prefix(line, pos);
        if let Some(found) = argument_completions(&prefix, start, &self.targets) {
            return Ok(found);
        }
        Ok((start, completions(&prefix)))
    }
}

impl Hinter for DialquestHelper {
    type Hint = String;
}

impl Highlighter for DialquestHelper {}

impl Validator for DialquestHelper {}

fn current_prefix(line: &str, pos: usize) -> (usize, String) {
    let slice = &line[..pos];
    let trimmed = slice.trim_start_matches(char::is_whitespace);
    let start = pos - trimmed.len();
    (start, trimmed.to_string())
}

fn completions(prefix: &str) -> Vec<Pair> {
    if prefix.is_empty() {
        return Vec::new();
    }
    let lower = prefix.to_lowercase();
    COMMAND_TERMS
        .iter()
        .filter(|term| term.starts_with(&lower))
        .map(|term| Pair {
            display: term.clone(),
            replacement: term.clone(),
        })
        .collect()
}

/// Completes the argument of `dial` (screen start positions) or `page`
/// (screen numbers). `None` when `prefix` is not one of those commands.
fn argument_completions(prefix: &str, start: usize, targets: &DialTargets) -> Option<(usize, Vec<Pair>)> {
    let (command, partial) = prefix.split_once(char::is_whitespace)?;
    let partial = partial.trim_start();
    let offset = start + prefix.len() - partial.len();
    let values: Vec<String> = match command.to_lowercase().as_str() {
        "dial" | "turn" => targets.screen_starts.iter().map(ToString::to_string).collect(),
        "page" | "screen" => (1..=targets.screen_starts.len()).map(|n| n.to_string()).collect(),
        _ => return None,
    };
    let pairs = values
        .into_iter()
        .filter(|value| value.starts_with(partial))
        .map(|value| Pair {
            display: value.clone(),
            replacement: value,
        })
        .collect();
    Some((offset, pairs))
}

/// Helper responsible for managing the interactive input backend.
///
/// Prefers `rustyline` when an interactive terminal is available, falling back to
/// a basic stdin reader otherwise.
pub struct InputManager {
    backend: Backend,
}

impl InputManager {
    pub fn new() -> Self {
        let backend = if io::stdin().is_terminal() {
            match RustylineInput::new() {
                Ok(editor) => {
                    info!("using rustyline-backed REPL input");
                    Backend::Rustyline(editor)
                },
                Err(err) => {
                    warn!("failed to initialize rustyline ({err}), falling back to basic stdin");
                    Backend::plain()
                },
            }
        } else {
            info!("stdin is not a TTY; using basic input mode");
            Backend::plain()
        };

        Self { backend }
    }

    /// Update the argument values offered for `dial` and `page`.
    pub fn set_dial_targets(&mut self, targets: DialTargets) {
        if let Backend::Rustyline(input) = &mut self.backend
            && let Some(helper) = input.editor.helper_mut()
        {
            helper.targets = targets;
        }
    }

    /// Read a line from the current backend. If the interactive backend reports an
    /// unrecoverable error, switch to the plain stdin backend and retry once.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match self.backend.read_line(prompt) {
            Ok(event) => Ok(event),
            Err(err) if self.backend.is_rustyline() => {
                warn!("rustyline input failed: {err} -- switching to basic stdin");
                self.backend = Backend::plain();
                self.backend.read_line(prompt)
            },
            Err(err) => Err(err),
        }
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

enum Backend {
    Rustyline(Box<RustylineInput>),
    Plain(StdinInput),
}

impl Backend {
    fn plain() -> Self {
        Backend::Plain(StdinInput::default())
    }

    fn is_rustyline(&self) -> bool {
        matches!(self, Backend::Rustyline(_))
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match self {
            Backend::Rustyline(editor) => editor.read_line(prompt),
            Backend::Plain(stdin) => stdin.read_line(prompt),
        }
    }
}

struct RustylineInput {
    editor: ReplEditor,
    history_path: Option<PathBuf>,
}

impl RustylineInput {
    fn new() -> io::Result<Box<Self>> {
        let mut editor = ReplEditor::new().map_err(map_io_err)?;
        editor.set_helper(Some(DialquestHelper::default()));
        let history_path = history_file_path();

        if let Some(path) = history_path.as_ref() {
            if let Some(dir) = path.parent()
                && let Err(err) = fs::create_dir_all(dir)
            {
                warn!("failed to create history directory {}: {err}", dir.display());
            }

            if let Err(err) = editor.load_history(path) {
                match err {
                    ReadlineError::Io(ref io_err) if io_err.kind() == io::ErrorKind::NotFound => {
                        info!("no prior history found at {}, starting fresh", path.display());
                    },
                    other => {
                        warn!("failed to load history from {}: {other}", path.display());
                    },
                }
            }
        }

        Ok(Box::new(Self { editor, history_path }))
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(err) = self.editor.add_history_entry(line.as_str()) {
                        warn!("failed to append to history: {err}");
                    }
                    if let Some(path) = self.history_path.as_ref()
                        && let Err(err) = self.editor.save_history(path)
                    {
                        warn!("failed to persist history to {}: {err}", path.display());
                    }
                }
                Ok(InputEvent::Line(line))
            },
            Err(err) => convert_readline_error(err),
        }
    }
}

#[derive(Default)]
struct StdinInput {
    buffer: String,
}

impl StdinInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        print!("{prompt}");
        io::stdout().flush()?;

        self.buffer.clear();
        let bytes = io::stdin().read_line(&mut self.buffer)?;
        if bytes == 0 {
            return Ok(InputEvent::Eof);
        }

        let line = self.buffer.trim_end_matches(['\n', '\r']);
        Ok(InputEvent::Line(line.to_string()))
    }
}

fn convert_readline_error(err: ReadlineError) -> io::Result<InputEvent> {
    match err {
        ReadlineError::Interrupted => Ok(InputEvent::Interrupted),
        ReadlineError::Eof => Ok(InputEvent::Eof),
        other => Err(map_io_err(other)),
    }
}

fn map_io_err(err: ReadlineError) -> io::Error {
    match err {
        ReadlineError::Io(io_err) => io_err,
        other => io::Error::other(other),
    }
}

fn history_file_path() -> Option<PathBuf> {
    dirs::data_dir()
        .or_else(dirs::data_local_dir)
        .map(|base| build_history_path(&base))
}

fn build_history_path(base: &Path) -> PathBuf {
    base.join("dialquest_engine").join("history.txt")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_readline_ctrl_c_to_interrupt() {
        let result = convert_readline_error(ReadlineError::Interrupted).unwrap();
        assert!(matches!(result, InputEvent::Interrupted));
    }

    #[test]
    fn history_path_appends_components() {
        let path = build_history_path(Path::new("/tmp/dialquest-test"));
        assert!(path.ends_with(Path::new("dialquest_engine/history.txt")));
    }

    #[test]
    fn completes_command_prefixes() {
        let names: Vec<_> = completions("Di").into_iter().map(|pair| pair.replacement).collect();
        assert_eq!(names, vec!["dial"]);
        assert!(completions("").is_empty());
    }

    #[test]
    fn dial_and_page_complete_against_screens() {
        let targets = DialTargets {
            screen_starts: vec![0, 342, 683],
        };
        let (offset, pairs) = argument_completions("dial 3", 0, &targets).unwrap();
        assert_eq!(offset, 5);
        let values: Vec<_> = pairs.into_iter().map(|pair| pair.replacement).collect();
        assert_eq!(values, vec!["342"]);

        let (offset, pairs) = argument_completions("page  ", 2, &targets).unwrap();
        assert_eq!(offset, 8);
        assert_eq!(pairs.len(), 3);

        assert!(argument_completions("look", 0, &targets).is_none());
        assert!(argument_completions("go n", 0, &targets).is_none());
    }

    #[test]
    fn targets_follow_the_pager() {
        let room = crate::room::Room::default();
        let pager = Pager::new(&room, crate::paginate::PageLayout::default());
        assert_eq!(DialTargets::from_pager(&pager).screen_starts, vec![0]);
    }

    #[test]
    fn prefix_skips_leading_whitespace() {
        assert_eq!(current_prefix("  lo", 4), (2, "lo".to_string()));
    }
}
