//! Line editor abstraction for the REPL.
//!
//! The REPL talks to a [`LineEditor`] so tests can feed it scripted input.
//! [`RustylineEditor`] is the interactive implementation, with completion
//! of keywords and column names, file-path completion inside quotes,
//! history hints and highlighting.

use std::borrow::Cow;

use puma_foundation::{Error, ErrorKind, Result};
use puma_language::Keyword;
use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::{Completer, Config, Context, Editor, Helper, Hinter, Validator};

use crate::highlight::PumaHighlighter;

/// What one prompt produced.
#[derive(Debug)]
pub enum ReadResult {
    /// A statement line.
    Line(String),
    /// Ctrl+C: drop the line, keep the session.
    Interrupted,
    /// Ctrl+D or closed input: leave.
    Eof,
}

/// Where the REPL gets its statements from.
pub trait LineEditor {
    /// Shows `prompt` and waits for one line.
    ///
    /// # Errors
    ///
    /// `Io` if the terminal cannot be read.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Remembers a statement for history navigation and hints.
    fn add_history(&mut self, line: &str);

    /// Set the column names offered for completion.
    fn set_columns(&mut self, columns: Vec<String>);
}

/// Helper for rustyline that provides completion, hints and highlighting.
///
/// Statements are single lines, so the derived validator accepts everything.
#[derive(Helper, Completer, Hinter, Validator)]
struct PumaHelper {
    #[rustyline(Completer)]
    completer: PumaCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
    highlighter: PumaHighlighter,
}

impl Highlighter for PumaHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Cow::Owned(format!("\x1b[1;33m{prompt}\x1b[0m"))
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[2m{hint}\x1b[0m"))
    }
}

/// Completer for keywords, column names and file paths.
struct PumaCompleter {
    file_completer: FilenameCompleter,
    keywords: Vec<String>,
    columns: Vec<String>,
}

impl PumaCompleter {
    fn new() -> Self {
        let mut keywords: Vec<String> = Keyword::ALL
            .iter()
            .map(|k| k.lexeme().to_string())
            .collect();
        keywords.push("ayuda".to_string());
        keywords.push("help".to_string());
        Self {
            file_completer: FilenameCompleter::new(),
            keywords,
            columns: Vec::new(),
        }
    }

    fn candidates(&self, word: &str) -> Vec<Pair> {
        self.keywords
            .iter()
            .chain(&self.columns)
            .filter(|candidate| candidate.starts_with(word))
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate.clone(),
            })
            .collect()
    }
}

impl Completer for PumaCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        // Inside a string literal: complete file paths
        if line[..pos].chars().filter(|&c| c == '"').count() % 2 == 1 {
            return self.file_completer.complete(line, pos, ctx);
        }

        let start = line[..pos]
            .rfind(|c: char| c.is_whitespace() || c == '(' || c == ')')
            .map_or(0, |i| i + 1);

        Ok((start, self.candidates(&line[start..pos])))
    }
}

/// Interactive editor backed by rustyline.
pub struct RustylineEditor {
    editor: Editor<PumaHelper, DefaultHistory>,
}

impl RustylineEditor {
    /// Sets up history, completion and highlighting.
    ///
    /// # Errors
    ///
    /// `Internal` if rustyline rejects the configuration or the terminal.
    pub fn new() -> Result<Self> {
        let config = Config::builder()
            .auto_add_history(false)
            .max_history_size(1000)
            .map_err(|e| Error::new(ErrorKind::Internal(e.to_string())))?
            .build();

        let helper = PumaHelper {
            completer: PumaCompleter::new(),
            hinter: HistoryHinter::new(),
            highlighter: PumaHighlighter::new(),
        };

        let mut editor = Editor::with_config(config)
            .map_err(|e| Error::new(ErrorKind::Internal(e.to_string())))?;
        editor.set_helper(Some(helper));

        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadResult::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadResult::Eof),
            Err(e) => Err(Error::new(ErrorKind::Io(e.to_string()))),
        }
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }

    fn set_columns(&mut self, columns: Vec<String>) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.completer.columns = columns;
        }
    }
}
