//! The interactive REPL and the batch script runner.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use puma_engine::{AssumeYes, Evaluator, Outcome, Session};
use puma_foundation::{Error, ErrorKind, Result, Table};
use tracing::{debug, info};

use crate::config::RuntimeConfig;
use crate::confirm::PromptConfirm;
use crate::display::TerminalDisplay;
use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::persist::CsvStore;
use crate::render::{PREVIEW_ROWS, Report, preview, render_error, render_success};

const PROMPT: &str = "puma> ";

const SHORT_HELP: &str = "Load a table with Sol \"file.csv\". \
Type ayuda for every command, Ctrl+D to leave.";

const FULL_HELP: &str = "\
Archivos
  Sol \"datos.csv\"             load a CSV table
  Carnivora [\"otro.csv\"]      save it (back to where it came from by default)
  Papapum \"salida\" [\"json\"]   export as csv, json or excel
  Magnetoseta                 describe rows and column types
  melonpulta_gelida           close the table
Transformaciones
  Maceta a b                  add column b into a_mas_b
  Hipnoseta a                 square a sample of a into a_cuadrado
  Petacereza a                keep the top rows by a
  Jalapeño a                  drop column a
Composiciones
  Football (accion)           repeat an action for a few seconds
  Zombidito (accion accion)   run two actions in order
  Zombistein (accion)         run an action three times
  Ingeniero a b c             capture three columns
Caos
  Rosa n                      n rounds of random mutations
Zerebros                      end the session";

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Working table, load gate and random generator.
    session: Session,

    /// Command dispatch.
    evaluator: Evaluator,

    /// Print JSON reports instead of text.
    json_output: bool,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Whether the full command list was already printed.
    shown_full_help: bool,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(config: &RuntimeConfig) -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor, config))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor and the file, display and
    /// confirmation collaborators the configuration asks for.
    pub fn with_editor(editor: E, config: &RuntimeConfig) -> Self {
        let session = config.seed.map_or_else(Session::new, Session::with_seed);
        let evaluator = Evaluator::new(config.engine.clone())
            .with_persistence(CsvStore::new())
            .with_display(TerminalDisplay::new(&config.resources_dir));
        let evaluator = if config.assume_yes {
            evaluator.with_confirm(AssumeYes)
        } else {
            evaluator.with_confirm(PromptConfirm)
        };
        Self {
            editor,
            session,
            evaluator,
            json_output: config.json_output,
            show_banner: true,
            shown_full_help: false,
        }
    }

    /// Replaces the evaluator.
    #[must_use]
    pub fn with_evaluator(mut self, evaluator: Evaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Sets the session for this REPL.
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns true once `Zerebros` has run.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.session.is_terminated()
    }

    /// Runs the REPL loop until end of input or the end of the session.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        while !self.is_finished() {
            if !self.read_eval_print()? {
                println!();
                break;
            }
        }

        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` at end of input.
    fn read_eval_print(&mut self) -> Result<bool> {
        let input = match self.editor.read_line(PROMPT)? {
            ReadResult::Line(line) => line,
            ReadResult::Interrupted => {
                println!();
                return Ok(true);
            }
            ReadResult::Eof => return Ok(false),
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(true);
        }
        self.editor.add_history(trimmed);

        if is_help(trimmed) {
            println!("{FULL_HELP}");
            self.shown_full_help = true;
            return Ok(true);
        }

        self.eval_and_print(trimmed);
        Ok(true)
    }

    /// Evaluates one statement against the session.
    ///
    /// # Errors
    ///
    /// Whatever the statement fails with; see [`Evaluator::execute`].
    pub fn eval(&mut self, statement: &str) -> Outcome {
        self.evaluator.execute(statement, &mut self.session)
    }

    /// Evaluates one statement and prints its result. Returns true on success.
    fn eval_and_print(&mut self, statement: &str) -> bool {
        let before = self.session.table().clone();
        let was_loaded = self.session.has_loaded();
        let outcome = self.eval(statement);
        self.print_outcome(&outcome, &before);

        if outcome.is_ok() && !was_loaded && self.session.has_loaded() && !self.shown_full_help {
            if !self.json_output {
                println!("\n{FULL_HELP}");
            }
            self.shown_full_help = true;
        }
        self.editor.set_columns(self.session.table().column_names());
        outcome.is_ok()
    }

    /// Runs a script file, one statement per line.
    ///
    /// Blank lines and lines starting with `#` are skipped. A failing
    /// statement is reported and the script carries on; `Zerebros` stops it.
    /// Returns the number of statements that failed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn eval_file(&mut self, path: &Path) -> Result<usize> {
        let source = fs::read_to_string(path).map_err(|e| {
            Error::new(ErrorKind::Io(format!("failed to read {}: {e}", path.display())))
        })?;
        info!(path = %path.display(), "running script");

        let mut failures = 0;
        for (number, line) in source.lines().enumerate() {
            let statement = line.trim();
            if statement.is_empty() || statement.starts_with('#') {
                continue;
            }
            if self.is_finished() {
                debug!(line = number + 1, "session ended, skipping rest of script");
                break;
            }
            if !self.eval_and_print(statement) {
                failures += 1;
            }
        }
        Ok(failures)
    }

    fn print_outcome(&self, outcome: &Outcome, before: &Table) {
        if self.json_output {
            println!("{}", Report::of(outcome).to_json());
            return;
        }
        match outcome {
            Ok(success) => {
                println!("{}", render_success(success));
                let table = self.session.table();
                if !self.is_finished() && table.column_count() > 0 && table != before {
                    println!("{}", preview(table, PREVIEW_ROWS));
                }
            }
            Err(err) => eprintln!("\x1b[31m{}\x1b[0m", render_error(err)),
        }
    }

    /// Prints the welcome banner.
    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1;33m");
        println!("  ____  _   _ __  __    _    ");
        println!(" |  _ \\| | | |  \\/  |  / \\   ");
        println!(" | |_) | | | | |\\/| | / _ \\  ");
        println!(" |  __/| |_| | |  | |/ ___ \\ ");
        println!(" |_|    \\___/|_|  |_/_/   \\_\\");
        println!("\x1b[0m");
        println!("PUMA v{}", env!("CARGO_PKG_VERSION"));
        println!("{SHORT_HELP}\n");

        let _ = io::stdout().flush();
    }
}

fn is_help(line: &str) -> bool {
    matches!(line, "help" | "ayuda")
}
