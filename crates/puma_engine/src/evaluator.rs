//! The evaluator: one dispatch point for every command kind.
//!
//! The evaluator owns no table. It borrows the [`Session`] for one
//! statement, routes the command to its handler group, and installs any
//! replacement table before returning. That install is the only place the
//! working table changes.

use puma_foundation::{Error, Result};
use puma_language::{parse_statement, Action, Command};
use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::handlers::{chaos, control_flow, file_ops, terminal, transform};
use crate::outcome::{Applied, Outcome, Success};
use crate::provider::{
    AssumeNo, Confirm, DisplayProvider, NoDisplay, NoPersistence, PersistenceProvider,
};
use crate::session::Session;

/// Routes commands to handler groups.
pub struct Evaluator {
    config: EngineConfig,
    persistence: Box<dyn PersistenceProvider>,
    display: Box<dyn DisplayProvider>,
    confirm: Box<dyn Confirm>,
}

impl Evaluator {
    /// Creates an evaluator with inert collaborators: no file access, no
    /// display, and large chaos batches declined.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            persistence: Box::new(NoPersistence),
            display: Box::new(NoDisplay),
            confirm: Box::new(AssumeNo),
        }
    }

    /// Builder method to set the persistence provider.
    #[must_use]
    pub fn with_persistence(mut self, provider: impl PersistenceProvider + 'static) -> Self {
        self.persistence = Box::new(provider);
        self
    }

    /// Builder method to set the display provider.
    #[must_use]
    pub fn with_display(mut self, provider: impl DisplayProvider + 'static) -> Self {
        self.display = Box::new(provider);
        self
    }

    /// Builder method to set the confirmation provider.
    #[must_use]
    pub fn with_confirm(mut self, provider: impl Confirm + 'static) -> Self {
        self.confirm = Box::new(provider);
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Lexes, parses and evaluates one statement.
    ///
    /// Errors carry the statement text so the boundary can point at the
    /// offending position.
    ///
    /// # Errors
    ///
    /// Any lexical, syntax, semantic or runtime error. The session is left
    /// as it was, apart from steps a composite already completed.
    pub fn execute(&self, source: &str, session: &mut Session) -> Result<Success> {
        let command = parse_statement(source).map_err(|e| e.in_statement(source))?;
        self.evaluate(&command, session)
            .map_err(|e| e.in_statement(source))
    }

    /// Evaluates one parsed command against the session.
    ///
    /// # Errors
    ///
    /// `NoTableLoaded` for anything but a load or terminate before a table
    /// is loaded, otherwise whatever the owning handler group reports.
    pub fn evaluate(&self, command: &Command, session: &mut Session) -> Result<Success> {
        if session.is_terminated() {
            return Err(Error::internal("the session has already ended"));
        }
        if !session.has_loaded() && !command.allowed_before_load() {
            return Err(Error::no_table_loaded(command.keyword().lexeme()));
        }
        debug!(%command, "dispatching");

        match command {
            Command::Terminate => {
                let success = terminal::farewell(session.rng(), self.display.as_ref());
                session.terminate();
                Ok(success)
            }
            Command::Load { path } => {
                let loaded = file_ops::load(path, self.persistence.as_ref())?;
                session.load(loaded.table, loaded.source);
                Ok(loaded.success)
            }
            Command::Persist { path } => {
                file_ops::persist(path.as_deref(), session, self.persistence.as_ref())
            }
            Command::Export { path, format } => file_ops::export(
                path,
                format.as_deref(),
                session.table(),
                self.persistence.as_ref(),
            ),
            Command::Describe => Ok(file_ops::describe(session)),
            Command::Close => Ok(file_ops::close(session)),
            Command::Transform(action) => self.run_action(action, session),
            Command::TimedRepeat(action) => {
                let mut step = |a: &Action| self.run_action(a, session);
                Ok(control_flow::timed_repeat(action, &self.config, &mut step))
            }
            Command::Pair(first, second) => {
                let mut step = |a: &Action| self.run_action(a, session);
                Ok(control_flow::pair(first, second, &mut step))
            }
            Command::FixedRepeat(action) => {
                let mut step = |a: &Action| self.run_action(a, session);
                Ok(control_flow::fixed_repeat(action, &self.config, &mut step))
            }
            Command::Capture(columns) => control_flow::capture(columns, session.table()),
            Command::Chaos(n) => {
                let table = session.table().clone();
                let applied = chaos::apply(
                    *n,
                    &table,
                    session.rng(),
                    self.display.as_ref(),
                    self.confirm.as_ref(),
                    &self.config,
                )?;
                Ok(install(applied, session))
            }
        }
    }

    /// Runs one transform action and installs its replacement table.
    fn run_action(&self, action: &Action, session: &mut Session) -> Outcome {
        let table = session.table().clone();
        let applied = transform::apply(action, &table, session.rng(), &self.config)?;
        Ok(install(applied, session))
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// Installs a handler's replacement table, if any.
fn install(applied: Applied, session: &mut Session) -> Success {
    if let Some(table) = applied.replacement {
        trace!(
            rows = table.row_count(),
            columns = table.column_count(),
            "installing table"
        );
        session.install(table);
    }
    applied.success
}
