//! Session state.
//!
//! The session owns the one working table, the load gate, the remembered
//! source path and the random generator every randomized command draws
//! from. Handler groups only ever see it for the length of one command.

use std::path::{Path, PathBuf};

use puma_foundation::Table;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// State shared by every statement of one interpreter session.
#[derive(Clone, Debug)]
pub struct Session {
    /// The current working table.
    table: Table,

    /// Whether a data source has been established.
    has_loaded: bool,

    /// Where the table was loaded from, if anywhere.
    source: Option<PathBuf>,

    /// Generator for sampling, chaos and the farewell artifact.
    rng: ChaCha8Rng,

    /// Set once the terminal command has run.
    terminated: bool,
}

impl Session {
    /// Creates a session with an empty table and an entropy-seeded generator.
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(ChaCha8Rng::from_entropy())
    }

    /// Creates a session whose random choices are reproducible.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    fn from_rng(rng: ChaCha8Rng) -> Self {
        Self {
            table: Table::new(),
            has_loaded: false,
            source: None,
            rng,
            terminated: false,
        }
    }

    /// Creates a seeded session that already holds a table, as if loaded
    /// from nowhere in particular.
    #[must_use]
    pub fn with_table(table: Table, seed: u64) -> Self {
        let mut session = Self::with_seed(seed);
        session.table = table;
        session.has_loaded = true;
        session
    }

    /// Returns the current table.
    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Returns true once a table has been loaded (and not closed).
    #[must_use]
    pub fn has_loaded(&self) -> bool {
        self.has_loaded
    }

    /// Returns the path the table was loaded from.
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Returns true once the session has ended.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Returns the session's random generator.
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Replaces the current table.
    pub(crate) fn install(&mut self, table: Table) {
        self.table = table;
    }

    /// Installs a freshly loaded table and opens the load gate.
    pub(crate) fn load(&mut self, table: Table, source: PathBuf) {
        self.table = table;
        self.source = Some(source);
        self.has_loaded = true;
    }

    /// Discards the table and closes the load gate.
    pub(crate) fn close(&mut self) {
        self.table = Table::new();
        self.source = None;
        self.has_loaded = false;
    }

    /// Discards the table and ends the session.
    pub(crate) fn terminate(&mut self) {
        self.close();
        self.terminated = true;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
