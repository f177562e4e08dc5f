//! The chaos operator: a randomized batch of structural mutations.
//!
//! Each round draws one [`Mutation`] uniformly from a fixed menu and applies
//! it to a working copy of the table. Rounds are isolated: a mutation that
//! cannot apply (empty table) is skipped, one that fails is recorded, and
//! the batch carries on either way. Only [`Mutation::DeleteRow`] and
//! [`Mutation::DuplicateRow`] change the row count.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use puma_foundation::{Error, ErrorKind, Result, Table, Value};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::outcome::{Applied, Payload, Success};
use crate::provider::{Confirm, DisplayProvider};

/// Text written into cells by the marker mutations.
pub const MARKER: &str = "cabra";

/// How many of the most recent rounds a [`ChaosReport`] keeps.
pub const KEPT_ROUNDS: usize = 100;

/// Artifact shown by [`Mutation::ShowGoat`].
pub const GOAT_ARTIFACT: &str = "cabra";

/// Built-in banner used when the goat artifact is unavailable.
pub const GOAT_BANNER: &str = r"
    _))
   /* \     _~
   `;'\\__-' \_
      | )  _ \ \
     / / ``   w w
    w w
  ¡CABRA!
";

/// One entry of the chaos menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mutation {
    /// Overwrite one random cell with the marker.
    ReplaceCell,
    /// Show the goat artifact. Display only.
    ShowGoat,
    /// Rename every column to a fresh `col_NNNN` name.
    RenameColumns,
    /// Shuffle the row order.
    ShuffleRows,
    /// Delete one random row.
    DeleteRow,
    /// Append a copy of one random row.
    DuplicateRow,
    /// Reverse the column order.
    ReverseColumns,
    /// Overwrite every cell with the marker.
    FillMarker,
    /// Print the built-in goat banner. Display only.
    GoatBanner,
}

impl Mutation {
    /// The whole menu.
    pub const ALL: [Self; 9] = [
        Self::ReplaceCell,
        Self::ShowGoat,
        Self::RenameColumns,
        Self::ShuffleRows,
        Self::DeleteRow,
        Self::DuplicateRow,
        Self::ReverseColumns,
        Self::FillMarker,
        Self::GoatBanner,
    ];

    /// Draws one mutation uniformly.
    pub fn draw(rng: &mut ChaCha8Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ReplaceCell => "replace cell",
            Self::ShowGoat => "show goat",
            Self::RenameColumns => "rename columns",
            Self::ShuffleRows => "shuffle rows",
            Self::DeleteRow => "delete row",
            Self::DuplicateRow => "duplicate row",
            Self::ReverseColumns => "reverse columns",
            Self::FillMarker => "fill marker",
            Self::GoatBanner => "goat banner",
        };
        f.write_str(name)
    }
}

/// What happened in one round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Round {
    /// The mutation ran.
    Applied(Mutation),
    /// The mutation could not apply to this table.
    Skipped {
        /// The mutation drawn.
        mutation: Mutation,
        /// Why it was skipped.
        reason: String,
    },
    /// The mutation failed; the table is as the previous round left it.
    Failed {
        /// The mutation drawn.
        mutation: Mutation,
        /// The failure.
        message: String,
    },
}

/// Outcome of one chaos batch: totals for every round, plus the last
/// [`KEPT_ROUNDS`] rounds in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChaosReport {
    /// The count the user asked for.
    pub requested: i64,
    /// True if the user declined a large batch.
    pub declined: bool,
    /// The most recent rounds, oldest first.
    pub rounds: VecDeque<Round>,
    applied: usize,
    skipped: usize,
    failed: usize,
}

impl ChaosReport {
    /// Creates an empty report for a batch of `requested` rounds.
    #[must_use]
    pub fn new(requested: i64) -> Self {
        Self {
            requested,
            ..Self::default()
        }
    }

    /// Counts a round and keeps it, evicting the oldest kept round when full.
    pub fn record(&mut self, round: Round) {
        match round {
            Round::Applied(_) => self.applied += 1,
            Round::Skipped { .. } => self.skipped += 1,
            Round::Failed { .. } => self.failed += 1,
        }
        if self.rounds.len() == KEPT_ROUNDS {
            self.rounds.pop_front();
        }
        self.rounds.push_back(round);
    }

    /// Number of rounds whose mutation ran.
    #[must_use]
    pub const fn applied(&self) -> usize {
        self.applied
    }

    /// Number of skipped rounds.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of failed rounds.
    #[must_use]
    pub const fn failed(&self) -> usize {
        self.failed
    }

    /// Number of rounds that ran, kept or not.
    #[must_use]
    pub const fn executed(&self) -> usize {
        self.applied + self.skipped + self.failed
    }

    /// One-based number of the first kept round.
    #[must_use]
    pub fn first_kept(&self) -> usize {
        self.executed() - self.rounds.len() + 1
    }
}

/// Runs a chaos batch of `n` rounds against a copy of `table`.
///
/// # Errors
///
/// `InvalidIterationCount` if `n` is zero or negative; no round runs.
pub fn apply(
    n: i64,
    table: &Table,
    rng: &mut ChaCha8Rng,
    display: &dyn DisplayProvider,
    confirm: &dyn Confirm,
    config: &EngineConfig,
) -> Result<Applied> {
    if n <= 0 {
        return Err(Error::new(ErrorKind::InvalidIterationCount(n)));
    }

    let mut report = ChaosReport::new(n);

    if n > config.chaos_confirm_threshold
        && !confirm.confirm(&format!("Rosa {n}: run {n} rounds of chaos?"))
    {
        report.declined = true;
        return Ok(Applied::unchanged(Success::with_payload(
            "chaos declined; table unchanged",
            Payload::Chaos(report),
        )));
    }

    let mut working = table.clone();
    for round in 1..=n {
        let mutation = Mutation::draw(rng);
        let outcome = match mutate(&mut working, mutation, rng, display) {
            Ok(None) => Round::Applied(mutation),
            Ok(Some(reason)) => {
                warn!(round, %mutation, reason, "chaos round skipped");
                Round::Skipped {
                    mutation,
                    reason: reason.to_string(),
                }
            }
            Err(err) => {
                warn!(round, %mutation, error = %err, "chaos round failed");
                Round::Failed {
                    mutation,
                    message: err.to_string(),
                }
            }
        };
        debug!(round, ?outcome, "chaos round");
        report.record(outcome);
    }

    let message = format!(
        "chaos: {} applied, {} skipped, {} failed; {} rows x {} columns",
        report.applied(),
        report.skipped(),
        report.failed(),
        working.row_count(),
        working.column_count()
    );
    Ok(Applied::replacing(
        Success::with_payload(message, Payload::Chaos(report)),
        working,
    ))
}

/// Applies one mutation. Returns a skip reason if it cannot apply.
fn mutate(
    table: &mut Table,
    mutation: Mutation,
    rng: &mut ChaCha8Rng,
    display: &dyn DisplayProvider,
) -> Result<Option<&'static str>> {
    let rows = table.row_count();
    let columns = table.column_count();
    let marker = Value::from(MARKER);

    match mutation {
        Mutation::ShowGoat => {
            if let Err(err) = display.show(GOAT_ARTIFACT) {
                warn!(error = %err, "goat artifact unavailable, using banner");
                display.print(GOAT_BANNER);
            }
        }
        Mutation::GoatBanner => display.print(GOAT_BANNER),
        _ if columns == 0 => return Ok(Some("table has no columns")),
        Mutation::RenameColumns => table.rename_columns(fresh_names(columns, rng)?)?,
        Mutation::ReverseColumns => table.reverse_columns(),
        _ if rows == 0 => return Ok(Some("table has no rows")),
        Mutation::ReplaceCell => {
            let row = rng.gen_range(0..rows);
            let column = rng.gen_range(0..columns);
            table.set_cell(row, column, marker)?;
        }
        Mutation::ShuffleRows => {
            let mut order: Vec<usize> = (0..rows).collect();
            order.shuffle(rng);
            *table = table.select_rows(&order)?;
        }
        Mutation::DeleteRow => table.remove_row(rng.gen_range(0..rows))?,
        Mutation::DuplicateRow => table.duplicate_row(rng.gen_range(0..rows))?,
        Mutation::FillMarker => table.fill(&marker),
    }
    Ok(None)
}

/// Draws `count` distinct `col_NNNN` names.
fn fresh_names(count: usize, rng: &mut ChaCha8Rng) -> Result<Vec<String>> {
    const LOW: u32 = 1000;
    const HIGH: u32 = 9999;
    if count > (HIGH - LOW + 1) as usize {
        return Err(Error::internal(format!(
            "cannot draw {count} distinct column names"
        )));
    }
    let mut seen = HashSet::with_capacity(count);
    let mut names = Vec::with_capacity(count);
    while names.len() < count {
        let n = rng.gen_range(LOW..=HIGH);
        if seen.insert(n) {
            names.push(format!("col_{n}"));
        }
    }
    Ok(names)
}
