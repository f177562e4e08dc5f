//! Runtime configuration and command-line parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use puma_engine::EngineConfig;

/// Command-line arguments of the `puma` binary.
#[derive(Parser, Debug, Clone)]
#[command(name = "puma")]
#[command(about = "PUMA - a tiny command language for poking at tables")]
#[command(version)]
pub struct Cli {
    /// Script files to run before the interactive prompt, one statement per line
    pub files: Vec<PathBuf>,

    /// Run the script files and exit without starting the prompt
    #[arg(short, long)]
    pub batch: bool,

    /// Seed for sampling, chaos and farewells (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory holding display artifacts such as cabra.txt
    #[arg(long, default_value = "resources")]
    pub resources: PathBuf,

    /// Approve large chaos batches without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Print one JSON report per statement instead of text
    #[arg(long)]
    pub json: bool,

    /// Log engine decisions to stderr (same as PUMA_LOG=debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Wall-clock budget of Football, in seconds (1 to 86400)
    #[arg(
        long,
        value_name = "SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..=86_400)
    )]
    pub timed_budget: u64,
}

/// Everything the runtime needs to start a session.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Script files to run first.
    pub files: Vec<PathBuf>,

    /// Exit after the script files.
    pub batch: bool,

    /// Generator seed; entropy when `None`.
    pub seed: Option<u64>,

    /// Directory of display artifacts.
    pub resources_dir: PathBuf,

    /// Approve large chaos batches without asking.
    pub assume_yes: bool,

    /// Machine-readable reports.
    pub json_output: bool,

    /// Debug logging.
    pub verbose: bool,

    /// Engine tunables.
    pub engine: EngineConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            batch: false,
            seed: None,
            resources_dir: PathBuf::from("resources"),
            assume_yes: false,
            json_output: false,
            verbose: false,
            engine: EngineConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Builder method to set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method to set the artifact directory.
    #[must_use]
    pub fn with_resources_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resources_dir = dir.into();
        self
    }

    /// Builder method to enable/disable automatic chaos approval.
    #[must_use]
    pub fn with_assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Builder method to enable/disable JSON output.
    #[must_use]
    pub fn with_json_output(mut self, json: bool) -> Self {
        self.json_output = json;
        self
    }

    /// Builder method to set the engine configuration.
    #[must_use]
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// The log filter used when `PUMA_LOG` is not set.
    #[must_use]
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            files: cli.files,
            batch: cli.batch,
            seed: cli.seed,
            resources_dir: cli.resources,
            assume_yes: cli.yes,
            json_output: cli.json,
            verbose: cli.verbose,
            engine: EngineConfig::default()
                .with_timed_budget(Duration::from_secs(cli.timed_budget)),
        }
    }
}
