//! PUMA CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use puma_runtime::{Cli, Repl, RuntimeConfig, init_logging};

fn main() -> ExitCode {
    let config = RuntimeConfig::from(Cli::parse());
    init_logging(config.default_log_filter());

    match run(&config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

/// Runs the scripts, then the prompt unless in batch mode.
///
/// Returns false if a batch run had failing statements.
fn run(config: &RuntimeConfig) -> Result<bool, Box<dyn std::error::Error>> {
    let mut repl = Repl::new(config)?;

    let mut failures = 0;
    for file in &config.files {
        failures += repl.eval_file(file)?;
        if repl.is_finished() {
            return Ok(failures == 0);
        }
    }

    if config.batch {
        return Ok(failures == 0);
    }

    // Scripts already set the scene; skip the banner after them
    if !config.files.is_empty() {
        repl = repl.without_banner();
    }
    repl.run()?;
    Ok(true)
}
