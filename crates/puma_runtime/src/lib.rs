//! REPL, CLI, persistence and display for PUMA.
//!
//! This crate provides:
//! - [`Repl`] - Interactive read-eval-print loop and script runner
//! - [`RuntimeConfig`] and [`Cli`] - Command-line configuration
//! - [`CsvStore`], [`TerminalDisplay`], [`PromptConfirm`] - The engine's collaborators
//! - [`render`] - Text and JSON reports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod confirm;
pub mod display;
pub mod editor;
pub mod highlight;
pub mod persist;
pub mod render;
pub mod repl;

pub use config::{Cli, RuntimeConfig};
pub use confirm::PromptConfirm;
pub use display::TerminalDisplay;
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use persist::CsvStore;
pub use render::Report;
pub use repl::Repl;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "PUMA_LOG";

/// Installs the stderr log subscriber.
///
/// `PUMA_LOG` wins when set; otherwise `default_filter` applies. Calling it
/// twice is harmless.
pub fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
