//! Session, evaluator, and command handlers for PUMA.
//!
//! This crate provides:
//! - [`Session`] - The working table, load gate and random generator
//! - [`Evaluator`] - Dispatch of parsed commands to handler groups
//! - [`handlers`] - File, transform, control-flow, chaos and terminal operations
//! - [`provider`] - Traits for the file, display and confirmation collaborators

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod evaluator;
pub mod handlers;
pub mod outcome;
pub mod provider;
pub mod session;

pub use config::EngineConfig;
pub use evaluator::Evaluator;
pub use handlers::chaos::{ChaosReport, KEPT_ROUNDS, Mutation, Round};
pub use outcome::{Applied, Outcome, Payload, Success, TableSummary};
pub use provider::{
    AssumeNo, AssumeYes, Confirm, DisplayProvider, ExportFormat, NoDisplay, NoPersistence,
    PersistenceProvider,
};
pub use session::Session;
